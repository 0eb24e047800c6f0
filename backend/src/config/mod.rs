//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, and JWT signing settings.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub server_port: u16,
}

/// Immutable token-signing settings handed to the token issuer at startup.
///
/// Constructed once from [`Config`]; the issuer validates the key length and
/// issuer string at construction time, before any request is served.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// Symmetric signing secret, at least 32 bytes.
    pub key: String,
    /// Used as both the `iss` and `aud` claim of issued tokens.
    pub issuer: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

        let jwt_issuer = env::var("JWT_ISSUER").context("JWT_ISSUER not set")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_issuer,
            server_port,
        })
    }

    /// Returns the token-signing settings derived from this configuration.
    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings {
            key: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
        }
    }
}
