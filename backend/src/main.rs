//! Main entry point for the authentication service backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, constructs the token issuer from validated settings, and
//! registers all API routes and middleware.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use crate::auth::service::AuthService;
use crate::repositories::{UserStore, user_repository::SqliteUserStore};
use crate::utils::jwt::TokenIssuer;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;

    // Signing settings are validated here, once; a bad key or issuer must
    // stop the process before it serves any traffic.
    let issuer = Arc::new(TokenIssuer::new(&config.jwt_settings())?);

    let db = Database::new(&config).await?;
    db.migrate().await?;

    let store: Arc<dyn UserStore> = Arc::new(SqliteUserStore::new(db.pool().clone()));
    let auth_service = Arc::new(AuthService::new(store, issuer.clone()));

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/auth", auth::routes::auth_router())
        .layer(Extension(auth_service))
        .layer(Extension(issuer));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting auth server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Auth Backend",
            "version": "0.1.0"
        }),
        "Welcome to the Auth API",
    ))
}
