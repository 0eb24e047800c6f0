//! Persistence models for the user store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user as stored in the database.
///
/// `password_hash` only ever holds output of the password hasher; a raw
/// password must never reach this struct.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Store-assigned identifier, immutable once created.
    pub id: i64,
    /// Unique, case-sensitive username.
    pub username: String,
    /// bcrypt hash of the user's password.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new user. The store assigns the id.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
