//! Persistence access for the application's entities.
//!
//! The user store is expressed as a trait so the service layer can run
//! against the SQLite-backed implementation in production and an in-memory
//! double in tests.

use crate::database::models::{CreateUser, User};
use async_trait::async_trait;
use thiserror::Error;

pub mod user_repository;

/// Errors surfaced by a [`UserStore`] implementation.
///
/// "Not found" is not an error; lookups return `Ok(None)` and deletes return
/// `Ok(false)` so callers can tell a missing record apart from a broken store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store's uniqueness guarantee rejected the insert. Returned even
    /// when two concurrent registrations race past the pre-insert check.
    #[error("duplicate username")]
    DuplicateUsername,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Contract the credential store must fulfil for the service layer.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by exact username.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Inserts a new user and returns it with its store-assigned id.
    async fn insert(&self, user: CreateUser) -> StoreResult<User>;

    /// Deletes a user by id. Returns `false` if no such user existed.
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Returns a point-in-time snapshot of all users.
    async fn list_all(&self) -> StoreResult<Vec<User>>;
}
