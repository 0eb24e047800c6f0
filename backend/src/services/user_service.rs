//! User business logic service.
//!
//! Orchestrates the credential store and password hasher for registration
//! and credential verification. Holds no mutable state of its own; the store
//! is the only shared resource.

use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::{StoreError, UserStore};
use crate::utils::password;
use std::sync::Arc;

pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Creates a new user with a freshly hashed password.
    ///
    /// # Errors
    /// - `Validation` for empty or whitespace-only username/password
    /// - `AlreadyExists` when the username is taken, including when a
    ///   concurrent registration wins the insert race
    /// - `InternalError` when the insert itself fails; no partial record
    ///   is left behind
    pub async fn create_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(ServiceError::validation(
                "Username and password are required",
            ));
        }

        // Pre-check for a friendly conflict error; the unique index still
        // backstops concurrent registrations.
        let existing = self
            .store
            .find_by_username(username)
            .await
            .map_err(|e| ServiceError::Store { source: e.into() })?;
        if existing.is_some() {
            return Err(ServiceError::already_exists("User", username));
        }

        let password_hash = password::hash_password(password)?;

        let user = self
            .store
            .insert(CreateUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateUsername => ServiceError::already_exists("User", username),
                StoreError::Backend(source) => {
                    tracing::error!(error = %source, "user insert failed");
                    ServiceError::internal_error("Could not create user")
                }
            })?;

        Ok(user)
    }

    /// Verifies a username/password pair and returns the matching user.
    ///
    /// Unknown user, wrong password, and a failing store all surface as the
    /// one undifferentiated `AuthenticationFailed`. A store failure is
    /// logged here and fails closed; it must never fail open into
    /// "authenticated".
    pub async fn authenticate_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let user = match self.store.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(ServiceError::AuthenticationFailed),
            Err(e) => {
                tracing::error!(error = %e, "user lookup failed during authentication");
                return Err(ServiceError::AuthenticationFailed);
            }
        };

        if !password::verify_password(password, &user.password_hash) {
            return Err(ServiceError::AuthenticationFailed);
        }

        Ok(user)
    }

    /// Deletes a user by id.
    pub async fn delete_user(&self, id: i64) -> ServiceResult<()> {
        let deleted = self
            .store
            .delete(id)
            .await
            .map_err(|e| ServiceError::Store { source: e.into() })?;

        if !deleted {
            return Err(ServiceError::not_found("User", id.to_string()));
        }

        Ok(())
    }

    /// Returns a point-in-time snapshot of all users.
    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        let users = self
            .store
            .list_all()
            .await
            .map_err(|e| ServiceError::Store { source: e.into() })?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::testing::{BrokenUserStore, MemoryUserStore};

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserStore::new()))
    }

    #[tokio::test]
    async fn test_register_assigns_id_and_hashes_password() {
        let service = service();

        let user = service.create_user("alice", "Secr3tPass!").await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "Secr3tPass!");
        assert!(password::verify_password("Secr3tPass!", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_conflicts() {
        let service = service();

        service.create_user("alice", "Secr3tPass!").await.unwrap();
        let result = service.create_user("alice", "Other!").await;
        assert!(matches!(
            result,
            Err(ServiceError::AlreadyExists { .. })
        ));

        // Exactly one record survives
        let users = service.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "alice");
    }

    #[tokio::test]
    async fn test_register_rejects_blank_input() {
        let service = service();

        for (username, password) in [("", "pw"), ("   ", "pw"), ("alice", ""), ("alice", "  ")] {
            let result = service.create_user(username, password).await;
            assert!(matches!(result, Err(ServiceError::Validation { .. })));
        }
        assert!(service.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_happy_path() {
        let service = service();
        service.create_user("alice", "Secr3tPass!").await.unwrap();

        let user = service
            .authenticate_user("alice", "Secr3tPass!")
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let service = service();
        service.create_user("alice", "Secr3tPass!").await.unwrap();

        let wrong_password = service.authenticate_user("alice", "wrong").await;
        let unknown_user = service.authenticate_user("bob", "x").await;

        assert!(matches!(
            wrong_password,
            Err(ServiceError::AuthenticationFailed)
        ));
        assert!(matches!(
            unknown_user,
            Err(ServiceError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_fails_closed_on_broken_store() {
        let service = UserService::new(Arc::new(BrokenUserStore));

        let result = service.authenticate_user("alice", "Secr3tPass!").await;
        assert!(matches!(result, Err(ServiceError::AuthenticationFailed)));
    }

    #[tokio::test]
    async fn test_register_surfaces_broken_store() {
        let service = UserService::new(Arc::new(BrokenUserStore));

        let result = service.create_user("alice", "Secr3tPass!").await;
        assert!(matches!(result, Err(ServiceError::Store { .. })));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = service();
        let user = service.create_user("alice", "Secr3tPass!").await.unwrap();

        service.delete_user(user.id).await.unwrap();
        assert!(service.list_users().await.unwrap().is_empty());

        let result = service.delete_user(user.id).await;
        assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    }
}
