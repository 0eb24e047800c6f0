//! Core business logic for the authentication system.
//!
//! Composes the user service (credential checks) with the token issuer
//! (token minting). Authentication and issuance stay separate operations;
//! `login` is the one place that chains them.

use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::UserStore;
use crate::services::user_service::UserService;
use crate::utils::jwt::{TOKEN_TTL_SECONDS, TokenIssuer};
use std::sync::Arc;
use validator::Validate;

/// Authentication service handling registration, login, and token issuance
pub struct AuthService {
    user_service: UserService,
    issuer: Arc<TokenIssuer>,
}

impl AuthService {
    /// Create a new AuthService instance.
    ///
    /// The token issuer is constructed once at startup and shared; its
    /// settings have already been validated by that point.
    pub fn new(store: Arc<dyn UserStore>, issuer: Arc<TokenIssuer>) -> Self {
        AuthService {
            user_service: UserService::new(store),
            issuer,
        }
    }

    /// Register a new user.
    ///
    /// The returned [`UserInfo`] carries no password hash; the stored record
    /// keeps the hash internally.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserInfo> {
        validate_request(&request)?;

        let user = self
            .user_service
            .create_user(&request.username, &request.password)
            .await?;

        Ok(UserInfo::from(&user))
    }

    /// Authenticate a user and issue a signed token.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        validate_request(&request)?;

        let user = self
            .user_service
            .authenticate_user(&request.username, &request.password)
            .await?;

        let access_token = self.issuer.issue(&user)?;

        Ok(LoginResponse {
            access_token,
            user: UserInfo::from(&user),
            expires_in: TOKEN_TTL_SECONDS as u64,
        })
    }

    /// List all registered users.
    pub async fn list_users(&self) -> ServiceResult<Vec<UserInfo>> {
        let users = self.user_service.list_users().await?;
        Ok(users.iter().map(UserInfo::from).collect())
    }

    /// Delete a user by id.
    pub async fn delete_user(&self, id: i64) -> ServiceResult<()> {
        self.user_service.delete_user(id).await
    }
}

/// Collects validator errors into a single validation message.
fn validate_request<T: Validate>(request: &T) -> ServiceResult<()> {
    if let Err(validation_errors) = request.validate() {
        let error_messages: Vec<String> = validation_errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    format!(
                        "{}: {}",
                        field,
                        error.message.as_ref().unwrap_or(&"Invalid value".into())
                    )
                })
            })
            .collect();
        return Err(ServiceError::validation(error_messages.join(", ")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtSettings;
    use crate::repositories::testing::MemoryUserStore;

    fn auth_service() -> (AuthService, Arc<TokenIssuer>) {
        let issuer = Arc::new(
            TokenIssuer::new(&JwtSettings {
                key: "0123456789abcdef0123456789abcdef".to_string(),
                issuer: "app".to_string(),
            })
            .unwrap(),
        );
        let service = AuthService::new(Arc::new(MemoryUserStore::new()), issuer.clone());
        (service, issuer)
    }

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login_flow() {
        let (service, issuer) = auth_service();

        let created = service.register(register("alice", "Secr3tPass!")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.username, "alice");

        let conflict = service.register(register("alice", "Other!")).await;
        assert!(matches!(
            conflict,
            Err(ServiceError::AlreadyExists { .. })
        ));

        let response = service.login(login("alice", "Secr3tPass!")).await.unwrap();
        assert_eq!(response.user.id, 1);
        assert_eq!(response.expires_in, TOKEN_TTL_SECONDS as u64);
        assert_eq!(response.access_token.split('.').count(), 3);

        // Issued token verifies and names the authenticated user
        let claims = issuer.validate_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.name, "alice");
    }

    #[tokio::test]
    async fn test_login_failures_share_one_error_shape() {
        let (service, _) = auth_service();
        service.register(register("alice", "Secr3tPass!")).await.unwrap();

        let wrong_password = service.login(login("alice", "wrong")).await;
        let unknown_user = service.login(login("bob", "x")).await;

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
    async fn test_register_rejects_missing_fields() {
        let (service, _) = auth_service();

        let result = service.register(register("", "")).await;
        assert!(matches!(result, Err(ServiceError::Validation { .. })));
    }
}
