//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for registration and
//! login, parse request data, and interact with the `auth::service` for
//! core business logic.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::Json as ResponseJson,
};
use std::sync::Arc;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ResponseJson<UserInfo>, (StatusCode, String)> {
    match auth_service.register(payload).await {
        Ok(user) => Ok(ResponseJson(user)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    match auth_service.login(payload).await {
        Ok(response) => Ok(ResponseJson(response)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Get current user information from token claims
#[axum::debug_handler]
pub async fn me(
    Extension(claims): Extension<Claims>,
) -> Result<ResponseJson<UserInfo>, (StatusCode, String)> {
    let id = claims
        .user_id()
        .parse::<i64>()
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid token subject".to_string()))?;

    Ok(ResponseJson(UserInfo {
        id,
        username: claims.name,
    }))
}

/// List all registered users
#[axum::debug_handler]
pub async fn list_users(
    Extension(auth_service): Extension<Arc<AuthService>>,
) -> Result<ResponseJson<Vec<UserInfo>>, (StatusCode, String)> {
    match auth_service.list_users().await {
        Ok(users) => Ok(ResponseJson(users)),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Delete a user by id
#[axum::debug_handler]
pub async fn delete_user(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    match auth_service.delete_user(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(error) => Err(service_error_to_http(error)),
    }
}
