//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration, login, and the token-guarded
//! user endpoints. They are designed to be integrated into the main Axum
//! router.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
        .route("/users", get(list_users).layer(middleware::from_fn(jwt_auth)))
        .route(
            "/users/{id}",
            delete(delete_user).layer(middleware::from_fn(jwt_auth)),
        )
}
