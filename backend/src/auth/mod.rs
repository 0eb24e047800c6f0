//! Authentication module for managing user accounts and access control.
//!
//! This module provides the public interface for user authentication-related
//! functionalities such as login, registration, token issuance, and the
//! bearer-token middleware.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
