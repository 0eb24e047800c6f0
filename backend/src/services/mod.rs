//! Business logic services for the backend.

pub mod user_service;
