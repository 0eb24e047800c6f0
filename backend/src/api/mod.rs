//! HTTP API surface shared between routers.

pub mod common;
