//! Middleware modules

pub mod auth;
pub mod logging;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use logging::logging_middleware;
