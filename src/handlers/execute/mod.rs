//! Code execution handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Execution routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(handler::execute_code))
}
