//! AI tutoring handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// AI tutoring routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hint/{problem_id}", get(handler::get_hint))
        .route("/debug", post(handler::debug_code))
        .route("/explain/{problem_id}", get(handler::explain_solution))
        .route(
            "/explain/{problem_id}/stream",
            get(handler::explain_solution_stream),
        )
        .route("/recommend", get(handler::recommend_problems))
        .route("/chat", post(handler::chat))
}
