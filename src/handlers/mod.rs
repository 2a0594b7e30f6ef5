//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod ai;
pub mod auth;
pub mod envelope;
pub mod execute;
pub mod health;
pub mod problems;
pub mod submissions;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let authed = middleware::from_fn_with_state(state.clone(), auth_middleware);

    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes(state))
        .nest("/problems", problems::routes().route_layer(authed.clone()))
        .nest("/execute-code", execute::routes().route_layer(authed.clone()))
        .nest("/submissions", submissions::routes().route_layer(authed.clone()))
        .nest("/ai", ai::routes().route_layer(authed))
}
