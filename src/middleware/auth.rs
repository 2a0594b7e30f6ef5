//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{error::AppError, services::AuthService, state::AppState};

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(auth_header) = auth_header else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        debug!(path = %path, "Auth failed: Invalid Authorization format (expected 'Bearer <token>')");
        return Err(AppError::Unauthorized);
    };

    let claims = AuthService::verify_token(token, &state.config().jwt.secret).map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
        e
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        debug!(path = %path, sub = %claims.sub, error = ?e, "Auth failed: Invalid user ID in token");
        AppError::InvalidToken
    })?;

    let user = AuthenticatedUser {
        id: user_id,
        username: claims.username,
    };

    debug!(path = %path, user_id = %user.id, username = %user.username, "User authenticated");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
