//! Authentication handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    handlers::envelope::ApiResponse,
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, RegisterRequest},
    response::{AuthResponse, CurrentUserResponse, RegisterResponse},
};

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RegisterResponse>>)> {
    payload.validate()?;

    let user = AuthService::register(
        state.db(),
        &payload.username,
        &payload.email,
        &payload.password,
    )
    .await?;

    let response = ApiResponse::with_message(
        "User registered successfully",
        RegisterResponse { user: user.into() },
    );

    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with username/email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    payload.validate()?;

    let (user, token, expires_in) = AuthService::login(
        state.db(),
        &state.config().jwt,
        &payload.identifier,
        &payload.password,
    )
    .await?;

    Ok(Json(ApiResponse::ok(AuthResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in,
        user: user.into(),
    })))
}

/// Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<CurrentUserResponse>>> {
    let user = AuthService::get_user_by_id(state.db(), &auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::ok(CurrentUserResponse {
        user: user.into(),
    })))
}
