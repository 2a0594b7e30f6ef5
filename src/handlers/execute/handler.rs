//! Execution handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::envelope::ApiResponse,
    middleware::auth::AuthenticatedUser,
    services::ExecutionService,
    state::AppState,
};

use super::{request::ExecuteCodeRequest, response::SubmissionDetail};

/// Execute code against a problem's test cases
pub async fn execute_code(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<ExecuteCodeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SubmissionDetail>>)> {
    payload.validate()?;

    let detail = ExecutionService::execute(
        state.db(),
        state.judge(),
        &state.poller(),
        &auth_user.id,
        payload,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(detail)),
    ))
}
