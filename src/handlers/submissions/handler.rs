//! Submission handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::{
        envelope::{page_params, ApiResponse, Pagination},
        execute::response::SubmissionDetail,
    },
    middleware::auth::AuthenticatedUser,
    services::SubmissionService,
    state::AppState,
};

use super::{request::SubmissionListQuery, response::SubmissionListResponse};

/// Get one of the user's submissions with its test case results
pub async fn get_submission(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SubmissionDetail>>> {
    let detail = SubmissionService::get_submission(state.db(), &auth_user.id, &id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// List the user's submissions
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<SubmissionListQuery>,
) -> AppResult<Json<ApiResponse<SubmissionListResponse>>> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let (submissions, total) =
        SubmissionService::list_submissions(state.db(), &auth_user.id, page, per_page).await?;

    Ok(Json(ApiResponse::ok(SubmissionListResponse {
        submissions,
        pagination: Pagination {
            page,
            per_page,
            total,
        },
    })))
}
