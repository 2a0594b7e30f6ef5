//! Problem handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::envelope::{page_params, ApiResponse, Pagination},
    models::Problem,
    services::ProblemService,
    state::AppState,
};

use super::{
    request::{CreateProblemRequest, ProblemListQuery},
    response::{ProblemDetailResponse, ProblemListResponse},
};

/// Create a new problem
pub async fn create_problem(
    State(state): State<AppState>,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Problem>>)> {
    payload.validate()?;

    let problem = ProblemService::create_problem(state.db(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Problem created", problem)),
    ))
}

/// Get a single problem with its available solution languages
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProblemDetailResponse>>> {
    let problem = ProblemService::get_problem(state.db(), &id).await?;
    let solution_languages = problem.solution_languages();

    Ok(Json(ApiResponse::ok(ProblemDetailResponse {
        problem,
        solution_languages,
    })))
}

/// List problems with pagination and filters
pub async fn list_problems(
    State(state): State<AppState>,
    Query(query): Query<ProblemListQuery>,
) -> AppResult<Json<ApiResponse<ProblemListResponse>>> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let (problems, total) = ProblemService::list_problems(
        state.db(),
        page,
        per_page,
        query.difficulty.as_deref(),
        query.tag.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::ok(ProblemListResponse {
        problems,
        pagination: Pagination {
            page,
            per_page,
            total,
        },
    })))
}
