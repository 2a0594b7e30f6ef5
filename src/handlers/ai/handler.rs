//! AI handler implementations

use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::DEFAULT_EXPLAIN_LANGUAGE,
    error::AppResult,
    handlers::envelope::ApiResponse,
    middleware::auth::AuthenticatedUser,
    services::AiService,
    state::AppState,
};

use super::{
    request::{ChatRequest, DebugRequest, ExplainQuery, HintQuery},
    response::{ChatResponse, DebugResponse, ExplainResponse, HintResponse, RecommendResponse},
};

/// Get an escalating hint for a problem
pub async fn get_hint(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
    Query(query): Query<HintQuery>,
) -> AppResult<Json<ApiResponse<HintResponse>>> {
    let hint = AiService::generate_hint(
        state.db(),
        state.gemini(),
        &auth_user.id,
        &problem_id,
        query.level.unwrap_or(1),
    )
    .await?;

    Ok(Json(ApiResponse::ok(hint)))
}

/// Analyze failing user code
pub async fn debug_code(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Json(payload): Json<DebugRequest>,
) -> AppResult<Json<ApiResponse<DebugResponse>>> {
    payload.validate()?;

    let analysis = AiService::debug_code(
        state.db(),
        state.gemini(),
        &payload.problem_id,
        &payload.code,
        &payload.language,
        payload.error.as_deref(),
    )
    .await?;

    Ok(Json(ApiResponse::ok(analysis)))
}

/// Explain a reference solution in one buffered response
pub async fn explain_solution(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
    Query(query): Query<ExplainQuery>,
) -> AppResult<Json<ApiResponse<ExplainResponse>>> {
    let language = query
        .language
        .as_deref()
        .unwrap_or(DEFAULT_EXPLAIN_LANGUAGE);

    let explanation =
        AiService::explain_solution(state.db(), state.gemini(), &problem_id, language).await?;

    Ok(Json(ApiResponse::ok(explanation)))
}

/// Explain a reference solution as a live SSE stream.
///
/// Errors raised before the upstream stream opens (missing problem, no
/// reference solution) come back as normal JSON error responses; failures
/// after that arrive in-band as `{"error": ...}` events.
pub async fn explain_solution_stream(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(problem_id): Path<Uuid>,
    Query(query): Query<ExplainQuery>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let language = query
        .language
        .as_deref()
        .unwrap_or(DEFAULT_EXPLAIN_LANGUAGE);

    let frames =
        AiService::explain_solution_stream(state.db(), state.gemini(), &problem_id, language)
            .await?;

    let events = frames.map(|frame| Ok(frame.into_event()));

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Recommend unsolved problems based on solve history
pub async fn recommend_problems(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<ApiResponse<RecommendResponse>>> {
    let recommendation =
        AiService::recommend_problems(state.db(), state.gemini(), &auth_user.id).await?;

    Ok(Json(ApiResponse::ok(recommendation)))
}

/// One mentor chat turn
pub async fn chat(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Json(payload): Json<ChatRequest>,
) -> AppResult<Json<ApiResponse<ChatResponse>>> {
    payload.validate()?;

    let reply = AiService::chat(
        state.db(),
        state.gemini(),
        &payload.problem_id,
        &payload.message,
        &payload.conversation_history,
    )
    .await?;

    Ok(Json(ApiResponse::ok(reply)))
}
