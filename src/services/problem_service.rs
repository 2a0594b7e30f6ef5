//! Problem service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::difficulties,
    db::repositories::ProblemRepository,
    error::{AppError, AppResult},
    handlers::envelope::page_offset,
    handlers::problems::request::CreateProblemRequest,
    models::Problem,
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Create a new problem
    pub async fn create_problem(pool: &PgPool, payload: CreateProblemRequest) -> AppResult<Problem> {
        let difficulty = payload
            .difficulty
            .unwrap_or_else(|| difficulties::EASY.to_string());

        if !difficulties::ALL.contains(&difficulty.as_str()) {
            return Err(AppError::Validation(format!(
                "Invalid difficulty: {}. Supported: {:?}",
                difficulty,
                difficulties::ALL
            )));
        }

        // Reference solutions are keyed by uppercase language name
        let reference_solutions = payload
            .reference_solutions
            .map(|map| {
                map.into_iter()
                    .map(|(language, source)| (language.to_uppercase(), source.into()))
                    .collect::<serde_json::Map<String, serde_json::Value>>()
            })
            .unwrap_or_default();

        ProblemRepository::create(
            pool,
            &payload.title,
            &payload.description,
            &difficulty,
            &payload.tags.unwrap_or_default(),
            &serde_json::Value::Object(reference_solutions),
        )
        .await
    }

    /// Get a problem by ID
    pub async fn get_problem(pool: &PgPool, id: &Uuid) -> AppResult<Problem> {
        ProblemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
    }

    /// List problems with pagination and filters
    pub async fn list_problems(
        pool: &PgPool,
        page: u32,
        per_page: u32,
        difficulty: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<(Vec<Problem>, i64)> {
        let offset = page_offset(page, per_page);
        ProblemRepository::list(pool, offset, per_page as i64, difficulty, tag).await
    }
}
