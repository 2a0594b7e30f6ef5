//! Submission service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::SubmissionRepository,
    error::{AppError, AppResult},
    handlers::envelope::page_offset,
    handlers::execute::response::SubmissionDetail,
    models::Submission,
};

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// Get one of the user's submissions, with its test case results
    pub async fn get_submission(
        pool: &PgPool,
        user_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<SubmissionDetail> {
        let submission = SubmissionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        // Users can only view their own submissions
        if submission.user_id != *user_id {
            return Err(AppError::NotFound("Submission not found".to_string()));
        }

        let test_cases = SubmissionRepository::test_case_results(pool, id).await?;

        Ok(SubmissionDetail {
            submission,
            test_cases,
        })
    }

    /// List the user's submissions
    pub async fn list_submissions(
        pool: &PgPool,
        user_id: &Uuid,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let offset = page_offset(page, per_page);
        SubmissionRepository::list_for_user(pool, user_id, offset, per_page as i64).await
    }
}
