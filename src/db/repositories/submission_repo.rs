//! Submission repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Submission, TestCaseResult},
};

/// All JSON-serialized per-test-case columns of a new submission row
pub struct NewSubmission<'a> {
    pub user_id: &'a Uuid,
    pub problem_id: &'a Uuid,
    pub source_code: &'a str,
    pub language: &'a str,
    pub stdin: String,
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub memory: String,
    pub time: String,
    pub status: &'a str,
}

/// One test case row to attach to a submission
pub struct NewTestCaseResult {
    pub test_case: i32,
    pub passed: bool,
    pub stdout: String,
    pub expected: String,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: String,
    pub memory: Option<String>,
    pub time: Option<String>,
}

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new submission row
    pub async fn create(pool: &PgPool, new: NewSubmission<'_>) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                user_id, problem_id, source_code, language,
                stdin, stdout, stderr, compile_output, memory, time, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(new.problem_id)
        .bind(new.source_code)
        .bind(new.language)
        .bind(&new.stdin)
        .bind(&new.stdout)
        .bind(&new.stderr)
        .bind(&new.compile_output)
        .bind(&new.memory)
        .bind(&new.time)
        .bind(new.status)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Batch-insert the per-test-case results for a submission
    pub async fn create_test_case_results(
        pool: &PgPool,
        submission_id: &Uuid,
        results: &[NewTestCaseResult],
    ) -> AppResult<()> {
        for result in results {
            sqlx::query(
                r#"
                INSERT INTO test_case_results (
                    submission_id, test_case, passed, stdout, expected,
                    stderr, compile_output, status, memory, time
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(submission_id)
            .bind(result.test_case)
            .bind(result.passed)
            .bind(&result.stdout)
            .bind(&result.expected)
            .bind(&result.stderr)
            .bind(&result.compile_output)
            .bind(&result.status)
            .bind(&result.memory)
            .bind(&result.time)
            .execute(pool)
            .await?;
        }

        Ok(())
    }

    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(submission)
    }

    /// Test case results for a submission, in test order
    pub async fn test_case_results(
        pool: &PgPool,
        submission_id: &Uuid,
    ) -> AppResult<Vec<TestCaseResult>> {
        let results = sqlx::query_as::<_, TestCaseResult>(
            r#"
            SELECT * FROM test_case_results
            WHERE submission_id = $1
            ORDER BY test_case
            "#,
        )
        .bind(submission_id)
        .fetch_all(pool)
        .await?;

        Ok(results)
    }

    /// List a user's submissions, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok((submissions, total))
    }

    /// Statuses of a user's most recent submissions, newest first
    pub async fn recent_statuses(
        pool: &PgPool,
        user_id: &Uuid,
        limit: i64,
    ) -> AppResult<Vec<String>> {
        let statuses: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT status FROM submissions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(statuses)
    }

    /// Number of submissions a user has made for one problem
    pub async fn count_for_user_problem(
        pool: &PgPool,
        user_id: &Uuid,
        problem_id: &Uuid,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM submissions WHERE user_id = $1 AND problem_id = $2"#,
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::db::{create_problem, create_user, test_pool};

    fn test_case_result(test_case: i32, passed: bool) -> NewTestCaseResult {
        NewTestCaseResult {
            test_case,
            passed,
            stdout: format!("out-{test_case}"),
            expected: format!("out-{test_case}"),
            stderr: None,
            compile_output: None,
            status: if passed { "Accepted" } else { "Wrong Answer" }.to_string(),
            memory: Some("1024".to_string()),
            time: Some("0.01".to_string()),
        }
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_one_result_row_per_test_case() {
        let pool = test_pool().await;
        let user = create_user(&pool).await;
        let problem = create_problem(&pool).await;

        let submission = SubmissionRepository::create(
            &pool,
            NewSubmission {
                user_id: &user.id,
                problem_id: &problem.id,
                source_code: "print(1)",
                language: "Python",
                stdin: "[]".to_string(),
                stdout: "[]".to_string(),
                stderr: "[]".to_string(),
                compile_output: "[]".to_string(),
                memory: "[]".to_string(),
                time: "[]".to_string(),
                status: "Wrong Answer",
            },
        )
        .await
        .unwrap();

        let results = vec![
            test_case_result(1, true),
            test_case_result(2, false),
            test_case_result(3, true),
        ];
        SubmissionRepository::create_test_case_results(&pool, &submission.id, &results)
            .await
            .unwrap();

        let stored = SubmissionRepository::test_case_results(&pool, &submission.id)
            .await
            .unwrap();

        assert_eq!(stored.len(), results.len());
        for (row, expected) in stored.iter().zip(&results) {
            assert_eq!(row.test_case, expected.test_case);
            assert_eq!(row.passed, expected.passed);
        }
    }
}
