//! Problem repository, including solved markers

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Problem};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Create a new problem
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        difficulty: &str,
        tags: &[String],
        reference_solutions: &serde_json::Value,
    ) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (title, description, difficulty, tags, reference_solutions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(tags)
        .bind(reference_solutions)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// List problems with pagination and optional filters
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        difficulty: Option<&str>,
        tag: Option<&str>,
    ) -> AppResult<(Vec<Problem>, i64)> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT * FROM problems
            WHERE
                ($1::text IS NULL OR difficulty = $1)
                AND ($2::text IS NULL OR $2 = ANY(tags))
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(difficulty)
        .bind(tag)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM problems
            WHERE
                ($1::text IS NULL OR difficulty = $1)
                AND ($2::text IS NULL OR $2 = ANY(tags))
            "#,
        )
        .bind(difficulty)
        .bind(tag)
        .fetch_one(pool)
        .await?;

        Ok((problems, total))
    }

    /// Check whether a problem exists
    pub async fn exists(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM problems WHERE id = $1)"#)
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Idempotently record a first success for (user, problem).
    /// A second call for the same pair leaves exactly one row.
    pub async fn mark_solved(pool: &PgPool, user_id: &Uuid, problem_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO problems_solved (user_id, problem_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, problem_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// All problems a user has solved
    pub async fn solved_by_user(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT p.* FROM problems p
            JOIN problems_solved ps ON ps.problem_id = p.id
            WHERE ps.user_id = $1
            ORDER BY ps.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// Problems at a difficulty the user has not solved yet
    pub async fn unsolved_at_difficulty(
        pool: &PgPool,
        user_id: &Uuid,
        difficulty: &str,
        limit: i64,
    ) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT * FROM problems
            WHERE difficulty = $2
              AND id NOT IN (SELECT problem_id FROM problems_solved WHERE user_id = $1)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(difficulty)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::db::{create_problem, create_user, test_pool};

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_mark_solved_twice_leaves_one_row() {
        let pool = test_pool().await;
        let user = create_user(&pool).await;
        let problem = create_problem(&pool).await;

        ProblemRepository::mark_solved(&pool, &user.id, &problem.id)
            .await
            .unwrap();
        ProblemRepository::mark_solved(&pool, &user.id, &problem.id)
            .await
            .unwrap();

        let rows: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM problems_solved WHERE user_id = $1 AND problem_id = $2"#,
        )
        .bind(user.id)
        .bind(problem.id)
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(rows, 1);

        let solved = ProblemRepository::solved_by_user(&pool, &user.id).await.unwrap();
        assert_eq!(solved.len(), 1);
        assert_eq!(solved[0].id, problem.id);
    }
}
