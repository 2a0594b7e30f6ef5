//! AI tutoring service
//!
//! Each use case loads the problem context, assembles its prompt, and calls
//! the gateway on the appropriate model tier. The streaming explanation
//! returns relay frames for the handler to wrap as an SSE response.

use chrono::Utc;
use futures::Stream;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    ai::{
        gateway::{GeminiClient, ModelTier},
        insights, prompts,
        stream::{relay_frames, RelayFrame},
        ConversationTurn,
    },
    constants::{MAX_HINT_LEVEL, RECENT_SUBMISSION_WINDOW, RECOMMENDATION_LIMIT},
    db::repositories::{ProblemRepository, SubmissionRepository},
    error::{AppError, AppResult},
    handlers::ai::response::{
        ChatResponse, DebugResponse, ExplainResponse, HintResponse, RecommendAnalysis,
        RecommendResponse,
    },
    models::Problem,
};

/// AI tutoring service
pub struct AiService;

impl AiService {
    async fn load_problem(pool: &PgPool, problem_id: &Uuid) -> AppResult<Problem> {
        ProblemRepository::find_by_id(pool, problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
    }

    /// Generate an escalating hint for a problem
    pub async fn generate_hint(
        pool: &PgPool,
        gemini: &GeminiClient,
        user_id: &Uuid,
        problem_id: &Uuid,
        level: u32,
    ) -> AppResult<HintResponse> {
        let problem = Self::load_problem(pool, problem_id).await?;
        let attempts =
            SubmissionRepository::count_for_user_problem(pool, user_id, problem_id).await?;

        let level = prompts::clamp_hint_level(level);
        let prompt = prompts::hint_prompt(&problem, attempts as usize, level);
        let hint = gemini.generate(&prompt, ModelTier::Flash).await?;

        info!(%problem_id, level, "Hint generated");

        Ok(HintResponse {
            hint,
            hint_level: level,
            max_hints: MAX_HINT_LEVEL,
            problem_title: problem.title,
            problem_difficulty: problem.difficulty,
        })
    }

    /// Analyze failing user code without revealing the solution
    pub async fn debug_code(
        pool: &PgPool,
        gemini: &GeminiClient,
        problem_id: &Uuid,
        code: &str,
        language: &str,
        error_message: Option<&str>,
    ) -> AppResult<DebugResponse> {
        let problem = Self::load_problem(pool, problem_id).await?;

        let prompt = prompts::debug_prompt(&problem, code, language, error_message);
        let analysis = gemini.generate(&prompt, ModelTier::Flash).await?;

        Ok(DebugResponse {
            analysis,
            problem_title: problem.title,
        })
    }

    /// Explain the reference solution (buffered)
    pub async fn explain_solution(
        pool: &PgPool,
        gemini: &GeminiClient,
        problem_id: &Uuid,
        language: &str,
    ) -> AppResult<ExplainResponse> {
        let problem = Self::load_problem(pool, problem_id).await?;
        let (normalized_language, solution) = prompts::find_reference_solution(&problem, language)?;

        let prompt = prompts::explain_prompt(&problem, &normalized_language, &solution);
        let explanation = gemini.generate(&prompt, ModelTier::Pro).await?;

        info!(%problem_id, language = %normalized_language, "Explanation generated");

        Ok(ExplainResponse {
            explanation,
            code: solution,
            language: normalized_language,
            problem_title: problem.title,
        })
    }

    /// Explain the reference solution as a live stream of relay frames
    pub async fn explain_solution_stream(
        pool: &PgPool,
        gemini: &GeminiClient,
        problem_id: &Uuid,
        language: &str,
    ) -> AppResult<impl Stream<Item = RelayFrame> + Send + use<>> {
        let problem = Self::load_problem(pool, problem_id).await?;
        let (normalized_language, solution) = prompts::find_reference_solution(&problem, language)?;

        let prompt = prompts::explain_prompt(&problem, &normalized_language, &solution);
        let upstream = gemini.generate_stream(&prompt, ModelTier::Pro).await?;

        Ok(relay_frames(upstream))
    }

    /// Recommend unsolved problems from solve-history heuristics
    pub async fn recommend_problems(
        pool: &PgPool,
        gemini: &GeminiClient,
        user_id: &Uuid,
    ) -> AppResult<RecommendResponse> {
        let solved = ProblemRepository::solved_by_user(pool, user_id).await?;
        let recent =
            SubmissionRepository::recent_statuses(pool, user_id, RECENT_SUBMISSION_WINDOW).await?;

        let stats = insights::build_stats(&solved, &recent);
        let recommendations = ProblemRepository::unsolved_at_difficulty(
            pool,
            user_id,
            &stats.suggested_difficulty,
            RECOMMENDATION_LIMIT,
        )
        .await?;

        info!(
            %user_id,
            total_solved = stats.total_solved,
            difficulty = %stats.suggested_difficulty,
            candidates = recommendations.len(),
            "Recommendations computed"
        );

        let prompt = prompts::recommend_prompt(&stats);
        let message = gemini.generate(&prompt, ModelTier::Flash).await?;

        Ok(RecommendResponse {
            recommendations,
            analysis: RecommendAnalysis {
                total_solved: stats.total_solved,
                success_rate: stats.success_rate,
                strong_tags: stats.strong_tags,
                suggested_difficulty: stats.suggested_difficulty,
                message,
            },
        })
    }

    /// One mentor chat turn grounded in the problem statement
    pub async fn chat(
        pool: &PgPool,
        gemini: &GeminiClient,
        problem_id: &Uuid,
        message: &str,
        history: &[ConversationTurn],
    ) -> AppResult<ChatResponse> {
        let problem = Self::load_problem(pool, problem_id).await?;

        let prompt = prompts::chat_prompt(&problem, history, message);
        let response = gemini.generate(&prompt, ModelTier::Flash).await?;

        Ok(ChatResponse {
            response,
            problem_title: problem.title,
            timestamp: Utc::now(),
        })
    }
}
