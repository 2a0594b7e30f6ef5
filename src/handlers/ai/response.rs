//! AI response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Problem;

/// Escalating hint response
#[derive(Debug, Serialize)]
pub struct HintResponse {
    pub hint: String,
    pub hint_level: u32,
    pub max_hints: u32,
    pub problem_title: String,
    pub problem_difficulty: String,
}

/// Code debugging response
#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub analysis: String,
    pub problem_title: String,
}

/// Buffered solution explanation response
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
    pub code: String,
    pub language: String,
    pub problem_title: String,
}

/// Learning statistics attached to a recommendation
#[derive(Debug, Serialize)]
pub struct RecommendAnalysis {
    pub total_solved: usize,
    pub success_rate: u32,
    pub strong_tags: Vec<String>,
    pub suggested_difficulty: String,
    /// Model-written encouragement over the precomputed stats
    pub message: String,
}

/// Problem recommendation response
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Problem>,
    pub analysis: RecommendAnalysis,
}

/// Mentor chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub problem_title: String,
    pub timestamp: DateTime<Utc>,
}
