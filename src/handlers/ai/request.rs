//! AI request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    ai::ConversationTurn,
    constants::{MAX_CHAT_MESSAGE_LENGTH, MAX_SOURCE_CODE_SIZE},
};

/// Hint query parameters
#[derive(Debug, Deserialize, Default)]
pub struct HintQuery {
    /// Escalation level, clamped server-side to 1..=3
    pub level: Option<u32>,
}

/// Debugging request
#[derive(Debug, Deserialize, Validate)]
pub struct DebugRequest {
    pub problem_id: Uuid,

    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,

    #[validate(length(min = 1))]
    pub language: String,

    /// Runtime or compiler error text, if the user has one
    pub error: Option<String>,
}

/// Explanation query parameters
#[derive(Debug, Deserialize, Default)]
pub struct ExplainQuery {
    /// Reference solution language; defaults to JAVASCRIPT
    pub language: Option<String>,
}

/// Mentor chat request
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    pub problem_id: Uuid,

    #[validate(length(min = 1, max = MAX_CHAT_MESSAGE_LENGTH))]
    pub message: String,

    /// Prior turns, supplied by the client on every request
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}
