//! Execution request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_SOURCE_CODE_SIZE;

/// Code execution request: one source program run against parallel
/// stdin/expected-output fixture arrays
#[derive(Debug, Deserialize, Validate)]
pub struct ExecuteCodeRequest {
    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub source_code: String,

    /// Judge0 language identifier
    pub language_id: i64,

    pub stdin: Vec<String>,

    pub expected_outputs: Vec<String>,

    pub problem_id: Uuid,
}
