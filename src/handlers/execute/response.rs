//! Execution response DTOs

use serde::Serialize;

use crate::models::{Submission, TestCaseResult};

/// A submission together with its per-test-case results
#[derive(Debug, Serialize)]
pub struct SubmissionDetail {
    #[serde(flatten)]
    pub submission: Submission,
    pub test_cases: Vec<TestCaseResult>,
}
