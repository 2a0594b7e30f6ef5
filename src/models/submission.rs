//! Submission and test case result models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Submission database model
///
/// The per-test-case columns (`stdin`, `stdout`, `stderr`, `compile_output`,
/// `memory`, `time`) each hold a JSON-serialized array with one entry per
/// test case, in submission order.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    #[serde(skip_serializing)]
    pub source_code: String,
    pub language: String,
    pub stdin: String,
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub memory: String,
    pub time: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    /// Whether every test case passed
    pub fn is_accepted(&self) -> bool {
        self.status == crate::constants::statuses::ACCEPTED
    }
}

/// Per-test-case result attached to a submission; read-only after creation
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub id: Uuid,
    pub submission_id: Uuid,
    /// 1-based test case index
    pub test_case: i32,
    pub passed: bool,
    pub stdout: String,
    pub expected: String,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: String,
    pub memory: Option<String>,
    pub time: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::statuses;

    fn submission_with_status(status: &str) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            problem_id: Uuid::new_v4(),
            source_code: "print(1)".to_string(),
            language: "Python".to_string(),
            stdin: "[]".to_string(),
            stdout: "[]".to_string(),
            stderr: "[]".to_string(),
            compile_output: "[]".to_string(),
            memory: "[]".to_string(),
            time: "[]".to_string(),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_accepted() {
        assert!(submission_with_status(statuses::ACCEPTED).is_accepted());
        assert!(!submission_with_status(statuses::WRONG_ANSWER).is_accepted());
    }
}
