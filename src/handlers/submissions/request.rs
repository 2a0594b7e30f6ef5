//! Submission request DTOs

use serde::Deserialize;

/// Submission list query parameters
#[derive(Debug, Deserialize, Default)]
pub struct SubmissionListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
