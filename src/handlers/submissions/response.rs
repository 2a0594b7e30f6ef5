//! Submission response DTOs

use serde::Serialize;

use crate::{handlers::envelope::Pagination, models::Submission};

/// Paginated submission list
#[derive(Debug, Serialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<Submission>,
    pub pagination: Pagination,
}
