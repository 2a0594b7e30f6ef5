//! Problem response DTOs

use serde::Serialize;

use crate::{handlers::envelope::Pagination, models::Problem};

/// Paginated problem list
#[derive(Debug, Serialize)]
pub struct ProblemListResponse {
    pub problems: Vec<Problem>,
    pub pagination: Pagination,
}

/// Single problem, with its available solution languages
#[derive(Debug, Serialize)]
pub struct ProblemDetailResponse {
    #[serde(flatten)]
    pub problem: Problem,
    pub solution_languages: Vec<String>,
}
