//! Problem request DTOs

use std::collections::HashMap;

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH};

/// Problem creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: String,

    /// EASY, MEDIUM, or HARD; defaults to EASY
    pub difficulty: Option<String>,

    pub tags: Option<Vec<String>>,

    /// Reference solution source keyed by language name
    pub reference_solutions: Option<HashMap<String, String>>,
}

/// Problem list query parameters
#[derive(Debug, Deserialize, Default)]
pub struct ProblemListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub difficulty: Option<String>,
    pub tag: Option<String>,
}
