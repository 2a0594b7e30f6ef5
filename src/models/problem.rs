//! Problem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Problem database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    /// Mapping from language name (uppercase) to reference solution source
    #[serde(skip_serializing)]
    pub reference_solutions: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Language names for which a reference solution exists
    pub fn solution_languages(&self) -> Vec<String> {
        self.reference_solutions
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }
}
