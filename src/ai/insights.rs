//! Solve-history statistics for recommendations
//!
//! All heuristics here are pure; the database rows go in and a [`UserStats`]
//! comes out. The model never picks the difficulty or the candidate list.

use std::collections::HashMap;

use serde::Serialize;

use crate::constants::{difficulties, statuses};
use crate::models::Problem;

/// Derived statistics over a user's solve and submission history
#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total_solved: usize,
    /// Accepted share of the last few submissions, rounded percent
    pub success_rate: u32,
    /// Top tags by solve count, at most three
    pub strong_tags: Vec<String>,
    pub easy_solved: usize,
    pub medium_solved: usize,
    pub suggested_difficulty: String,
}

/// Percentage of recent submissions that were accepted; 0 when there are none
pub fn success_rate(recent_statuses: &[String]) -> f64 {
    if recent_statuses.is_empty() {
        return 0.0;
    }
    let accepted = recent_statuses
        .iter()
        .filter(|s| s.as_str() == statuses::ACCEPTED)
        .count();
    accepted as f64 / recent_statuses.len() as f64 * 100.0
}

/// Top three tags across solved problems, ranked by frequency.
/// Ties break alphabetically for determinism.
pub fn strong_tags(solved: &[Problem]) -> Vec<String> {
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for problem in solved {
        for tag in &problem.tags {
            *frequency.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(3)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

/// Difficulty ladder: EASY until 5 easy solves at >70% recent success,
/// then MEDIUM; HARD after 5 medium solves at >60%.
pub fn suggested_difficulty(easy_solved: usize, medium_solved: usize, rate: f64) -> &'static str {
    let mut suggested = difficulties::EASY;
    if easy_solved >= 5 && rate > 70.0 {
        suggested = difficulties::MEDIUM;
    }
    if medium_solved >= 5 && rate > 60.0 {
        suggested = difficulties::HARD;
    }
    suggested
}

/// Assemble the full statistics block from solved problems and recent statuses
pub fn build_stats(solved: &[Problem], recent_statuses: &[String]) -> UserStats {
    let rate = success_rate(recent_statuses);
    let easy_solved = solved
        .iter()
        .filter(|p| p.difficulty == difficulties::EASY)
        .count();
    let medium_solved = solved
        .iter()
        .filter(|p| p.difficulty == difficulties::MEDIUM)
        .count();

    UserStats {
        total_solved: solved.len(),
        success_rate: rate.round() as u32,
        strong_tags: strong_tags(solved),
        easy_solved,
        medium_solved,
        suggested_difficulty: suggested_difficulty(easy_solved, medium_solved, rate).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn problem(difficulty: &str, tags: &[&str]) -> Problem {
        Problem {
            id: Uuid::new_v4(),
            title: String::new(),
            description: String::new(),
            difficulty: difficulty.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reference_solutions: serde_json::json!({}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn accepted(n: usize) -> Vec<String> {
        (0..n).map(|_| "Accepted".to_string()).collect()
    }

    #[test]
    fn test_success_rate_empty() {
        assert_eq!(success_rate(&[]), 0.0);
    }

    #[test]
    fn test_success_rate_mixed() {
        let mut recent = accepted(8);
        recent.push("Wrong Answer".to_string());
        recent.push("Wrong Answer".to_string());
        assert_eq!(success_rate(&recent), 80.0);
    }

    #[test]
    fn test_strong_tags_ranked_by_count() {
        let solved = vec![
            problem("EASY", &["array", "hash-map"]),
            problem("EASY", &["array", "two-pointers"]),
            problem("EASY", &["array", "hash-map"]),
            problem("EASY", &["dp"]),
        ];
        let tags = strong_tags(&solved);
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0], "array");
        assert_eq!(tags[1], "hash-map");
    }

    #[test]
    fn test_difficulty_ladder_easy_default() {
        assert_eq!(suggested_difficulty(0, 0, 0.0), "EASY");
        assert_eq!(suggested_difficulty(4, 0, 100.0), "EASY");
        assert_eq!(suggested_difficulty(6, 0, 70.0), "EASY"); // not strictly above 70
    }

    #[test]
    fn test_difficulty_ladder_medium() {
        // Worked example: easySolved=6, successRate=80 => MEDIUM
        assert_eq!(suggested_difficulty(6, 0, 80.0), "MEDIUM");
    }

    #[test]
    fn test_difficulty_ladder_hard() {
        assert_eq!(suggested_difficulty(6, 5, 65.0), "HARD");
        assert_eq!(suggested_difficulty(6, 4, 90.0), "MEDIUM");
    }

    #[test]
    fn test_build_stats() {
        let solved = vec![
            problem("EASY", &["array"]),
            problem("EASY", &["array"]),
            problem("EASY", &["math"]),
            problem("EASY", &["array"]),
            problem("EASY", &["graph"]),
            problem("EASY", &["graph"]),
        ];
        let mut recent = accepted(8);
        recent.push("Wrong Answer".to_string());
        recent.push("Wrong Answer".to_string());

        let stats = build_stats(&solved, &recent);
        assert_eq!(stats.total_solved, 6);
        assert_eq!(stats.success_rate, 80);
        assert_eq!(stats.easy_solved, 6);
        assert_eq!(stats.suggested_difficulty, "MEDIUM");
        assert_eq!(stats.strong_tags[0], "array");
    }
}
