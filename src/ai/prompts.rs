//! Prompt assembly
//!
//! Pure functions mapping problem metadata, user code, and history to the
//! natural-language instruction sent to the model. Nothing in this module
//! talks to the network or the database.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{CHAT_HISTORY_WINDOW, MAX_HINT_LEVEL},
    error::{AppError, AppResult},
    models::Problem,
};

use super::insights::UserStats;

/// One transient chat turn, supplied by the caller on each request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// "user" or "assistant"
    pub role: String,
    pub content: String,
}

/// Clamp a caller-supplied hint level into the supported range
pub fn clamp_hint_level(level: u32) -> u32 {
    level.clamp(1, MAX_HINT_LEVEL)
}

/// Escalating hint prompt; level is expected to be pre-clamped
pub fn hint_prompt(problem: &Problem, attempt_count: usize, level: u32) -> String {
    match level {
        1 => format!(
            "Give a gentle hint for \"{}\" ({}).\n\
             Problem: {}\n\
             User has {} attempts.\n\
             Hint: Mention the general approach or data structure in 2 sentences. \
             Don't reveal the algorithm.",
            problem.title, problem.difficulty, problem.description, attempt_count
        ),
        2 => format!(
            "Give a moderate hint for \"{}\".\n\
             Problem: {}\n\
             Explain the algorithm concept without code in 3-4 sentences. \
             Give a small example.",
            problem.title, problem.description
        ),
        _ => format!(
            "Give a detailed hint for \"{}\".\n\
             Problem: {}\n\
             Provide step-by-step breakdown with pseudocode. \
             Explain the logic clearly but don't give the exact implementation.",
            problem.title, problem.description
        ),
    }
}

/// Debugging prompt: identify, explain, suggest a fix, never the full solution
pub fn debug_prompt(
    problem: &Problem,
    code: &str,
    language: &str,
    error_message: Option<&str>,
) -> String {
    format!(
        "Debug this {language} code for \"{title}\".\n\n\
         Problem: {description}\n\n\
         Code:\n```{lang_lower}\n{code}\n```\n\n\
         Error: {error}\n\n\
         Provide:\n\
         1. What's wrong (identify the bug)\n\
         2. Why it's wrong (explain the issue)\n\
         3. How to fix it (give a hint, not the solution)\n\
         4. What to test next\n\n\
         Be friendly and educational.",
        title = problem.title,
        description = problem.description,
        lang_lower = language.to_lowercase(),
        error = error_message.unwrap_or("Wrong answer"),
    )
}

/// Look up the reference solution for a language (case-insensitive).
///
/// Returns the normalized (uppercase) language name and the source text, or a
/// validation error naming the languages that do exist.
pub fn find_reference_solution(problem: &Problem, language: &str) -> AppResult<(String, String)> {
    let solutions = problem
        .reference_solutions
        .as_object()
        .filter(|map| !map.is_empty())
        .ok_or_else(|| {
            AppError::NotFound("Reference solutions not available for this problem".to_string())
        })?;

    let normalized = language.to_uppercase();
    match solutions.get(&normalized).and_then(|v| v.as_str()) {
        Some(source) => Ok((normalized, source.to_string())),
        None => {
            let available: Vec<&str> = solutions.keys().map(String::as_str).collect();
            Err(AppError::NotFound(format!(
                "No solution for {language}. Available: {}",
                available.join(", ")
            )))
        }
    }
}

/// Long structured instruction for a full solution explanation
pub fn explain_prompt(problem: &Problem, language: &str, solution: &str) -> String {
    format!(
        "You are an expert DSA tutor. Provide a COMPREHENSIVE, DETAILED explanation of this solution.\n\n\
         **Problem: {title}**\n\
         Difficulty: {difficulty}\n\
         Description: {description}\n\n\
         **Solution Code ({language}):**\n\
         ```{lang_lower}\n{solution}\n```\n\n\
         **IMPORTANT: Provide a DETAILED explanation (minimum 500 words) covering ALL these sections:**\n\n\
         ## 1. PROBLEM UNDERSTANDING\n\
         - Restate what the problem is asking in your own words\n\
         - What are the inputs and expected outputs?\n\
         - What are the constraints we need to consider?\n\n\
         ## 2. INTUITION & APPROACH\n\
         - What is the KEY INSIGHT needed to solve this?\n\
         - What is the overall strategy/algorithm?\n\
         - Why does this approach work?\n\
         - What pattern or technique is being used? (e.g., two pointers, hash map, sliding window)\n\n\
         ## 3. DETAILED ALGORITHM EXPLANATION\n\
         Break down the approach step-by-step and explain the logic behind each step.\n\n\
         ## 4. CODE WALKTHROUGH\n\
         Go through the code section by section: what each variable does, what each \
         loop/condition does, and how the code maps to the algorithm steps.\n\n\
         ## 5. EXAMPLE WALKTHROUGH\n\
         Choose specific input values and trace through the execution with actual values \
         to the final output.\n\n\
         ## 6. TIME & SPACE COMPLEXITY ANALYSIS\n\
         - **Time Complexity:** O(?) - Explain WHY in detail\n\
         - **Space Complexity:** O(?) - Explain WHY in detail\n\n\
         ## 7. KEY CONCEPTS & TECHNIQUES\n\
         What data structures are used and why, and when to reach for this approach.\n\n\
         ## 8. EDGE CASES & COMMON MISTAKES\n\
         What edge cases this handles and what beginners typically get wrong.\n\n\
         ## 9. ALTERNATIVE APPROACHES\n\
         Other ways to solve this problem and their trade-offs.\n\n\
         ## 10. LEARNING TAKEAWAYS\n\
         The main lesson, and how the technique transfers to other problems.\n\n\
         Make the explanation detailed, beginner-friendly, well-structured in markdown, \
         and encouraging in tone.\n\n\
         **MINIMUM LENGTH: 500-800 words. Be comprehensive!**",
        title = problem.title,
        difficulty = problem.difficulty,
        description = problem.description,
        lang_lower = language.to_lowercase(),
    )
}

/// Short motivational-message prompt over precomputed statistics.
///
/// The candidate problem list is produced by the difficulty heuristic, not by
/// the model; the model only writes the encouragement.
pub fn recommend_prompt(stats: &UserStats) -> String {
    let strong_tags = if stats.strong_tags.is_empty() {
        "None yet".to_string()
    } else {
        stats.strong_tags.join(", ")
    };

    format!(
        "You are a personalized learning coach for a DSA platform.\n\n\
         **User Stats:**\n\
         - Total problems solved: {total}\n\
         - Success rate: {rate}%\n\
         - Strong topics: {strong_tags}\n\
         - Easy problems solved: {easy}\n\
         - Medium problems solved: {medium}\n\n\
         **Recommended Difficulty:** {difficulty}\n\n\
         **Task:**\n\
         Write a short, encouraging message (2-3 sentences) explaining:\n\
         1. Why these problems are recommended\n\
         2. What the user should focus on next\n\
         3. A motivational tip\n\n\
         Be friendly and personalized.",
        total = stats.total_solved,
        rate = stats.success_rate,
        easy = stats.easy_solved,
        medium = stats.medium_solved,
        difficulty = stats.suggested_difficulty,
    )
}

/// Mentor chat prompt with the last few turns of supplied history
pub fn chat_prompt(problem: &Problem, history: &[ConversationTurn], message: &str) -> String {
    let recent = if history.len() > CHAT_HISTORY_WINDOW {
        &history[history.len() - CHAT_HISTORY_WINDOW..]
    } else {
        history
    };

    let mut context = String::new();
    for turn in recent {
        let speaker = if turn.role == "user" { "Student" } else { "Mentor" };
        let _ = writeln!(context, "{speaker}: {}", turn.content);
    }

    let history_block = if context.is_empty() {
        String::new()
    } else {
        format!("Previous chat:\n{context}\n")
    };

    format!(
        "You're helping with \"{title}\" ({difficulty}).\n\n\
         Problem: {description}\n\n\
         {history_block}Student: {message}\n\n\
         Respond helpfully. Don't give away the solution unless asked. Be encouraging.",
        title = problem.title,
        difficulty = problem.difficulty,
        description = problem.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn problem() -> Problem {
        Problem {
            id: Uuid::new_v4(),
            title: "Two Sum".to_string(),
            description: "Find two numbers that add to a target.".to_string(),
            difficulty: "EASY".to_string(),
            tags: vec!["array".to_string()],
            reference_solutions: json!({
                "PYTHON": "def two_sum(): ...",
                "JAVASCRIPT": "function twoSum() {}",
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_clamp_hint_level() {
        assert_eq!(clamp_hint_level(0), 1);
        assert_eq!(clamp_hint_level(1), 1);
        assert_eq!(clamp_hint_level(2), 2);
        assert_eq!(clamp_hint_level(3), 3);
        assert_eq!(clamp_hint_level(99), 3);
    }

    #[test]
    fn test_hint_levels_escalate() {
        let p = problem();
        let level1 = hint_prompt(&p, 0, 1);
        let level3 = hint_prompt(&p, 0, 3);

        assert!(level1.contains("general approach"));
        assert!(!level1.contains("pseudocode"));
        assert!(level3.contains("pseudocode"));
    }

    #[test]
    fn test_debug_prompt_defaults_error() {
        let p = problem();
        let prompt = debug_prompt(&p, "print(1)", "Python", None);
        assert!(prompt.contains("Error: Wrong answer"));
        assert!(prompt.contains("```python"));
    }

    #[test]
    fn test_find_reference_solution_case_insensitive() {
        let p = problem();
        let (language, source) = find_reference_solution(&p, "python").unwrap();
        assert_eq!(language, "PYTHON");
        assert!(source.starts_with("def two_sum"));
    }

    #[test]
    fn test_missing_solution_lists_available_languages() {
        let p = problem();
        let err = find_reference_solution(&p, "rust").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("No solution for rust"));
        assert!(message.contains("PYTHON"));
        assert!(message.contains("JAVASCRIPT"));
    }

    #[test]
    fn test_no_solutions_at_all() {
        let mut p = problem();
        p.reference_solutions = json!({});
        assert!(find_reference_solution(&p, "python").is_err());
    }

    #[test]
    fn test_chat_prompt_keeps_last_six_turns() {
        let p = problem();
        let history: Vec<ConversationTurn> = (0..10)
            .map(|i| ConversationTurn {
                role: if i % 2 == 0 { "user" } else { "assistant" }.to_string(),
                content: format!("turn-{i}"),
            })
            .collect();

        let prompt = chat_prompt(&p, &history, "help me");
        assert!(!prompt.contains("turn-3"));
        assert!(prompt.contains("turn-4"));
        assert!(prompt.contains("turn-9"));
        assert!(prompt.contains("Student: help me"));
        assert!(prompt.contains("Mentor: turn-5"));
    }

    #[test]
    fn test_chat_prompt_without_history() {
        let p = problem();
        let prompt = chat_prompt(&p, &[], "hi");
        assert!(!prompt.contains("Previous chat"));
        assert!(prompt.contains("Student: hi"));
    }
}
