//! Judge0 language id mapping

/// Display name for a Judge0 language id
pub fn language_name(language_id: i64) -> &'static str {
    match language_id {
        50 => "C",
        54 => "C++",
        60 => "Go",
        62 => "Java",
        63 => "JavaScript",
        71 => "Python",
        73 => "Rust",
        74 => "TypeScript",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(language_name(63), "JavaScript");
        assert_eq!(language_name(71), "Python");
        assert_eq!(language_name(62), "Java");
    }

    #[test]
    fn test_unknown_language() {
        assert_eq!(language_name(9999), "Unknown");
    }
}
