use serde::{Deserialize, Serialize};

/// Score and feedback for a candidate password.
///
/// `is_strong` requires both `score >= 5` and an empty `feedback` list, so a
/// password can reach a high score from character classes and still be
/// rejected for matching a weak pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrength {
    pub is_strong: bool,
    pub score: i32,
    pub feedback: Vec<String>,
}

const STRONG_SCORE: i32 = 5;
const WEAK_PATTERN_PENALTY: i32 = 2;

const WEAK_SUBSTRINGS: &[&str] = &["password", "123456", "qwerty", "admin"];

/// A common substring, or two or more characters that are all the same.
fn is_weak_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();
    if WEAK_SUBSTRINGS.iter().any(|weak| lower.contains(weak)) {
        return true;
    }
    let mut chars = password.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) => second == first && chars.all(|c| c == first),
        _ => false,
    }
}

/// Character classes are ASCII-only: `a-z`, `A-Z`, `0-9`, and anything
/// outside `[A-Za-z0-9]` counts as special.
pub fn validate_password_strength(password: &str) -> PasswordStrength {
    let mut score = 0;
    let mut feedback = Vec::new();

    let length = password.chars().count();
    if length >= 12 {
        score += 2;
    } else if length >= 8 {
        score += 1;
    } else {
        feedback.push("Password should be at least 8 characters long".to_string());
    }

    let classes: [(bool, &str); 4] = [
        (
            password.chars().any(|c| c.is_ascii_lowercase()),
            "Add lowercase letters",
        ),
        (
            password.chars().any(|c| c.is_ascii_uppercase()),
            "Add uppercase letters",
        ),
        (password.chars().any(|c| c.is_ascii_digit()), "Add numbers"),
        (
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
            "Add special characters",
        ),
    ];
    for (present, message) in classes {
        if present {
            score += 1;
        } else {
            feedback.push(message.to_string());
        }
    }

    if is_weak_pattern(password) {
        score -= WEAK_PATTERN_PENALTY;
        feedback.push("Avoid common patterns and repeated characters".to_string());
    }

    PasswordStrength {
        is_strong: score >= STRONG_SCORE && feedback.is_empty(),
        score,
        feedback,
    }
}
