//! Nickname and password validation rules

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum nickname length in characters
pub const NICKNAME_MIN_CHARS: usize = 2;

/// Maximum nickname length in characters
pub const NICKNAME_MAX_CHARS: usize = 10;

/// Minimum password length
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Maximum password length
pub const PASSWORD_MAX_CHARS: usize = 20;

// Hangul syllables, latin letters and digits only
static NICKNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[가-힣A-Za-z0-9]+$").expect("nickname regex is valid"));

/// Which password rule a candidate breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordIssue {
    Length,
    MissingLetter,
    MissingDigit,
    MissingSpecial,
}

/// Common validation functions
pub mod validators {
    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length in characters is within bounds
    pub fn char_length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }
}

/// Check nickname length and alphabet
pub fn is_valid_nickname(nickname: &str) -> bool {
    validators::char_length_between(nickname, NICKNAME_MIN_CHARS, NICKNAME_MAX_CHARS)
        && NICKNAME_REGEX.is_match(nickname)
}

/// List every password rule the candidate breaks
pub fn password_issues(password: &str) -> Vec<PasswordIssue> {
    let mut issues = Vec::new();
    if !validators::char_length_between(password, PASSWORD_MIN_CHARS, PASSWORD_MAX_CHARS) {
        issues.push(PasswordIssue::Length);
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        issues.push(PasswordIssue::MissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        issues.push(PasswordIssue::MissingSpecial);
    }
    issues
}

/// Check if a password satisfies every rule
pub fn is_valid_password(password: &str) -> bool {
    password_issues(password).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nickname_rules() {
        assert!(is_valid_nickname("퀴즈왕"));
        assert!(is_valid_nickname("quiz99"));
        assert!(!is_valid_nickname("q"));
        assert!(!is_valid_nickname("abcdefghijk"));
        assert!(!is_valid_nickname("quiz king"));
        assert!(!is_valid_nickname("quiz!"));
    }

    #[test]
    fn test_password_rules() {
        assert!(is_valid_password("abcd123!"));
        assert_eq!(
            password_issues("short1!"),
            vec![PasswordIssue::Length]
        );
        assert_eq!(
            password_issues("abcdefgh"),
            vec![PasswordIssue::MissingDigit, PasswordIssue::MissingSpecial]
        );
        assert_eq!(
            password_issues("12345678!"),
            vec![PasswordIssue::MissingLetter]
        );
    }

    #[test]
    fn test_validators() {
        assert!(validators::not_empty(" a "));
        assert!(!validators::not_empty("   "));
        assert!(validators::char_length_between("퀴즈", 2, 2));
    }
}
