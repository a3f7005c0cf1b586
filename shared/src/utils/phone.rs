//! Phone number utilities
//!
//! Mobile numbers are entered in three sub-fields (prefix, middle, last) and
//! carried around as a single `-` separated identity, e.g. `010-1234-5678`.

use once_cell::sync::Lazy;
use regex::Regex;

static PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^01[016789]$").expect("prefix regex is valid"));

static MIDDLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3,4}$").expect("middle regex is valid"));

static LAST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("last regex is valid"));

/// One of the three phone input sub-fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhonePart {
    First,
    Middle,
    Last,
}

impl PhonePart {
    pub const ALL: [PhonePart; 3] = [PhonePart::First, PhonePart::Middle, PhonePart::Last];
}

/// Borrowed view of a phone identity split into its sub-fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhoneParts<'a> {
    pub first: &'a str,
    pub middle: &'a str,
    pub last: &'a str,
}

impl<'a> PhoneParts<'a> {
    /// Split a `-` separated identity; missing parts are empty
    pub fn split(identity: &'a str) -> Self {
        let mut parts = identity.splitn(3, '-').map(str::trim);
        Self {
            first: parts.next().unwrap_or(""),
            middle: parts.next().unwrap_or(""),
            last: parts.next().unwrap_or(""),
        }
    }

    /// Get the value of one sub-field
    pub fn get(&self, part: PhonePart) -> &'a str {
        match part {
            PhonePart::First => self.first,
            PhonePart::Middle => self.middle,
            PhonePart::Last => self.last,
        }
    }

    /// Sub-fields whose digit count or prefix is wrong
    pub fn invalid_parts(&self) -> Vec<PhonePart> {
        PhonePart::ALL
            .into_iter()
            .filter(|part| {
                let value = self.get(*part);
                let pattern = match part {
                    PhonePart::First => &*PREFIX_REGEX,
                    PhonePart::Middle => &*MIDDLE_REGEX,
                    PhonePart::Last => &*LAST_REGEX,
                };
                !pattern.is_match(value)
            })
            .collect()
    }
}

/// Join the three sub-field values into one identity
pub fn join_phone_parts(first: &str, middle: &str, last: &str) -> String {
    format!("{}-{}-{}", first.trim(), middle.trim(), last.trim())
}

/// Remove everything except digits
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a `-` separated mobile identity is valid in every sub-field
pub fn is_valid_mobile(identity: &str) -> bool {
    PhoneParts::split(identity).invalid_parts().is_empty()
}

/// Mask a phone number for display (e.g., 010****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
