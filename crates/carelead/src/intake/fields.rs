//! Field-level helpers shared by every contact form.

use serde::Serialize;

/// A value counts as filled in once it has something other than whitespace.
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Input flavor of a contact field, used to normalize what visitors type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    PostalCode,
}

impl FieldKind {
    pub fn normalize(self, raw: &str) -> String {
        match self {
            Self::Text | Self::Email => raw.trim().to_string(),
            Self::Phone => format_phone(raw),
            Self::PostalCode => raw.trim().to_ascii_uppercase(),
        }
    }
}

/// Formats ten-digit numbers as `(555) 123-4567`; anything else keeps only its digits.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.len() {
        11 if digits.starts_with('1') => digits[1..].to_string(),
        _ => digits,
    };

    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        digits
    }
}

pub fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}
