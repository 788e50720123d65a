//! Input normalization shared by registration, login and record forms.
//!
//! Emails are trimmed and lowercased. Car identifiers are lowercased with
//! every whitespace character removed, so `" 12가 3456 "` and `"12가3456"`
//! address the same car.

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn normalize_car_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Used when an email has no usable local part.
pub const FALLBACK_CAR_IDENTIFIER: &str = "unknown";

/// Car identifier used when a profile has to be recreated: the email's local
/// part, or [`FALLBACK_CAR_IDENTIFIER`] when that is blank. Never empty.
pub fn placeholder_car_identifier(email: &str) -> String {
    let email = normalize_email(email);
    let local = normalize_car_identifier(email.split('@').next().unwrap_or_default());
    if local.is_empty() {
        FALLBACK_CAR_IDENTIFIER.to_string()
    } else {
        local
    }
}
