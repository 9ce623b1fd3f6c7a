//! Phone normalization to a canonical international format.
//!
//! The canonical form is `+` followed by digits only. National Spanish
//! numbers (nine digits, no prefix) get the `+34` country code and a leading
//! `00` international prefix becomes `+`. Normalization is idempotent.

/// Country code assumed for national numbers.
pub const DEFAULT_COUNTRY_CODE: &str = "34";

const NATIONAL_DIGITS: usize = 9;
const MIN_DIGITS: usize = 8;
const MAX_DIGITS: usize = 15;

/// Normalize a raw phone number.
///
/// Returns an empty string when the input holds no digits.
///
/// ```rust
/// use valora_core::wizard::phone::normalize;
///
/// assert_eq!(normalize("612 34 56 78"), "+34612345678");
/// assert_eq!(normalize("0034 612-345-678"), "+34612345678");
/// assert_eq!(normalize("+44 20 7946 0958"), "+442079460958");
/// assert_eq!(normalize(&normalize("(91) 123 45 67")), normalize("(91) 123 45 67"));
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let explicit_plus = trimmed.starts_with('+');
    let double_zero = !explicit_plus && trimmed.starts_with("00");

    let mut digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if double_zero {
        digits.drain(..2);
    }
    if digits.is_empty() {
        return String::new();
    }

    if !explicit_plus && !double_zero && digits.len() == NATIONAL_DIGITS {
        format!("+{DEFAULT_COUNTRY_CODE}{digits}")
    } else {
        format!("+{digits}")
    }
}

/// Whether a normalized phone has a plausible E.164 length.
pub fn is_plausible(normalized: &str) -> bool {
    match normalized.strip_prefix('+') {
        Some(digits) => {
            digits.chars().all(|c| c.is_ascii_digit())
                && (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
        }
        None => false,
    }
}
