//! Control validators

use crate::validation::ErrorKind;
use regex::Regex;
use std::sync::OnceLock;

/// Optional sign followed by an integer without leading zeros. A bare sign
/// does not match.
pub const INTEGER_PATTERN: &str = r"^-?(0|[1-9]\d*)$";

static INTEGER: OnceLock<Regex> = OnceLock::new();

/// Compiled [`INTEGER_PATTERN`]
pub fn integer_pattern() -> &'static Regex {
    INTEGER.get_or_init(|| Regex::new(INTEGER_PATTERN).expect("integer pattern is a valid regex"))
}

/// Single validation rule of a control
#[derive(Debug, Clone)]
pub enum Validator {
    /// Non-empty value; whitespace counts as a value
    Required,
    /// At least this many characters; empty values pass
    MinLength(usize),
    /// Whole value matches; empty values pass
    Pattern(Regex),
    /// Number within bounds; empty and zero values pass
    Range { min: f64, max: f64 },
}

impl Validator {
    /// Error kind raised for `value`, if any
    pub fn check(&self, value: &str) -> Option<ErrorKind> {
        match self {
            Validator::Required => value.is_empty().then_some(ErrorKind::Required),
            Validator::MinLength(min) => {
                let len = value.chars().count();
                (len > 0 && len < *min).then_some(ErrorKind::MinLength)
            }
            Validator::Pattern(regex) => {
                (!value.is_empty() && !regex.is_match(value)).then_some(ErrorKind::Pattern)
            }
            Validator::Range { min, max } => {
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                match value.parse::<f64>() {
                    // zero counts as "no rating"
                    Ok(n) if n == 0.0 => None,
                    Ok(n) if n >= *min && n <= *max => None,
                    _ => Some(ErrorKind::Range),
                }
            }
        }
    }
}
