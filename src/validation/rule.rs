use regex::Regex;

/// In-place transformation applied to the field value before later checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    Trim,
}

impl Sanitizer {
    pub fn apply(&self, value: &str) -> String {
        match self {
            Sanitizer::Trim => value.trim().to_string(),
        }
    }
}

/// Predicate over the current field value
#[derive(Debug, Clone)]
pub enum Check {
    NotEmpty,
    Matches(Regex),
}

impl Check {
    pub fn passes(&self, value: &str) -> bool {
        match self {
            Check::NotEmpty => !value.is_empty(),
            Check::Matches(pattern) => pattern.is_match(value),
        }
    }
}

/// One step of a field's rule list
#[derive(Debug, Clone)]
pub enum Rule {
    Sanitize(Sanitizer),
    Check {
        check: Check,
        message: Option<String>,
    },
    /// Stop evaluating this field if any earlier check failed
    Bail,
}
