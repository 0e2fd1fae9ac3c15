use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use super::rule::{Check, Rule, Sanitizer};
use crate::i18n::{t, Message};

/// A single failed check, reported back to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Result of running one field's rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOutcome {
    /// Value after sanitizers ran (or as far as they got before a bail)
    pub value: String,
    pub errors: Vec<FieldError>,
}

/// Ordered rule list bound to one body field.
///
/// Built fluently; `with_message` attaches to the most recent check:
///
/// ```
/// use edu_api_rust::validation::FieldValidator;
///
/// let account = FieldValidator::body("account")
///     .trim()
///     .not_empty()
///     .with_message("account is required")
///     .bail()
///     .matches(regex::Regex::new("^[a-z]{4,8}$").unwrap())
///     .with_message("4 to 8 lowercase letters");
/// assert_eq!(account.field(), "account");
/// ```
#[derive(Debug, Clone)]
pub struct FieldValidator {
    field: String,
    rules: Vec<Rule>,
}

impl FieldValidator {
    pub fn body(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: vec![],
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn trim(mut self) -> Self {
        self.rules.push(Rule::Sanitize(Sanitizer::Trim));
        self
    }

    pub fn not_empty(mut self) -> Self {
        self.rules.push(Rule::Check {
            check: Check::NotEmpty,
            message: None,
        });
        self
    }

    pub fn matches(mut self, pattern: Regex) -> Self {
        self.rules.push(Rule::Check {
            check: Check::Matches(pattern),
            message: None,
        });
        self
    }

    pub fn bail(mut self) -> Self {
        self.rules.push(Rule::Bail);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Some(Rule::Check { message: slot, .. }) = self
            .rules
            .iter_mut()
            .rev()
            .find(|rule| matches!(rule, Rule::Check { .. }))
        {
            *slot = Some(message.into());
        }
        self
    }

    /// Runs every rule against the field's value in `body`. Never panics and never
    /// short-circuits other fields.
    pub fn run(&self, body: &Map<String, Value>) -> FieldOutcome {
        let mut value = raw_value(body.get(&self.field));
        let mut errors = Vec::new();

        for rule in &self.rules {
            match rule {
                Rule::Sanitize(sanitizer) => value = sanitizer.apply(&value),
                Rule::Check { check, message } => {
                    if !check.passes(&value) {
                        errors.push(FieldError {
                            field: self.field.clone(),
                            message: message
                                .clone()
                                .unwrap_or_else(|| t(Message::InvalidValue).to_string()),
                        });
                    }
                }
                Rule::Bail => {
                    if !errors.is_empty() {
                        break;
                    }
                }
            }
        }

        FieldOutcome { value, errors }
    }
}

/// Scalars are read as text; missing, null and structured values count as empty.
fn raw_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn digits_only() -> FieldValidator {
        FieldValidator::body("code")
            .trim()
            .not_empty()
            .with_message("required")
            .bail()
            .matches(Regex::new(r"^\d{2,3}$").unwrap())
            .with_message("two or three digits")
    }

    #[test]
    fn with_message_targets_latest_check() {
        let validator = digits_only();
        let messages: Vec<_> = validator
            .rules()
            .iter()
            .filter_map(|r| match r {
                Rule::Check { message, .. } => message.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(messages, vec!["required", "two or three digits"]);
    }

    #[test]
    fn bail_skips_pattern_after_required_failure() {
        let outcome = digits_only().run(&body(json!({ "code": "   " })));
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].message, "required");
    }

    #[test]
    fn missing_field_is_empty() {
        let outcome = digits_only().run(&body(json!({})));
        assert_eq!(outcome.value, "");
        assert_eq!(outcome.errors[0].field, "code");
    }

    #[test]
    fn numbers_are_checked_as_text() {
        let outcome = digits_only().run(&body(json!({ "code": 42 })));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.value, "42");
    }

    #[test]
    fn pattern_sees_trimmed_value() {
        let outcome = digits_only().run(&body(json!({ "code": " 123 " })));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.value, "123");

        let outcome = digits_only().run(&body(json!({ "code": "1234" })));
        assert_eq!(outcome.errors[0].message, "two or three digits");
    }

    #[test]
    fn without_bail_every_failing_check_reports() {
        let validator = FieldValidator::body("code")
            .not_empty()
            .matches(Regex::new(r"^\d+$").unwrap());
        let outcome = validator.run(&body(json!({ "code": null })));
        assert_eq!(outcome.errors.len(), 2);
    }
}
