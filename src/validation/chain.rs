use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use super::field::{FieldError, FieldValidator};
use super::fields::{self, NameAlphabet};
use crate::config::config;
use crate::i18n::Locale;

/// Validators an endpoint applies to its request body, in declaration order
#[derive(Debug, Clone, Default)]
pub struct ValidationChain {
    validators: Vec<FieldValidator>,
}

/// Everything collected while running a chain
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Request body with validated fields replaced by their sanitized values
    pub sanitized: Map<String, Value>,
    pub errors: Vec<FieldError>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ValidationChain {
    pub fn new(validators: Vec<FieldValidator>) -> Self {
        Self { validators }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(|v| v.field())
    }

    pub fn run(&self, body: &Map<String, Value>) -> ValidationOutcome {
        let mut sanitized = body.clone();
        let mut errors = Vec::new();

        for validator in &self.validators {
            let outcome = validator.run(body);
            sanitized.insert(validator.field().to_string(), Value::String(outcome.value));
            errors.extend(outcome.errors);
        }

        ValidationOutcome { sanitized, errors }
    }
}

/// `account` + `password`
pub fn login_chain(locale: Locale) -> ValidationChain {
    ValidationChain::new(vec![fields::account(locale), fields::password(locale)])
}

/// `account` + `password` + `name`
pub fn registration_chain(locale: Locale, alphabet: NameAlphabet) -> ValidationChain {
    ValidationChain::new(vec![
        fields::account(locale),
        fields::password(locale),
        fields::name(locale, alphabet),
    ])
}

pub static LOGIN: Lazy<ValidationChain> = Lazy::new(|| login_chain(config().validation.locale));

pub static REGISTRATION: Lazy<ValidationChain> = Lazy::new(|| {
    let validation = &config().validation;
    registration_chain(validation.locale, validation.name_alphabet)
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn collects_errors_from_every_field() {
        let chain = registration_chain(Locale::Ko, NameAlphabet::Hangul);
        let outcome = chain.run(&body(json!({ "account": "ab1", "name": "A1" })));

        let fields: Vec<_> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["account", "password", "name"]);
        assert!(!outcome.is_valid());
    }

    #[test]
    fn sanitized_body_carries_trimmed_values_and_extra_keys() {
        let chain = login_chain(Locale::En);
        let outcome = chain.run(&body(json!({
            "account": "  abc123 ",
            "password": "pw!@12",
            "remember": true
        })));

        assert!(outcome.is_valid());
        assert_eq!(outcome.sanitized["account"], json!("abc123"));
        assert_eq!(outcome.sanitized["remember"], json!(true));
    }

    #[test]
    fn chain_lists_its_fields() {
        let chain = login_chain(Locale::Ko);
        assert_eq!(chain.fields().collect::<Vec<_>>(), vec!["account", "password"]);
    }
}
