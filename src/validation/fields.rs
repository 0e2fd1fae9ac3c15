use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::field::FieldValidator;
use crate::i18n::{Locale, Message};

static ACCOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]{4,8}$").expect("account pattern compiles"));

static PASSWORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9!@]{4,8}$").expect("password pattern compiles"));

static HANGUL_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[가-힣]{2,30}$").expect("hangul name pattern compiles"));

static LATIN_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]{2,30}$").expect("latin name pattern compiles"));

/// Letters accepted in display names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameAlphabet {
    /// Precomposed Hangul syllables (U+AC00..=U+D7A3)
    Hangul,
    Latin,
}

impl NameAlphabet {
    fn pattern(self) -> &'static Regex {
        match self {
            NameAlphabet::Hangul => &HANGUL_NAME_PATTERN,
            NameAlphabet::Latin => &LATIN_NAME_PATTERN,
        }
    }

    fn message(self) -> Message {
        match self {
            NameAlphabet::Hangul => Message::NamePatternHangul,
            NameAlphabet::Latin => Message::NamePatternLatin,
        }
    }
}

impl FromStr for NameAlphabet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hangul" | "korean" => Ok(NameAlphabet::Hangul),
            "latin" | "english" => Ok(NameAlphabet::Latin),
            other => Err(format!("unsupported name alphabet: {}", other)),
        }
    }
}

/// `account`: ASCII letters and digits, 4 to 8 characters
pub fn account(locale: Locale) -> FieldValidator {
    FieldValidator::body("account")
        .trim()
        .not_empty()
        .with_message(locale.text(Message::AccountRequired))
        .bail()
        .matches(ACCOUNT_PATTERN.clone())
        .with_message(locale.text(Message::AccountPattern))
}

/// `password`: ASCII letters, digits, `!` and `@`, 4 to 8 characters
pub fn password(locale: Locale) -> FieldValidator {
    FieldValidator::body("password")
        .trim()
        .not_empty()
        .with_message(locale.text(Message::PasswordRequired))
        .bail()
        .matches(PASSWORD_PATTERN.clone())
        .with_message(locale.text(Message::PasswordPattern))
}

/// `name`: letters of `alphabet` only, 2 to 30 characters
pub fn name(locale: Locale, alphabet: NameAlphabet) -> FieldValidator {
    FieldValidator::body("name")
        .trim()
        .not_empty()
        .with_message(locale.text(Message::NameRequired))
        .bail()
        .matches(alphabet.pattern().clone())
        .with_message(locale.text(alphabet.message()))
}

/// Looks up a field validator by body key
pub fn by_name(field: &str, locale: Locale, alphabet: NameAlphabet) -> Option<FieldValidator> {
    match field {
        "account" => Some(account(locale)),
        "password" => Some(password(locale)),
        "name" => Some(name(locale, alphabet)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    fn run(validator: &FieldValidator, value: Value) -> Vec<String> {
        let mut body = Map::new();
        body.insert(validator.field().to_string(), value);
        validator
            .run(&body)
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[test]
    fn short_account_is_rejected_with_length_rule() {
        let errors = run(&account(Locale::Ko), json!("ab1"));
        assert_eq!(errors, vec!["영어 대/소문자, 숫자, 4~8 글자 허용"]);
    }

    #[test]
    fn regular_account_is_accepted() {
        assert!(run(&account(Locale::Ko), json!("abc123")).is_empty());
    }

    #[test]
    fn blank_account_reports_required_only() {
        let errors = run(&account(Locale::En), json!("   "));
        assert_eq!(errors, vec!["Account is required."]);
    }

    #[test]
    fn password_allows_bang_and_at() {
        assert!(run(&password(Locale::Ko), json!("ab!@12")).is_empty());
        assert_eq!(run(&password(Locale::Ko), json!("ab#12")).len(), 1);
    }

    #[test]
    fn name_outside_alphabet_is_rejected() {
        let errors = run(&name(Locale::Ko, NameAlphabet::Hangul), json!("A1"));
        assert_eq!(errors, vec!["한글 2~30글자 허용"]);
    }

    #[test]
    fn two_syllable_name_is_accepted() {
        assert!(run(&name(Locale::Ko, NameAlphabet::Hangul), json!("가람")).is_empty());
        assert!(run(&name(Locale::Ko, NameAlphabet::Hangul), json!(" 강가람 ")).is_empty());
    }

    #[test]
    fn latin_alphabet_switches_pattern_and_message() {
        let validator = name(Locale::En, NameAlphabet::Latin);
        assert!(run(&validator, json!("Jo")).is_empty());
        assert_eq!(
            run(&validator, json!("가람")),
            vec!["Upper/lower case letters only, 2 to 30 characters"]
        );
    }

    #[test]
    fn hangul_jamo_are_not_syllables() {
        assert_eq!(run(&name(Locale::Ko, NameAlphabet::Hangul), json!("ㄱㄴ")).len(), 1);
    }

    #[test]
    fn lookup_by_field_name() {
        assert!(by_name("password", Locale::Ko, NameAlphabet::Hangul).is_some());
        assert!(by_name("email", Locale::Ko, NameAlphabet::Hangul).is_none());
        assert_eq!("Latin".parse::<NameAlphabet>(), Ok(NameAlphabet::Latin));
    }

    fn ascii_alnum(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_alphanumeric())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        #[test]
        fn account_accepted_iff_alnum_and_4_to_8(input in "[a-zA-Z0-9!@ #가]{0,10}") {
            let trimmed = input.trim();
            let expected = ascii_alnum(trimmed) && (4..=8).contains(&trimmed.chars().count());
            prop_assert_eq!(run(&account(Locale::Ko), json!(input)).is_empty(), expected);
        }

        #[test]
        fn password_accepted_iff_allowed_chars_and_4_to_8(input in "[a-zA-Z0-9!@#$ ]{0,10}") {
            let trimmed = input.trim();
            let expected = trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '!' || c == '@')
                && (4..=8).contains(&trimmed.chars().count());
            prop_assert_eq!(run(&password(Locale::Ko), json!(input)).is_empty(), expected);
        }

        #[test]
        fn hangul_name_accepted_iff_syllables_and_2_to_30(input in "[가-힣A1 ]{0,32}") {
            let trimmed = input.trim();
            let expected = trimmed.chars().all(|c| ('가'..='힣').contains(&c))
                && (2..=30).contains(&trimmed.chars().count());
            prop_assert_eq!(
                run(&name(Locale::Ko, NameAlphabet::Hangul), json!(input)).is_empty(),
                expected
            );
        }

        #[test]
        fn at_most_one_error_per_field(input in ".{0,12}") {
            prop_assert!(run(&account(Locale::En), json!(input)).len() <= 1);
        }
    }
}
