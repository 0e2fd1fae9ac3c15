//! Declarative request validation.
//!
//! Each input field owns an ordered list of [`Rule`]s. A [`FieldValidator`] runs its rules
//! against one body field and collects errors instead of failing fast; a [`ValidationChain`]
//! groups the validators an endpoint needs. [`validation_handler`] turns the collected errors
//! into a single 400 response.

pub mod chain;
pub mod field;
pub mod fields;
pub mod handler;
pub mod rule;

pub use chain::{login_chain, registration_chain, ValidationChain, ValidationOutcome, LOGIN, REGISTRATION};
pub use field::{FieldError, FieldValidator};
pub use fields::NameAlphabet;
pub use handler::validation_handler;
pub use rule::{Check, Rule, Sanitizer};
