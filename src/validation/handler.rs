use serde_json::{Map, Value};

use super::chain::ValidationOutcome;
use crate::error::ApiError;
use crate::i18n::{t, Message};

/// Lets a clean request through with its sanitized body, or stops it with every
/// collected field error.
pub fn validation_handler(outcome: ValidationOutcome) -> Result<Map<String, Value>, ApiError> {
    if outcome.is_valid() {
        return Ok(outcome.sanitized);
    }

    tracing::debug!(
        fields = ?outcome.errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
        "request rejected by validators"
    );
    Err(ApiError::validation_error(t(Message::ValidationFailed), outcome.errors))
}
