// handlers/auth/registration.rs - POST /registration handler

use axum::extract::Extension;

use crate::i18n::{t, Message};
use crate::middleware::ValidatedBody;

/// Credentials are validated only; nothing is stored
pub async fn registration(Extension(ValidatedBody(body)): Extension<ValidatedBody>) -> &'static str {
    tracing::info!(account = ?body.get("account"), name = ?body.get("name"), "registration accepted");
    t(Message::RegistrationSucceeded)
}
