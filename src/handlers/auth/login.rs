// handlers/auth/login.rs - POST /login handler

use axum::extract::Extension;

use crate::i18n::{t, Message};
use crate::middleware::ValidatedBody;

pub async fn login(Extension(ValidatedBody(body)): Extension<ValidatedBody>) -> &'static str {
    tracing::info!(account = ?body.get("account"), "login accepted");
    t(Message::LoginSucceeded)
}
