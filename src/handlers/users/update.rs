// handlers/users/update.rs - PUT /users/:id handler

use axum::extract::Path;

use crate::i18n::{t, Message};

pub async fn user_update(Path(id): Path<String>) -> &'static str {
    tracing::debug!(id = %id, "user update requested");
    t(Message::UserUpdated)
}
