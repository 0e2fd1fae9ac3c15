// handlers/users/delete.rs - DELETE /users/:id handler

use axum::extract::Path;

use crate::i18n::{t, Message};

pub async fn user_delete(Path(id): Path<String>) -> &'static str {
    tracing::debug!(id = %id, "user delete requested");
    t(Message::UserDeleted)
}
