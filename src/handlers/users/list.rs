// handlers/users/list.rs - GET /users handler

use crate::i18n::{t, Message};

pub async fn user_list() -> &'static str {
    t(Message::UsersListed)
}
