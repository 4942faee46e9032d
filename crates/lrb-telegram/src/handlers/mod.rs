//! Telegram update handlers.
//!
//! Explicit two-way dispatch: the `/start` command registers the user, any
//! other text goes to the general relay path, and non-text payloads (photos,
//! stickers, voice, ...) are ignored.

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use crate::router::AppState;

mod commands;
mod text;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let Some(message_text) = msg.text() else {
        tracing::debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    // Serialize handling per user so repeated /start upserts never race.
    let _guard = state.user_locks.lock_user(user_id).await;

    if message_text.starts_with('/') {
        return commands::handle_command(msg, state).await;
    }

    text::handle_text(msg, state).await
}
