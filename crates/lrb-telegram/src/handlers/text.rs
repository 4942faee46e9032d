use std::sync::Arc;

use teloxide::prelude::*;

use lrb_core::{
    domain::{ChatId, UserId},
    messaging::types::{IncomingUpdate, TextMessage},
};

use crate::router::AppState;

pub async fn handle_text(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text().map(|s| s.to_string()) else {
        return Ok(());
    };

    let update = IncomingUpdate::Text(TextMessage {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        text,
    });

    if let Err(e) = state.relay.handle(update).await {
        tracing::warn!(chat_id = msg.chat.id.0, error = %e, "text handler failed");
    }

    Ok(())
}
