use std::sync::Arc;

use teloxide::prelude::*;

use lrb_core::{
    domain::{ChatId, UserId},
    messaging::types::{Command, IncomingUpdate},
    relay::START_COMMAND,
};

use crate::router::AppState;

use super::text;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let raw = msg.text().unwrap_or("");
    let (cmd, args) = parse_command(raw);

    if cmd != START_COMMAND {
        // No other commands exist; anything else is just text for the model.
        return text::handle_text(msg, state).await;
    }

    let update = IncomingUpdate::Command(Command {
        chat_id: ChatId(msg.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        username: user.username.clone(),
        name: cmd,
        args,
    });

    if let Err(e) = state.relay.handle(update).await {
        tracing::warn!(chat_id = msg.chat.id.0, error = %e, "start handler failed");
    }

    Ok(())
}
