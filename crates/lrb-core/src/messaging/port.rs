use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::MessagingCapabilities,
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the first implementation; the shape leaves room for future
/// adapters behind the same interface with capability flags.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    /// Send plain text to a conversation. The caller is responsible for
    /// keeping `text` within `capabilities().max_message_len`.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;
}
