use crate::domain::{ChatId, UserId};

/// Cross-messenger incoming update model.
///
/// The relay recognizes exactly two kinds of events; everything else is
/// dropped by the adapter before it reaches the core (explicit two-way
/// dispatch instead of a catch-all predicate).
#[derive(Clone, Debug)]
pub enum IncomingUpdate {
    Command(Command),
    Text(TextMessage),
}

#[derive(Clone, Debug)]
pub struct Command {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub username: Option<String>,
    pub name: String,
    pub args: String,
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub username: Option<String>,
    pub text: String,
}

/// Capabilities / limits of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    /// Hard per-message character limit of the transport.
    pub max_message_len: usize,
}
