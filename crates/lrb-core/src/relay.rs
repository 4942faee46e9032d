//! The message relay: binds incoming updates to the user store and the
//! completion client, and shapes outgoing replies.

use std::sync::Arc;

use crate::{
    completion::{CompletionClient, CompletionError},
    domain::ChatId,
    formatting::split_message,
    messaging::{
        port::MessagingPort,
        types::{Command, IncomingUpdate, TextMessage},
    },
    store::{Registration, UserStore},
    Result,
};

pub const START_COMMAND: &str = "start";

const WELCOME_BACK_REPLY: &str = "Welcome back! Just send me your question.";
const UNSUPPORTED_MODEL_REPLY: &str = "Unsupported model";

fn welcome_reply(default_model: &str) -> String {
    format!(
        "Welcome to the LLM Bot!\n\
         You're registered with {default_model} as your default model.\n\
         Just send me your question, and I'll process it."
    )
}

/// Request-handling path, with all collaborators injected so tests can
/// substitute fakes.
pub struct Relay {
    store: Arc<dyn UserStore>,
    completions: Arc<dyn CompletionClient>,
    messenger: Arc<dyn MessagingPort>,
}

impl Relay {
    pub fn new(
        store: Arc<dyn UserStore>,
        completions: Arc<dyn CompletionClient>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            store,
            completions,
            messenger,
        }
    }

    pub async fn handle(&self, update: IncomingUpdate) -> Result<()> {
        match update {
            IncomingUpdate::Command(cmd) if cmd.name == START_COMMAND => {
                self.handle_start(&cmd).await
            }
            IncomingUpdate::Command(cmd) => {
                // The adapter forwards unknown slash commands as plain text;
                // a Command with another name reaching the core is a bug, not
                // something to answer.
                tracing::debug!(command = %cmd.name, "ignoring unrecognized command");
                Ok(())
            }
            IncomingUpdate::Text(msg) => self.handle_text(&msg).await,
        }
    }

    /// Registration: upsert the user, then reply. Fresh registrations get
    /// the welcome wording; returning users and storage failures both get
    /// the short welcome-back. A reply is always sent.
    async fn handle_start(&self, cmd: &Command) -> Result<()> {
        let reply = match self
            .store
            .register(cmd.user_id, cmd.username.as_deref())
            .await
        {
            Ok(Registration::Fresh) => welcome_reply(self.store.default_model()),
            Ok(Registration::Returning) => WELCOME_BACK_REPLY.to_string(),
            Err(err) => {
                tracing::warn!(
                    user_id = cmd.user_id.0,
                    error = %err,
                    "registration failed; replying as returning user"
                );
                WELCOME_BACK_REPLY.to_string()
            }
        };

        self.send_chunked(cmd.chat_id, &reply).await
    }

    /// General text: look up the user's model (defaulting if absent), run the
    /// completion, and send the result back chunked to the transport limit.
    async fn handle_text(&self, msg: &TextMessage) -> Result<()> {
        if msg.text.trim().is_empty() {
            return Ok(());
        }

        let model = self.store.get_model(msg.user_id).await;
        let reply = match self.completions.complete(&model, &msg.text).await {
            Ok(text) => text,
            Err(CompletionError::UnsupportedModel { model }) => {
                tracing::debug!(user_id = msg.user_id.0, %model, "unsupported model");
                UNSUPPORTED_MODEL_REPLY.to_string()
            }
            Err(err) => {
                // Auth failures get a louder log than routine API errors;
                // the reply contract is the same.
                match &err {
                    CompletionError::Auth(_) => {
                        tracing::error!(user_id = msg.user_id.0, error = %err, "completion auth failure")
                    }
                    _ => tracing::warn!(user_id = msg.user_id.0, error = %err, "completion failed"),
                }
                format!("Error processing request: {err}")
            }
        };

        self.send_chunked(msg.chat_id, &reply).await
    }

    async fn send_chunked(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let limit = self.messenger.capabilities().max_message_len;
        for chunk in split_message(text, limit) {
            self.messenger.send_text(chat_id, &chunk).await?;
        }
        Ok(())
    }
}
