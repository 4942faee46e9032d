use crate::completion::CompletionError;

/// Core error type for the relay bot.
///
/// Adapter crates map their specific errors into this type so the relay can
/// handle failures consistently (degrade to a reply vs abort startup).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
