use async_trait::async_trait;

use crate::{domain::UserId, Result};

/// Model identifier assigned to users who never picked one explicitly.
pub const DEFAULT_MODEL: &str = "chatgpt-4o-latest";

/// Outcome of a registration upsert, used to pick the welcome wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// First time this user id was seen; a new record was created.
    Fresh,
    /// The record already existed; only `last_active` (and the username
    /// snapshot) were refreshed.
    Returning,
}

/// Port for per-user registration and model-preference state.
///
/// The SQLite implementation lives in the `lrb-store` crate; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Idempotent upsert keyed by `user_id`.
    ///
    /// Re-registration must never alter `model_name` or `registration_date`.
    /// Storage failures surface as `Error::Storage`; the caller degrades to
    /// the returning-user reply instead of crashing.
    async fn register(&self, user_id: UserId, username: Option<&str>) -> Result<Registration>;

    /// The stored model for a known user, or [`DEFAULT_MODEL`] otherwise.
    ///
    /// Never fails outward: unknown users and storage failures both resolve
    /// to the default.
    async fn get_model(&self, user_id: UserId) -> String;

    /// The fixed process-wide default model identifier (pure, no I/O).
    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }
}
