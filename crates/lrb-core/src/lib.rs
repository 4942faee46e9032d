//! Core domain + application logic for the LLM relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / the completion
//! API / the user store live behind ports (traits) implemented in adapter
//! crates.

pub mod completion;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod relay;
pub mod store;

pub use errors::{Error, Result};
