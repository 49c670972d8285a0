//! Conversation management.
//!
//! A `Conversation` owns the transcript shown to the user and turns each
//! submitted line into one query round trip. Every accepted submission
//! ends with exactly one agent message: the service's answer, or
//! `FALLBACK_REPLY` when anything at all goes wrong.

mod manager;
mod submit;
mod types;

pub use manager::Conversation;
pub use types::{ConversationState, FALLBACK_REPLY};
