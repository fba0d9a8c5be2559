//! # Completion endpoint
//!
//! Talks to the remote text-completion API that turns a geometry prompt into
//! free text.
//! - `send`: builds the chat-messages request and performs the HTTP call
//! - `receive`: maps the HTTP status and body onto an answer or a tagged error
//!
//! ```text
//! prompt → send.rs (POST /chat-messages) → receive.rs (answer | error) → postprocessing
//! ```

pub mod receive;
pub mod send;

pub use receive::decode_response;
pub use send::{ChatMessageRequest, ChatMessagesClient};

use crate::error::InterpretResult;
use async_trait::async_trait;

/// Anything that can turn a prompt into the model's raw answer text.
#[async_trait]
pub trait CompletionEndpoint: Send + Sync {
    async fn complete(&self, query: &str) -> InterpretResult<String>;
}

#[cfg(test)]
mod tests;
