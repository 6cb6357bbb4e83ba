use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::IncomingMessage,
    Result,
};

/// Outbound side of the chat transport.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Deliver a plain-text reply. Delivery is best effort.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;
}

/// Inbound side of the chat transport: an ordered, possibly endless stream.
#[async_trait]
pub trait InboundPort: Send {
    /// Next message in delivery order; `Ok(None)` once the stream is closed.
    async fn next_message(&mut self) -> Result<Option<IncomingMessage>>;
}
