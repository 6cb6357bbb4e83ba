use crate::domain::ChatId;

/// A chat message as seen by the router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    /// `None` for stickers, photos and other non-text messages.
    pub text: Option<String>,
}

impl IncomingMessage {
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: Some(text.into()),
        }
    }
}
