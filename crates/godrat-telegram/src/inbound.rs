//! Inbound message source over a teloxide update stream.

use std::fmt;

use async_trait::async_trait;
use futures::{stream::BoxStream, Stream, StreamExt};
use teloxide::types::{Update, UpdateKind};
use tokio_util::sync::CancellationToken;

use godrat_core::{
    domain::ChatId,
    messaging::{port::InboundPort, types::IncomingMessage},
    Result,
};

/// Yields chat messages from an update stream (normally teloxide's
/// `Polling` listener) strictly in delivery order.
///
/// Offsets and backoff belong to the listener. Stream errors are logged and
/// skipped.
pub struct TelegramUpdates<'a, E> {
    updates: BoxStream<'a, std::result::Result<Update, E>>,
    shutdown: CancellationToken,
}

impl<'a, E> TelegramUpdates<'a, E> {
    pub fn new<S>(updates: S, shutdown: CancellationToken) -> Self
    where
        S: Stream<Item = std::result::Result<Update, E>> + Send + 'a,
    {
        Self {
            updates: updates.boxed(),
            shutdown,
        }
    }
}

#[async_trait]
impl<'a, E> InboundPort for TelegramUpdates<'a, E>
where
    E: fmt::Display + Send + 'a,
{
    async fn next_message(&mut self) -> Result<Option<IncomingMessage>> {
        loop {
            let next = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Ok(None),
                next = self.updates.next() => next,
            };
            match next {
                None => return Ok(None),
                Some(Ok(update)) => {
                    if let Some(msg) = incoming_from_update(update) {
                        return Ok(Some(msg));
                    }
                }
                Some(Err(e)) => tracing::warn!(error = %e, "telegram update polling failed"),
            }
        }
    }
}

/// Only plain messages reach the router; other update kinds are dropped.
pub fn incoming_from_update(update: Update) -> Option<IncomingMessage> {
    let UpdateKind::Message(msg) = update.kind else {
        return None;
    };
    Some(IncomingMessage {
        chat_id: ChatId(msg.chat.id.0),
        text: msg.text().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use serde_json::json;

    // Bot API payloads arrive as text; parse them the same way.
    fn update(body: serde_json::Value) -> Update {
        serde_json::from_str(&body.to_string()).unwrap()
    }

    fn text_update(update_id: i32, chat_id: i64, text: &str) -> Update {
        update(json!({
            "update_id": update_id,
            "message": {
                "message_id": update_id,
                "date": 1700000000,
                "chat": { "id": chat_id, "type": "private", "first_name": "Sara" },
                "from": { "id": 7, "is_bot": false, "first_name": "Sara", "username": "sara" },
                "text": text
            }
        }))
    }

    fn edited_update(update_id: i32) -> Update {
        update(json!({
            "update_id": update_id,
            "edited_message": {
                "message_id": 6,
                "date": 1700000000,
                "edit_date": 1700000100,
                "chat": { "id": 42, "type": "private", "first_name": "Sara" },
                "from": { "id": 7, "is_bot": false, "first_name": "Sara" },
                "text": "Algorithms"
            }
        }))
    }

    fn location_update(update_id: i32) -> Update {
        update(json!({
            "update_id": update_id,
            "message": {
                "message_id": 9,
                "date": 1700000000,
                "chat": { "id": 42, "type": "private", "first_name": "Sara" },
                "location": { "latitude": 35.7, "longitude": 51.4 }
            }
        }))
    }

    #[test]
    fn maps_text_message() {
        let u = text_update(10, 42, "/listclasses");
        assert!(matches!(u.kind, UpdateKind::Message(_)));
        let msg = incoming_from_update(u).unwrap();
        assert_eq!(msg.chat_id, ChatId(42));
        assert_eq!(msg.text.as_deref(), Some("/listclasses"));
    }

    #[test]
    fn non_text_message_keeps_chat_without_text() {
        let u = location_update(12);
        assert!(matches!(u.kind, UpdateKind::Message(_)));
        let msg = incoming_from_update(u).unwrap();
        assert_eq!(msg.chat_id, ChatId(42));
        assert_eq!(msg.text, None);
    }

    #[test]
    fn edited_messages_are_skipped() {
        let u = edited_update(11);
        assert!(matches!(u.kind, UpdateKind::EditedMessage(_)));
        assert!(incoming_from_update(u).is_none());
    }

    #[tokio::test]
    async fn yields_messages_in_order_and_skips_errors() {
        let items: Vec<std::result::Result<Update, &str>> = vec![
            Ok(text_update(1, 42, "first")),
            Err("connection reset"),
            Ok(edited_update(2)),
            Ok(text_update(3, 43, "second")),
        ];
        let mut inbound = TelegramUpdates::new(stream::iter(items), CancellationToken::new());

        let first = inbound.next_message().await.unwrap().unwrap();
        assert_eq!((first.chat_id, first.text.as_deref()), (ChatId(42), Some("first")));
        let second = inbound.next_message().await.unwrap().unwrap();
        assert_eq!((second.chat_id, second.text.as_deref()), (ChatId(43), Some("second")));
        assert_eq!(inbound.next_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn cancelled_source_stops_before_pending_updates() {
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let items: Vec<std::result::Result<Update, &str>> = vec![Ok(text_update(1, 42, "late"))];
        let mut inbound = TelegramUpdates::new(stream::iter(items), shutdown);
        assert_eq!(inbound.next_message().await.unwrap(), None);
    }

    #[tokio::test]
    async fn endless_source_stops_on_cancel() {
        let shutdown = CancellationToken::new();
        let mut inbound = TelegramUpdates::new(
            stream::pending::<std::result::Result<Update, &str>>(),
            shutdown.clone(),
        );
        shutdown.cancel();
        assert_eq!(inbound.next_message().await.unwrap(), None);
    }
}
