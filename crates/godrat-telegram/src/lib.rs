//! Telegram adapter (teloxide).
//!
//! This crate implements the `godrat-core` messaging ports over the Telegram
//! Bot API.

use async_trait::async_trait;

use teloxide::prelude::*;

use tokio::time::sleep;

pub mod inbound;
pub mod polling;

use godrat_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::port::MessagingPort,
    Result,
};

/// Telegram's hard cap on message text length.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    max_message_len: usize,
}

impl TelegramMessenger {
    pub fn new(bot: Bot, max_message_len: usize) -> Self {
        Self {
            bot,
            max_message_len: max_message_len.min(TELEGRAM_MAX_MESSAGE_LEN),
        }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    /// Sends `text` as one message, or as consecutive chunks when it is over
    /// the length limit. Returns the last message sent.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let mut last = None;
        for chunk in split_text_chunks(text, self.max_message_len) {
            let msg = self
                .with_retry(|| self.bot.send_message(Self::tg_chat(chat_id), chunk.clone()))
                .await?;
            last = Some(MessageRef {
                chat_id,
                message_id: MessageId(msg.id.0),
            });
        }
        last.ok_or_else(|| Error::External("refusing to send an empty message".to_string()))
    }
}

/// Split `text` at line boundaries so no chunk exceeds `limit` characters.
///
/// Lines longer than `limit` are hard-split on char boundaries.
pub fn split_text_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    if text.chars().count() <= limit {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
    }

    let mut out = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if chunk_len + line_len > limit && !chunk.is_empty() {
            out.push(std::mem::take(&mut chunk));
            chunk_len = 0;
        }
        if line_len <= limit {
            chunk.push_str(line);
            chunk_len += line_len;
            continue;
        }

        // Oversized line: emit full-width pieces and keep the tail open.
        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(limit).peekable();
        while let Some(piece) = pieces.next() {
            let piece: String = piece.iter().collect();
            if pieces.peek().is_some() {
                out.push(piece);
            } else {
                chunk_len = piece.chars().count();
                chunk = piece;
            }
        }
    }
    if !chunk.is_empty() {
        out.push(chunk);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_short_text_intact() {
        let text = "📚 لیست همه کلاس‌ها:\n\n🔷 هیچ کلاس اصلی‌ای یافت نشد.\n";
        assert_eq!(split_text_chunks(text, 4096), vec![text.to_string()]);
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_text_chunks("", 10).is_empty());
    }

    #[test]
    fn splits_on_line_boundaries_under_limit() {
        let line = format!("{}\n", "x".repeat(9));
        let text = line.repeat(25);
        let chunks = split_text_chunks(&text, 50);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= 50));
        assert!(chunks.iter().all(|c| c.ends_with('\n')));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn hard_splits_oversized_line_on_char_boundaries() {
        let text = format!("head\n{}\ntail", "ک".repeat(25));
        let chunks = split_text_chunks(&text, 10);

        assert!(chunks.iter().all(|c| c.chars().count() <= 10));
        assert_eq!(chunks.concat(), text);
    }
}
