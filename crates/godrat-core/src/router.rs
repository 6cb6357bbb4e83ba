//! Per-message command routing: classify, run at most one store operation,
//! reply once.

use std::sync::Arc;

use crate::{
    class::{ClassRecord, NewClass},
    formatting,
    intent::{self, Command, Intent},
    messaging::{
        port::{InboundPort, MessagingPort},
        types::IncomingMessage,
    },
    store::catalog::ClassCatalog,
    Result,
};

pub struct CommandRouter {
    catalog: ClassCatalog,
    messenger: Arc<dyn MessagingPort>,
}

impl CommandRouter {
    pub fn new(catalog: ClassCatalog, messenger: Arc<dyn MessagingPort>) -> Self {
        Self { catalog, messenger }
    }

    /// Process the inbound stream one message at a time until it closes.
    ///
    /// Only a failing inbound transport ends the loop early; per-message
    /// failures are answered and logged.
    pub async fn run(&self, inbound: &mut dyn InboundPort) -> Result<()> {
        while let Some(msg) = inbound.next_message().await? {
            self.dispatch(&msg).await;
        }
        tracing::info!("inbound stream closed");
        Ok(())
    }

    /// Handle one message and send its reply, if any.
    pub async fn dispatch(&self, msg: &IncomingMessage) {
        let Some(text) = msg.text.as_deref() else {
            return;
        };
        let Some(reply) = self.reply_for(text).await else {
            return;
        };
        if let Err(e) = self.messenger.send_text(msg.chat_id, &reply).await {
            tracing::warn!(chat_id = msg.chat_id.0, error = %e, "failed to send reply");
        }
    }

    /// Reply text for one message body; `None` means stay silent.
    pub async fn reply_for(&self, text: &str) -> Option<String> {
        let intent = intent::classify(text)?;
        tracing::debug!(?intent, "classified message");

        let reply = match intent {
            Intent::Command(Command::Start) => formatting::WELCOME.to_string(),
            Intent::Command(Command::AddClass) => formatting::ADD_CLASS_HELP.to_string(),
            Intent::Command(Command::FindClass) => formatting::FIND_CLASS_HELP.to_string(),
            Intent::Command(Command::ListClasses) => self.list_classes().await,
            Intent::AddClass(new) => self.add_class(new).await,
            Intent::Search(term) => self.search(&term).await,
            Intent::Rejected(e) => {
                tracing::info!(reason = ?e, "rejected input");
                formatting::input_error(&e).to_string()
            }
        };
        Some(reply)
    }

    async fn list_classes(&self) -> String {
        match self.catalog.list_all().await {
            Ok(classes) => {
                tracing::info!(count = classes.len(), "listed classes");
                formatting::render_listing(&classes)
            }
            Err(e) if e.is_decode() => {
                tracing::warn!(error = %e, "failed to decode class list");
                formatting::LIST_DECODE_FAILED.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "class list query failed");
                formatting::LIST_QUERY_FAILED.to_string()
            }
        }
    }

    async fn add_class(&self, new: NewClass) -> String {
        let record = ClassRecord::create(new);
        match self.catalog.insert(&record).await {
            Ok(()) => {
                tracing::info!(id = %record.id, name = %record.name, "class saved");
                formatting::CLASS_SAVED.to_string()
            }
            Err(e) => {
                tracing::warn!(name = %record.name, error = %e, "failed to save class");
                formatting::SAVE_FAILED.to_string()
            }
        }
    }

    async fn search(&self, term: &str) -> String {
        tracing::info!(term, "searching classes");
        match self.catalog.search_by_name(term).await {
            Ok(classes) if classes.is_empty() => formatting::no_search_results(term),
            Ok(classes) => {
                tracing::info!(term, count = classes.len(), "search matched");
                formatting::render_search_results(&classes)
            }
            Err(e) if e.is_decode() => {
                tracing::warn!(term, error = %e, "failed to decode search results");
                formatting::SEARCH_DECODE_FAILED.to_string()
            }
            Err(e) => {
                tracing::warn!(term, error = %e, "search query failed");
                formatting::SEARCH_QUERY_FAILED.to_string()
            }
        }
    }
}
