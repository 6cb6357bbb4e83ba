use std::{sync::Arc, time::Duration};

use anyhow::Context;
use teloxide::{
    prelude::*,
    types::AllowedUpdate,
    update_listeners::{AsUpdateStream, Polling},
};
use tokio_util::sync::CancellationToken;

use godrat_core::{
    config::Config, messaging::port::MessagingPort, router::CommandRouter,
    store::catalog::ClassCatalog, store::port::RecordStore,
};

use crate::inbound::TelegramUpdates;
use crate::TelegramMessenger;

/// Headroom on top of the long-poll timeout for the HTTP request itself.
const POLL_REQUEST_SLACK: Duration = Duration::from_secs(10);

/// Connect to Telegram and serve messages until Ctrl-C.
pub async fn run_polling(cfg: Arc<Config>, store: Arc<dyn RecordStore>) -> anyhow::Result<()> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(cfg.poll_timeout + POLL_REQUEST_SLACK)
        .build()
        .context("failed to build telegram http client")?;
    let bot = Bot::with_client(cfg.telegram_bot_token.clone(), client);

    let me = bot
        .get_me()
        .await
        .context("telegram bot init failed (check TELEGRAM_BOT_TOKEN)")?;
    tracing::info!(
        bot = %me.username(),
        table = %cfg.class_table,
        poll_timeout = ?cfg.poll_timeout,
        "bot started"
    );

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(
        bot.clone(),
        cfg.telegram_message_limit,
    ));
    let router = CommandRouter::new(
        ClassCatalog::new(store, cfg.class_table.clone()),
        messenger,
    );

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("shutdown requested");
                shutdown.cancel();
            }
        });
    }

    let mut polling = Polling::builder(bot)
        .timeout(cfg.poll_timeout)
        .allowed_updates(vec![AllowedUpdate::Message])
        .build();
    let mut inbound = TelegramUpdates::new(polling.as_stream(), shutdown);
    router
        .run(&mut inbound)
        .await
        .context("message loop failed")?;

    tracing::info!("bot stopped");
    Ok(())
}
