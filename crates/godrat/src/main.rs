use std::sync::Arc;

use godrat_core::{config::Config, store::port::RecordStore};
use godrat_supabase::SupabaseClient;

#[tokio::main]
async fn main() -> Result<(), godrat_core::Error> {
    let cfg = Arc::new(Config::load()?);
    godrat_core::logging::init("godrat", cfg.log_json)?;

    let store: Arc<dyn RecordStore> = Arc::new(SupabaseClient::new(
        &cfg.supabase_url,
        cfg.supabase_api_key.clone(),
        cfg.store_request_timeout,
    )?);
    tracing::info!(url = %cfg.supabase_url, "record store client ready");

    godrat_telegram::polling::run_polling(cfg, store)
        .await
        .map_err(|e| godrat_core::Error::External(format!("telegram bot failed: {e:#}")))?;

    Ok(())
}
