use crate::{errors::Error, Result};

/// Initialize tracing for the bot.
///
/// `json` switches the formatter to one JSON object per line.
pub fn init(service_name: &str, json: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    // Can be overridden with `RUST_LOG`.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(service_name)));

    let builder = fmt().with_env_filter(filter).with_target(false);
    let res = if json {
        builder.json().try_init()
    } else {
        builder.with_ansi(true).try_init()
    };

    res.map_err(|e| Error::Config(format!("failed to install tracing subscriber: {e}")))
}

/// Info for our crates, warn for everything else.
fn default_filter(service_name: &str) -> String {
    format!("warn,godrat_core=info,godrat_supabase=info,godrat_telegram=info,{service_name}=info")
}
