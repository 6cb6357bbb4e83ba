/// Core error type for the class bot.
///
/// Adapter crates map their specific errors into this type so the router can
/// tell a record-store failure from a response it could not decode.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record store error: {0}")]
    Store(String),

    #[error("external error: {0}")]
    External(String),
}

impl Error {
    /// True when the remote call succeeded but its payload had the wrong shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
