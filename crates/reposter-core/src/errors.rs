/// Core error type.
///
/// Adapter crates map their library errors into this type so every handler
/// failure can be routed through the same admin-reporting path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(String),

    /// A stored or supplied chat identity that does not parse as a numeric id.
    #[error("invalid chat id: {0:?}")]
    InvalidChatId(String),

    #[error("telegram error: {0}")]
    Telegram(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
