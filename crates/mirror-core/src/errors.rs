/// Core error type.
///
/// The classifier itself never fails on user text; errors here are either
/// startup integrity problems (malformed rule table, bad config) or lookups
/// with an identifier the closed table does not know.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("unknown distortion category: {0}")]
    UnknownCategory(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
