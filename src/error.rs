use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("2d drawing context is unavailable")]
    ContextUnavailable,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
