use clover_client::ApiError;

/// Failures surfaced by handlers and their collaborators.
#[derive(Debug, thiserror::Error)]
pub enum BffError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("session: {0}")]
    Session(String),

    #[error("clipboard: {0}")]
    Clipboard(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BffError>;
