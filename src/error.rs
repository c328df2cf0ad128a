use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Candle series is empty")]
    EmptySeries,

    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),

    #[error("Missing candles input: {0}")]
    MissingInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
