use thiserror::Error;

/// Everything that can go wrong talking to the backend, configuring the
/// client or saving an export
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse backend response, error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    BadHeader(String),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
