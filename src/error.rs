//! Error types for tournament_proxies

use thiserror::Error;

/// Unified error type for fetching, parsing and writing
#[derive(Debug, Error)]
pub enum ProxyError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Decklist CSV has no column with the expected header
    #[error("Decklist is missing required column '{0}'")]
    MissingColumn(String),
}

/// Result alias for tournament_proxies operations
pub type ProxyResult<T> = Result<T, ProxyError>;
