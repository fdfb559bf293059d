//! Error types for instant-markup operations.

use thiserror::Error;

/// Errors that can occur while building a tree or loading configuration.
///
/// None of these escape [`Reformatter::reformat`](crate::Reformatter::reformat):
/// the orchestrator degrades to the shortcode-expanded content instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTML parsing error: {0}")]
    Parse(String),

    #[error("Input too large: {len} bytes (limit {max})")]
    InputTooLarge { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
