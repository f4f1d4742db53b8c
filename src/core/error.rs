use std::fmt;

/// Comprehensive error types for streamsup operations
#[derive(Debug)]
pub enum StreamsUpError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Station store error
    Repository(String),

    /// JSON serialization error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for StreamsUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamsUpError::Io(err) => write!(f, "IO error: {err}"),
            StreamsUpError::Config(msg) => write!(f, "Configuration error: {msg}"),
            StreamsUpError::Http(err) => write!(f, "HTTP error: {err}"),
            StreamsUpError::Repository(msg) => write!(f, "Station store error: {msg}"),
            StreamsUpError::Json(err) => write!(f, "JSON error: {err}"),
            StreamsUpError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            StreamsUpError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for StreamsUpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamsUpError::Io(err) => Some(err),
            StreamsUpError::Http(err) => Some(err),
            StreamsUpError::Json(err) => Some(err),
            StreamsUpError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StreamsUpError {
    fn from(err: std::io::Error) -> Self {
        StreamsUpError::Io(err)
    }
}

impl From<reqwest::Error> for StreamsUpError {
    fn from(err: reqwest::Error) -> Self {
        StreamsUpError::Http(err)
    }
}

impl From<serde_json::Error> for StreamsUpError {
    fn from(err: serde_json::Error) -> Self {
        StreamsUpError::Json(err)
    }
}

impl From<toml::de::Error> for StreamsUpError {
    fn from(err: toml::de::Error) -> Self {
        StreamsUpError::TomlParsing(err)
    }
}

/// Type alias for Results using StreamsUpError
pub type Result<T> = std::result::Result<T, StreamsUpError>;
