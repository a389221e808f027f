//! Error types for ollabench.
//!
//! Errors are organized by concern so the CLI can report what went wrong and
//! where (config file, inference service, or a specific image on disk).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for ollabench operations.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Inference service errors
    #[error("Inference service error: {0}")]
    Client(#[from] ClientError),

    /// Image input errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors talking to the inference service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced an HTTP response (connection refused, timeout, ...)
    #[error("Request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    /// The service answered with a non-success status
    #[error("HTTP {status_code}: {body}")]
    Http { status_code: u16, body: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

/// Errors for a single image input.
#[derive(Error, Debug)]
pub enum ImageError {
    /// File does not exist
    #[error("Image not found: {0}")]
    NotFound(PathBuf),

    /// File exists but could not be read
    #[error("Error reading file {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    /// Header does not match PNG or JPEG magic bytes
    #[error("Not a PNG/JPEG image: {0}")]
    InvalidType(PathBuf),
}

/// Convenience type alias for ollabench results.
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Http {
            status_code: 404,
            body: "model 'nope' not found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: model 'nope' not found");
    }

    #[test]
    fn test_bench_error_from_config() {
        let err: BenchError = ConfigError::ValidationError("bad".into()).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
