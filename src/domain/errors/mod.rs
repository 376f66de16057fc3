// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Domain-specific error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The external transcoder could not be started or did not answer `-version`
    #[error("Transcoding tool not available: {0}")]
    ToolNotAvailable(String),

    /// A media item could not be opened for preview
    #[error("Failed to open media source {item}: {message}")]
    SourceOpenFailure { item: String, message: String },

    /// The transcoder exited with a failure status for one item
    #[error("Transcoding failed for {item}: {excerpt}")]
    TranscodeFailure {
        item: String,
        exit_code: Option<i32>,
        excerpt: String,
    },

    /// Missing output location, empty item list, or invalid config values
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),

    /// Session file could not be read or written
    #[error("Session error: {0}")]
    Session(String),

    /// The background batch task ended without a report
    #[error("Batch task failed: {0}")]
    TaskFailed(String),
}

impl DomainError {
    /// Build a transcode failure, keeping at most `limit` characters of the tool output
    pub fn transcode_failure(
        item: impl Into<String>,
        exit_code: Option<i32>,
        stderr: &str,
        limit: usize,
    ) -> Self {
        DomainError::TranscodeFailure {
            item: item.into(),
            exit_code,
            excerpt: excerpt(stderr, limit),
        }
    }
}

/// Characters of tool output kept when a single export fails
pub const DEFAULT_EXCERPT_LEN: usize = 500;

/// Truncate tool output to `limit` characters, marking the cut with an ellipsis
pub fn excerpt(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= limit {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(limit).collect();
    cut.push_str("...");
    cut
}
