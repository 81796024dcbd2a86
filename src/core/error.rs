//! Custom error types for the browser side of the application.
//!
//! - [`FetchError`] - network requests (drive listing, webhook)
//! - [`StorageError`] - localStorage / sessionStorage access
//! - [`WebhookError`] - submitting the merge payload
//! - [`ThumbnailError`] - reading the picked thumbnail image

use std::fmt;

use mergedesk_core::HistoryError;

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// Browser window not available
    NoWindow,
    /// Endpoint not configured at build time
    NotConfigured(&'static str),
    /// Failed to create HTTP request
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    NetworkError(String),
    /// HTTP error response (non-2xx status) with body text
    HttpError(u16, String),
    /// Failed to read response body
    ResponseReadFailed,
    /// Invalid response content (not text)
    InvalidContent,
    /// JSON parsing error
    JsonParseError(String),
    /// Request timed out
    Timeout,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::NotConfigured(var) => write!(f, "{} is not configured", var),
            Self::RequestCreationFailed => write!(f, "Failed to create request"),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::HttpError(status, body) if body.is_empty() => write!(f, "HTTP error: {}", status),
            Self::HttpError(status, body) => write!(f, "HTTP error {}: {}", status, body),
            Self::ResponseReadFailed => write!(f, "Failed to read response"),
            Self::InvalidContent => write!(f, "Invalid response content"),
            Self::JsonParseError(msg) => write!(f, "JSON parse error: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Browser storage errors.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Storage not available (private mode, disabled, no window).
    Unavailable,
    /// Failed to write an entry.
    WriteFailed,
    /// Failed to remove an entry.
    RemoveFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "browser storage not available"),
            Self::WriteFailed => write!(f, "failed to write to browser storage"),
            Self::RemoveFailed => write!(f, "failed to remove from browser storage"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unavailable => HistoryError::StorageUnavailable,
            other => HistoryError::WriteFailed(other.to_string()),
        }
    }
}

/// Webhook submission errors.
#[derive(Debug, Clone)]
pub enum WebhookError {
    /// Payload could not be serialized
    Serialize(String),
    /// Request failed or the webhook answered non-2xx
    Fetch(FetchError),
    /// Video body could not be saved
    DownloadFailed,
}

impl fmt::Display for WebhookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize(msg) => write!(f, "Failed to encode payload: {}", msg),
            Self::Fetch(err) => write!(f, "Webhook error: {}", err),
            Self::DownloadFailed => write!(f, "Failed to save the returned video"),
        }
    }
}

impl std::error::Error for WebhookError {}

impl From<FetchError> for WebhookError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

/// Thumbnail file errors.
#[derive(Debug, Clone)]
pub enum ThumbnailError {
    /// Picked file is not an image
    NotAnImage(String),
    /// File contents could not be read
    ReadFailed,
}

impl fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnImage(mime) => write!(f, "Not an image ({})", mime),
            Self::ReadFailed => write!(f, "Could not read thumbnail file"),
        }
    }
}

impl std::error::Error for ThumbnailError {}
