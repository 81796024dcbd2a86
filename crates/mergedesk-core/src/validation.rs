//! Merge form validation.
//!
//! Validation never fails: it returns the list of problems, each tagged with
//! the form field it belongs to. An empty list means the form can be
//! submitted.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::payload::{MergeDraft, MergeOptions, Visibility};
use crate::schedule::local_input_to_utc;

/// Longest accepted output file name (in characters).
pub const MAX_OUTPUT_FILE_NAME: usize = 255;

/// Characters rejected in output file names.
const INVALID_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

pub const LUFS_RANGE: (f64, f64) = (-70.0, 0.0);
pub const GAP_RANGE: (f64, f64) = (0.0, 60.0);

/// A single form problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// =============================================================================
// URLs
// =============================================================================

/// Why a URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// Scheme is not http:// or https://
    InvalidProtocol,
    /// No host after the scheme
    NoHost,
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProtocol => write!(f, "URL must start with http:// or https://"),
            Self::NoHost => write!(f, "URL has no host"),
        }
    }
}

/// Check that `url` is an absolute http(s) URL with a host.
pub fn check_http_url(url: &str) -> Result<(), UrlError> {
    let url = url.trim();
    let lower = url.to_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .ok_or(UrlError::InvalidProtocol)?;

    match extract_host(rest) {
        Some(_) => Ok(()),
        None => Err(UrlError::NoHost),
    }
}

pub fn is_http_url(url: &str) -> bool {
    check_http_url(url).is_ok()
}

/// Host part of a URL with the scheme already stripped.
fn extract_host(without_protocol: &str) -> Option<&str> {
    let authority = without_protocol.split(['/', '?', '#']).next()?;
    // user:pass@host
    let host_port = authority.rsplit('@').next()?;
    let host = host_port.split(':').next()?;

    if host.is_empty() || host.contains(char::is_whitespace) {
        return None;
    }
    Some(host)
}

// =============================================================================
// Fields
// =============================================================================

pub fn validate_output_file_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Output file name is required".to_string());
    }
    if name.chars().count() > MAX_OUTPUT_FILE_NAME {
        return Some(format!(
            "Output file name must be at most {MAX_OUTPUT_FILE_NAME} characters"
        ));
    }
    if name.contains(INVALID_FILE_NAME_CHARS) {
        return Some("Output file name contains invalid characters".to_string());
    }
    None
}

/// Optional field: blank is fine.
pub fn validate_constant_image_url(url: &str) -> Option<String> {
    if url.trim().is_empty() {
        return None;
    }
    check_http_url(url).err().map(|e| format!("Invalid URL: {e}"))
}

pub fn validate_options(options: &MergeOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(lufs) = options.target_loudness_lufs
        && !(LUFS_RANGE.0..=LUFS_RANGE.1).contains(&lufs)
    {
        errors.push(ValidationError::new(
            "targetLoudnessLUFS",
            "Target loudness must be between -70 and 0 LUFS",
        ));
    }

    if !(GAP_RANGE.0..=GAP_RANGE.1).contains(&options.gap_seconds) {
        errors.push(ValidationError::new(
            "gapSeconds",
            "Gap must be between 0 and 60 seconds",
        ));
    }

    errors
}

/// Scheduled visibility needs a local time strictly in the future.
pub fn validate_schedule<Tz: TimeZone>(
    visibility: Visibility,
    scheduled_local: &str,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Option<ValidationError> {
    if visibility != Visibility::Schedule {
        return None;
    }
    if scheduled_local.trim().is_empty() {
        return Some(ValidationError::new("scheduledTime", "Pick a publish time"));
    }
    match local_input_to_utc(scheduled_local, tz) {
        Ok(at) if at > now => None,
        Ok(_) => Some(ValidationError::new(
            "scheduledTime",
            "Publish time must be in the future",
        )),
        Err(e) => Some(ValidationError::new("scheduledTime", e.to_string())),
    }
}

/// Validate everything needed before a payload can be generated.
pub fn validate_merge_request(draft: &MergeDraft, selected_count: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(message) = validate_output_file_name(&draft.output_file_name) {
        errors.push(ValidationError::new("outputFileName", message));
    }
    if let Some(message) = validate_constant_image_url(&draft.constant_image_url) {
        errors.push(ValidationError::new("constantImageUrl", message));
    }
    if selected_count == 0 {
        errors.push(ValidationError::new(
            "selection",
            "Please select at least one audio file",
        ));
    }
    errors.extend(validate_options(&draft.options));

    errors
}

/// First message for a field, if any.
pub fn message_for<'a>(errors: &'a [ValidationError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}
