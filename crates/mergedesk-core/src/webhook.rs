//! Merge webhook reply interpretation.
//!
//! The webhook either streams the rendered video back (downloaded by the
//! browser) or answers with JSON that may carry a result link.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::validation::is_http_url;

static DISPOSITION_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"filename="?([^";]+)"?"#).expect("static regex is valid"));

/// What the UI should do with a successful reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Save the body as a file.
    Download { file_name: String },
    /// Open the result link in a new tab.
    OpenLink(String),
    /// Nothing to show beyond a confirmation.
    Sent,
}

pub fn is_video_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("video/")
}

/// File name from a `Content-Disposition` header.
pub fn filename_from_disposition(disposition: &str) -> Option<String> {
    DISPOSITION_FILENAME
        .captures(disposition)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Download name for a video reply.
pub fn video_file_name(disposition: Option<&str>, output_file_name: &str) -> String {
    if let Some(name) = disposition.and_then(filename_from_disposition) {
        return name;
    }
    let base = output_file_name.trim();
    let base = if base.is_empty() { "output" } else { base };
    format!("{base}.mp4")
}

/// Parse a JSON reply body; anything unparseable is an empty object.
pub fn parse_json_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Result link carried by a JSON reply (`url` string, http(s) only).
pub fn result_url(body: &Value) -> Option<&str> {
    body.get("url")
        .and_then(Value::as_str)
        .filter(|url| is_http_url(url))
}

/// Decide how to handle a JSON reply.
pub fn json_outcome(body: &str) -> ReplyOutcome {
    let json = parse_json_body(body);
    match result_url(&json) {
        Some(url) => ReplyOutcome::OpenLink(url.to_string()),
        None => ReplyOutcome::Sent,
    }
}
