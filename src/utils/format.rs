//! Formatting utilities for file sizes, durations, dates, and other display values.

use chrono::{DateTime, Local, TimeZone};

/// Coarse media class used to pick a file icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Image,
    Other,
}

impl MediaKind {
    /// Classify a media type. A missing type is assumed to be audio.
    pub fn from_mime(mime: &str) -> Self {
        if mime.is_empty() || mime.contains("audio") {
            Self::Audio
        } else if mime.contains("video") {
            Self::Video
        } else if mime.starts_with("image/") {
            Self::Image
        } else {
            Self::Other
        }
    }
}

/// Format a byte count (e.g., "1.5 KB", "12 MB"). Empty when unknown.
pub fn format_bytes(size: Option<u64>) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let Some(bytes) = size else {
        return String::new();
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value < 10.0 {
        format!("{:.1} {}", value, UNITS[unit])
    } else {
        format!("{:.0} {}", value, UNITS[unit])
    }
}

/// Format a duration in seconds as `m:ss` (or `h:mm:ss` past an hour).
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite() && *s >= 0.0) else {
        return String::new();
    };

    let total = seconds.floor() as u64;
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format an ISO timestamp as a short date in the browser's zone.
pub fn format_date(iso: Option<&str>) -> String {
    format_date_in(iso, &Local)
}

/// Format an ISO timestamp as `YYYY-MM-DD` in `tz`. Empty when unparseable.
pub fn format_date_in<Tz: TimeZone>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    iso.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(tz).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Format an ISO timestamp with date and time in the browser's zone.
pub fn format_timestamp(iso: &str) -> String {
    format_timestamp_in(iso, &Local)
}

/// Format an ISO timestamp as `YYYY-MM-DD HH:MM` in `tz`, or echo it back.
pub fn format_timestamp_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

/// "1 file" / "3 files".
pub fn pluralize_files(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{} files", count)
    }
}
