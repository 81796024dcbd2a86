//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Deployment values (endpoints, admin credentials) are read at compile time
//! with `option_env!`, so a static build carries them.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the header and login card.
pub const APP_NAME: &str = "Bolati Pustake Studio";

/// Short tagline on the login card.
pub const APP_TAGLINE: &str = "Simple login for our private uploader";

// =============================================================================
// Deployment Configuration
// =============================================================================

/// Drive listing endpoint (JSON forest of folders and files).
pub const DRIVE_ENDPOINT: Option<&str> = option_env!("MERGEDESK_DRIVE_ENDPOINT");

/// Merge webhook receiving the payload.
pub const WEBHOOK_URL: Option<&str> = option_env!("MERGEDESK_WEBHOOK_URL");

/// Admin login id.
pub const ADMIN_ID: Option<&str> = option_env!("MERGEDESK_ADMIN_ID");

/// Hex SHA-256 of the admin password.
pub const ADMIN_PASSWORD_SHA256: Option<&str> = option_env!("MERGEDESK_ADMIN_PASSWORD_SHA256");

/// Bundled drive used by the `mock` feature.
#[cfg(feature = "mock")]
pub const MOCK_DRIVE: &str = include_str!("../assets/mock_drive.json");

// =============================================================================
// Network Configuration
// =============================================================================

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

// =============================================================================
// Storage Configuration
// =============================================================================

/// sessionStorage keys.
pub mod session {
    /// Login flag.
    pub const AUTH_KEY: &str = "mergedesk_authed";
    /// Cached drive listing.
    pub const DRIVE_CACHE_KEY: &str = "drive_cache";
}

// =============================================================================
// UI Configuration
// =============================================================================

/// How long a notice stays visible (milliseconds).
pub const NOTICE_TIMEOUT_MS: u32 = 4000;

/// Pause between a successful send and the page reload (milliseconds).
pub const RELOAD_DELAY_MS: u32 = 1500;

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Lucide;
