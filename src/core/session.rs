//! Login session.
//!
//! The admin id and password digest are baked in at build time. A successful
//! login sets a sessionStorage flag, so closing the tab logs out.

use mergedesk_core::auth::Credentials;

use crate::config::session::{AUTH_KEY, DRIVE_CACHE_KEY};
use crate::config::{ADMIN_ID, ADMIN_PASSWORD_SHA256};
use crate::core::error::StorageError;
use crate::core::log;
use crate::utils::{cache, dom};

/// Outcome of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginResult {
    Accepted,
    Rejected,
    /// No usable credentials were configured at build time.
    NotConfigured,
}

/// Configured credentials, if both values are present and well-formed.
pub fn credentials() -> Option<Credentials> {
    Credentials::from_hex(ADMIN_ID?, ADMIN_PASSWORD_SHA256?)
}

/// Check whether this tab is logged in.
pub fn is_authed() -> bool {
    dom::session_storage()
        .and_then(|s| s.get_item(AUTH_KEY).ok().flatten())
        .is_some()
}

/// Verify credentials and remember the session.
pub fn login(admin_id: &str, password: &str) -> LoginResult {
    let Some(creds) = credentials() else {
        log::error("admin credentials are not configured");
        return LoginResult::NotConfigured;
    };

    if !creds.verify(admin_id, password) {
        return LoginResult::Rejected;
    }

    if let Err(e) = save_session() {
        log::warn(&format!("session flag not stored: {}", e));
    }
    LoginResult::Accepted
}

fn save_session() -> Result<(), StorageError> {
    let storage = dom::session_storage().ok_or(StorageError::Unavailable)?;
    storage
        .set_item(AUTH_KEY, "1")
        .map_err(|_| StorageError::WriteFailed)
}

/// Forget the session and the cached drive listing.
pub fn logout() {
    for key in [AUTH_KEY, DRIVE_CACHE_KEY] {
        if let Err(e) = cache::remove(key) {
            log::warn(&format!("{} not cleared: {}", key, e));
        }
    }
}
