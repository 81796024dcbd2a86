//! Drive listing loader.
//!
//! With the `mock` feature the bundled sample drive is served instead of the
//! network, which is handy for local UI work.

use mergedesk_core::drive::{DriveListing, DriveNode};

use crate::core::error::FetchError;

/// Load the drive forest.
#[cfg(not(feature = "mock"))]
pub async fn load_drive() -> Result<Vec<DriveNode>, FetchError> {
    use crate::config::{DRIVE_ENDPOINT, session::DRIVE_CACHE_KEY};
    use crate::utils::fetch_json_cached;

    let endpoint = DRIVE_ENDPOINT
        .filter(|url| !url.trim().is_empty())
        .ok_or(FetchError::NotConfigured("MERGEDESK_DRIVE_ENDPOINT"))?;

    let listing: DriveListing = fetch_json_cached(endpoint, DRIVE_CACHE_KEY).await?;
    Ok(listing.into_roots())
}

/// Load the drive forest.
#[cfg(feature = "mock")]
pub async fn load_drive() -> Result<Vec<DriveNode>, FetchError> {
    parse_bundled(crate::config::MOCK_DRIVE)
}

#[cfg_attr(not(any(test, feature = "mock")), allow(dead_code))]
fn parse_bundled(json: &str) -> Result<Vec<DriveNode>, FetchError> {
    serde_json::from_str::<DriveListing>(json)
        .map(DriveListing::into_roots)
        .map_err(|e| FetchError::JsonParseError(e.to_string()))
}
