//! Browser and display utilities.
//!
//! Provides:
//! - [`dom`] - window, storage, downloads, clipboard, navigation
//! - [`fetch_json_cached`], [`post_json`] - Network fetching (GETs bounded by a timeout)
//! - [`cache`] - sessionStorage cache
//! - [`format`] - sizes, durations and dates for display

pub mod cache;
pub mod dom;
mod fetch;
pub mod format;

#[cfg_attr(feature = "mock", allow(unused_imports))]
pub use fetch::fetch_json_cached;
pub use fetch::{header, post_json, response_blob, response_text};
