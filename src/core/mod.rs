//! Browser-side services.
//!
//! - [`drive`] - loading the drive listing
//! - [`session`] - admin login
//! - [`history_store`] - localStorage-backed submission history
//! - [`webhook`] - sending the merge payload
//! - [`thumbnail`] - reading the picked thumbnail image

pub mod drive;
pub mod error;
pub mod history_store;
pub mod log;
pub mod session;
pub mod thumbnail;
pub mod webhook;
