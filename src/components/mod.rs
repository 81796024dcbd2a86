//! UI components built with Leptos.
//!
//! - [`Login`] - admin login card
//! - [`Studio`] - main screen (drive loading, tabs, action bar)
//! - [`drive`] - folder tree, breadcrumbs and file list
//! - [`builder`] - audio ordering, configuration, publishing, payload preview
//! - [`history`] - saved payloads
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod builder;
pub mod drive;
pub mod history;
pub mod icons;
mod login;
mod studio;

pub use login::Login;
pub use studio::Studio;
