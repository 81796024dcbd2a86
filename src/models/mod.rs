//! Data models and types for the application.
//!
//! Domain types live in `mergedesk-core`; this module holds UI state:
//! - [`Tab`] - studio tab
//! - [`DriveState`] - drive loading state
//! - [`Notice`], [`NoticeKind`] - transient messages

mod view;

pub use view::{DriveState, Notice, NoticeKind, Tab};
