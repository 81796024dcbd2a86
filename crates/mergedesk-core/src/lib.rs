//! Browser-independent logic of the merge desk.
//!
//! - [`drive`] / [`navigator`] / [`tree`] - drive forest model, lookups and
//!   the folder tree view model
//! - [`selection`] - checkbox selection and the ordered selection tracker
//! - [`payload`] / [`validation`] / [`schedule`] - building the webhook request
//! - [`history`] - submission history behind a persistence port
//! - [`webhook`] - interpreting webhook replies
//! - [`auth`] - admin credential check

pub mod auth;
pub mod drive;
pub mod error;
pub mod history;
pub mod navigator;
pub mod payload;
pub mod schedule;
pub mod selection;
pub mod tree;
pub mod validation;
pub mod webhook;

pub use drive::{DriveNode, NodeKind, SelectableItem};
pub use error::{DriveError, HistoryError, HistoryResult, ScheduleError};
pub use history::{History, HistoryItem, HistoryStore, MemoryHistoryStore};
pub use navigator::{Breadcrumb, build_path, find_by_id, folders_only, matches_deep};
pub use payload::{
    Channel, ConcatOrder, MergeDraft, MergeOptions, MergePayload, OrderedAudio, PublishingOptions,
    RequestStamp, ThumbnailInput, Visibility,
};
pub use selection::{FileSelection, OrderedSelection};
pub use tree::{TreeRow, TreeState};
pub use validation::ValidationError;
pub use webhook::ReplyOutcome;
