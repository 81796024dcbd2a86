//! Submission history.
//!
//! History is a newest-first list of generated payloads kept behind the
//! [`HistoryStore`] port. The browser backs it with `localStorage`; tests and
//! storage-less environments use [`MemoryHistoryStore`].

use std::fmt::Display;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, HistoryResult};
use crate::payload::{MergeOptions, MergePayload, PublishingOptions};
use crate::schedule::iso_to_input_local;

/// Storage key of the history list.
pub const HISTORY_KEY: &str = "audio-merge-history";

/// Maximum number of entries kept.
pub const MAX_HISTORY_ITEMS: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    #[default]
    Generated,
}

impl HistoryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryStatus::Generated => "generated",
        }
    }
}

/// A saved payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[serde(flatten)]
    pub payload: MergePayload,
    #[serde(default)]
    pub status: HistoryStatus,
    #[serde(default)]
    pub file_count: usize,
}

/// Form state restored from a history entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Recreate {
    pub output_file_name: String,
    pub constant_image_url: String,
    pub options: MergeOptions,
    pub publishing: PublishingOptions,
    pub selected_ids: Vec<String>,
}

impl Recreate {
    /// Scheduled time as a `datetime-local` value in `tz`, empty when unset
    /// or unreadable.
    pub fn scheduled_input<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.publishing
            .scheduled_time
            .as_deref()
            .and_then(|iso| iso_to_input_local(iso, tz).ok())
            .unwrap_or_default()
    }
}

impl HistoryItem {
    pub fn from_payload(payload: MergePayload) -> Self {
        let file_count = payload.drive_files.len();
        Self {
            payload,
            status: HistoryStatus::Generated,
            file_count,
        }
    }

    pub fn recreate(&self) -> Recreate {
        Recreate {
            output_file_name: self.payload.output_file_name.clone(),
            constant_image_url: self.payload.constant_image_url.clone().unwrap_or_default(),
            options: self.payload.options.clone(),
            publishing: self.payload.publishing.clone(),
            selected_ids: self.payload.drive_files.iter().map(|f| f.id.clone()).collect(),
        }
    }
}

// =============================================================================
// Persistence Port
// =============================================================================

/// Backend holding the history list.
pub trait HistoryStore {
    /// Read all entries, newest first. A missing list is empty.
    fn load(&self) -> HistoryResult<Vec<HistoryItem>>;

    /// Replace the stored list.
    fn save(&mut self, items: &[HistoryItem]) -> HistoryResult<()>;

    /// Drop the stored list.
    fn clear(&mut self) -> HistoryResult<()>;
}

/// Serialize entries to the stored JSON form.
pub fn encode_items(items: &[HistoryItem]) -> HistoryResult<String> {
    Ok(serde_json::to_string(items)?)
}

/// Parse the stored JSON form.
pub fn decode_items(raw: &str) -> HistoryResult<Vec<HistoryItem>> {
    Ok(serde_json::from_str(raw)?)
}

/// In-memory store keeping the same JSON form as the browser backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistoryStore {
    raw: Option<String>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw stored text (possibly malformed).
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> HistoryResult<Vec<HistoryItem>> {
        match &self.raw {
            Some(raw) => decode_items(raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, items: &[HistoryItem]) -> HistoryResult<()> {
        self.raw = Some(encode_items(items)?);
        Ok(())
    }

    fn clear(&mut self) -> HistoryResult<()> {
        self.raw = None;
        Ok(())
    }
}

// =============================================================================
// Service
// =============================================================================

/// History operations over a store.
#[derive(Debug)]
pub struct History<S: HistoryStore> {
    store: S,
}

impl<S: HistoryStore> History<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All entries, newest first.
    pub fn entries(&self) -> HistoryResult<Vec<HistoryItem>> {
        self.store.load()
    }

    /// Prepend an entry and keep the newest [`MAX_HISTORY_ITEMS`].
    ///
    /// Unreadable stored data is replaced rather than blocking new entries.
    pub fn record(&mut self, item: HistoryItem) -> HistoryResult<Vec<HistoryItem>> {
        let mut items = match self.store.load() {
            Ok(items) => items,
            Err(HistoryError::Malformed(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        items.insert(0, item);
        items.truncate(MAX_HISTORY_ITEMS);
        self.store.save(&items)?;
        Ok(items)
    }

    pub fn clear(&mut self) -> HistoryResult<()> {
        self.store.clear()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{DriveFileRef, MergeDraft, RequestStamp, Visibility, assemble};
    use crate::drive::SelectableItem;
    use chrono::{FixedOffset, Utc};
    use std::collections::HashSet;

    fn payload(request_id: &str, files: &[&str]) -> MergePayload {
        let items: Vec<SelectableItem> = files
            .iter()
            .map(|id| SelectableItem {
                id: id.to_string(),
                name: format!("{id}.mp3"),
                mime_type: "audio/mpeg".to_string(),
                size: None,
                duration: None,
                modified_time: None,
                download_url: None,
            })
            .collect();
        let selected: HashSet<String> = files.iter().map(|s| s.to_string()).collect();
        let draft = MergeDraft {
            output_file_name: "out.mp4".to_string(),
            constant_image_url: "https://img/x.png".to_string(),
            ..Default::default()
        };
        let stamp = RequestStamp::new(request_id, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assemble(&draft, &items, &selected, &[], &stamp)
    }

    #[test]
    fn test_from_payload_counts_files() {
        let item = HistoryItem::from_payload(payload("r1", &["a", "b"]));
        assert_eq!(item.status, HistoryStatus::Generated);
        assert_eq!(item.file_count, 2);
    }

    #[test]
    fn test_wire_form_is_flat() {
        let item = HistoryItem::from_payload(payload("r1", &["a"]));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["requestId"], "r1");
        assert_eq!(json["status"], HistoryStatus::Generated.as_str());
        assert_eq!(json["fileCount"], 1);
        assert!(json.get("payload").is_none());

        let back: HistoryItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_record_prepends() {
        let mut history = History::new(MemoryHistoryStore::new());
        history.record(HistoryItem::from_payload(payload("r1", &["a"]))).unwrap();
        history.record(HistoryItem::from_payload(payload("r2", &["a"]))).unwrap();

        let ids: Vec<_> = history
            .entries()
            .unwrap()
            .into_iter()
            .map(|i| i.payload.request_id)
            .collect();
        assert_eq!(ids, vec!["r2", "r1"]);
    }

    #[test]
    fn test_record_caps_at_fifty() {
        let mut history = History::new(MemoryHistoryStore::new());
        for n in 0..55 {
            history
                .record(HistoryItem::from_payload(payload(&format!("r{n}"), &["a"])))
                .unwrap();
        }
        let entries = history.entries().unwrap();
        assert_eq!(entries.len(), MAX_HISTORY_ITEMS);
        assert_eq!(entries[0].payload.request_id, "r54");
        assert_eq!(entries[49].payload.request_id, "r5");
    }

    #[test]
    fn test_malformed_store_is_replaced_on_record() {
        let mut history = History::new(MemoryHistoryStore::with_raw("{not json"));
        assert!(matches!(history.entries(), Err(HistoryError::Malformed(_))));

        let items = history.record(HistoryItem::from_payload(payload("r1", &["a"]))).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(history.entries().unwrap().len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new(MemoryHistoryStore::new());
        history.record(HistoryItem::from_payload(payload("r1", &["a"]))).unwrap();
        history.clear().unwrap();
        assert!(history.entries().unwrap().is_empty());
        assert!(history.store().raw().is_none());
    }

    #[test]
    fn test_recreate() {
        let item = HistoryItem::from_payload(payload("r1", &["a", "b"]));
        let recreate = item.recreate();
        assert_eq!(recreate.output_file_name, "out.mp4");
        assert_eq!(recreate.constant_image_url, "https://img/x.png");
        assert_eq!(recreate.selected_ids, vec!["a", "b"]);

        let mut bare = item.clone();
        bare.payload.constant_image_url = None;
        bare.payload.drive_files = vec![DriveFileRef {
            id: "z".to_string(),
            name: "z.mp3".to_string(),
            mime_type: "audio/mpeg".to_string(),
        }];
        let recreate = bare.recreate();
        assert_eq!(recreate.constant_image_url, "");
        assert_eq!(recreate.selected_ids, vec!["z"]);
    }

    #[test]
    fn test_recreate_restores_schedule_in_local_time() {
        let mut item = HistoryItem::from_payload(payload("r1", &["a"]));
        item.payload.publishing = PublishingOptions {
            channel: Default::default(),
            visibility: Visibility::Schedule,
            scheduled_time: Some("2025-01-10T00:00:00Z".to_string()),
        };
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();

        let recreate = item.recreate();
        assert_eq!(recreate.publishing.visibility, Visibility::Schedule);
        assert_eq!(recreate.scheduled_input(&ist), "2025-01-10T05:30");

        item.payload.publishing.scheduled_time = None;
        assert_eq!(item.recreate().scheduled_input(&ist), "");

        item.payload.publishing.scheduled_time = Some("garbage".to_string());
        assert_eq!(item.recreate().scheduled_input(&ist), "");
    }

    #[test]
    fn test_decode_legacy_entries_without_extended_fields() {
        let raw = r#"[{
            "requestId": "old", "timestamp": "2024-01-01T00:00:00.000Z",
            "user": {"email": "admin@example.com"}, "constantImageUrl": null,
            "outputFileName": "x.mp4", "driveFiles": [],
            "options": {"concatOrder": "filename", "normalizeAudio": false,
                        "targetLoudnessLUFS": null, "gapSeconds": 0, "ffmpegArgs": null},
            "status": "generated", "fileCount": 0
        }]"#;
        let items = decode_items(raw).unwrap();
        assert_eq!(items[0].payload.request_id, "old");
        assert!(items[0].payload.ordered_audios.is_empty());
    }
}
