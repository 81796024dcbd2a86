//! Merge request payload.
//!
//! The payload is the contract with the merge webhook: every wire name is
//! camelCase and optional values serialize as `null`.

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::drive::SelectableItem;

/// Requester recorded on every payload.
pub const DEFAULT_USER_EMAIL: &str = "admin@example.com";

// =============================================================================
// Options
// =============================================================================

/// How the webhook concatenates the selected files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConcatOrder {
    #[default]
    Filename,
    Manual,
    ModifiedAsc,
    ModifiedDesc,
}

impl ConcatOrder {
    pub const ALL: [ConcatOrder; 4] = [
        ConcatOrder::Filename,
        ConcatOrder::Manual,
        ConcatOrder::ModifiedAsc,
        ConcatOrder::ModifiedDesc,
    ];

    /// Wire value (also used as `<option>` value).
    pub fn value(self) -> &'static str {
        match self {
            ConcatOrder::Filename => "filename",
            ConcatOrder::Manual => "manual",
            ConcatOrder::ModifiedAsc => "modifiedAsc",
            ConcatOrder::ModifiedDesc => "modifiedDesc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConcatOrder::Filename => "By filename",
            ConcatOrder::Manual => "Manual order",
            ConcatOrder::ModifiedAsc => "Oldest first",
            ConcatOrder::ModifiedDesc => "Newest first",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.value() == value)
    }
}

/// Audio processing options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeOptions {
    pub concat_order: ConcatOrder,
    pub normalize_audio: bool,
    #[serde(rename = "targetLoudnessLUFS")]
    pub target_loudness_lufs: Option<f64>,
    pub gap_seconds: f64,
    pub ffmpeg_args: Option<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            concat_order: ConcatOrder::Filename,
            normalize_audio: false,
            target_loudness_lufs: None,
            gap_seconds: 0.0,
            ffmpeg_args: None,
        }
    }
}

// =============================================================================
// Thumbnail
// =============================================================================

/// Thumbnail chosen for the output video.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ThumbnailInput {
    Url {
        url: String,
    },
    #[serde(rename_all = "camelCase")]
    Inline {
        name: String,
        mime_type: String,
        data_url: String,
    },
}

/// Thumbnail fields as they appear on the payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedThumbnail {
    pub base64: Option<String>,
    pub mime: Option<String>,
    pub constant_url: Option<String>,
}

/// Split a thumbnail into raw base64, media type and constant image URL.
///
/// `fallback_url` is the form's constant image URL; a blank fallback is null.
/// A URL thumbnail replaces the fallback entirely, so a blank one is null too.
pub fn resolve_thumbnail(thumbnail: Option<&ThumbnailInput>, fallback_url: &str) -> ResolvedThumbnail {
    let fallback = non_blank(fallback_url);

    match thumbnail {
        None => ResolvedThumbnail {
            constant_url: fallback,
            ..Default::default()
        },
        Some(ThumbnailInput::Inline {
            mime_type,
            data_url,
            ..
        }) => ResolvedThumbnail {
            base64: Some(raw_base64(data_url).to_string()),
            mime: non_blank(mime_type),
            constant_url: fallback,
        },
        Some(ThumbnailInput::Url { url }) => ResolvedThumbnail {
            base64: None,
            mime: None,
            constant_url: non_blank(url),
        },
    }
}

/// Strip the `data:<mime>;base64,` prefix of a data URL.
pub fn raw_base64(data_url: &str) -> &str {
    match data_url.split_once(',') {
        Some((_, data)) => data,
        None => data_url,
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =============================================================================
// Publishing
// =============================================================================

/// Target channel for the published video.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    #[default]
    #[serde(rename = "Bolati Pustake")]
    BolatiPustake,
    #[serde(rename = "SahityaRatna")]
    SahityaRatna,
    #[serde(rename = "Katharas")]
    Katharas,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::BolatiPustake, Channel::SahityaRatna, Channel::Katharas];

    pub fn label(self) -> &'static str {
        match self {
            Channel::BolatiPustake => "Bolati Pustake",
            Channel::SahityaRatna => "SahityaRatna",
            Channel::Katharas => "Katharas",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Video visibility after upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Unlisted,
    Public,
    Schedule,
}

impl Visibility {
    pub const ALL: [Visibility; 4] = [
        Visibility::Private,
        Visibility::Unlisted,
        Visibility::Public,
        Visibility::Schedule,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Unlisted => "unlisted",
            Visibility::Public => "public",
            Visibility::Schedule => "schedule",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Private => "Private",
            Visibility::Unlisted => "Unlisted",
            Visibility::Public => "Public",
            Visibility::Schedule => "Schedule",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.value() == value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingOptions {
    pub channel: Channel,
    pub visibility: Visibility,
    /// UTC `YYYY-MM-DDTHH:MM:SSZ`, only for scheduled visibility
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

// =============================================================================
// Payload
// =============================================================================

/// One entry of the manual concatenation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedAudio {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Position in the manual order (1..N)
    pub order: usize,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFileRef {
    pub id: String,
    pub name: String,
    pub mime_type: String,
}

impl From<&SelectableItem> for DriveFileRef {
    fn from(item: &SelectableItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            mime_type: item.mime_type.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub email: String,
}

/// Request body sent to the merge webhook.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePayload {
    pub request_id: String,
    /// UTC ISO-8601 with milliseconds
    pub timestamp: String,
    pub user: UserRef,
    pub constant_image_url: Option<String>,
    pub output_file_name: String,
    pub drive_files: Vec<DriveFileRef>,
    pub options: MergeOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ThumbnailInput>,
    #[serde(default)]
    pub ordered_audios: Vec<OrderedAudio>,
    #[serde(default)]
    pub publishing: PublishingOptions,
    #[serde(default)]
    pub thumbnail_base64: Option<String>,
    #[serde(default)]
    pub thumbnail_mime: Option<String>,
}

/// Identity of one generated request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestStamp {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl RequestStamp {
    pub fn new(request_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp,
        }
    }

    /// `2025-01-10T00:00:00.000Z` form.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Editable state of the merge form.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeDraft {
    pub output_file_name: String,
    pub constant_image_url: String,
    pub options: MergeOptions,
    pub thumbnail: Option<ThumbnailInput>,
    pub publishing: PublishingOptions,
    pub user_email: String,
}

impl Default for MergeDraft {
    fn default() -> Self {
        Self {
            output_file_name: String::new(),
            constant_image_url: String::new(),
            options: MergeOptions::default(),
            thumbnail: None,
            publishing: PublishingOptions::default(),
            user_email: DEFAULT_USER_EMAIL.to_string(),
        }
    }
}

/// Assemble the webhook payload.
///
/// `files` is the open folder's file list; only checked ids are sent, in
/// folder order. A non-empty manual order forces `concatOrder = manual`.
pub fn assemble(
    draft: &MergeDraft,
    files: &[SelectableItem],
    selected: &HashSet<String>,
    ordered: &[OrderedAudio],
    stamp: &RequestStamp,
) -> MergePayload {
    let drive_files = files
        .iter()
        .filter(|f| selected.contains(&f.id))
        .map(DriveFileRef::from)
        .collect();

    let thumb = resolve_thumbnail(draft.thumbnail.as_ref(), &draft.constant_image_url);

    let mut options = draft.options.clone();
    if !ordered.is_empty() {
        options.concat_order = ConcatOrder::Manual;
    }

    let thumbnail = match &draft.thumbnail {
        Some(url @ ThumbnailInput::Url { .. }) => Some(url.clone()),
        _ => None,
    };

    MergePayload {
        request_id: stamp.request_id.clone(),
        timestamp: stamp.timestamp_iso(),
        user: UserRef {
            email: draft.user_email.clone(),
        },
        constant_image_url: thumb.constant_url,
        output_file_name: draft.output_file_name.trim().to_string(),
        drive_files,
        options,
        thumbnail,
        ordered_audios: ordered.to_vec(),
        publishing: draft.publishing.clone(),
        thumbnail_base64: thumb.base64,
        thumbnail_mime: thumb.mime,
    }
}

/// File name used when downloading a payload.
pub fn payload_file_name(request_id: &str) -> String {
    format!("merge-request-{request_id}.json")
}

/// Pretty JSON rendering (two-space indentation).
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn item(id: &str, name: &str) -> SelectableItem {
        SelectableItem {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: "audio/mpeg".to_string(),
            size: None,
            duration: None,
            modified_time: None,
            download_url: None,
        }
    }

    fn stamp() -> RequestStamp {
        RequestStamp::new("req-1", Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap())
    }

    fn selected(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_thumbnail_none_uses_fallback() {
        let resolved = resolve_thumbnail(None, "https://img/x.png");
        assert_eq!(resolved.constant_url.as_deref(), Some("https://img/x.png"));
        assert!(resolved.base64.is_none());
        assert!(resolved.mime.is_none());

        assert_eq!(resolve_thumbnail(None, "  "), ResolvedThumbnail::default());
    }

    #[test]
    fn test_resolve_thumbnail_inline() {
        let inline = ThumbnailInput::Inline {
            name: "cover.png".to_string(),
            mime_type: "image/png".to_string(),
            data_url: "data:image/png;base64,AAAA".to_string(),
        };
        let resolved = resolve_thumbnail(Some(&inline), "https://img/x.png");
        assert_eq!(resolved.base64.as_deref(), Some("AAAA"));
        assert_eq!(resolved.mime.as_deref(), Some("image/png"));
        assert_eq!(resolved.constant_url.as_deref(), Some("https://img/x.png"));
    }

    #[test]
    fn test_resolve_thumbnail_url() {
        let url = ThumbnailInput::Url {
            url: "  https://cdn/t.jpg ".to_string(),
        };
        let resolved = resolve_thumbnail(Some(&url), "https://img/x.png");
        assert_eq!(resolved.constant_url.as_deref(), Some("https://cdn/t.jpg"));

        let blank = ThumbnailInput::Url { url: String::new() };
        let resolved = resolve_thumbnail(Some(&blank), "https://img/x.png");
        assert_eq!(resolved, ResolvedThumbnail::default());
    }

    #[test]
    fn test_raw_base64() {
        assert_eq!(raw_base64("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(raw_base64("QUJD"), "QUJD");
    }

    #[test]
    fn test_assemble_keeps_folder_order_and_trims() {
        let files = vec![item("a", "A.mp3"), item("b", "B.mp3"), item("c", "C.mp3")];
        let draft = MergeDraft {
            output_file_name: "  final.mp4 ".to_string(),
            ..Default::default()
        };

        let payload = assemble(&draft, &files, &selected(&["c", "a"]), &[], &stamp());

        let ids: Vec<_> = payload.drive_files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(payload.output_file_name, "final.mp4");
        assert_eq!(payload.options.concat_order, ConcatOrder::Filename);
        assert_eq!(payload.request_id, "req-1");
        assert_eq!(payload.timestamp, "2025-01-10T00:00:00.000Z");
        assert_eq!(payload.user.email, DEFAULT_USER_EMAIL);
        assert!(payload.constant_image_url.is_none());
    }

    #[test]
    fn test_assemble_manual_order_overrides_concat_order() {
        let files = vec![item("a", "A.mp3"), item("b", "B.mp3")];
        let ordered = vec![OrderedAudio {
            id: "b".to_string(),
            name: "B.mp3".to_string(),
            mime_type: "audio/mpeg".to_string(),
            order: 1,
            download_url: None,
        }];
        let draft = MergeDraft {
            options: MergeOptions {
                concat_order: ConcatOrder::ModifiedDesc,
                ..Default::default()
            },
            ..Default::default()
        };

        let payload = assemble(&draft, &files, &selected(&["a", "b"]), &ordered, &stamp());
        assert_eq!(payload.options.concat_order, ConcatOrder::Manual);
        assert_eq!(payload.ordered_audios, ordered);
    }

    #[test]
    fn test_assemble_only_echoes_url_thumbnails() {
        let files = vec![item("a", "A.mp3")];
        let mut draft = MergeDraft {
            thumbnail: Some(ThumbnailInput::Inline {
                name: "t.png".to_string(),
                mime_type: "image/png".to_string(),
                data_url: "data:image/png;base64,QUJD".to_string(),
            }),
            ..Default::default()
        };
        let payload = assemble(&draft, &files, &selected(&["a"]), &[], &stamp());
        assert!(payload.thumbnail.is_none());
        assert_eq!(payload.thumbnail_base64.as_deref(), Some("QUJD"));

        draft.thumbnail = Some(ThumbnailInput::Url {
            url: "https://cdn/t.jpg".to_string(),
        });
        let payload = assemble(&draft, &files, &selected(&["a"]), &[], &stamp());
        assert_eq!(payload.thumbnail, draft.thumbnail);
        assert_eq!(payload.constant_image_url.as_deref(), Some("https://cdn/t.jpg"));
    }

    #[test]
    fn test_wire_names() {
        let files = vec![item("a", "A.mp3")];
        let mut draft = MergeDraft::default();
        draft.options.target_loudness_lufs = Some(-16.0);
        draft.publishing.visibility = Visibility::Schedule;
        draft.publishing.scheduled_time = Some("2025-01-10T00:00:00Z".to_string());

        let payload = assemble(&draft, &files, &selected(&["a"]), &[], &stamp());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["requestId"], "req-1");
        assert_eq!(json["driveFiles"][0]["mimeType"], "audio/mpeg");
        assert_eq!(json["options"]["concatOrder"], "filename");
        assert_eq!(json["options"]["targetLoudnessLUFS"], -16.0);
        assert!(json["options"]["ffmpegArgs"].is_null());
        assert_eq!(json["publishing"]["channel"], "Bolati Pustake");
        assert_eq!(json["publishing"]["visibility"], "schedule");
        assert_eq!(json["publishing"]["scheduledTime"], "2025-01-10T00:00:00Z");
        assert!(json["thumbnailBase64"].is_null());
        assert!(json.get("thumbnail").is_none());
    }

    #[test]
    fn test_thumbnail_wire_form() {
        let inline = ThumbnailInput::Inline {
            name: "t.png".to_string(),
            mime_type: "image/png".to_string(),
            data_url: "data:,".to_string(),
        };
        let json = serde_json::to_value(&inline).unwrap();
        assert_eq!(json["kind"], "inline");
        assert_eq!(json["mimeType"], "image/png");
        assert_eq!(json["dataUrl"], "data:,");

        let url: ThumbnailInput = serde_json::from_str(r#"{"kind":"url","url":"https://x"}"#).unwrap();
        assert_eq!(url, ThumbnailInput::Url { url: "https://x".to_string() });
    }

    #[test]
    fn test_enum_lookups() {
        assert_eq!(Channel::from_label("Katharas"), Some(Channel::Katharas));
        assert_eq!(Channel::from_label("nope"), None);
        assert_eq!(Visibility::from_value("unlisted"), Some(Visibility::Unlisted));
        assert_eq!(ConcatOrder::from_value("modifiedAsc"), Some(ConcatOrder::ModifiedAsc));
        for order in ConcatOrder::ALL {
            let json = serde_json::to_value(order).unwrap();
            assert_eq!(json, order.value());
        }
    }

    #[test]
    fn test_payload_file_name_and_pretty_json() {
        assert_eq!(payload_file_name("abc"), "merge-request-abc.json");
        let json = to_pretty_json(&UserRef { email: "a@b".to_string() }).unwrap();
        assert_eq!(json, "{\n  \"email\": \"a@b\"\n}");
    }
}
