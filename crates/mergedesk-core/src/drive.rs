//! Drive tree data model.
//!
//! The drive collaborator answers with a forest of [`DriveNode`]s. Folders own
//! their children exclusively, so every node has exactly one ancestor chain.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DriveError;

// =============================================================================
// Nodes
// =============================================================================

/// Discriminates traversal branches from selectable leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// A single drive entry (folder or file).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveNode {
    /// Identifier, unique within the forest
    pub id: String,
    /// Display name
    pub name: String,
    /// Media type reported by the drive
    #[serde(default, deserialize_with = "null_as_default")]
    pub mime_type: String,
    /// Parent identifiers (informational only)
    #[serde(default, deserialize_with = "null_as_default")]
    pub parents: Vec<String>,
    pub kind: NodeKind,
    /// Direct download reference, if the drive exposes one
    #[serde(default)]
    pub download_url: Option<String>,
    /// Children in display order (folders only)
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<DriveNode>,
    /// File size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Last modification time (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DriveNode {
    /// Create a folder node owning `children`.
    pub fn folder(id: &str, name: &str, children: Vec<DriveNode>) -> Self {
        let children = children
            .into_iter()
            .map(|mut child| {
                if !child.parents.iter().any(|p| p == id) {
                    child.parents.push(id.to_string());
                }
                child
            })
            .collect();

        Self {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: FOLDER_MIME_TYPE.to_string(),
            parents: Vec::new(),
            kind: NodeKind::Folder,
            download_url: None,
            children,
            size: None,
            duration: None,
            modified_time: None,
        }
    }

    /// Create a file node.
    pub fn file(id: &str, name: &str, mime_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            parents: Vec::new(),
            kind: NodeKind::File,
            download_url: None,
            children: Vec::new(),
            size: None,
            duration: None,
            modified_time: None,
        }
    }

    /// Attach a download reference.
    pub fn with_download_url(mut self, url: &str) -> Self {
        self.download_url = Some(url.to_string());
        self
    }

    /// Attach optional file metadata.
    pub fn with_meta(
        mut self,
        size: Option<u64>,
        duration: Option<f64>,
        modified_time: Option<&str>,
    ) -> Self {
        self.size = size;
        self.duration = duration;
        self.modified_time = modified_time.map(String::from);
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Check whether this folder has at least one sub-folder.
    pub fn has_folder_children(&self) -> bool {
        self.children.iter().any(DriveNode::is_folder)
    }

    /// Check whether this file looks like audio (media type or extension).
    pub fn is_audio(&self) -> bool {
        if self.mime_type.starts_with("audio/") {
            return true;
        }
        let name = self.name.to_lowercase();
        AUDIO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }
}

/// Media type Google Drive uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// File extensions treated as audio when the media type is missing or generic.
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".m4a", ".wav"];

// =============================================================================
// Listing
// =============================================================================

/// Top-level drive response: either a bare array of roots or `{ "roots": [...] }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DriveListing {
    Roots(Vec<DriveNode>),
    Wrapped {
        #[serde(default)]
        roots: Vec<DriveNode>,
    },
}

impl DriveListing {
    /// Unwrap into the root list.
    pub fn into_roots(self) -> Vec<DriveNode> {
        match self {
            Self::Roots(roots) | Self::Wrapped { roots } => roots,
        }
    }
}

/// Decode a drive listing from JSON text.
pub fn parse_listing(json: &str) -> Result<Vec<DriveNode>, DriveError> {
    let listing: DriveListing = serde_json::from_str(json)?;
    Ok(listing.into_roots())
}

// =============================================================================
// Selectable Items
// =============================================================================

/// A file of the currently open folder, as offered for selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectableItem {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: Option<u64>,
    pub duration: Option<f64>,
    pub modified_time: Option<String>,
    pub download_url: Option<String>,
}

impl From<&DriveNode> for SelectableItem {
    fn from(node: &DriveNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            mime_type: node.mime_type.clone(),
            size: node.size,
            duration: node.duration,
            modified_time: node.modified_time.clone(),
            download_url: node.download_url.clone(),
        }
    }
}

/// All file children of a folder, in folder order.
pub fn file_items(folder: &DriveNode) -> Vec<SelectableItem> {
    folder
        .children
        .iter()
        .filter(|c| c.is_file())
        .map(SelectableItem::from)
        .collect()
}

/// Audio file children of a folder, in folder order.
pub fn audio_items(folder: &DriveNode) -> Vec<SelectableItem> {
    folder
        .children
        .iter()
        .filter(|c| c.is_file() && c.is_audio())
        .map(SelectableItem::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"id": "f1", "name": "Season 1", "mimeType": "application/vnd.google-apps.folder",
             "parents": [], "kind": "folder", "downloadUrl": null,
             "children": [
                {"id": "a", "name": "Episode 1.mp3", "mimeType": "audio/mpeg",
                 "parents": ["f1"], "kind": "file", "downloadUrl": "https://dl/a", "children": []}
             ]}
        ]"#;
        let roots = parse_listing(json).expect("valid listing");
        assert_eq!(roots.len(), 1);
        assert!(roots[0].is_folder());
        assert_eq!(roots[0].children[0].download_url.as_deref(), Some("https://dl/a"));
    }

    #[test]
    fn test_parse_wrapped_roots_and_missing_fields() {
        let json = r#"{"roots": [{"id": "x", "name": "X", "kind": "folder", "children": null}]}"#;
        let roots = parse_listing(json).expect("valid listing");
        assert_eq!(roots[0].id, "x");
        assert!(roots[0].children.is_empty());
        assert!(roots[0].parents.is_empty());
        assert_eq!(roots[0].mime_type, "");
    }

    #[test]
    fn test_parse_object_without_roots_is_empty() {
        let roots = parse_listing(r#"{"status": "ok"}"#).expect("valid listing");
        assert!(roots.is_empty());
    }

    #[test]
    fn test_parse_invalid_listing() {
        assert!(parse_listing("not json").is_err());
    }

    #[test]
    fn test_folder_constructor_sets_parents() {
        let folder = DriveNode::folder("f1", "Season 1", vec![DriveNode::file("a", "a.mp3", "audio/mpeg")]);
        assert_eq!(folder.children[0].parents, vec!["f1".to_string()]);
        assert_eq!(folder.mime_type, FOLDER_MIME_TYPE);
    }

    #[test]
    fn test_audio_detection() {
        assert!(DriveNode::file("1", "talk", "audio/mpeg").is_audio());
        assert!(DriveNode::file("2", "Talk.MP3", "application/octet-stream").is_audio());
        assert!(DriveNode::file("3", "take.wav", "").is_audio());
        assert!(DriveNode::file("4", "memo.m4a", "").is_audio());
        assert!(!DriveNode::file("5", "cover.png", "image/png").is_audio());
    }

    #[test]
    fn test_file_and_audio_items() {
        let folder = DriveNode::folder(
            "f1",
            "Season 1",
            vec![
                DriveNode::file("a", "Episode 1.mp3", "audio/mpeg")
                    .with_meta(Some(1024), Some(61.0), Some("2024-01-15T10:30:00Z")),
                DriveNode::file("c", "cover.png", "image/png"),
                DriveNode::folder("sub", "Extras", vec![]),
                DriveNode::file("b", "Episode 2.mp3", "audio/mpeg").with_download_url("https://dl/b"),
            ],
        );

        let files: Vec<_> = file_items(&folder).into_iter().map(|i| i.id).collect();
        assert_eq!(files, vec!["a", "c", "b"]);

        let audio = audio_items(&folder);
        let ids: Vec<_> = audio.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(audio[0].size, Some(1024));
        assert_eq!(audio[1].download_url.as_deref(), Some("https://dl/b"));
    }
}
