//! UI state types for the studio screens.

use mergedesk_core::DriveNode;

/// Top-level tab of the studio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    /// Payload builder (default)
    #[default]
    Builder,
    /// Saved payloads
    History,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Builder => "Builder",
            Tab::History => "History",
        }
    }
}

/// Loading state of the drive forest.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DriveState {
    #[default]
    Loading,
    Ready(Vec<DriveNode>),
    Failed(String),
}

impl DriveState {
    /// Root folders once loaded, otherwise empty.
    pub fn roots(&self) -> &[DriveNode] {
        match self {
            DriveState::Ready(roots) => roots,
            _ => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Transient message shown above the action bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_state_roots() {
        assert!(DriveState::Loading.roots().is_empty());
        assert!(DriveState::Failed("offline".into()).roots().is_empty());

        let roots = vec![DriveNode::folder("r", "Root", vec![])];
        assert_eq!(DriveState::Ready(roots).roots().len(), 1);
    }

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::error("boom").kind, NoticeKind::Error);
        assert_eq!(Notice::info("hi").text, "hi");
        assert_eq!(Tab::default(), Tab::Builder);
    }
}
