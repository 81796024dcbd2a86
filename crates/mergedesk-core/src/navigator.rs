//! Read-only queries over the drive forest.
//!
//! All traversals are depth-first in root-list order, then children order,
//! and use an explicit stack so deep trees cannot overflow the call stack.
//! An unknown identifier is never an error: lookups return `None` or an
//! empty path.

use serde::{Deserialize, Serialize};

use crate::drive::DriveNode;

/// One step of a breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub id: String,
    pub name: String,
}

/// Find the first node with the given identifier.
pub fn find_by_id<'a>(roots: &'a [DriveNode], id: &str) -> Option<&'a DriveNode> {
    let mut stack: Vec<&DriveNode> = roots.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.id == id {
            return Some(node);
        }
        stack.extend(node.children.iter().rev());
    }

    None
}

/// Build the root-to-target path (inclusive).
///
/// Each frame on `frames` is the sibling iterator of one level; `path` holds
/// the node that opened every frame except the outermost. Exhausting a frame
/// backtracks by popping both.
pub fn build_path<'a>(roots: &'a [DriveNode], target_id: &str) -> Vec<&'a DriveNode> {
    let mut path: Vec<&DriveNode> = Vec::new();
    let mut frames = vec![roots.iter()];

    while let Some(frame) = frames.last_mut() {
        match frame.next() {
            Some(node) => {
                path.push(node);
                if node.id == target_id {
                    return path;
                }
                frames.push(node.children.iter());
            }
            None => {
                frames.pop();
                path.pop();
            }
        }
    }

    path
}

/// Check whether the node or any descendant name contains `query`
/// (case-insensitive). An empty query matches everything.
pub fn matches_deep(node: &DriveNode, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        if current.name.to_lowercase().contains(&needle) {
            return true;
        }
        stack.extend(current.children.iter());
    }

    false
}

/// Keep only folder entries, preserving order.
pub fn folders_only(nodes: &[DriveNode]) -> Vec<&DriveNode> {
    nodes.iter().filter(|n| n.is_folder()).collect()
}

/// First top-level folder (selected by default after the drive loads).
pub fn first_folder(roots: &[DriveNode]) -> Option<&DriveNode> {
    roots.iter().find(|n| n.is_folder())
}

/// Breadcrumb trail for a node, empty when the node is unknown.
pub fn breadcrumbs(roots: &[DriveNode], id: &str) -> Vec<Breadcrumb> {
    build_path(roots, id)
        .into_iter()
        .map(|n| Breadcrumb {
            id: n.id.clone(),
            name: n.name.clone(),
        })
        .collect()
}

/// Resolve a breadcrumb click: only folders are navigable.
pub fn navigate_to<'a>(roots: &'a [DriveNode], id: &str) -> Option<&'a DriveNode> {
    find_by_id(roots, id).filter(|n| n.is_folder())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<DriveNode> {
        vec![
            DriveNode::folder(
                "root-1",
                "Podcast Episodes",
                vec![
                    DriveNode::folder(
                        "f1",
                        "Season 1",
                        vec![
                            DriveNode::file("a", "Episode 1.mp3", "audio/mpeg"),
                            DriveNode::file("b", "Episode 2.mp3", "audio/mpeg"),
                        ],
                    ),
                    DriveNode::folder(
                        "f2",
                        "Season 2",
                        vec![DriveNode::folder(
                            "f2-bonus",
                            "Bonus",
                            vec![DriveNode::file("z", "Outtakes.wav", "audio/wav")],
                        )],
                    ),
                ],
            ),
            DriveNode::file("loose", "readme.txt", "text/plain"),
            DriveNode::folder("root-2", "Music", vec![]),
        ]
    }

    #[test]
    fn test_find_by_id() {
        let roots = forest();
        assert_eq!(find_by_id(&roots, "root-1").map(|n| n.name.as_str()), Some("Podcast Episodes"));
        assert_eq!(find_by_id(&roots, "z").map(|n| n.name.as_str()), Some("Outtakes.wav"));
        assert_eq!(find_by_id(&roots, "root-2").map(|n| n.id.as_str()), Some("root-2"));
        assert!(find_by_id(&roots, "missing").is_none());
        assert!(find_by_id(&roots, "").is_none());
        assert!(find_by_id(&[], "a").is_none());
    }

    #[test]
    fn test_find_by_id_returns_first_in_dfs_order() {
        let roots = vec![
            DriveNode::folder("p", "P", vec![DriveNode::file("dup", "deep", "")]),
            DriveNode::file("dup", "shallow", ""),
        ];
        assert_eq!(find_by_id(&roots, "dup").map(|n| n.name.as_str()), Some("deep"));
    }

    #[test]
    fn test_build_path() {
        let roots = forest();
        let ids: Vec<_> = build_path(&roots, "z").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root-1", "f2", "f2-bonus", "z"]);

        let ids: Vec<_> = build_path(&roots, "root-2").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root-2"]);
    }

    #[test]
    fn test_build_path_backtracks_dead_ends() {
        let roots = forest();
        // "b" comes after "a" inside f1, and f2 is never entered
        let ids: Vec<_> = build_path(&roots, "b").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root-1", "f1", "b"]);
    }

    #[test]
    fn test_build_path_missing_is_empty() {
        let roots = forest();
        assert!(build_path(&roots, "nope").is_empty());
        assert!(build_path(&[], "a").is_empty());
    }

    #[test]
    fn test_build_path_agrees_with_find_by_id() {
        let roots = forest();
        for id in ["root-1", "f1", "a", "b", "f2", "f2-bonus", "z", "loose", "root-2"] {
            let path = build_path(&roots, id);
            let last = path.last().expect("path should not be empty");
            assert_eq!(last.id, id);
            assert!(roots.iter().any(|r| r.id == path[0].id));
            assert!(find_by_id(&roots, id).is_some());
        }
    }

    #[test]
    fn test_matches_deep() {
        let roots = forest();
        let podcast = &roots[0];

        assert!(matches_deep(podcast, ""));
        assert!(matches_deep(&roots[2], ""));
        assert!(matches_deep(podcast, "podcast"));
        assert!(matches_deep(podcast, "SEASON 2"));
        assert!(matches_deep(podcast, "outtakes"));
        assert!(!matches_deep(podcast, "music"));
        assert!(!matches_deep(&roots[2], "season"));
    }

    #[test]
    fn test_folders_only() {
        let roots = forest();
        let ids: Vec<_> = folders_only(&roots).iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root-1", "root-2"]);
    }

    #[test]
    fn test_first_folder() {
        let roots = vec![
            DriveNode::file("x", "x.mp3", "audio/mpeg"),
            DriveNode::folder("f", "F", vec![]),
        ];
        assert_eq!(first_folder(&roots).map(|n| n.id.as_str()), Some("f"));
        assert!(first_folder(&[]).is_none());
    }

    #[test]
    fn test_breadcrumbs() {
        let roots = forest();
        let crumbs = breadcrumbs(&roots, "f1");
        assert_eq!(
            crumbs,
            vec![
                Breadcrumb { id: "root-1".to_string(), name: "Podcast Episodes".to_string() },
                Breadcrumb { id: "f1".to_string(), name: "Season 1".to_string() },
            ]
        );
        assert!(breadcrumbs(&roots, "unknown").is_empty());
    }

    #[test]
    fn test_navigate_to_only_folders() {
        let roots = forest();
        assert_eq!(navigate_to(&roots, "f2").map(|n| n.id.as_str()), Some("f2"));
        assert!(navigate_to(&roots, "a").is_none());
        assert!(navigate_to(&roots, "missing").is_none());
    }
}
