//! Folder tree view model.
//!
//! Flattens the visible part of the folder hierarchy into rows for rendering.
//! Expansion is a per-folder override on top of a default (top-level folders
//! start expanded). While a search query is active, every matching subtree is
//! forced open and cannot be collapsed; non-matching subtrees are hidden.

use std::collections::HashMap;

use crate::drive::DriveNode;
use crate::navigator::{folders_only, matches_deep};

/// A rendered folder row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub id: String,
    pub name: String,
    /// Nesting level (0 for top-level folders)
    pub depth: usize,
    /// Children are visible
    pub is_open: bool,
    /// Open because of an active search match
    pub forced_open: bool,
    /// Folder has sub-folders (chevron is shown)
    pub has_folder_children: bool,
    /// Expansion can be changed by the user right now
    pub can_toggle: bool,
}

/// User expansion state for the folder tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeState {
    overrides: HashMap<String, bool>,
}

impl TreeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expansion chosen by the user, or the depth default.
    pub fn is_expanded(&self, id: &str, depth: usize) -> bool {
        self.overrides.get(id).copied().unwrap_or(depth == 0)
    }

    /// Flip expansion (click on a row).
    pub fn toggle(&mut self, row: &TreeRow) {
        if row.can_toggle {
            self.overrides.insert(row.id.clone(), !row.is_open);
        }
    }

    /// Open a closed row (arrow right).
    pub fn expand(&mut self, row: &TreeRow) {
        if row.can_toggle && !row.is_open {
            self.overrides.insert(row.id.clone(), true);
        }
    }

    /// Close an open row (arrow left). Forced rows stay open.
    pub fn collapse(&mut self, row: &TreeRow) {
        if row.is_open && !row.forced_open {
            self.overrides.insert(row.id.clone(), false);
        }
    }
}

/// Compute the visible folder rows in render order.
pub fn visible_rows(roots: &[DriveNode], query: &str, state: &TreeState) -> Vec<TreeRow> {
    let filtering = !query.is_empty();
    let mut rows = Vec::new();
    let mut stack: Vec<(&DriveNode, usize)> =
        folders_only(roots).into_iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        if !node.is_folder() {
            continue;
        }
        if filtering && !matches_deep(node, query) {
            continue;
        }

        let forced_open = filtering;
        let is_open = forced_open || state.is_expanded(&node.id, depth);
        let has_folder_children = node.has_folder_children();

        rows.push(TreeRow {
            id: node.id.clone(),
            name: node.name.clone(),
            depth,
            is_open,
            forced_open,
            has_folder_children,
            can_toggle: has_folder_children && !forced_open,
        });

        if is_open {
            stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<DriveNode> {
        vec![
            DriveNode::folder(
                "lib",
                "Library",
                vec![
                    DriveNode::folder(
                        "stories",
                        "Stories",
                        vec![
                            DriveNode::folder(
                                "tenali",
                                "Tenali Raman",
                                vec![DriveNode::file("t1", "Part 1.mp3", "audio/mpeg")],
                            ),
                            DriveNode::file("s1", "Intro.mp3", "audio/mpeg"),
                        ],
                    ),
                    DriveNode::folder("poems", "Poems", vec![]),
                ],
            ),
            DriveNode::file("stray", "stray.mp3", "audio/mpeg"),
            DriveNode::folder("misc", "Misc", vec![]),
        ]
    }

    fn ids(rows: &[TreeRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    fn row<'a>(rows: &'a [TreeRow], id: &str) -> &'a TreeRow {
        rows.iter().find(|r| r.id == id).expect("row should be visible")
    }

    #[test]
    fn test_default_expansion_shows_top_level_children() {
        let roots = forest();
        let rows = visible_rows(&roots, "", &TreeState::new());

        assert_eq!(ids(&rows), vec!["lib", "stories", "poems", "misc"]);
        assert!(row(&rows, "lib").is_open);
        assert!(!row(&rows, "stories").is_open);
        assert_eq!(row(&rows, "stories").depth, 1);
        assert!(row(&rows, "stories").can_toggle);
        assert!(!row(&rows, "poems").has_folder_children);
        assert!(!row(&rows, "poems").can_toggle);
    }

    #[test]
    fn test_toggle_expands_and_collapses() {
        let roots = forest();
        let mut state = TreeState::new();

        let rows = visible_rows(&roots, "", &state);
        state.toggle(row(&rows, "stories"));
        let rows = visible_rows(&roots, "", &state);
        assert_eq!(ids(&rows), vec!["lib", "stories", "tenali", "poems", "misc"]);

        state.toggle(row(&rows, "lib"));
        let rows = visible_rows(&roots, "", &state);
        assert_eq!(ids(&rows), vec!["lib", "misc"]);
    }

    #[test]
    fn test_toggle_without_subfolders_is_noop() {
        let roots = forest();
        let mut state = TreeState::new();
        let rows = visible_rows(&roots, "", &state);
        state.toggle(row(&rows, "misc"));
        assert_eq!(state, TreeState::new());
    }

    #[test]
    fn test_query_forces_matching_subtrees_open() {
        let roots = forest();
        let rows = visible_rows(&roots, "tenali", &TreeState::new());

        assert_eq!(ids(&rows), vec!["lib", "stories", "tenali"]);
        for r in &rows {
            assert!(r.is_open);
            assert!(r.forced_open);
            assert!(!r.can_toggle);
        }
    }

    #[test]
    fn test_query_matches_file_names_in_subtree() {
        let roots = forest();
        let rows = visible_rows(&roots, "part 1", &TreeState::new());
        assert_eq!(ids(&rows), vec!["lib", "stories", "tenali"]);
    }

    #[test]
    fn test_query_hides_non_matching_subtrees() {
        let roots = forest();
        let rows = visible_rows(&roots, "nothing here", &TreeState::new());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_whitespace_query_still_filters() {
        let roots = forest();
        let rows = visible_rows(&roots, " ", &TreeState::new());

        assert_eq!(ids(&rows), vec!["lib", "stories", "tenali"]);
        assert!(rows.iter().all(|r| r.forced_open));
    }

    #[test]
    fn test_forced_rows_ignore_toggle_and_collapse() {
        let roots = forest();
        let mut state = TreeState::new();
        let rows = visible_rows(&roots, "stories", &state);

        state.toggle(row(&rows, "stories"));
        state.collapse(row(&rows, "lib"));
        assert_eq!(state, TreeState::new());
    }

    #[test]
    fn test_clearing_query_restores_user_state() {
        let roots = forest();
        let mut state = TreeState::new();

        let rows = visible_rows(&roots, "", &state);
        state.collapse(row(&rows, "lib"));

        let filtered = visible_rows(&roots, "poems", &state);
        assert!(row(&filtered, "lib").is_open);

        let rows = visible_rows(&roots, "", &state);
        assert_eq!(ids(&rows), vec!["lib", "misc"]);
        assert!(!row(&rows, "lib").is_open);
    }

    #[test]
    fn test_expand_and_collapse_keys() {
        let roots = forest();
        let mut state = TreeState::new();

        let rows = visible_rows(&roots, "", &state);
        state.expand(row(&rows, "stories"));
        let rows = visible_rows(&roots, "", &state);
        assert!(row(&rows, "stories").is_open);

        state.collapse(row(&rows, "stories"));
        let rows = visible_rows(&roots, "", &state);
        assert!(!row(&rows, "stories").is_open);
    }
}
