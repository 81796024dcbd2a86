//! File selection state.
//!
//! - [`FileSelection`] - plain checkbox membership for the file list
//! - [`OrderedSelection`] - user-imposed 1..N ordering over a subset of the
//!   open folder's audio files

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::drive::SelectableItem;
use crate::payload::OrderedAudio;

// =============================================================================
// Checkbox Selection
// =============================================================================

/// Set of checked file identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileSelection {
    ids: HashSet<String>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check or uncheck a file.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Check every file in `ids` (the "select all" box).
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.ids = ids.into_iter().map(String::from).collect();
    }

    /// Replace the selection (used when recreating from history).
    pub fn replace(&mut self, ids: impl IntoIterator<Item = String>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Check whether every item is selected (and there is at least one).
    pub fn covers(&self, items: &[SelectableItem]) -> bool {
        !items.is_empty() && items.iter().all(|i| self.ids.contains(&i.id))
    }

    /// Check whether at least one item is selected.
    pub fn touches(&self, items: &[SelectableItem]) -> bool {
        items.iter().any(|i| self.ids.contains(&i.id))
    }
}

// =============================================================================
// Ordered Selection
// =============================================================================

/// Callback receiving the new derived order.
pub type OrderListener = Box<dyn FnMut(&[OrderedAudio]) + Send + Sync>;

/// Tracks a manual order over selected items.
///
/// Ranks always form the dense sequence `1..=N`. Selection appends, removal
/// renumbers survivors in their previous relative order. The derived order
/// (ranks joined with the item catalog) is memoized and the listener fires
/// only when it actually changes.
pub struct OrderedSelection {
    ranks: HashMap<String, usize>,
    catalog: Vec<SelectableItem>,
    derived: Vec<OrderedAudio>,
    listener: Option<OrderListener>,
}

impl OrderedSelection {
    pub fn new() -> Self {
        Self {
            ranks: HashMap::new(),
            catalog: Vec::new(),
            derived: Vec::new(),
            listener: None,
        }
    }

    /// Register the change listener, replacing any previous one.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&[OrderedAudio]) + Send + Sync + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Append `id` to the end of the order. No-op if already ranked or
    /// absent from the catalog.
    pub fn select(&mut self, id: &str) {
        if self.ranks.contains_key(id) || !self.catalog.iter().any(|i| i.id == id) {
            return;
        }
        let rank = self.ranks.len() + 1;
        self.ranks.insert(id.to_string(), rank);
        self.refresh();
    }

    /// Drop `id` and close the gap. No-op if not ranked.
    pub fn remove(&mut self, id: &str) {
        if self.ranks.remove(id).is_none() {
            return;
        }
        self.renumber();
        self.refresh();
    }

    /// Forget every rank.
    pub fn reset(&mut self) {
        self.ranks.clear();
        self.refresh();
    }

    /// Replace the item catalog (the open folder changed).
    ///
    /// Ranks of items missing from the new catalog are pruned and the
    /// survivors renumbered, so a stale rank can never resurface later.
    pub fn set_catalog(&mut self, catalog: Vec<SelectableItem>) {
        let known: HashSet<&str> = catalog.iter().map(|i| i.id.as_str()).collect();
        let before = self.ranks.len();
        self.ranks.retain(|id, _| known.contains(id.as_str()));
        if self.ranks.len() != before {
            self.renumber();
        }
        self.catalog = catalog;
        self.refresh();
    }

    /// Current derived order (sorted by rank).
    pub fn derived_order(&self) -> &[OrderedAudio] {
        &self.derived
    }

    /// Rank of an item, if selected.
    pub fn rank_of(&self, id: &str) -> Option<usize> {
        self.ranks.get(id).copied()
    }

    /// Ranked identifiers in rank order.
    pub fn ranks(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.ranks.iter().map(|(id, rank)| (id.as_str(), *rank)).collect();
        entries.sort_by_key(|(_, rank)| *rank);
        entries
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    fn renumber(&mut self) {
        let mut kept: Vec<(String, usize)> = self.ranks.drain().collect();
        kept.sort_by_key(|(_, rank)| *rank);
        self.ranks = kept
            .into_iter()
            .enumerate()
            .map(|(index, (id, _))| (id, index + 1))
            .collect();
    }

    fn compute(&self) -> Vec<OrderedAudio> {
        self.ranks()
            .into_iter()
            .filter_map(|(id, rank)| {
                let item = self.catalog.iter().find(|i| i.id == id)?;
                Some(OrderedAudio {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    mime_type: item.mime_type.clone(),
                    order: rank,
                    download_url: item.download_url.clone(),
                })
            })
            .collect()
    }

    fn refresh(&mut self) {
        let next = self.compute();
        if next == self.derived {
            return;
        }
        self.derived = next;
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.derived);
        }
    }
}

impl Default for OrderedSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderedSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSelection")
            .field("ranks", &self.ranks())
            .field("catalog", &self.catalog.len())
            .field("derived", &self.derived)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::drive::{DriveNode, audio_items};
    use crate::navigator::find_by_id;

    fn item(id: &str) -> SelectableItem {
        SelectableItem {
            id: id.to_string(),
            name: format!("{id}.mp3"),
            mime_type: "audio/mpeg".to_string(),
            size: None,
            duration: None,
            modified_time: None,
            download_url: None,
        }
    }

    fn catalog(ids: &[&str]) -> Vec<SelectableItem> {
        ids.iter().map(|id| item(id)).collect()
    }

    fn tracker(items: Vec<SelectableItem>) -> OrderedSelection {
        let mut sel = OrderedSelection::new();
        sel.set_catalog(items);
        sel
    }

    fn order(sel: &OrderedSelection) -> Vec<(&str, usize)> {
        sel.derived_order()
            .iter()
            .map(|o| (o.id.as_str(), o.order))
            .collect()
    }

    fn assert_dense(sel: &OrderedSelection) {
        let mut ranks: Vec<usize> = sel.ranks().into_iter().map(|(_, r)| r).collect();
        ranks.sort_unstable();
        let expected: Vec<usize> = (1..=sel.len()).collect();
        assert_eq!(ranks, expected);
    }

    // =========================================================================
    // FileSelection
    // =========================================================================

    #[test]
    fn test_file_selection_toggle() {
        let mut sel = FileSelection::new();
        sel.toggle("a");
        sel.toggle("b");
        assert!(sel.contains("a"));
        assert_eq!(sel.len(), 2);
        sel.toggle("a");
        assert!(!sel.contains("a"));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_file_selection_select_all_and_clear() {
        let items = catalog(&["a", "b", "c"]);
        let mut sel = FileSelection::new();
        assert!(!sel.covers(&items));

        sel.select_all(items.iter().map(|i| i.id.as_str()));
        assert!(sel.covers(&items));
        assert!(sel.touches(&items));

        sel.clear();
        assert!(sel.is_empty());
        assert!(!sel.touches(&items));
        assert!(!sel.covers(&[]));
    }

    // =========================================================================
    // OrderedSelection
    // =========================================================================

    #[test]
    fn test_select_appends() {
        let mut sel = tracker(catalog(&["a", "b", "c"]));
        sel.select("c");
        sel.select("a");
        sel.select("b");
        assert_eq!(order(&sel), vec![("c", 1), ("a", 2), ("b", 3)]);
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut sel = tracker(catalog(&["a", "b"]));
        sel.select("a");
        sel.select("a");
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.rank_of("a"), Some(1));
    }

    #[test]
    fn test_remove_renumbers_preserving_order() {
        let mut sel = tracker(catalog(&["a", "b", "c"]));
        sel.select("a");
        sel.select("b");
        sel.select("c");
        sel.remove("b");
        assert_eq!(order(&sel), vec![("a", 1), ("c", 2)]);
        assert_dense(&sel);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut sel = tracker(catalog(&["a"]));
        sel.select("a");
        sel.remove("zzz");
        assert_eq!(order(&sel), vec![("a", 1)]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut sel = tracker(catalog(&["a", "b"]));
        sel.select("a");
        sel.select("b");
        sel.reset();
        assert!(sel.derived_order().is_empty());
        assert!(sel.is_empty());
    }

    #[test]
    fn test_ranks_stay_dense_over_mixed_operations() {
        let mut sel = tracker(catalog(&["a", "b", "c", "d", "e"]));
        let ops: &[(&str, bool)] = &[
            ("a", true),
            ("b", true),
            ("c", true),
            ("a", false),
            ("d", true),
            ("c", false),
            ("a", true),
            ("e", true),
            ("b", false),
            ("b", true),
        ];
        for (id, select) in ops {
            if *select {
                sel.select(id);
            } else {
                sel.remove(id);
            }
            assert_dense(&sel);
        }
        assert_eq!(order(&sel), vec![("d", 1), ("a", 2), ("e", 3), ("b", 4)]);
    }

    #[test]
    fn test_listener_fires_only_on_change() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);

        let mut sel = tracker(catalog(&["a", "b"]));
        sel.on_change(move |order| {
            let ids: Vec<String> = order.iter().map(|o| format!("{}:{}", o.id, o.order)).collect();
            sink.lock().unwrap().push(ids.join(","));
        });

        sel.select("a");
        sel.select("a");
        sel.remove("missing");
        sel.select("b");
        sel.remove("a");
        sel.reset();
        sel.reset();

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec!["a:1", "a:1,b:2", "b:1", ""]);
    }

    #[test]
    fn test_catalog_change_prunes_and_renumbers() {
        let mut sel = tracker(catalog(&["a", "b", "c"]));
        sel.select("a");
        sel.select("b");
        sel.select("c");

        sel.set_catalog(catalog(&["c", "a", "x"]));
        assert_eq!(order(&sel), vec![("a", 1), ("c", 2)]);
        assert_eq!(sel.rank_of("b"), None);
        assert_dense(&sel);

        sel.set_catalog(catalog(&["x"]));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_catalog_refresh_updates_display_fields() {
        let mut sel = tracker(catalog(&["a"]));
        sel.select("a");

        let mut renamed = item("a");
        renamed.name = "Renamed.mp3".to_string();
        renamed.download_url = Some("https://dl/a".to_string());
        sel.set_catalog(vec![renamed]);

        assert_eq!(sel.derived_order()[0].name, "Renamed.mp3");
        assert_eq!(sel.derived_order()[0].download_url.as_deref(), Some("https://dl/a"));
    }

    #[test]
    fn test_select_ignores_ids_outside_catalog() {
        let mut sel = tracker(catalog(&["a", "b"]));
        sel.select("ghost");
        assert!(sel.is_empty());

        sel.select("a");
        sel.select("b");
        assert_eq!(order(&sel), vec![("a", 1), ("b", 2)]);
        assert_dense(&sel);
    }

    #[test]
    fn test_select_before_catalog_is_ignored() {
        let mut sel = OrderedSelection::new();
        sel.select("a");
        assert!(sel.is_empty());

        sel.set_catalog(catalog(&["a"]));
        sel.select("a");
        assert_eq!(order(&sel), vec![("a", 1)]);
    }

    #[test]
    fn test_season_scenario() {
        let roots = vec![DriveNode::folder(
            "f1",
            "Season 1",
            vec![
                DriveNode::file("a", "Episode 1.mp3", "audio/mpeg"),
                DriveNode::file("b", "Episode 2.mp3", "audio/mpeg"),
            ],
        )];
        let folder = find_by_id(&roots, "f1").expect("folder exists");

        let mut sel = tracker(audio_items(folder));
        sel.select("b");
        sel.select("a");
        assert_eq!(order(&sel), vec![("b", 1), ("a", 2)]);
        assert_eq!(sel.derived_order()[0].name, "Episode 2.mp3");

        sel.remove("b");
        assert_eq!(order(&sel), vec![("a", 1)]);
    }
}
