//! Browser persistence for the submission history.

use mergedesk_core::history::{HISTORY_KEY, decode_items, encode_items};
use mergedesk_core::{HistoryError, HistoryItem, HistoryResult, HistoryStore, MemoryHistoryStore};

use crate::core::error::StorageError;
use crate::utils::dom;

/// History kept in `localStorage` under [`HISTORY_KEY`].
///
/// Storage is looked up on every call so a store created before the page
/// finished loading still works.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageHistory;

impl HistoryStore for LocalStorageHistory {
    fn load(&self) -> HistoryResult<Vec<HistoryItem>> {
        let storage = dom::local_storage().ok_or(HistoryError::StorageUnavailable)?;
        match storage.get_item(HISTORY_KEY).ok().flatten() {
            Some(raw) => decode_items(&raw),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, items: &[HistoryItem]) -> HistoryResult<()> {
        let storage = dom::local_storage().ok_or(StorageError::Unavailable)?;
        let raw = encode_items(items)?;
        storage
            .set_item(HISTORY_KEY, &raw)
            .map_err(|_| StorageError::WriteFailed)?;
        Ok(())
    }

    fn clear(&mut self) -> HistoryResult<()> {
        let storage = dom::local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .remove_item(HISTORY_KEY)
            .map_err(|_| StorageError::RemoveFailed)?;
        Ok(())
    }
}

/// Store picked at startup: `localStorage` when the browser allows it,
/// otherwise an in-memory list that lives as long as the tab.
#[derive(Clone, Debug)]
pub enum HistoryBackend {
    Browser(LocalStorageHistory),
    Memory(MemoryHistoryStore),
}

impl HistoryBackend {
    pub fn detect() -> Self {
        if dom::local_storage().is_some() {
            Self::Browser(LocalStorageHistory)
        } else {
            Self::Memory(MemoryHistoryStore::new())
        }
    }
}

impl HistoryStore for HistoryBackend {
    fn load(&self) -> HistoryResult<Vec<HistoryItem>> {
        match self {
            Self::Browser(store) => store.load(),
            Self::Memory(store) => store.load(),
        }
    }

    fn save(&mut self, items: &[HistoryItem]) -> HistoryResult<()> {
        match self {
            Self::Browser(store) => store.save(items),
            Self::Memory(store) => store.save(items),
        }
    }

    fn clear(&mut self) -> HistoryResult<()> {
        match self {
            Self::Browser(store) => store.clear(),
            Self::Memory(store) => store.clear(),
        }
    }
}
