use log::{debug, warn};

use crate::models::{HistoryEntry, MAX_HISTORY_ITEMS};
use crate::services::storage::KeyValueStore;

pub const KEY_HISTORY: &str = "ai_generator_history";

/// Newest-first, capacity-bounded log of successful generations. Every
/// mutation rewrites the whole sequence to storage.
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_capacity(storage, MAX_HISTORY_ITEMS)
    }

    pub fn with_capacity(storage: S, capacity: usize) -> Self {
        let mut store = Self {
            storage,
            entries: Vec::new(),
            capacity,
        };
        store.entries = store.load();
        store
    }

    /// Reads the persisted sequence. Corrupt data degrades to an empty history.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.storage.get::<Vec<HistoryEntry>>(KEY_HISTORY) {
            Ok(Some(mut entries)) => {
                entries.truncate(self.capacity);
                debug!("loaded {} history entries", entries.len());
                entries
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to parse history: {}", e);
                Vec::new()
            }
        }
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    pub fn persist(&self) {
        if let Err(e) = self.storage.set(KEY_HISTORY, &self.entries) {
            warn!("Failed to save history: {}", e);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentRequest, ContentType};
    use crate::services::storage::MemoryStorage;

    fn entry(n: usize) -> HistoryEntry {
        HistoryEntry {
            id: format!("id-{}", n),
            request: ContentRequest::new(ContentType::SocialMedia, format!("prompt {}", n)),
            result: format!("result {}", n),
            created_at: 1_700_000_000_000.0 + n as f64,
        }
    }

    #[test]
    fn first_run_is_empty() {
        let store = HistoryStore::new(MemoryStorage::default());
        assert!(store.entries().is_empty());
    }

    #[test]
    fn append_inserts_newest_first_and_evicts_oldest() {
        let storage = MemoryStorage::default();
        let mut store = HistoryStore::new(storage.clone());
        for n in 0..7 {
            store.append(entry(n));
        }

        let ids: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["id-6", "id-5", "id-4", "id-3", "id-2"]);

        let persisted = HistoryStore::new(storage).load();
        assert_eq!(persisted, store.entries());
    }

    #[test]
    fn clear_then_load_is_empty() {
        let storage = MemoryStorage::default();
        let mut store = HistoryStore::new(storage.clone());
        store.append(entry(1));
        store.clear();

        assert!(store.entries().is_empty());
        assert!(store.load().is_empty());
        assert_eq!(storage.get_raw(KEY_HISTORY).as_deref(), Some("[]"));
    }

    #[test]
    fn corrupt_storage_falls_back_to_empty() {
        let storage = MemoryStorage::default();
        storage.set_raw(KEY_HISTORY, "[{\"id\": 42").unwrap();
        let store = HistoryStore::new(storage);
        assert!(store.entries().is_empty());
    }

    #[test]
    fn oversized_stored_history_is_truncated_on_load() {
        let storage = MemoryStorage::default();
        let entries: Vec<HistoryEntry> = (0..8).map(entry).collect();
        storage.set(KEY_HISTORY, &entries).unwrap();

        let store = HistoryStore::new(storage);
        assert_eq!(store.entries().len(), MAX_HISTORY_ITEMS);
        assert_eq!(store.entries()[0].id, "id-0");
    }

    #[test]
    fn sequences_round_trip_through_storage() {
        for len in [0, 1, MAX_HISTORY_ITEMS] {
            let storage = MemoryStorage::default();
            let mut store = HistoryStore::new(storage.clone());
            for n in (0..len).rev() {
                store.append(entry(n));
            }
            let reloaded = HistoryStore::new(storage);
            assert_eq!(reloaded.entries(), store.entries(), "length {}", len);
        }
    }

    #[test]
    fn reads_history_written_by_earlier_versions() {
        let storage = MemoryStorage::default();
        storage
            .set_raw(
                KEY_HISTORY,
                r#"[{"id":"1700000000000","type":"Email Template","prompt":"welcome","result":"Hi!","timestamp":1700000000000}]"#,
            )
            .unwrap();
        let store = HistoryStore::new(storage);
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].request.content_type, ContentType::EmailTemplate);
        assert_eq!(store.entries()[0].result, "Hi!");
    }
}
