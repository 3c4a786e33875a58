//! Shared in-memory document store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use blackout_core::{Classification, TextBlock};
use tracing::info;
use uuid::Uuid;

use crate::StoreError;

/// One uploaded document and everything derived from it so far.
///
/// Blocks are immutable after upload; the classification is overwritten by
/// each classification call (no versioning or history).
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub pdf_bytes: Vec<u8>,
    pub blocks: Vec<TextBlock>,
    pub classification: Option<Classification>,
}

/// In-memory document store keyed by document ID.
///
/// Cloning the store clones a handle to the same map, so one store can be
/// shared across tasks. There is no TTL and no persistence. Writers against
/// the same document are not coordinated; last write wins, which matches
/// the single-user interactive workflow this store serves.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    inner: Arc<RwLock<HashMap<Uuid, DocumentRecord>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly uploaded document, returning its new ID.
    pub fn insert(&self, pdf_bytes: Vec<u8>, blocks: Vec<TextBlock>) -> Uuid {
        let id = Uuid::new_v4();
        let record = DocumentRecord {
            pdf_bytes,
            blocks,
            classification: None,
        };
        self.inner
            .write()
            .expect("document store lock poisoned")
            .insert(id, record);
        info!(document = %id, "stored uploaded document");
        id
    }

    /// Snapshot of the full document record.
    pub fn get(&self, id: &Uuid) -> Result<DocumentRecord, StoreError> {
        self.inner
            .read()
            .expect("document store lock poisoned")
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(*id))
    }

    /// Snapshot of a document's blocks.
    pub fn blocks(&self, id: &Uuid) -> Result<Vec<TextBlock>, StoreError> {
        Ok(self.get(id)?.blocks)
    }

    /// Overwrite a document's classification. Last write wins.
    pub fn set_classification(
        &self,
        id: &Uuid,
        classification: Classification,
    ) -> Result<(), StoreError> {
        let mut map = self.inner.write().expect("document store lock poisoned");
        let record = map.get_mut(id).ok_or(StoreError::NotFound(*id))?;
        record.classification = Some(classification);
        Ok(())
    }

    /// Remove a document, returning its record.
    pub fn remove(&self, id: &Uuid) -> Result<DocumentRecord, StoreError> {
        self.inner
            .write()
            .expect("document store lock poisoned")
            .remove(id)
            .ok_or(StoreError::NotFound(*id))
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("document store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackout_core::classify::{ClassifyVariant, RawClassification, reconcile};
    use serde_json::json;

    fn blocks(n: u32) -> Vec<TextBlock> {
        (0..n)
            .map(|id| TextBlock {
                block_id: id,
                page_number: 1,
                bbox: [0.0, 0.0, 10.0, 10.0],
                text: format!("block {id}"),
            })
            .collect()
    }

    fn classification(shows: &[&str]) -> Classification {
        let raw = RawClassification::from_json(&json!({
            "shows": shows,
            "assignments": {}
        }))
        .unwrap();
        reconcile(raw, &(0..2).collect(), ClassifyVariant::Standard)
    }

    #[test]
    fn insert_then_get() {
        let store = DocumentStore::new();
        let id = store.insert(vec![1, 2, 3], blocks(2));

        let record = store.get(&id).unwrap();
        assert_eq!(record.pdf_bytes, vec![1, 2, 3]);
        assert_eq!(record.blocks.len(), 2);
        assert!(record.classification.is_none());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = DocumentStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(&id), Err(StoreError::NotFound(missing)) if missing == id));
    }

    #[test]
    fn classification_overwrite_last_write_wins() {
        let store = DocumentStore::new();
        let id = store.insert(Vec::new(), blocks(2));

        store.set_classification(&id, classification(&["A"])).unwrap();
        store.set_classification(&id, classification(&["B"])).unwrap();

        let record = store.get(&id).unwrap();
        assert_eq!(record.classification.unwrap().shows, vec!["B"]);
    }

    #[test]
    fn set_classification_on_missing_document_fails() {
        let store = DocumentStore::new();
        let result = store.set_classification(&Uuid::new_v4(), classification(&[]));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn clones_share_the_same_map() {
        let store = DocumentStore::new();
        let handle = store.clone();
        let id = store.insert(Vec::new(), blocks(1));
        assert!(handle.get(&id).is_ok());
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn remove_then_get_fails() {
        let store = DocumentStore::new();
        let id = store.insert(Vec::new(), blocks(1));
        store.remove(&id).unwrap();
        assert!(store.is_empty());
        assert!(store.get(&id).is_err());
    }
}
