//! In-memory implementation of the remote store boundary.
//!
//! Used by every integration-style test and by the demo binary. Mimics the
//! hosted store's observable behavior: subscribers get the current snapshot
//! immediately and a full snapshot after every write; updates deep-merge a
//! partial field map into the stored record. Tests can inject a failure for
//! the next update or gate updates to observe the optimistic window.

use crate::entities::{DataSource, FieldPatch, deep_merge};
use crate::errors::{Error, Result};
use crate::store::{RemoteStore, Snapshot};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore, mpsc};
use tracing::{debug, warn};

const SUBSCRIBER_BUFFER: usize = 32;

#[derive(Default)]
struct Inner {
    collections: HashMap<DataSource, Map<String, Value>>,
    subscribers: HashMap<DataSource, Vec<mpsc::Sender<Snapshot>>>,
    fail_next_update: Option<String>,
    gate: Option<Arc<Semaphore>>,
}

/// An in-memory document store with subscription snapshots and merge
/// updates.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a whole collection with the given keyed map and notifies
    /// subscribers. `raw` must be a JSON object; anything else is ignored
    /// with a warning.
    pub async fn seed(&self, source: DataSource, raw: Value) {
        let Value::Object(map) = raw else {
            warn!("ignoring non-object seed for {}", source);
            return;
        };
        let mut inner = self.inner.write().await;
        inner.collections.insert(source, map);
        Self::broadcast(&mut inner, source);
    }

    /// Makes the next `update` call fail with the given message, after which
    /// updates succeed again.
    pub async fn fail_next_update(&self, message: &str) {
        self.inner.write().await.fail_next_update = Some(message.to_string());
    }

    /// Holds every subsequent update until [`Self::release_update`] is
    /// called once per held update. Lets tests observe the optimistic window
    /// while a write is unresolved.
    pub async fn hold_updates(&self) {
        self.inner.write().await.gate = Some(Arc::new(Semaphore::new(0)));
    }

    /// Releases one held update.
    pub async fn release_update(&self) {
        if let Some(gate) = &self.inner.read().await.gate {
            gate.add_permits(1);
        }
    }

    /// Raw stored value at `source`/`key`, for assertions.
    pub async fn stored(&self, source: DataSource, key: &str) -> Option<Value> {
        self.inner
            .read()
            .await
            .collections
            .get(&source)
            .and_then(|collection| collection.get(key))
            .cloned()
    }

    fn broadcast(inner: &mut Inner, source: DataSource) {
        let snapshot = Snapshot {
            source,
            raw: inner.collections.get(&source).cloned(),
        };
        if let Some(subscribers) = inner.subscribers.get_mut(&source) {
            subscribers.retain(|tx| match tx.try_send(snapshot.clone()) {
                Ok(()) => true,
                // A full buffer just means the subscriber is lagging; the
                // next write delivers a complete snapshot anyway.
                Err(mpsc::error::TrySendError::Full(_)) => true,
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            });
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn subscribe(&self, source: DataSource) -> mpsc::Receiver<Snapshot> {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);
        let mut inner = self.inner.write().await;
        let initial = Snapshot {
            source,
            raw: inner.collections.get(&source).cloned(),
        };
        // Buffer is empty at this point, the initial snapshot always fits.
        let _ = tx.try_send(initial);
        inner.subscribers.entry(source).or_default().push(tx);
        rx
    }

    async fn update(&self, source: DataSource, key: &str, patch: &FieldPatch) -> Result<()> {
        let gate = self.inner.read().await.gate.clone();
        if let Some(gate) = gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| Error::RemoteWrite {
                    message: "store gate closed".to_string(),
                })?;
            permit.forget();
        }

        let mut inner = self.inner.write().await;
        if let Some(message) = inner.fail_next_update.take() {
            debug!("injected update failure for {}/{}: {}", source, key, message);
            return Err(Error::RemoteWrite { message });
        }

        let collection = inner.collections.entry(source).or_default();
        let entry = collection
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(existing) = entry {
            deep_merge(existing, &patch.fields);
        } else {
            *entry = Value::Object(patch.fields.clone());
        }
        Self::broadcast(&mut inner, source);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let store = MemoryStore::new();
        store
            .seed(
                DataSource::Trainers,
                json!({ "t1": { "name": "Ravi", "active": true } }),
            )
            .await;

        let patch = FieldPatch::new().set("active", json!(false));
        store.update(DataSource::Trainers, "t1", &patch).await.unwrap();

        let stored = store.stored(DataSource::Trainers, "t1").await.unwrap();
        assert_eq!(stored["active"], json!(false));
        // Untouched fields survive the merge.
        assert_eq!(stored["name"], json!("Ravi"));
    }

    #[tokio::test]
    async fn test_subscribe_delivers_initial_and_change_snapshots() {
        let store = MemoryStore::new();
        store
            .seed(DataSource::Products, json!({ "p1": { "name": "RO Unit" } }))
            .await;

        let mut rx = store.subscribe(DataSource::Products).await;
        let initial = rx.recv().await.unwrap();
        assert_eq!(initial.raw.unwrap().len(), 1);

        store
            .update(
                DataSource::Products,
                "p2",
                &FieldPatch::new().set("name", json!("Filter")),
            )
            .await
            .unwrap();
        let changed = rx.recv().await.unwrap();
        assert_eq!(changed.raw.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_injected_failure_fails_exactly_once() {
        let store = MemoryStore::new();
        store.fail_next_update("store offline").await;

        let patch = FieldPatch::new().set("active", json!(true));
        let err = store
            .update(DataSource::Products, "p1", &patch)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RemoteWrite { .. }));

        store
            .update(DataSource::Products, "p1", &patch)
            .await
            .unwrap();
    }
}
