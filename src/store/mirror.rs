//! Local keyed-map mirror of the remote collections.
//!
//! Each collection mirrors into a `BTreeMap<key, Record>` that is reconciled
//! per key on every snapshot, so a snapshot costs O(changed + removed)
//! insertions instead of rebuilding a list, while consumers still observe a
//! consistent whole-collection view.
//!
//! Write policy: the live mirror task is the sole writer of bulk reconciles,
//! the optimistic mutator is the sole writer of single-record patches. Both
//! go through the same lock; the later writer wins, no merge.

use crate::entities::{DataSource, Record, RecordKey, normalize_collection};
use crate::store::Snapshot;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info, trace};

/// Mirror of every subscribed collection plus the set of keys with a
/// mutation currently in flight.
#[derive(Debug, Default)]
pub struct MirrorState {
    collections: HashMap<DataSource, BTreeMap<String, Record>>,
    in_flight: HashSet<RecordKey>,
}

impl MirrorState {
    /// Empty mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles one collection against a full remote snapshot: upserts
    /// every key the snapshot carries and removes keys it no longer has.
    /// An absent snapshot map empties the collection.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        let records = normalize_collection(snapshot.source, snapshot.raw.as_ref());
        let collection = self.collections.entry(snapshot.source).or_default();

        let live_keys: HashSet<&str> = records.iter().map(Record::key).collect();
        collection.retain(|key, _| live_keys.contains(key.as_str()));
        for record in records {
            collection.insert(record.key().to_string(), record);
        }
        debug!(
            "mirror reconciled {}: {} records",
            snapshot.source,
            collection.len()
        );
    }

    /// Ordered (by key) list of the mirrored records of one collection.
    #[must_use]
    pub fn records(&self, source: DataSource) -> Vec<Record> {
        self.collections
            .get(&source)
            .map(|collection| collection.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of mirrored records in one collection.
    #[must_use]
    pub fn len(&self, source: DataSource) -> usize {
        self.collections.get(&source).map_or(0, BTreeMap::len)
    }

    /// True when a collection has no mirrored records.
    #[must_use]
    pub fn is_empty(&self, source: DataSource) -> bool {
        self.len(source) == 0
    }

    /// Looks up one record by identity.
    #[must_use]
    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.collections.get(&key.source)?.get(&key.id)
    }

    /// Replaces (or inserts) a single record, keyed by its own identity.
    /// This is the patch path used by the optimistic mutator.
    pub fn put(&mut self, record: Record) {
        let collection = self.collections.entry(record.source()).or_default();
        collection.insert(record.key().to_string(), record);
    }

    /// Marks a key as having a mutation in flight. Returns false when the
    /// key is already marked.
    pub fn begin_mutation(&mut self, key: &RecordKey) -> bool {
        self.in_flight.insert(key.clone())
    }

    /// Clears the in-flight mark for a key.
    pub fn end_mutation(&mut self, key: &RecordKey) {
        self.in_flight.remove(key);
    }

    /// Whether a mutation is currently in flight for a key.
    #[must_use]
    pub fn is_in_flight(&self, key: &RecordKey) -> bool {
        self.in_flight.contains(key)
    }
}

/// Mirror state shared between the live mirror tasks and the mutator.
pub type SharedMirror = Arc<RwLock<MirrorState>>;

/// Creates an empty shared mirror.
#[must_use]
pub fn new_shared_mirror() -> SharedMirror {
    Arc::new(RwLock::new(MirrorState::new()))
}

/// Drives one collection subscription: applies every snapshot the receiver
/// delivers until the store drops the channel. Nothing in here returns an
/// error; a bad entry is skipped at the normalization boundary and the
/// subscription keeps running.
pub async fn run_live_mirror(mut rx: mpsc::Receiver<Snapshot>, mirror: SharedMirror) {
    while let Some(snapshot) = rx.recv().await {
        trace!("snapshot received for {}", snapshot.source);
        mirror.write().await.apply_snapshot(&snapshot);
    }
    info!("live mirror subscription closed");
}
