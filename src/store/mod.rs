//! Remote store boundary and the local mirror built on top of it.
//!
//! The console consumes exactly two operation shapes from the hosted store:
//! subscribe-to-collection (full snapshots on every change) and
//! merge-update-at-path (partial field maps). Both sit behind the
//! [`RemoteStore`] trait so tests and the demo binary can run against the
//! in-memory [`memory::MemoryStore`].

pub mod memory;
pub mod mirror;

pub use memory::MemoryStore;
pub use mirror::{MirrorState, SharedMirror, new_shared_mirror, run_live_mirror};

use crate::entities::{DataSource, FieldPatch};
use crate::errors::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

/// One full-collection snapshot delivered by a subscription.
///
/// The store re-sends the entire keyed map on every change; `raw` is `None`
/// when the collection path does not exist at all.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Collection the snapshot belongs to
    pub source: DataSource,
    /// Entire keyed map at the collection path, if present
    pub raw: Option<Map<String, Value>>,
}

/// Boundary to the hosted realtime document store.
///
/// The console never issues structural (schema) changes; it only subscribes
/// to collection paths and merges partial field maps into single records.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Subscribes to a collection path. The receiver gets the current
    /// snapshot immediately and a fresh full snapshot after every remote
    /// change.
    async fn subscribe(&self, source: DataSource) -> mpsc::Receiver<Snapshot>;

    /// Merges a partial field map into the record at `source`/`key`.
    /// Carries exactly the computed fields, never the whole record.
    async fn update(&self, source: DataSource, key: &str, patch: &FieldPatch) -> Result<()>;
}
