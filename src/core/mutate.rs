//! Optimistic mutation with rollback.
//!
//! Every status toggle, suspension and order advancement in the console goes
//! through [`Mutator::apply`]: the computed fields are merged into the local
//! mirror synchronously (the UI re-renders against the assumed outcome), then
//! the partial-field update is sent to the remote store. A failed write
//! restores the single previous-value snapshot; a successful one needs no
//! further local change because step one already produced it.
//!
//! A per-record in-flight flag rejects a second mutation on a key whose
//! first write has not resolved yet. Failed writes are never retried
//! automatically; the operator re-triggers the action.

use crate::entities::{FieldPatch, Record, RecordKey};
use crate::errors::{Error, Result};
use crate::store::{RemoteStore, SharedMirror};
use std::sync::Arc;
use tracing::{error, info};

/// Applies optimistic patches to the shared mirror and the remote store.
pub struct Mutator<S: RemoteStore> {
    mirror: SharedMirror,
    store: Arc<S>,
}

impl<S: RemoteStore> Clone for Mutator<S> {
    fn clone(&self) -> Self {
        Self {
            mirror: Arc::clone(&self.mirror),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RemoteStore> Mutator<S> {
    /// Builds a mutator over a shared mirror and a remote store handle.
    pub fn new(mirror: SharedMirror, store: Arc<S>) -> Self {
        Self { mirror, store }
    }

    /// The shared mirror this mutator patches.
    #[must_use]
    pub fn mirror(&self) -> &SharedMirror {
        &self.mirror
    }

    /// Current mirrored record for a key, if any.
    pub async fn current(&self, key: &RecordKey) -> Option<Record> {
        self.mirror.read().await.get(key).cloned()
    }

    /// Runs one optimistic mutation: local merge first, remote write second,
    /// rollback to the pre-mutation snapshot if the write fails.
    ///
    /// Returns the patched record on commit so callers can fire success-only
    /// side effects against the value the mirror now holds.
    ///
    /// # Errors
    /// * [`Error::NotFound`]: the key is not in the mirror; nothing changed.
    /// * [`Error::MutationInFlight`]: an earlier write on this key has not
    ///   resolved; nothing changed.
    /// * [`Error::RemoteWrite`]: the store rejected the patch; the local
    ///   record was rolled back field-for-field.
    pub async fn apply(&self, key: &RecordKey, patch: FieldPatch) -> Result<Record> {
        let (previous, patched) = {
            let mut state = self.mirror.write().await;
            if state.is_in_flight(key) {
                return Err(Error::MutationInFlight {
                    collection: key.source,
                    key: key.id.clone(),
                });
            }
            let Some(current) = state.get(key).cloned() else {
                return Err(Error::NotFound {
                    collection: key.source,
                    key: key.id.clone(),
                });
            };
            let patched = current.merged(&patch)?;
            state.put(patched.clone());
            state.begin_mutation(key);
            (current, patched)
        };

        info!("applying {} field(s) to {}", patch.fields.len(), key);
        match self.store.update(key.source, &key.id, &patch).await {
            Ok(()) => {
                self.mirror.write().await.end_mutation(key);
                Ok(patched)
            }
            Err(e) => {
                let mut state = self.mirror.write().await;
                state.put(previous);
                state.end_mutation(key);
                error!("rolled back {}: {}", key, e);
                Err(match e {
                    Error::RemoteWrite { .. } => e,
                    other => Error::RemoteWrite {
                        message: other.to_string(),
                    },
                })
            }
        }
    }
}
