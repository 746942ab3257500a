//! Trainer actions: activate/deactivate and suspension handling.
//!
//! Suspension is the one mutation that writes more than a single field: the
//! three `suspendPeriod` fields and the forced `active=false` travel in one
//! optimistic patch so a rollback restores all of them together.

use crate::core::mutate::Mutator;
use crate::entities::{DataSource, FieldPatch, Record, RecordKey, SuspendPeriod};
use crate::errors::{Error, Result};
use crate::store::RemoteStore;
use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

fn trainer_key(trainer_id: &str) -> RecordKey {
    RecordKey::new(DataSource::Trainers, trainer_id)
}

/// Activates or deactivates a trainer with a single-field optimistic toggle.
pub async fn set_active<S: RemoteStore>(
    mutator: &Mutator<S>,
    trainer_id: &str,
    active: bool,
) -> Result<Record> {
    let patch = FieldPatch::new().set("active", json!(active));
    mutator.apply(&trainer_key(trainer_id), patch).await
}

/// Suspends a trainer for an inclusive day interval.
///
/// Writes `suspendPeriod.{start,end,reason}` plus `active=false` atomically
/// in the same patch. Whether a trainer is "currently suspended" stays
/// derived; consumers compare the interval against today at render/filter
/// time, never a cached boolean.
///
/// # Errors
/// Returns [`Error::Validation`] when the interval is inverted or the reason
/// is empty; no write is attempted in that case.
pub async fn suspend<S: RemoteStore>(
    mutator: &Mutator<S>,
    trainer_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    reason: &str,
) -> Result<Record> {
    if start > end {
        return Err(Error::Validation {
            message: format!("suspension interval is inverted: {start} > {end}"),
        });
    }
    if reason.trim().is_empty() {
        return Err(Error::Validation {
            message: "suspension reason cannot be empty".to_string(),
        });
    }

    let period = SuspendPeriod {
        start,
        end,
        reason: reason.trim().to_string(),
    };
    let patch = FieldPatch::new()
        .set("active", json!(false))
        .set("suspendPeriod", serde_json::to_value(&period)?);

    info!("suspending trainer {} from {} to {}", trainer_id, start, end);
    mutator.apply(&trainer_key(trainer_id), patch).await
}

/// Lifts a suspension: removes the interval and reactivates the trainer in
/// one patch (`null` removes the field under the store's merge semantics).
pub async fn lift_suspension<S: RemoteStore>(
    mutator: &Mutator<S>,
    trainer_id: &str,
) -> Result<Record> {
    let patch = FieldPatch::new()
        .set("active", json!(true))
        .set("suspendPeriod", json!(null));
    mutator.apply(&trainer_key(trainer_id), patch).await
}
