//! Trainer records.
//!
//! A trainer stores only an `active` flag plus an optional suspension
//! interval. "Suspended" is never stored as a status: every consumer derives
//! it from the interval and the current date at the moment it needs it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Suspension interval written by the suspend action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendPeriod {
    /// First day of the suspension (inclusive)
    pub start: NaiveDate,
    /// Last day of the suspension (inclusive)
    pub end: NaiveDate,
    /// Operator-supplied reason shown in the detail view
    pub reason: String,
}

/// A trainer running training sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trainer {
    /// Trainer id (the collection key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Stored activation flag; forced to `false` while a suspension is set
    pub active: bool,
    /// Current suspension interval, if any
    pub suspend_period: Option<SuspendPeriod>,
    /// When the trainer was registered
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Trainer {
    /// Derived suspension check: true when `today` falls inside the stored
    /// interval (inclusive on both ends). Recomputed by every consumer; there
    /// is no cached boolean.
    #[must_use]
    pub fn is_suspended(&self, today: NaiveDate) -> bool {
        self.suspend_period
            .as_ref()
            .is_some_and(|period| period.start <= today && today <= period.end)
    }
}
