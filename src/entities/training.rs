//! Scheduled training session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A scheduled training session run by a trainer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Training {
    /// Training id (the collection key)
    pub id: String,
    /// Session title
    pub title: String,
    /// Id of the trainer running the session
    pub trainer_id: String,
    /// When the session takes place
    pub date: Option<DateTime<Utc>>,
    /// Venue
    pub location: String,
    /// Seat capacity
    pub seats: u32,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
