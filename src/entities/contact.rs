//! Employee and customer contact records.
//!
//! Both are plain contact cards; customers are keyed by phone number in the
//! remote store, which is why the collection key lands in `id` like every
//! other record rather than being re-derived from the phone field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A back-office employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    /// Employee id (the collection key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Job designation
    pub designation: String,
    /// When the employee joined
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// An end customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    /// Collection key (the customer's phone number in the remote store)
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: String,
    /// City
    pub city: String,
    /// When the customer was first recorded
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
