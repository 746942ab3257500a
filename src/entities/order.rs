//! Customer order records and the order status lifecycle.
//!
//! Status casing in the store is historically inconsistent (`"Dispatched"`
//! next to `"pending"`); parsing accepts any casing and everything downstream
//! of the normalization boundary sees one canonical lowercase form.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order.
///
/// Legal forward path: `pending → confirmed → dispatched → delivered`, with
/// the side branch `pending → cancelled` available only from `pending`.
/// `installed` is a legal stored value (set by the field team outside this
/// console) but is not a target of the advancement path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Newly placed, awaiting confirmation
    #[default]
    Pending,
    /// Confirmed by the back office (requires an expected date)
    Confirmed,
    /// Handed to dispatch
    Dispatched,
    /// Delivered to the customer
    Delivered,
    /// Cancelled before confirmation
    Cancelled,
    /// Installed on site
    Installed,
}

impl OrderStatus {
    /// Canonical lowercase form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Installed => "installed",
        }
    }

    /// Timestamp field stamped when an order reaches this status
    /// (e.g. `confirmedAt`).
    #[must_use]
    pub const fn timestamp_field(self) -> &'static str {
        match self {
            OrderStatus::Pending => "createdAt",
            OrderStatus::Confirmed => "confirmedAt",
            OrderStatus::Dispatched => "dispatchedAt",
            OrderStatus::Delivered => "deliveredAt",
            OrderStatus::Cancelled => "cancelledAt",
            OrderStatus::Installed => "installedAt",
        }
    }

    /// Whether `next` is a legal transition from this status.
    #[must_use]
    pub const fn can_advance_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Confirmed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Confirmed, OrderStatus::Dispatched)
                | (OrderStatus::Dispatched, OrderStatus::Delivered)
        )
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "dispatched" => Ok(OrderStatus::Dispatched),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "installed" => Ok(OrderStatus::Installed),
            other => Err(Error::Validation {
                message: format!("unknown order status: {other}"),
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A customer order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// Order id (the collection key)
    pub id: String,
    /// Name of the ordering customer
    pub customer_name: String,
    /// Phone of the ordering customer
    pub customer_phone: String,
    /// Product ordered
    pub product: String,
    /// Order amount
    pub amount: f64,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Expected delivery date; must be set before confirmation
    pub expected_date: Option<String>,
    /// Stamped when the order was confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Stamped when the order was dispatched
    pub dispatched_at: Option<DateTime<Utc>>,
    /// Stamped when the order was delivered
    pub delivered_at: Option<DateTime<Utc>>,
    /// Stamped when the order was cancelled
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Installation form link, synthesized on dispatch
    pub form_link: Option<String>,
    /// When the order was placed
    pub created_at: Option<DateTime<Utc>>,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Order {
    /// Whether a non-empty expected date is set (the confirmation
    /// precondition).
    #[must_use]
    pub fn has_expected_date(&self) -> bool {
        self.expected_date
            .as_deref()
            .is_some_and(|date| !date.trim().is_empty())
    }
}
