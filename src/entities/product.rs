//! Sellable product records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product that sellers can place orders for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    /// Product id (the collection key)
    pub id: String,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Whether the product is currently orderable
    pub active: bool,
    /// Catalogue category
    pub category: String,
    /// Fields this console does not model, preserved for round-tripping
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            price: 0.0,
            // New products are orderable until explicitly disabled.
            active: true,
            category: String::new(),
            extra: serde_json::Map::new(),
        }
    }
}
