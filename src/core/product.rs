//! Product catalogue actions.

use crate::core::mutate::Mutator;
use crate::entities::{DataSource, FieldPatch, Record, RecordKey};
use crate::errors::Result;
use crate::store::RemoteStore;
use serde_json::json;

/// Enables or disables a product with a single-field optimistic toggle.
pub async fn set_active<S: RemoteStore>(
    mutator: &Mutator<S>,
    product_id: &str,
    active: bool,
) -> Result<Record> {
    let key = RecordKey::new(DataSource::Products, product_id);
    mutator.apply(&key, FieldPatch::new().set("active", json!(active))).await
}
