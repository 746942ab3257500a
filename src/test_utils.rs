//! Shared test utilities for `SalesDesk`.
//!
//! Builders for sample records, pre-seeded mutators over the in-memory
//! store, and a scripted SMS transport. Every integration-style test goes
//! through these so fixtures stay consistent.

use crate::auth::Identity;
use crate::core::mutate::Mutator;
use crate::entities::{DataSource, Record, Role, User};
use crate::errors::{Error, Result};
use crate::notify::SmsTransport;
use crate::store::{MemoryStore, RemoteStore, new_shared_mirror};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Raw wire value for one order with the given status.
#[must_use]
pub fn sample_order_value(status: &str) -> Value {
    json!({
        "customerName": "Asha Patel",
        "customerPhone": "9876501234",
        "product": "RO Unit",
        "amount": 8999.0,
        "status": status,
        "createdAt": "2026-08-20T09:00:00Z",
    })
}

/// Raw keyed map of orders, one entry per `(key, status)` pair.
#[must_use]
pub fn raw_orders(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(key, status)| ((*key).to_string(), sample_order_value(status)))
        .collect()
}

/// Normalized order record with the given key and status.
#[must_use]
pub fn order_record(key: &str, status: &str) -> Record {
    Record::from_raw(DataSource::Orders, key, &sample_order_value(status))
        .expect("sample order value must normalize")
}

/// Normalized pending order whose designated date field is `created_at`.
#[must_use]
pub fn order_record_at(key: &str, created_at: DateTime<Utc>) -> Record {
    let mut record = order_record(key, "pending");
    if let Record::Order(order) = &mut record {
        order.created_at = Some(created_at);
    }
    record
}

/// Normalized trainer record with contact fields.
#[must_use]
pub fn trainer_record(key: &str, name: &str, email: &str, phone: &str) -> Record {
    Record::from_raw(
        DataSource::Trainers,
        key,
        &json!({ "name": name, "email": email, "phone": phone, "active": true }),
    )
    .expect("sample trainer value must normalize")
}

/// Normalized sale transaction with commission entries.
#[must_use]
pub fn sale_record(key: &str, amount: f64, commissions: &[(&str, f64)]) -> Record {
    let commission_map: Map<String, Value> = commissions
        .iter()
        .map(|(uid, value)| ((*uid).to_string(), json!(value)))
        .collect();
    Record::from_raw(
        DataSource::Transactions,
        key,
        &json!({ "kind": "sale", "amount": amount, "commissions": commission_map }),
    )
    .expect("sample sale value must normalize")
}

/// Normalized withdrawal transaction.
#[must_use]
pub fn withdrawal_record(key: &str, amount: f64) -> Record {
    Record::from_raw(
        DataSource::Transactions,
        key,
        &json!({ "kind": "withdrawal", "amount": amount }),
    )
    .expect("sample withdrawal value must normalize")
}

/// Company-role acting user for permission-gated tests.
#[must_use]
pub fn company_user() -> User {
    User {
        uid: "company".to_string(),
        name: "Head Office".to_string(),
        role: Role::Company,
        ..User::default()
    }
}

/// Company identity for auth tests.
#[must_use]
pub fn company_identity() -> Identity {
    Identity {
        uid: "company".to_string(),
        role: Role::Company,
    }
}

/// Builds a mutator whose mirror holds the current snapshot of `source`
/// from the given store.
pub async fn mutator_over(
    store: Arc<MemoryStore>,
    source: DataSource,
) -> (Mutator<MemoryStore>, Arc<MemoryStore>) {
    let mirror = new_shared_mirror();
    let mut rx = store.subscribe(source).await;
    let initial = rx.recv().await.expect("initial snapshot is always sent");
    mirror.write().await.apply_snapshot(&initial);
    (Mutator::new(mirror, Arc::clone(&store)), store)
}

/// Mutator over a store seeded with one trainer `t1` in the given initial
/// activation state.
pub async fn seeded_trainer_mutator(active: bool) -> (Mutator<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store
        .seed(
            DataSource::Trainers,
            json!({
                "t1": {
                    "name": "Ravi Kumar",
                    "email": "ravi@example.com",
                    "phone": "9876543210",
                    "active": active,
                },
            }),
        )
        .await;
    mutator_over(store, DataSource::Trainers).await
}

/// Mutator over a store seeded with one order `o1` in the given status,
/// optionally with an expected date.
pub async fn seeded_order_mutator(
    status: &str,
    expected_date: Option<&str>,
) -> (Mutator<MemoryStore>, Arc<MemoryStore>) {
    let mut value = sample_order_value(status);
    if let (Some(date), Value::Object(map)) = (expected_date, &mut value) {
        map.insert("expectedDate".to_string(), json!(date));
    }
    let store = Arc::new(MemoryStore::new());
    store.seed(DataSource::Orders, json!({ "o1": value })).await;
    mutator_over(store, DataSource::Orders).await
}

/// Mutator over a store seeded with a sub-admin `sub1` (holding
/// `exportReports`) and a seller `seller1`.
pub async fn seeded_user_mutator() -> (Mutator<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    store
        .seed(
            DataSource::Users,
            json!({
                "sub1": {
                    "name": "Sub Admin",
                    "role": "subadmin",
                    "permissions": { "exportReports": true },
                },
                "seller1": {
                    "name": "Seller One",
                    "role": "seller",
                },
            }),
        )
        .await;
    mutator_over(store, DataSource::Users).await
}

/// SMS transport that replays a scripted list of responses in order.
/// An unscripted call fails, which keeps tests honest about how many
/// requests they expect.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<std::result::Result<String, String>>>,
}

impl ScriptedTransport {
    /// Transport that answers with the given bodies (or transport errors)
    /// in order.
    #[must_use]
    pub fn with_bodies(bodies: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(bodies.into()),
        }
    }

    /// Scripted responses not yet consumed by a request.
    pub async fn remaining(&self) -> usize {
        self.responses.lock().await.len()
    }
}

#[async_trait]
impl SmsTransport for ScriptedTransport {
    async fn fetch(&self, _url: reqwest::Url) -> Result<String> {
        let next = self.responses.lock().await.pop_front();
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(Error::Gateway { message }),
            None => Err(Error::Gateway {
                message: "no scripted response left".to_string(),
            }),
        }
    }
}
