//! Typed record definitions for every remote collection.
//!
//! The hosted store hands back schemaless keyed maps; everything downstream
//! of the normalization boundary works with one typed variant per collection.
//! Field defaults and status casing are resolved here, once, rather than
//! scattered across render sites.

pub mod contact;
pub mod order;
pub mod product;
pub mod trainer;
pub mod training;
pub mod transaction;
pub mod user;

pub use contact::{Customer, Employee};
pub use order::{Order, OrderStatus};
pub use product::Product;
pub use trainer::{SuspendPeriod, Trainer};
pub use training::Training;
pub use transaction::{Transaction, TransactionKind};
pub use user::{Permission, Role, User};

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Remote collection a record was normalized from.
///
/// Identity of a record is always the pair (`DataSource`, key); two records
/// from different collections with the same key are distinct entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Console users (company, CA, sub-admin, seller accounts)
    Users,
    /// Trainers running the training programs
    Trainers,
    /// Back-office employees
    Employees,
    /// Product orders placed by customers
    Orders,
    /// Sellable products
    Products,
    /// Scheduled training sessions
    Trainings,
    /// Sales and withdrawal transactions
    Transactions,
    /// End customers
    Customers,
}

impl DataSource {
    /// Every collection the console mirrors, in mirror start-up order.
    pub const ALL: [DataSource; 8] = [
        DataSource::Users,
        DataSource::Trainers,
        DataSource::Employees,
        DataSource::Orders,
        DataSource::Products,
        DataSource::Trainings,
        DataSource::Transactions,
        DataSource::Customers,
    ];

    /// Path segment of the collection in the remote store.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            DataSource::Users => "users",
            DataSource::Trainers => "trainers",
            DataSource::Employees => "employees",
            DataSource::Orders => "orders",
            DataSource::Products => "products",
            DataSource::Trainings => "trainings",
            DataSource::Transactions => "transactions",
            DataSource::Customers => "customers",
        }
    }

    /// Parses a collection name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<DataSource> {
        let lowered = name.to_ascii_lowercase();
        DataSource::ALL
            .into_iter()
            .find(|source| source.path() == lowered)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Identity of a single record: collection plus key within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    /// Collection the record lives in
    pub source: DataSource,
    /// Key within the collection (id, uid, or phone depending on collection)
    pub id: String,
}

impl RecordKey {
    /// Builds a record key from a source and any stringy id.
    pub fn new(source: DataSource, id: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.id)
    }
}

/// A partial field map sent to (and merged into) the remote store.
///
/// Patches carry exactly the fields a mutation computed, never the whole
/// record, so concurrent remote writes to other fields are not clobbered.
/// A `null` value removes the field, matching the store's merge semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPatch {
    /// Field name → new value (`null` removes)
    pub fields: Map<String, Value>,
}

impl FieldPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or overwrites) a field, builder-style.
    #[must_use]
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.fields.insert(field.to_string(), value);
        self
    }

    /// True when the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Merges `patch` into `base` with the store's semantics: objects merge
/// recursively, `null` removes the key, anything else replaces.
pub fn deep_merge(base: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, incoming) in patch {
        match incoming {
            Value::Null => {
                base.remove(key);
            }
            Value::Object(incoming_map) => {
                if let Some(Value::Object(existing)) = base.get_mut(key) {
                    deep_merge(existing, incoming_map);
                } else {
                    base.insert(key.clone(), Value::Object(incoming_map.clone()));
                }
            }
            other => {
                base.insert(key.clone(), other.clone());
            }
        }
    }
}

/// A single keyed entity from any mirrored collection.
///
/// Deliberately serialize-only: inbound construction always goes through
/// [`Record::from_raw`], where the collection decides the variant. The
/// variants are too structurally alike for untagged deserialization to pick
/// between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// A console user account
    User(User),
    /// A trainer
    Trainer(Trainer),
    /// A back-office employee
    Employee(Employee),
    /// A customer order
    Order(Order),
    /// A sellable product
    Product(Product),
    /// A scheduled training session
    Training(Training),
    /// A sale or withdrawal transaction
    Transaction(Transaction),
    /// An end customer
    Customer(Customer),
}

impl Record {
    /// Deserializes one raw store entry into its typed variant, stamping the
    /// entry key as the record identity (the key always wins over any id
    /// field embedded in the value).
    pub fn from_raw(source: DataSource, key: &str, value: &Value) -> Result<Record> {
        let record = match source {
            DataSource::Users => {
                let mut user: User = serde_json::from_value(value.clone())?;
                user.uid = key.to_string();
                Record::User(user)
            }
            DataSource::Trainers => {
                let mut trainer: Trainer = serde_json::from_value(value.clone())?;
                trainer.id = key.to_string();
                Record::Trainer(trainer)
            }
            DataSource::Employees => {
                let mut employee: Employee = serde_json::from_value(value.clone())?;
                employee.id = key.to_string();
                Record::Employee(employee)
            }
            DataSource::Orders => {
                let mut order: Order = serde_json::from_value(value.clone())?;
                order.id = key.to_string();
                Record::Order(order)
            }
            DataSource::Products => {
                let mut product: Product = serde_json::from_value(value.clone())?;
                product.id = key.to_string();
                Record::Product(product)
            }
            DataSource::Trainings => {
                let mut training: Training = serde_json::from_value(value.clone())?;
                training.id = key.to_string();
                Record::Training(training)
            }
            DataSource::Transactions => {
                let mut transaction: Transaction = serde_json::from_value(value.clone())?;
                transaction.id = key.to_string();
                Record::Transaction(transaction)
            }
            DataSource::Customers => {
                let mut customer: Customer = serde_json::from_value(value.clone())?;
                customer.id = key.to_string();
                Record::Customer(customer)
            }
        };
        Ok(record)
    }

    /// The collection this record was normalized from.
    #[must_use]
    pub const fn source(&self) -> DataSource {
        match self {
            Record::User(_) => DataSource::Users,
            Record::Trainer(_) => DataSource::Trainers,
            Record::Employee(_) => DataSource::Employees,
            Record::Order(_) => DataSource::Orders,
            Record::Product(_) => DataSource::Products,
            Record::Training(_) => DataSource::Trainings,
            Record::Transaction(_) => DataSource::Transactions,
            Record::Customer(_) => DataSource::Customers,
        }
    }

    /// The record's key within its collection.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Record::User(user) => &user.uid,
            Record::Trainer(trainer) => &trainer.id,
            Record::Employee(employee) => &employee.id,
            Record::Order(order) => &order.id,
            Record::Product(product) => &product.id,
            Record::Training(training) => &training.id,
            Record::Transaction(transaction) => &transaction.id,
            Record::Customer(customer) => &customer.id,
        }
    }

    /// Full identity of this record.
    #[must_use]
    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(self.source(), self.key())
    }

    /// Display name used in search and listings.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Record::User(user) => Some(&user.name),
            Record::Trainer(trainer) => Some(&trainer.name),
            Record::Employee(employee) => Some(&employee.name),
            Record::Order(order) => Some(&order.customer_name),
            Record::Product(product) => Some(&product.name),
            Record::Training(training) => Some(&training.title),
            Record::Transaction(_) => None,
            Record::Customer(customer) => Some(&customer.name),
        }
    }

    /// Email, where the collection carries one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Record::User(user) => Some(&user.email),
            Record::Trainer(trainer) => Some(&trainer.email),
            Record::Employee(employee) => Some(&employee.email),
            _ => None,
        }
    }

    /// Phone number, where the collection carries one.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        match self {
            Record::User(user) => Some(&user.phone),
            Record::Trainer(trainer) => Some(&trainer.phone),
            Record::Employee(employee) => Some(&employee.phone),
            Record::Order(order) => Some(&order.customer_phone),
            Record::Customer(customer) => Some(&customer.phone),
            _ => None,
        }
    }

    /// Canonical status text used by the status filter, already lowercase.
    ///
    /// Orders report their lifecycle status, products and trainers their
    /// active flag, users their role, transactions their kind. Collections
    /// without a status report `None` and only pass an `"all"` filter.
    #[must_use]
    pub fn status_text(&self) -> Option<String> {
        match self {
            Record::Order(order) => Some(order.status.to_string()),
            Record::Product(product) => Some(active_text(product.active)),
            Record::Trainer(trainer) => Some(active_text(trainer.active)),
            Record::User(user) => Some(user.role.to_string()),
            Record::Transaction(transaction) => Some(transaction.kind.to_string()),
            _ => None,
        }
    }

    /// Seller level of a user record (e.g. "silver"), lowercased for the
    /// status filter. Only user records carry one.
    #[must_use]
    pub fn level_text(&self) -> Option<String> {
        match self {
            Record::User(user) => user
                .current_level
                .as_ref()
                .map(|level| level.to_lowercase()),
            _ => None,
        }
    }

    /// The designated date field the date-range filter compares against.
    #[must_use]
    pub fn date_field(&self) -> Option<DateTime<Utc>> {
        match self {
            Record::User(user) => user.created_at,
            Record::Trainer(trainer) => trainer.created_at,
            Record::Employee(employee) => employee.created_at,
            Record::Order(order) => order.created_at,
            Record::Training(training) => training.date,
            Record::Transaction(transaction) => transaction.date,
            Record::Customer(customer) => customer.created_at,
            Record::Product(_) => None,
        }
    }

    /// Monetary amount, where one exists (order amount, product price,
    /// transaction amount).
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        match self {
            Record::Order(order) => Some(order.amount),
            Record::Product(product) => Some(product.price),
            Record::Transaction(transaction) => Some(transaction.amount),
            _ => None,
        }
    }

    /// Serializes the record back to its wire shape (camelCase field map).
    pub fn to_wire(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Validation {
                message: format!("record serialized to non-object value: {other}"),
            }),
        }
    }

    /// Returns a copy of this record with `patch` deep-merged in, re-run
    /// through the normalization boundary so defaults and casing stay
    /// canonical.
    pub fn merged(&self, patch: &FieldPatch) -> Result<Record> {
        let mut wire = self.to_wire()?;
        deep_merge(&mut wire, &patch.fields);
        Record::from_raw(self.source(), self.key(), &Value::Object(wire))
    }
}

/// Turns a raw keyed map from the remote store into an ordered list of typed
/// records. An absent map yields an empty list, never an error. Entries that
/// are not objects or fail to deserialize are skipped with a warning rather
/// than poisoning the whole snapshot.
#[must_use]
pub fn normalize_collection(
    source: DataSource,
    raw: Option<&Map<String, Value>>,
) -> Vec<Record> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        if !value.is_object() {
            warn!("skipping non-object entry {}/{}", source, key);
            continue;
        }
        match Record::from_raw(source, key, value) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping malformed entry {}/{}: {}", source, key, e),
        }
    }
    records
}

fn active_text(active: bool) -> String {
    if active { "active" } else { "inactive" }.to_string()
}
