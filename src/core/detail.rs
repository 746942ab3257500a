//! Detail modal projection and scroll-lock handling.
//!
//! The modal is a pure projection: one record in, a fixed source-specific
//! label/value layout out, no mutation. While a modal is open the background
//! page scroll is locked; the lock is an RAII guard so every close path
//! (close button, backdrop click, selection replaced, modal dropped)
//! releases it.

use crate::entities::{Record, RecordKey};
use chrono::NaiveDate;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A rendered detail layout: a title plus ordered label/value rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Modal title
    pub title: String,
    /// Ordered label/value rows
    pub rows: Vec<(String, String)>,
}

fn row(label: &str, value: impl Into<String>) -> (String, String) {
    (label.to_string(), value.into())
}

/// Projects one record into its fixed, source-specific field layout.
///
/// `today` anchors the derived trainer suspension row.
#[must_use]
pub fn detail_view(record: &Record, today: NaiveDate) -> DetailView {
    match record {
        Record::User(user) => DetailView {
            title: format!("User - {}", user.name),
            rows: vec![
                row("UID", &user.uid),
                row("Email", &user.email),
                row("Phone", &user.phone),
                row("Role", user.role.to_string()),
                row("Level", user.current_level.clone().unwrap_or_default()),
            ],
        },
        Record::Trainer(trainer) => {
            let derived = if trainer.is_suspended(today) {
                "suspended".to_string()
            } else if trainer.active {
                "active".to_string()
            } else {
                "inactive".to_string()
            };
            let mut rows = vec![
                row("ID", &trainer.id),
                row("Email", &trainer.email),
                row("Phone", &trainer.phone),
                row("Status", derived),
            ];
            if let Some(period) = &trainer.suspend_period {
                rows.push(row(
                    "Suspended",
                    format!("{} to {} ({})", period.start, period.end, period.reason),
                ));
            }
            DetailView {
                title: format!("Trainer - {}", trainer.name),
                rows,
            }
        }
        Record::Employee(employee) => DetailView {
            title: format!("Employee - {}", employee.name),
            rows: vec![
                row("ID", &employee.id),
                row("Email", &employee.email),
                row("Phone", &employee.phone),
                row("Designation", &employee.designation),
            ],
        },
        Record::Order(order) => DetailView {
            title: format!("Order - {}", order.id),
            rows: vec![
                row("Customer", &order.customer_name),
                row("Phone", &order.customer_phone),
                row("Product", &order.product),
                row("Amount", format!("{:.2}", order.amount)),
                row("Status", order.status.to_string()),
                row(
                    "Expected date",
                    order.expected_date.clone().unwrap_or_default(),
                ),
                row("Form link", order.form_link.clone().unwrap_or_default()),
            ],
        },
        Record::Product(product) => DetailView {
            title: format!("Product - {}", product.name),
            rows: vec![
                row("ID", &product.id),
                row("Price", format!("{:.2}", product.price)),
                row("Category", &product.category),
                row("Status", if product.active { "active" } else { "inactive" }),
            ],
        },
        Record::Training(training) => DetailView {
            title: format!("Training - {}", training.title),
            rows: vec![
                row("ID", &training.id),
                row("Trainer", &training.trainer_id),
                row(
                    "Date",
                    training.date.map(|d| d.to_rfc3339()).unwrap_or_default(),
                ),
                row("Location", &training.location),
                row("Seats", training.seats.to_string()),
            ],
        },
        Record::Transaction(tx) => DetailView {
            title: format!("Transaction - {}", tx.id),
            rows: vec![
                row("Kind", tx.kind.to_string()),
                row("Amount", format!("{:.2}", tx.amount)),
                row("Seller", &tx.seller_uid),
                row("Commissions", tx.commissions.len().to_string()),
            ],
        },
        Record::Customer(customer) => DetailView {
            title: format!("Customer - {}", customer.name),
            rows: vec![
                row("Phone", &customer.phone),
                row("City", &customer.city),
            ],
        },
    }
}

/// Shared page-scroll state a modal locks while it is open.
///
/// Holds a lock count rather than a flag so that replacing a selection
/// (new lock acquired before the old guard drops) never unlocks scroll
/// underneath the new modal.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    locks: Arc<AtomicUsize>,
}

impl Viewport {
    /// Fresh viewport with scroll unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether background scroll is currently locked.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.locks.load(Ordering::SeqCst) > 0
    }

    fn lock_scroll(&self) -> ScrollLock {
        self.locks.fetch_add(1, Ordering::SeqCst);
        ScrollLock {
            locks: Arc::clone(&self.locks),
        }
    }
}

/// RAII scroll lock: released on drop, whatever the close path was.
#[derive(Debug)]
pub struct ScrollLock {
    locks: Arc<AtomicUsize>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.locks.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Modal selection state: at most one open record, with the scroll lock
/// held exactly while a selection exists.
#[derive(Debug, Default)]
pub struct Selection {
    viewport: Viewport,
    open: Option<(RecordKey, ScrollLock)>,
}

impl Selection {
    /// Selection over a shared viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            open: None,
        }
    }

    /// Opens the modal for a record, replacing any prior selection, and
    /// returns its projected layout.
    pub fn open(&mut self, record: &Record, today: NaiveDate) -> DetailView {
        self.open = Some((record.record_key(), self.viewport.lock_scroll()));
        detail_view(record, today)
    }

    /// Closes the modal and releases the scroll lock.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Identity of the currently open record, if any.
    #[must_use]
    pub fn current(&self) -> Option<&RecordKey> {
        self.open.as_ref().map(|(key, _)| key)
    }
}
