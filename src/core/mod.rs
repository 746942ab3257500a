//! Framework-agnostic console business logic.
//!
//! Everything in here is independent of any rendering surface: the
//! optimistic mutator, the table query engine, the per-collection domain
//! actions built on top of them, aggregation folds, CSV reporting, and the
//! detail-modal projection.

/// Detail modal projection and scroll-lock handling
pub mod detail;
/// Optimistic mutation with rollback
pub mod mutate;
/// Order lifecycle actions
pub mod order;
/// Product catalogue actions
pub mod product;
/// Filter/sort/paginate engine
pub mod query;
/// CSV export and dashboard reporting
pub mod report;
/// Sales and commission aggregation folds
pub mod sales;
/// Sub-admin permission management and gating
pub mod subadmin;
/// Trainer activation and suspension actions
pub mod trainer;
