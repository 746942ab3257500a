//! `SalesDesk` - multi-role administrative console core
//!
//! This crate provides the reusable core of a sales-and-training back-office
//! console: typed record normalization over a hosted realtime document
//! store, a keyed-map live mirror, optimistic mutation with rollback,
//! table filtering/sorting/pagination, commission aggregation, CSV export,
//! and the SMS notification side-channel.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_types_passed_by_value,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,

    // Style consistency
    clippy::enum_glob_use,
    clippy::must_use_candidate,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Authentication boundary - current identity and sign-out
pub mod auth;
/// Configuration management for console and gateway settings
pub mod config;
/// Core business logic - mutation, querying, reporting, detail projection
pub mod core;
/// Typed record definitions per remote collection
pub mod entities;
/// Unified error types and result handling
pub mod errors;
/// SMS notification side-channel
pub mod notify;
/// Remote store boundary, in-memory store and the live mirror
pub mod store;

#[cfg(test)]
pub mod test_utils;
