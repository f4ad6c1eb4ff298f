//! Shared types, adapter traits, and core utilities for the concierge backend.
//!
//! This crate contains the foundational types that are shared between the
//! server crate and all adapter implementations. Keeping them separate lets
//! adapter crates compile without pulling in the feature crates.

pub mod auth_adapter;
pub mod error;
pub mod prelude;
pub mod settings_adapter;
pub mod types;

// vim: ts=4
