//! Concierge services backend.
//!
//! # Features
//!
//! - Dynamic settings
//!		- ordered catalog of typed values with static defaults
//!		- persisted overrides, cached per process
//!		- edit screen grouped into field groups, validated field by field
//! - Public settings
//!		- allow-listed subset merged with environment-derived values
//!		- served as the `siteSettings` GraphQL query
//! - Staff access through bearer tokens

#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from concierge-types
pub use concierge_types::auth_adapter;
pub use concierge_types::error;
pub use concierge_types::settings_adapter;
pub use concierge_types::types;

// Feature crate re-exports
pub use concierge_admin as admin;
pub use concierge_core::settings;
pub use concierge_graphql as graphql;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;
pub mod webserver;

pub use crate::app::{App, AppBuilder};

// vim: ts=4
