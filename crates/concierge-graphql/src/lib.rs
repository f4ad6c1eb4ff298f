//! GraphQL projection of the public settings
//!
//! The schema is built once at startup from the merged public settings: one
//! field per exposed name, typed after the declared setting type. Unexposed
//! names have no field, so asking for one fails query validation.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod handler;
pub mod schema;

mod prelude;

pub use schema::{SettingsSchema, build_schema, build_settings_schema, project_field_name};

// vim: ts=4
