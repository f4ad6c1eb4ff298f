//! Core infrastructure for the concierge backend.
//!
//! The dynamic settings registry and service, the public settings facade,
//! permission granting, and the shared application state that the feature
//! crates (GraphQL, admin) are built on.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod catalog;
pub mod extensions;
pub mod extract;
pub mod facade;
pub mod fieldsets;
pub mod middleware;
pub mod perm;
pub mod prelude;
pub mod settings;
pub mod validate;

// Re-export commonly used types
pub use app::{App, AppBuilderOpts, AppState};
pub use extract::{Auth, AuthCtx};
pub use facade::{PublicSettings, SettingsFacade, StaticSettings};
pub use perm::GrantResult;

pub fn register_settings(
	registry: &mut settings::SettingsRegistry,
) -> concierge_types::error::ClResult<()> {
	catalog::register_settings(registry)
}

// vim: ts=4
