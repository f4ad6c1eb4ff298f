//! Dynamic settings subsystem: ordered registry, typed values, caching
//!
//! # Architecture
//!
//! - **Types** (`types.rs`): Core type definitions and registry
//! - **Service** (`service.rs`): SettingsService with caching and validation
//! - **Form** (`form.rs`): Errors collected while cleaning an admin submission
//!
//! Definitions are static and registered once at startup; the registry is
//! then frozen. Only the values are mutable, through the service.

pub mod form;
pub mod service;
pub mod types;

pub use form::FormErrors;
pub use service::{SETTINGS_CACHE_CAPACITY, SETTINGS_CACHE_TTL, SettingsService};
pub use types::{
	FrozenSettingsRegistry, SettingDefinition, SettingDefinitionBuilder, SettingType,
	SettingValue, SettingsRegistry,
};

// vim: ts=4
