//! Adapter that persists setting overrides
//!
//! One row per overridden setting, keyed by name; absence of a row means the
//! declared default applies. Values travel as JSON and are interpreted
//! against the declared type by the settings service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Persisted override row
#[derive(Debug, Clone)]
pub struct SettingRow {
	pub name: Box<str>,
	pub value: serde_json::Value,
	pub updated_at: Timestamp,
}

#[async_trait]
pub trait SettingsAdapter: Debug + Send + Sync {
	/// List every persisted override
	async fn list_settings(&self) -> ClResult<HashMap<String, serde_json::Value>>;

	/// Read a single override, `None` if the setting was never overridden
	async fn read_setting(&self, name: &str) -> ClResult<Option<SettingRow>>;

	/// Insert or replace an override. Single-key atomic, last write wins.
	async fn update_setting(&self, name: &str, value: &serde_json::Value) -> ClResult<()>;
}

// vim: ts=4
