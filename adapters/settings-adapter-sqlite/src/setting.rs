//! Setting override rows
//!
//! Values are stored as JSON text, one row per overridden name.

use std::collections::HashMap;

use sqlx::{Row, SqlitePool};

use concierge::prelude::*;
use concierge::settings_adapter::SettingRow;

fn parse_value(name: &str, value: Option<String>) -> serde_json::Value {
	value
		.and_then(|v| {
			serde_json::from_str(&v)
				.inspect_err(|err| warn!("Setting '{}' holds invalid JSON: {}", name, err))
				.ok()
		})
		.unwrap_or(serde_json::Value::Null)
}

/// List all persisted settings
pub(crate) async fn list(db: &SqlitePool) -> ClResult<HashMap<String, serde_json::Value>> {
	let rows = sqlx::query("SELECT name, value FROM settings")
		.fetch_all(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let mut settings = HashMap::new();
	for row in rows {
		let name: String = row.try_get("name").map_err(|_| Error::DbError)?;
		let value: Option<String> = row.try_get("value").map_err(|_| Error::DbError)?;
		let value = parse_value(&name, value);
		settings.insert(name, value);
	}

	Ok(settings)
}

/// Read a single setting by name
pub(crate) async fn read(db: &SqlitePool, name: &str) -> ClResult<Option<SettingRow>> {
	let row = sqlx::query("SELECT name, value, updated_at FROM settings WHERE name = ?")
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	let Some(row) = row else {
		return Ok(None);
	};
	let value: Option<String> = row.try_get("value").map_err(|_| Error::DbError)?;
	let updated_at: i64 = row.try_get("updated_at").map_err(|_| Error::DbError)?;

	Ok(Some(SettingRow {
		name: name.into(),
		value: parse_value(name, value),
		updated_at: Timestamp(updated_at),
	}))
}

/// Insert or replace a setting
pub(crate) async fn update(db: &SqlitePool, name: &str, value: &serde_json::Value) -> ClResult<()> {
	sqlx::query(
		"INSERT INTO settings (name, value, updated_at) VALUES (?, ?, unixepoch())
		ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
	)
	.bind(name)
	.bind(value.to_string())
	.execute(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	Ok(())
}

// vim: ts=4
