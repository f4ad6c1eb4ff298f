//! SQLite storage for the concierge backend
//!
//! Implements both [`SettingsAdapter`] (setting overrides) and
//! [`AuthAdapter`] (groups and permissions) on one database file.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::{collections::HashMap, path::Path};

use concierge::auth_adapter::{AuthAdapter, Group, Permission};
use concierge::prelude::*;
use concierge::settings_adapter::{SettingRow, SettingsAdapter};
use concierge::types::{GroupId, PermId};

mod group;
mod schema;
mod setting;

/// Database file created inside the configured directory
pub const DB_FILE: &str = "settings.db";

#[derive(Debug)]
pub struct SettingsAdapterSqlite {
	db: SqlitePool,
}

impl SettingsAdapterSqlite {
	/// Open (or create) `settings.db` inside `db_dir`
	pub async fn new(db_dir: impl AsRef<Path>) -> ClResult<Self> {
		let db_dir = db_dir.as_ref();
		tokio::fs::create_dir_all(db_dir).await?;

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(db_dir.join(DB_FILE))
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DbError: {:#?}", err))
			.map_err(|_| Error::DbError)?;

		info!("Opened settings database in {}", db_dir.display());
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsAdapter for SettingsAdapterSqlite {
	async fn list_settings(&self) -> ClResult<HashMap<String, serde_json::Value>> {
		setting::list(&self.db).await
	}

	async fn read_setting(&self, name: &str) -> ClResult<Option<SettingRow>> {
		setting::read(&self.db, name).await
	}

	async fn update_setting(&self, name: &str, value: &serde_json::Value) -> ClResult<()> {
		setting::update(&self.db, name, value).await
	}
}

#[async_trait]
impl AuthAdapter for SettingsAdapterSqlite {
	async fn find_group(&self, name: &str) -> ClResult<Option<Group>> {
		group::find(&self.db, name).await
	}

	async fn create_group(&self, name: &str) -> ClResult<Group> {
		group::create(&self.db, name).await
	}

	async fn find_permission(
		&self,
		app_label: &str,
		codename: &str,
	) -> ClResult<Option<Permission>> {
		group::find_permission(&self.db, app_label, codename).await
	}

	async fn list_group_permissions(&self, group_id: GroupId) -> ClResult<Vec<Permission>> {
		group::list_permissions(&self.db, group_id).await
	}

	async fn add_group_permission(&self, group_id: GroupId, perm_id: PermId) -> ClResult<()> {
		group::add_permission(&self.db, group_id, perm_id).await
	}
}

// vim: ts=4
