//! Database schema initialization
//!
//! Tables are created if missing. The permission record the settings module
//! relies on is seeded here; groups are created at runtime.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Settings
	//**********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		name text NOT NULL,
		value json,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Groups and permissions
	//************************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS groups (
		group_id integer PRIMARY KEY AUTOINCREMENT,
		name text NOT NULL UNIQUE COLLATE NOCASE
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS permissions (
		perm_id integer PRIMARY KEY AUTOINCREMENT,
		app_label text NOT NULL,
		codename text NOT NULL,
		name text NOT NULL,
		UNIQUE(app_label, codename)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS group_permissions (
		group_id integer NOT NULL REFERENCES groups(group_id),
		perm_id integer NOT NULL REFERENCES permissions(perm_id),
		PRIMARY KEY(group_id, perm_id)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"INSERT OR IGNORE INTO permissions (app_label, codename, name)
		VALUES ('settings', 'change_config', 'Can change config')",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
