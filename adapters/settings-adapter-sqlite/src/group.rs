//! Groups and group permissions

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use concierge::auth_adapter::{Group, Permission};
use concierge::prelude::*;
use concierge::types::{GroupId, PermId};

fn to_group(row: &SqliteRow) -> Result<Group, sqlx::Error> {
	Ok(Group {
		group_id: GroupId(row.try_get("group_id")?),
		name: row.try_get::<String, _>("name")?.into(),
	})
}

fn to_permission(row: &SqliteRow) -> Result<Permission, sqlx::Error> {
	Ok(Permission {
		perm_id: PermId(row.try_get("perm_id")?),
		app_label: row.try_get::<String, _>("app_label")?.into(),
		codename: row.try_get::<String, _>("codename")?.into(),
		name: row.try_get::<String, _>("name")?.into(),
	})
}

pub(crate) async fn find(db: &SqlitePool, name: &str) -> ClResult<Option<Group>> {
	let row = sqlx::query("SELECT group_id, name FROM groups WHERE name = ? COLLATE NOCASE")
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	row.as_ref()
		.map(to_group)
		.transpose()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

/// Create a group; an existing group of the same name is returned as is
pub(crate) async fn create(db: &SqlitePool, name: &str) -> ClResult<Group> {
	sqlx::query("INSERT INTO groups (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
		.bind(name)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	find(db, name).await?.ok_or(Error::DbError)
}

pub(crate) async fn find_permission(
	db: &SqlitePool,
	app_label: &str,
	codename: &str,
) -> ClResult<Option<Permission>> {
	let row = sqlx::query(
		"SELECT perm_id, app_label, codename, name FROM permissions
		WHERE app_label = ? AND codename = ?",
	)
	.bind(app_label)
	.bind(codename)
	.fetch_optional(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	row.as_ref()
		.map(to_permission)
		.transpose()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

pub(crate) async fn list_permissions(
	db: &SqlitePool,
	group_id: GroupId,
) -> ClResult<Vec<Permission>> {
	let rows = sqlx::query(
		"SELECT p.perm_id, p.app_label, p.codename, p.name
		FROM group_permissions gp
		JOIN permissions p ON p.perm_id = gp.perm_id
		WHERE gp.group_id = ?
		ORDER BY p.perm_id",
	)
	.bind(group_id.0)
	.fetch_all(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	rows.iter()
		.map(to_permission)
		.collect::<Result<Vec<_>, _>>()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

pub(crate) async fn add_permission(
	db: &SqlitePool,
	group_id: GroupId,
	perm_id: PermId,
) -> ClResult<()> {
	sqlx::query("INSERT OR IGNORE INTO group_permissions (group_id, perm_id) VALUES (?, ?)")
		.bind(group_id.0)
		.bind(perm_id.0)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(())
}

// vim: ts=4
