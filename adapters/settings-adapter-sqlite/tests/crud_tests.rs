//! Settings adapter CRUD tests
//!
//! Setting override rows, groups and group permissions on a temporary
//! database file.

use concierge::auth_adapter::AuthAdapter;
use concierge::settings_adapter::SettingsAdapter;
use concierge_settings_adapter_sqlite::{DB_FILE, SettingsAdapterSqlite};
use serde_json::json;
use tempfile::TempDir;

async fn create_test_adapter() -> (SettingsAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = SettingsAdapterSqlite::new(temp_dir.path())
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

#[tokio::test]
async fn test_creates_database_file() {
	let (_adapter, temp) = create_test_adapter().await;
	assert!(temp.path().join(DB_FILE).exists());
}

#[tokio::test]
async fn test_missing_setting_reads_none() {
	let (adapter, _temp) = create_test_adapter().await;

	let row = adapter.read_setting("CONCIERGE_EMAIL").await.expect("Should read");
	assert!(row.is_none());
	assert!(adapter.list_settings().await.expect("Should list").is_empty());
}

#[tokio::test]
async fn test_update_and_read_setting() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter
		.update_setting("HOURS_PAY_BEFORE_APPOINTMENT", &json!(48))
		.await
		.expect("Should write");

	let row = adapter
		.read_setting("HOURS_PAY_BEFORE_APPOINTMENT")
		.await
		.expect("Should read")
		.expect("Row should exist");
	assert_eq!(row.name.as_ref(), "HOURS_PAY_BEFORE_APPOINTMENT");
	assert_eq!(row.value, json!(48));
	assert!(row.updated_at.0 > 0);
}

#[tokio::test]
async fn test_update_replaces_value() {
	let (adapter, _temp) = create_test_adapter().await;

	adapter.update_setting("CONCIERGE_PHONE", &json!("415-000-0000")).await.expect("write");
	adapter.update_setting("CONCIERGE_PHONE", &json!("415-111-1111")).await.expect("write");

	let all = adapter.list_settings().await.expect("Should list");
	assert_eq!(all.len(), 1);
	assert_eq!(all.get("CONCIERGE_PHONE"), Some(&json!("415-111-1111")));
}

#[tokio::test]
async fn test_settings_survive_reopen() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	{
		let adapter = SettingsAdapterSqlite::new(temp_dir.path()).await.expect("open");
		adapter.update_setting("FEATURE_GYM_ENABLED", &json!(true)).await.expect("write");
	}

	let adapter = SettingsAdapterSqlite::new(temp_dir.path()).await.expect("reopen");
	let all = adapter.list_settings().await.expect("Should list");
	assert_eq!(all.get("FEATURE_GYM_ENABLED"), Some(&json!(true)));
}

#[tokio::test]
async fn test_group_lookup_is_case_insensitive() {
	let (adapter, _temp) = create_test_adapter().await;

	assert!(adapter.find_group("staff").await.expect("find").is_none());

	let created = adapter.create_group("Staff").await.expect("Should create group");
	let found = adapter.find_group("STAFF").await.expect("find").expect("Group should exist");
	assert_eq!(found.group_id, created.group_id);
	assert_eq!(found.name.as_ref(), "Staff");

	let again = adapter.create_group("staff").await.expect("Should return existing group");
	assert_eq!(again.group_id, created.group_id);
}

#[tokio::test]
async fn test_change_permission_is_seeded() {
	let (adapter, _temp) = create_test_adapter().await;

	let perm = adapter
		.find_permission("settings", "change_config")
		.await
		.expect("find")
		.expect("Permission should be seeded");
	assert_eq!(perm.codename.as_ref(), "change_config");
	assert!(adapter.find_permission("settings", "delete_config").await.expect("find").is_none());
}

#[tokio::test]
async fn test_group_permissions() {
	let (adapter, _temp) = create_test_adapter().await;

	let group = adapter.create_group("staff").await.expect("create");
	let perm = adapter
		.find_permission("settings", "change_config")
		.await
		.expect("find")
		.expect("seeded");

	assert!(adapter.list_group_permissions(group.group_id).await.expect("list").is_empty());

	adapter.add_group_permission(group.group_id, perm.perm_id).await.expect("add");
	adapter.add_group_permission(group.group_id, perm.perm_id).await.expect("add twice");

	let perms = adapter.list_group_permissions(group.group_id).await.expect("list");
	assert_eq!(perms.len(), 1);
	assert_eq!(perms[0].perm_id, perm.perm_id);
}

// vim: ts=4
