//! Shared test setup
//!
//! The TempDir is returned alongside the app so the database lives until the
//! end of the test.

use std::sync::Arc;
use tempfile::TempDir;

use concierge::AppBuilder;
use concierge::app::App;
use concierge_core::facade::StaticSettings;
use concierge_core::middleware::generate_access_token;
use concierge_settings_adapter_sqlite::SettingsAdapterSqlite;

pub const JWT_SECRET: &str = "routes-test-secret";

pub async fn create_test_app() -> (App, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = Arc::new(
		SettingsAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter"),
	);

	let mut builder = AppBuilder::new();
	builder
		.jwt_secret(JWT_SECRET)
		.static_settings(StaticSettings { payment_stripe_public_key: Some("pk_live_42".into()) })
		.settings_adapter(adapter.clone())
		.auth_adapter(adapter);
	let app = builder.build().await.expect("Failed to build app");

	(app, temp_dir)
}

pub fn staff_bearer() -> String {
	let token = generate_access_token(JWT_SECRET, "ops@whatsmycut.com", &["staff"]).expect("token");
	format!("Bearer {}", token)
}

// vim: ts=4
