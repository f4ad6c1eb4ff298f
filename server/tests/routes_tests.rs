//! End-to-end tests through the full route table

mod common;

use axum::{
	body::Body,
	http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use concierge::AppBuilder;
use concierge::app::App;
use concierge::routes;
use concierge_core::perm::GrantResult;
use concierge_settings_adapter_sqlite::SettingsAdapterSqlite;

async fn send(app: &App, req: Request<Body>) -> (StatusCode, Value) {
	let res = routes::init(app.clone()).oneshot(req).await.expect("response");
	let status = res.status();
	let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
	(status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn graphql(query: &str) -> Request<Body> {
	Request::post("/graphql")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(json!({ "query": query }).to_string()))
		.expect("request")
}

#[tokio::test]
async fn test_site_settings_query() {
	let (app, _temp) = common::create_test_app().await;

	let (status, body) = send(
		&app,
		graphql("{ siteSettings { Feature_recurrent_scheduling_enabled Payment_stripe_public_key } }"),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(
		body["data"]["siteSettings"],
		json!({
			"Feature_recurrent_scheduling_enabled": true,
			"Payment_stripe_public_key": "pk_live_42",
		})
	);
}

#[tokio::test]
async fn test_unknown_field_is_a_query_error() {
	let (app, _temp) = common::create_test_app().await;

	let (status, body) = send(&app, graphql("{ siteSettings { Yardi_api_license_key } }")).await;
	assert_eq!(status, StatusCode::OK);
	assert!(body["errors"].as_array().is_some_and(|errors| !errors.is_empty()), "{}", body);
}

#[tokio::test]
async fn test_admin_edit_shows_in_api() {
	let (app, _temp) = common::create_test_app().await;

	let req = Request::post("/admin/settings")
		.header(header::AUTHORIZATION, common::staff_bearer())
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(
			json!({ "values": { "CONCIERGE_PHONE": "415-555-0123" } }).to_string(),
		))
		.expect("request");
	let (status, _) = send(&app, req).await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = send(&app, graphql("{ siteSettings { Concierge_phone } }")).await;
	assert_eq!(body["data"]["siteSettings"]["Concierge_phone"], "415-555-0123");
}

#[tokio::test]
async fn test_admin_requires_token() {
	let (app, _temp) = common::create_test_app().await;

	let req = Request::get("/admin/settings").body(Body::empty()).expect("request");
	let (status, _) = send(&app, req).await;
	assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_schema_sdl_endpoint() {
	let (app, _temp) = common::create_test_app().await;

	let req = Request::get("/graphql/schema").body(Body::empty()).expect("request");
	let res = routes::init(app.clone()).oneshot(req).await.expect("response");
	assert_eq!(res.status(), StatusCode::OK);
	let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
	let sdl = String::from_utf8_lossy(&body);
	assert!(sdl.contains("Spa_payment_url: String"), "{}", sdl);
}

#[tokio::test]
async fn test_startup_grants_staff_group() {
	let (app, _temp) = common::create_test_app().await;

	let group = app.auth_adapter.find_group("staff").await.expect("find").expect("group created");
	let perms = app.auth_adapter.list_group_permissions(group.group_id).await.expect("list");
	assert_eq!(perms.len(), 1);
	assert_eq!(
		app.facade.grant_change_permission("staff").await.expect("grant"),
		GrantResult::AlreadyGranted
	);
}

#[tokio::test]
async fn test_build_requires_jwt_secret() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = Arc::new(
		SettingsAdapterSqlite::new(temp_dir.path()).await.expect("Failed to create adapter"),
	);

	let mut builder = AppBuilder::new();
	builder.settings_adapter(adapter.clone()).auth_adapter(adapter);
	assert!(builder.build().await.is_err());
}

// vim: ts=4
