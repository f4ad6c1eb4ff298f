use axum::{
	Router, middleware,
	routing::{get, post},
};
use tower_http::trace::TraceLayer;

use concierge_core::middleware::require_auth;

use crate::prelude::*;
use crate::{admin, graphql};

fn init_admin(app: &App) -> Router<App> {
	Router::new()
		.route(
			"/admin/settings",
			get(admin::settings::list_settings).post(admin::settings::submit_settings),
		)
		.route("/admin/permissions/{group}", post(admin::group::post_grant_permission))
		// Layers run bottom up: authenticate first, then check the role
		.route_layer(middleware::from_fn_with_state(app.clone(), admin::perm::require_staff))
		.route_layer(middleware::from_fn_with_state(app.clone(), require_auth))
}

fn init_public() -> Router<App> {
	Router::new()
		.route("/graphql", post(graphql::handler::post_graphql))
		.route("/graphql/schema", get(graphql::handler::get_schema_sdl))
		.route("/health", get(async || "ok\n"))
}

pub fn init(app: App) -> Router {
	Router::new()
		.merge(init_public())
		.merge(init_admin(&app))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
