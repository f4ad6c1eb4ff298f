//! GraphQL HTTP handlers

use axum::{Json, extract::State};

use crate::prelude::*;
use crate::schema::SettingsSchema;

/// POST /graphql
///
/// Query errors travel in the response body; they are client errors and are
/// not logged.
pub async fn post_graphql(
	State(app): State<App>,
	Json(req): Json<async_graphql::Request>,
) -> ClResult<Json<async_graphql::Response>> {
	let schema = app.ext::<SettingsSchema>()?;
	Ok(Json(schema.0.execute(req).await))
}

/// GET /graphql/schema
pub async fn get_schema_sdl(State(app): State<App>) -> ClResult<String> {
	let schema = app.ext::<SettingsSchema>()?;
	Ok(schema.0.sdl())
}

// vim: ts=4
