//! Group permission endpoint

use axum::{
	Json,
	extract::{Path, State},
};
use serde::Serialize;

use concierge_core::GrantResult;
use concierge_core::extract::Auth;

use crate::prelude::*;

#[derive(Debug, Serialize)]
pub struct GrantResponse {
	pub result: GrantResult,
}

/// POST /admin/permissions/{group} - Grant the settings change permission
pub async fn post_grant_permission(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(group): Path<String>,
) -> ClResult<Json<GrantResponse>> {
	let result = app.facade.grant_change_permission(&group).await?;
	info!(subject = %auth.subject, group = %group, "Change permission grant: {}", result);

	Ok(Json(GrantResponse { result }))
}

// vim: ts=4
