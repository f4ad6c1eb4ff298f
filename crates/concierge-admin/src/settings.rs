//! Settings edit screen

use axum::{
	Json,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use concierge_core::extract::Auth;
use concierge_core::fieldsets::grouped_definitions;
use concierge_core::settings::{FormErrors, SettingType, SettingValue};

use crate::prelude::*;

#[derive(Debug, Serialize)]
pub struct SettingRowResponse {
	pub name: String,
	pub description: String,
	#[serde(rename = "type")]
	pub typ: SettingType,
	pub default: SettingValue,
	pub value: SettingValue,
	/// Current value differs from the default
	pub modified: bool,
}

#[derive(Debug, Serialize)]
pub struct SettingGroupResponse {
	pub title: &'static str,
	pub settings: Vec<SettingRowResponse>,
}

#[derive(Debug, Serialize)]
pub struct SettingsListResponse {
	pub groups: Vec<SettingGroupResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSettingsRequest {
	pub values: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct FormErrorsResponse {
	pub errors: FormErrors,
}

/// Current values of every setting, by field group
pub async fn grouped_settings(app: &App) -> SettingsListResponse {
	let mut groups = Vec::new();
	for (title, defs) in grouped_definitions(&app.settings_registry) {
		let mut settings = Vec::with_capacity(defs.len());
		for def in defs {
			let value = app.settings.get(&def.key).await;
			settings.push(SettingRowResponse {
				name: def.key.clone(),
				description: def.description.clone(),
				typ: def.typ,
				modified: value != def.default,
				default: def.default.clone(),
				value,
			});
		}
		groups.push(SettingGroupResponse { title, settings });
	}
	SettingsListResponse { groups }
}

/// GET /admin/settings
pub async fn list_settings(
	State(app): State<App>,
	Auth(_auth): Auth,
) -> ClResult<Json<SettingsListResponse>> {
	Ok(Json(grouped_settings(&app).await))
}

/// POST /admin/settings
///
/// Nothing is saved unless every submitted field is valid.
pub async fn submit_settings(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<SubmitSettingsRequest>,
) -> ClResult<Response> {
	let values = match app.settings.clean_form(&req.values) {
		Ok(values) => values,
		Err(errors) => {
			info!(subject = %auth.subject, "Settings form rejected: {}", errors);
			return Ok(
				(StatusCode::UNPROCESSABLE_ENTITY, Json(FormErrorsResponse { errors }))
					.into_response(),
			);
		}
	};

	let count = app.settings.set_many(values).await?;
	info!(subject = %auth.subject, "Updated {} settings", count);

	Ok(Json(grouped_settings(&app).await).into_response())
}

// vim: ts=4
