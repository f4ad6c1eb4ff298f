//! Dynamic schema construction

use async_graphql::dynamic::{
	Field, FieldFuture, FieldValue, Object, ResolverContext, Scalar, Schema, TypeRef,
};
use async_graphql::{Number, Value};
use std::collections::HashSet;
use std::sync::Arc;

use concierge_core::facade::{PublicSettings, SettingsFacade};
use concierge_core::settings::{SettingType, SettingValue};

use crate::prelude::*;

pub const QUERY_TYPE: &str = "Query";
pub const SETTINGS_TYPE: &str = "DynamicSettingsType";
pub const DATE_TIME: &str = "DateTime";

/// Built schema, stored in the app extensions
#[derive(Clone)]
pub struct SettingsSchema(pub Schema);

/// API field name of a setting: lowercased, first letter capitalized
///
/// `FEATURE_CLEANING_ENABLED` becomes `Feature_cleaning_enabled`.
pub fn project_field_name(name: &str) -> String {
	let lower = name.to_lowercase();
	let mut chars = lower.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

fn graphql_type(typ: SettingType) -> Option<&'static str> {
	match typ {
		SettingType::Str => Some(TypeRef::STRING),
		SettingType::Int => Some(TypeRef::INT),
		SettingType::Float => Some(TypeRef::FLOAT),
		SettingType::Bool => Some(TypeRef::BOOLEAN),
		SettingType::Time => Some(DATE_TIME),
		SettingType::Json => None,
	}
}

fn to_graphql_value(value: &SettingValue) -> Value {
	match value {
		SettingValue::Bool(b) => Value::Boolean(*b),
		SettingValue::Int(i) => Value::Number(Number::from(*i)),
		SettingValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
		SettingValue::String(s) => Value::String(s.clone()),
		SettingValue::Time(t) => Value::String(t.format("%H:%M:%S").to_string()),
		SettingValue::Json(_) => Value::Null,
	}
}

fn setting_field(key: String, field_name: &str, type_name: &str) -> Field {
	Field::new(field_name, TypeRef::named(type_name), move |ctx: ResolverContext| {
		let key = key.clone();
		FieldFuture::new(async move {
			let settings = ctx.parent_value.try_downcast_ref::<PublicSettings>()?;
			let value = settings.get(&key).and_then(Option::as_ref).map(to_graphql_value);
			Ok(value.map(FieldValue::value))
		})
	})
}

/// Build the schema for the given public names and declared types
///
/// Fails with [`Error::ConfigError`] when a type has no GraphQL mapping or
/// two names project to the same field.
pub fn build_schema(
	fields: &[(String, SettingType)],
	facade: Arc<SettingsFacade>,
) -> ClResult<SettingsSchema> {
	let mut settings_type = Object::new(SETTINGS_TYPE);
	let mut seen = HashSet::new();
	let mut uses_date_time = false;

	for (key, typ) in fields {
		let type_name = graphql_type(*typ).ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}' of type {} cannot be exposed", key, typ))
		})?;
		let field_name = project_field_name(key);
		if !seen.insert(field_name.clone()) {
			return Err(Error::ConfigError(format!(
				"Setting '{}' projects to duplicate field '{}'",
				key, field_name
			)));
		}
		uses_date_time |= type_name == DATE_TIME;
		settings_type = settings_type.field(setting_field(key.clone(), &field_name, type_name));
	}

	let query = Object::new(QUERY_TYPE).field(Field::new(
		"siteSettings",
		TypeRef::named(SETTINGS_TYPE),
		|ctx| {
			FieldFuture::new(async move {
				let facade = ctx.data::<Arc<SettingsFacade>>()?;
				let settings = facade.merged_public_settings().await;
				Ok(Some(FieldValue::owned_any(settings)))
			})
		},
	));

	let mut builder = Schema::build(QUERY_TYPE, None, None).register(settings_type).register(query);
	if uses_date_time {
		builder = builder.register(
			Scalar::new(DATE_TIME).description("Time of day, formatted as HH:MM:SS"),
		);
	}

	let schema = builder
		.data(facade)
		.finish()
		.map_err(|err| Error::ConfigError(format!("GraphQL schema: {}", err)))?;

	info!("GraphQL settings schema built with {} fields", fields.len());
	Ok(SettingsSchema(schema))
}

/// Build the schema from the facade's current public settings
pub async fn build_settings_schema(facade: Arc<SettingsFacade>) -> ClResult<SettingsSchema> {
	let fields = facade.public_schema().await;
	build_schema(&fields, facade)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_project_field_name() {
		assert_eq!(project_field_name("FEATURE_CLEANING_ENABLED"), "Feature_cleaning_enabled");
		assert_eq!(project_field_name("PAYMENT_STRIPE_PUBLIC_KEY"), "Payment_stripe_public_key");
		assert_eq!(project_field_name("SPA_PAYMENT_URL"), "Spa_payment_url");
		assert_eq!(project_field_name("X"), "X");
		assert_eq!(project_field_name(""), "");
	}

	#[test]
	fn test_graphql_type_mapping() {
		assert_eq!(graphql_type(SettingType::Int), Some("Int"));
		assert_eq!(graphql_type(SettingType::Str), Some("String"));
		assert_eq!(graphql_type(SettingType::Float), Some("Float"));
		assert_eq!(graphql_type(SettingType::Bool), Some("Boolean"));
		assert_eq!(graphql_type(SettingType::Time), Some("DateTime"));
		assert_eq!(graphql_type(SettingType::Json), None);
	}

	#[test]
	fn test_to_graphql_value() {
		assert_eq!(to_graphql_value(&SettingValue::Int(24)), Value::Number(24.into()));
		assert_eq!(to_graphql_value(&SettingValue::Bool(true)), Value::Boolean(true));
		assert_eq!(to_graphql_value(&SettingValue::Float(f64::NAN)), Value::Null);
		assert_eq!(
			to_graphql_value(&SettingValue::Time(
				chrono::NaiveTime::from_hms_opt(15, 30, 0).unwrap_or_default()
			)),
			Value::String("15:30:00".into())
		);
	}
}

// vim: ts=4
