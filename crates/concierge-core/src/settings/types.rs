//! Settings types and definitions
//!
//! Core types for the dynamic settings subsystem: declared value types, typed
//! values, definitions with their defaults, and the ordered registry.

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Type alias for setting validator function
pub type SettingValidator = Box<dyn Fn(&SettingValue) -> ClResult<()> + Send + Sync>;

/// Declared scalar type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
	Int,
	#[serde(rename = "string")]
	Str,
	Float,
	Bool,
	/// Time of day, no date and no zone
	Time,
	/// Free-form JSON. Cannot be exposed through the API.
	Json,
}

impl SettingType {
	pub fn name(&self) -> &'static str {
		match self {
			SettingType::Int => "int",
			SettingType::Str => "string",
			SettingType::Float => "float",
			SettingType::Bool => "bool",
			SettingType::Time => "time",
			SettingType::Json => "json",
		}
	}
}

impl std::fmt::Display for SettingType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)] // No type tag - type comes from SettingDefinition
pub enum SettingValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	Time(NaiveTime),
	Json(serde_json::Value),
}

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

impl SettingValue {
	pub fn setting_type(&self) -> SettingType {
		match self {
			SettingValue::Bool(_) => SettingType::Bool,
			SettingValue::Int(_) => SettingType::Int,
			SettingValue::Float(_) => SettingType::Float,
			SettingValue::String(_) => SettingType::Str,
			SettingValue::Time(_) => SettingType::Time,
			SettingValue::Json(_) => SettingType::Json,
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		self.setting_type().name()
	}

	pub fn matches_type(&self, typ: SettingType) -> bool {
		self.setting_type() == typ
	}

	/// Zero value of a declared type, served for names the registry doesn't know
	pub fn zero(typ: SettingType) -> SettingValue {
		match typ {
			SettingType::Int => SettingValue::Int(0),
			SettingType::Str => SettingValue::String(String::new()),
			SettingType::Float => SettingValue::Float(0.0),
			SettingType::Bool => SettingValue::Bool(false),
			SettingType::Time => SettingValue::Time(NaiveTime::default()),
			SettingType::Json => SettingValue::Json(serde_json::Value::Null),
		}
	}

	/// Canonical JSON form, as persisted
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			SettingValue::Bool(b) => serde_json::Value::Bool(*b),
			SettingValue::Int(i) => serde_json::Value::from(*i),
			SettingValue::Float(f) => serde_json::Number::from_f64(*f)
				.map_or(serde_json::Value::Null, serde_json::Value::Number),
			SettingValue::String(s) => serde_json::Value::String(s.clone()),
			SettingValue::Time(t) => serde_json::Value::String(t.format("%H:%M:%S").to_string()),
			SettingValue::Json(j) => j.clone(),
		}
	}

	/// Interpret a JSON value as the declared type
	///
	/// Accepts the canonical persisted form as well as the string forms an
	/// HTML form posts (`"5"`, `"on"`, `"15:30"`).
	pub fn from_json(raw: &serde_json::Value, typ: SettingType) -> ClResult<SettingValue> {
		use serde_json::Value;

		let invalid = || Error::ValidationError(format!("Enter a valid {} value.", typ.name()));

		match typ {
			SettingType::Json => Ok(SettingValue::Json(raw.clone())),
			SettingType::Str => match raw {
				Value::String(s) => Ok(SettingValue::String(s.clone())),
				Value::Null => Ok(SettingValue::String(String::new())),
				_ => Err(invalid()),
			},
			SettingType::Int => match raw {
				Value::Number(n) => n.as_i64().map(SettingValue::Int).ok_or_else(invalid),
				Value::String(s) => s.trim().parse().map(SettingValue::Int).map_err(|_| invalid()),
				_ => Err(invalid()),
			},
			SettingType::Float => match raw {
				Value::Number(n) => n.as_f64().map(SettingValue::Float).ok_or_else(invalid),
				// "inf" and "NaN" parse but have no JSON form
				Value::String(s) => s
					.trim()
					.parse::<f64>()
					.ok()
					.filter(|f| f.is_finite())
					.map(SettingValue::Float)
					.ok_or_else(invalid),
				_ => Err(invalid()),
			},
			SettingType::Bool => match raw {
				Value::Bool(b) => Ok(SettingValue::Bool(*b)),
				// Unchecked checkboxes are simply absent or empty
				Value::Null => Ok(SettingValue::Bool(false)),
				Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
					"true" | "1" | "on" | "yes" => Ok(SettingValue::Bool(true)),
					"false" | "0" | "off" | "no" | "" => Ok(SettingValue::Bool(false)),
					_ => Err(invalid()),
				},
				_ => Err(invalid()),
			},
			SettingType::Time => {
				let Value::String(s) = raw else {
					return Err(invalid());
				};
				TIME_FORMATS
					.iter()
					.find_map(|fmt| NaiveTime::parse_from_str(s.trim(), fmt).ok())
					.map(SettingValue::Time)
					.ok_or_else(invalid)
			}
		}
	}
}

/// Setting definition - defines metadata for each setting
pub struct SettingDefinition {
	/// Upper-snake-case name (e.g., "HOURS_PAY_BEFORE_APPOINTMENT")
	pub key: String,

	/// Human-readable description
	pub description: String,

	/// Declared value type
	pub typ: SettingType,

	/// Value served when no override is persisted
	pub default: SettingValue,

	/// Optional validation function, run on every write
	pub validator: Option<SettingValidator>,
}

impl Clone for SettingDefinition {
	fn clone(&self) -> Self {
		SettingDefinition {
			key: self.key.clone(),
			description: self.description.clone(),
			typ: self.typ,
			default: self.default.clone(),
			validator: None, // Don't clone the validator function
		}
	}
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("key", &self.key)
			.field("description", &self.description)
			.field("typ", &self.typ)
			.field("default", &self.default)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(key: impl Into<String>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(key)
	}

	/// Run the validator, if any
	pub fn validate(&self, value: &SettingValue) -> ClResult<()> {
		if !value.matches_type(self.typ) {
			return Err(Error::ValidationError(format!(
				"Type mismatch for setting '{}': expected {}, got {}",
				self.key,
				self.typ,
				value.type_name()
			)));
		}
		if let SettingValue::Float(f) = value
			&& !f.is_finite()
		{
			return Err(Error::ValidationError("Enter a valid float value.".into()));
		}
		match &self.validator {
			Some(validator) => validator(value),
			None => Ok(()),
		}
	}
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	key: String,
	description: Option<String>,
	typ: Option<SettingType>,
	default: Option<SettingValue>,
	validator: Option<SettingValidator>,
}

impl SettingDefinitionBuilder {
	pub fn new(key: impl Into<String>) -> Self {
		Self { key: key.into(), description: None, typ: None, default: None, validator: None }
	}

	/// Set the description (required, may be empty)
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value (required). The declared type follows it unless
	/// set explicitly.
	pub fn default(mut self, value: SettingValue) -> Self {
		self.default = Some(value);
		self
	}

	/// Declare the type explicitly
	pub fn typ(mut self, typ: SettingType) -> Self {
		self.typ = Some(typ);
		self
	}

	/// Set a validation function
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue) -> ClResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(f));
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> ClResult<SettingDefinition> {
		let description = self.description.ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}': description is required", self.key))
		})?;
		let default = self.default.ok_or_else(|| {
			Error::ConfigError(format!("Setting '{}': default value is required", self.key))
		})?;
		let typ = self.typ.unwrap_or_else(|| default.setting_type());

		if !default.matches_type(typ) {
			return Err(Error::ConfigError(format!(
				"Setting '{}': default is {} but declared type is {}",
				self.key,
				default.type_name(),
				typ
			)));
		}

		Ok(SettingDefinition {
			key: self.key,
			description,
			typ,
			default,
			validator: self.validator,
		})
	}
}

/// Mutable registry used during app initialization
///
/// Keeps registration order; listing follows it.
pub struct SettingsRegistry {
	definitions: Vec<SettingDefinition>,
	index: HashMap<String, usize>,
}

impl SettingsRegistry {
	pub fn new() -> Self {
		Self { definitions: Vec::new(), index: HashMap::new() }
	}

	/// Register a new setting definition
	pub fn register(&mut self, def: SettingDefinition) -> ClResult<()> {
		if self.index.contains_key(&def.key) {
			return Err(Error::ConfigError(format!("Setting '{}' is already registered", def.key)));
		}

		tracing::debug!("Registering setting: {}", def.key);
		self.index.insert(def.key.clone(), self.definitions.len());
		self.definitions.push(def);
		Ok(())
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingsRegistry {
		tracing::info!("Freezing settings registry with {} definitions", self.definitions.len());
		FrozenSettingsRegistry { definitions: self.definitions, index: self.index }
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

impl Default for SettingsRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable registry stored in AppState
pub struct FrozenSettingsRegistry {
	definitions: Vec<SettingDefinition>,
	index: HashMap<String, usize>,
}

impl FrozenSettingsRegistry {
	/// Get a setting definition by key
	pub fn get(&self, key: &str) -> Option<&SettingDefinition> {
		self.index.get(key).and_then(|&i| self.definitions.get(i))
	}

	pub fn contains(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// Declared type of a setting; unknown names are treated as strings
	pub fn type_of(&self, key: &str) -> SettingType {
		self.get(key).map_or(SettingType::Str, |def| def.typ)
	}

	/// List all registered settings in registration order
	pub fn list(&self) -> impl Iterator<Item = &SettingDefinition> {
		self.definitions.iter()
	}

	/// Get number of registered settings
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	/// Check if registry is empty
	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}


// vim: ts=4
