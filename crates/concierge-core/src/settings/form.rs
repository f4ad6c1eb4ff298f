//! Form errors collected while cleaning an admin submission

use serde::Serialize;
use std::collections::BTreeMap;

/// Field name -> messages, in field name order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
	fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.fields.entry(field.into()).or_default().push(message.into());
	}

	pub fn get(&self, field: &str) -> Option<&[String]> {
		self.fields.get(field).map(Vec::as_slice)
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}
}

impl std::fmt::Display for FormErrors {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut first = true;
		for (field, messages) in &self.fields {
			for message in messages {
				if !first {
					f.write_str("; ")?;
				}
				write!(f, "{}: {}", field, message)?;
				first = false;
			}
		}
		Ok(())
	}
}

// vim: ts=4
