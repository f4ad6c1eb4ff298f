//! Common types used throughout the concierge backend.

use serde::{Deserialize, Serialize};

// Timestamp //
//***********//
/// Unix timestamp in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
	pub fn now() -> Timestamp {
		Timestamp(chrono::Utc::now().timestamp())
	}

	pub fn add_seconds(&self, seconds: i64) -> Timestamp {
		Timestamp(self.0 + seconds)
	}
}

impl std::fmt::Display for Timestamp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// GroupId //
//*********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl std::fmt::Display for GroupId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

// PermId //
//********//
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermId(pub i64);

impl std::fmt::Display for PermId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_timestamp_ordering() {
		let a = Timestamp(10);
		let b = a.add_seconds(5);
		assert!(a < b);
		assert_eq!(b, Timestamp(15));
	}

	#[test]
	fn test_newtypes_serialize_transparent() {
		assert_eq!(serde_json::to_string(&GroupId(7)).ok().as_deref(), Some("7"));
		assert_eq!(serde_json::to_string(&Timestamp(42)).ok().as_deref(), Some("42"));
	}
}

// vim: ts=4
