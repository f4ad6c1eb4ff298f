//! Custom extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::prelude::*;

/// Roles that may use the admin surface
pub const STAFF_ROLES: [&str; 2] = ["staff", "superuser"];

/// Authenticated caller, as decoded from the bearer token
#[derive(Debug, Clone)]
pub struct AuthCtx {
	pub subject: Box<str>,
	pub roles: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn has_role(&self, role: &str) -> bool {
		self.roles.iter().any(|r| r.as_ref() == role)
	}

	pub fn is_staff(&self) -> bool {
		STAFF_ROLES.iter().any(|role| self.has_role(role))
	}
}

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::PermissionDenied)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx(roles: &[&str]) -> AuthCtx {
		AuthCtx { subject: "admin".into(), roles: roles.iter().map(|r| Box::from(*r)).collect() }
	}

	#[test]
	fn test_staff_roles() {
		assert!(ctx(&["staff"]).is_staff());
		assert!(ctx(&["resident", "superuser"]).is_staff());
		assert!(!ctx(&["resident"]).is_staff());
		assert!(!ctx(&[]).is_staff());
	}
}

// vim: ts=4
