//! Bearer token authentication
//!
//! Tokens are HS256 JWTs signed with the configured secret. The `r` claim is
//! a comma-separated role list.

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::extract::{Auth, AuthCtx};
use crate::prelude::*;

/// Token lifetime in hours
const TOKEN_EXPIRE: i64 = 8;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessToken<S> {
	pub sub: S,
	pub exp: i64,
	pub r: Option<S>,
}

pub fn generate_access_token(secret: &str, subject: &str, roles: &[&str]) -> ClResult<Box<str>> {
	let roles = roles.join(",");
	let claims = AccessToken::<&str> {
		sub: subject,
		exp: Timestamp::now().add_seconds(3600 * TOKEN_EXPIRE).0,
		r: (!roles.is_empty()).then_some(roles.as_str()),
	};

	let token = encode(
		&Header::new(Algorithm::HS256),
		&claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|err| Error::Internal(format!("cannot sign token: {}", err)))?;

	Ok(token.into())
}

pub fn validate_token(secret: &str, token: &str) -> ClResult<AuthCtx> {
	let token_data = decode::<AccessToken<Box<str>>>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|err| {
		debug!("Token rejected: {}", err);
		Error::PermissionDenied
	})?;

	let claims = token_data.claims;
	let roles = claims
		.r
		.as_deref()
		.unwrap_or_default()
		.split(',')
		.map(str::trim)
		.filter(|r| !r.is_empty())
		.map(Box::from)
		.collect();
	Ok(AuthCtx { subject: claims.sub, roles })
}

fn bearer_token(req: &Request) -> Option<&str> {
	req.headers()
		.get(axum::http::header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim)
}

/// Reject requests without a valid bearer token; store the caller in the
/// request extensions for the [`Auth`] extractor
pub async fn require_auth(
	State(app): State<App>,
	mut req: Request,
	next: Next,
) -> Result<Response, Error> {
	let token = bearer_token(&req).ok_or(Error::PermissionDenied)?;
	let auth = validate_token(&app.opts.jwt_secret, token)?;
	req.extensions_mut().insert(Auth(auth));

	Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
	use super::*;

	const SECRET: &str = "test-secret";

	#[test]
	fn test_token_round_trip() {
		let token = generate_access_token(SECRET, "admin@whatsmycut.com", &["staff"]).unwrap();
		let auth = validate_token(SECRET, &token).unwrap();
		assert_eq!(auth.subject.as_ref(), "admin@whatsmycut.com");
		assert!(auth.is_staff());
	}

	#[test]
	fn test_token_without_roles() {
		let token = generate_access_token(SECRET, "resident", &[]).unwrap();
		let auth = validate_token(SECRET, &token).unwrap();
		assert!(auth.roles.is_empty());
		assert!(!auth.is_staff());
	}

	#[test]
	fn test_token_wrong_secret() {
		let token = generate_access_token(SECRET, "admin", &["staff"]).unwrap();
		assert!(matches!(validate_token("other", &token), Err(Error::PermissionDenied)));
		assert!(matches!(validate_token(SECRET, "garbage"), Err(Error::PermissionDenied)));
	}
}

// vim: ts=4
