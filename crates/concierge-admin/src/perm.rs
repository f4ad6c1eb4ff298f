//! Admin permission middleware
//!
//! Access is decided by the token roles alone. The `settings.change_config`
//! group permission is granted for other permission-system consumers and
//! does not gate these routes.

use axum::{
	extract::{Request, State},
	middleware::Next,
	response::Response,
};

use concierge_core::extract::{Auth, STAFF_ROLES};

use crate::prelude::*;

/// Middleware that lets only staff through
///
/// Runs after `require_auth`, which puts the caller into the request
/// extensions.
pub async fn require_staff(
	State(_app): State<App>,
	Auth(auth_ctx): Auth,
	req: Request,
	next: Next,
) -> Result<Response, Error> {
	if !auth_ctx.is_staff() {
		warn!(
			subject = %auth_ctx.subject,
			roles = ?auth_ctx.roles,
			"Admin permission denied - one of {:?} required",
			STAFF_ROLES
		);
		return Err(Error::PermissionDenied);
	}

	Ok(next.run(req).await)
}

// vim: ts=4
