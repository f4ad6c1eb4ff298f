//! Error type shared by every concierge crate

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	DbError,
	Parse,
	/// User input rejected (form fields, setting values)
	ValidationError(String),
	/// Static configuration is inconsistent; fatal at startup
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Stable machine-readable code used in API error bodies
	pub fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "not_found",
			Error::PermissionDenied => "permission_denied",
			Error::ValidationError(_) => "validation_error",
			Error::Parse => "invalid_input",
			Error::DbError
			| Error::ConfigError(_)
			| Error::Internal(_)
			| Error::Io(_) => "internal_error",
		}
	}

	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Error::Parse => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::warn!("JSON error: {}", err);
		Self::Parse
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::ValidationError(msg) => write!(f, "{}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = self.status();
		// Internal details stay in the log
		let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
			tracing::error!("Request failed: {}", self);
			"Internal error.".to_string()
		} else {
			self.to_string()
		};
		let body = serde_json::json!({
			"error": { "code": self.code(), "message": message }
		});
		(status, Json(body)).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_codes() {
		assert_eq!(Error::NotFound.code(), "not_found");
		assert_eq!(Error::ValidationError("x".into()).code(), "validation_error");
		assert_eq!(Error::ConfigError("x".into()).code(), "internal_error");
	}

	#[test]
	fn test_error_status() {
		assert_eq!(Error::PermissionDenied.into_response().status(), StatusCode::FORBIDDEN);
		assert_eq!(
			Error::ValidationError("bad".into()).into_response().status(),
			StatusCode::UNPROCESSABLE_ENTITY
		);
		assert_eq!(Error::DbError.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_validation_message_is_verbatim() {
		let err = Error::ValidationError("Invalid \"email\" in X: foo".into());
		assert_eq!(err.to_string(), "Invalid \"email\" in X: foo");
	}
}

// vim: ts=4
