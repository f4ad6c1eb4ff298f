//! App state type

use std::sync::Arc;

use crate::extensions::Extensions;
use crate::facade::SettingsFacade;
use crate::prelude::*;
use crate::settings::{FrozenSettingsRegistry, SettingsService};

use concierge_types::auth_adapter::AuthAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub auth_adapter: Arc<dyn AuthAdapter>,

	// Settings subsystem
	pub settings: Arc<SettingsService>,
	pub settings_registry: Arc<FrozenSettingsRegistry>,
	pub facade: Arc<SettingsFacade>,

	// Type-erased extension map for feature-specific state
	pub extensions: Extensions,
}

impl AppState {
	/// Get a registered extension by type. Returns error if not found.
	pub fn ext<T: Send + Sync + 'static>(&self) -> ClResult<&T> {
		self.extensions.get::<T>().ok_or_else(|| {
			Error::Internal(format!("Extension {} not registered", std::any::type_name::<T>()))
		})
	}
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// HS256 secret for admin bearer tokens
	pub jwt_secret: Box<str>,
	/// Group granted the settings change permission at startup
	pub staff_group: Box<str>,
}

// vim: ts=4
