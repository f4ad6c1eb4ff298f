//! App builder - constructs and runs the concierge application

use std::sync::Arc;

use crate::auth_adapter::AuthAdapter;
use crate::prelude::*;
use crate::settings::{SettingsRegistry, SettingsService};
use crate::settings_adapter::SettingsAdapter;
use crate::{routes, webserver};
use concierge_core::catalog::check_catalog;
use concierge_core::extensions::Extensions;
use concierge_core::facade::{STATIC_SETTING_NAMES, SettingsFacade, StaticSettings};
use concierge_core::perm::GrantResult;

pub use concierge_core::app::{App, AppBuilderOpts, AppState, VERSION};

struct Adapters {
	settings_adapter: Option<Arc<dyn SettingsAdapter>>,
	auth_adapter: Option<Arc<dyn AuthAdapter>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	static_settings: StaticSettings,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		// Tests build several apps in one process
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				jwt_secret: "".into(),
				staff_group: "staff".into(),
			},
			static_settings: StaticSettings::default(),
			adapters: Adapters { settings_adapter: None, auth_adapter: None },
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}

	pub fn jwt_secret(&mut self, jwt_secret: impl Into<Box<str>>) -> &mut Self {
		self.opts.jwt_secret = jwt_secret.into();
		self
	}

	pub fn staff_group(&mut self, staff_group: impl Into<Box<str>>) -> &mut Self {
		self.opts.staff_group = staff_group.into();
		self
	}

	pub fn static_settings(&mut self, static_settings: StaticSettings) -> &mut Self {
		self.static_settings = static_settings;
		self
	}

	// Adapters
	pub fn settings_adapter(&mut self, settings_adapter: Arc<dyn SettingsAdapter>) -> &mut Self {
		self.adapters.settings_adapter = Some(settings_adapter);
		self
	}

	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self {
		self.adapters.auth_adapter = Some(auth_adapter);
		self
	}

	/// Initialize every subsystem without serving
	///
	/// Any inconsistency of the static tables (catalog, exposed set,
	/// field groups, API type mapping) fails here.
	pub async fn build(self) -> ClResult<App> {
		info!("concierge V{}", VERSION);

		if self.opts.jwt_secret.is_empty() {
			error!("FATAL: No JWT secret configured");
			return Err(Error::ConfigError("No JWT secret configured".to_string()));
		}
		let Some(settings_adapter) = self.adapters.settings_adapter else {
			error!("FATAL: No settings adapter configured");
			return Err(Error::Internal("No settings adapter configured".to_string()));
		};
		let Some(auth_adapter) = self.adapters.auth_adapter else {
			error!("FATAL: No auth adapter configured");
			return Err(Error::Internal("No auth adapter configured".to_string()));
		};

		// Initialize settings registry and service
		let mut settings_registry = SettingsRegistry::new();
		concierge_core::register_settings(&mut settings_registry)?;
		info!("Registered {} settings", settings_registry.len());

		let frozen_registry = Arc::new(settings_registry.freeze());
		check_catalog(&frozen_registry, STATIC_SETTING_NAMES)
			.inspect_err(|err| error!("FATAL: {}", err))?;

		let settings_service =
			Arc::new(SettingsService::new(frozen_registry.clone(), settings_adapter));
		settings_service.load().await?;
		info!("Settings subsystem initialized and validated");

		let facade = Arc::new(SettingsFacade::new(
			settings_service.clone(),
			self.static_settings,
			auth_adapter.clone(),
		));

		// The schema is fixed for the lifetime of the process
		let schema = concierge_graphql::build_settings_schema(facade.clone())
			.await
			.inspect_err(|err| error!("FATAL: {}", err))?;

		let mut extensions = Extensions::new();
		extensions.insert(schema);

		let app: App = Arc::new(AppState {
			opts: self.opts,
			auth_adapter,
			settings: settings_service,
			settings_registry: frozen_registry,
			facade,
			extensions,
		});

		bootstrap(&app).await?;

		Ok(app)
	}

	pub async fn run(self) -> ClResult<()> {
		let app = self.build().await?;
		let router = routes::init(app.clone());

		webserver::serve(app, router).await
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Make sure the staff group exists and may change settings
async fn bootstrap(app: &App) -> ClResult<()> {
	let group = app.auth_adapter.create_group(&app.opts.staff_group).await?;

	match app.facade.grant_change_permission(&group.name).await? {
		GrantResult::Granted => info!(group = %group.name, "Granted settings change permission"),
		GrantResult::AlreadyGranted => {
			debug!(group = %group.name, "Settings change permission already granted");
		}
		GrantResult::NotFound => {
			warn!(group = %group.name, "Settings change permission record not found");
		}
	}

	Ok(())
}

// vim: ts=4
