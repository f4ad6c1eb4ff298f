use std::{env, path, sync::Arc};

use concierge::AppBuilder;
use concierge::error::{ClResult, Error};
use concierge_core::facade::StaticSettings;
use concierge_core::middleware::generate_access_token;
use concierge_settings_adapter_sqlite::SettingsAdapterSqlite;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub jwt_secret: String,
	pub staff_group: String,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("CONCIERGE_LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
			db_dir: path::PathBuf::from(
				env::var("CONCIERGE_DB_DIR").unwrap_or_else(|_| "./data".to_string()),
			),
			jwt_secret: env::var("CONCIERGE_JWT_SECRET").unwrap_or_default(),
			staff_group: env::var("CONCIERGE_STAFF_GROUP").unwrap_or_else(|_| "staff".to_string()),
		}
	}
}

#[tokio::main]
async fn main() -> ClResult<()> {
	let config = Config::from_env();

	// token <subject>: mint a staff token for the admin API
	let args: Vec<String> = env::args().skip(1).collect();
	if let [cmd, subject] = args.as_slice()
		&& cmd == "token"
	{
		if config.jwt_secret.is_empty() {
			return Err(Error::ConfigError("CONCIERGE_JWT_SECRET is not set".into()));
		}
		let token = generate_access_token(&config.jwt_secret, subject, &["staff"])?;
		println!("{}", token);
		return Ok(());
	}

	let adapter = Arc::new(SettingsAdapterSqlite::new(&config.db_dir).await?);

	let mut builder = AppBuilder::new();
	builder
		.listen(config.listen)
		.jwt_secret(config.jwt_secret)
		.staff_group(config.staff_group)
		.static_settings(StaticSettings::from_env())
		.settings_adapter(adapter.clone())
		.auth_adapter(adapter);
	builder.run().await
}

// vim: ts=4
