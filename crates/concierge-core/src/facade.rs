//! Public settings facade
//!
//! Merges the dynamic registry values with a few values taken from the
//! process environment, and filters both down to the exposed set.

use std::sync::Arc;

use concierge_types::auth_adapter::AuthAdapter;

use crate::catalog::{NO_PRICES_NOTIFICATION_RECIPIENTS, is_exposed};
use crate::perm::{self, GrantResult};
use crate::prelude::*;
use crate::settings::{SettingType, SettingValue, SettingsService};
use crate::validate::{BALANCE_PAIRS_SETTING, BalancePair, parse_balance_pairs, parse_email_list};

pub const PAYMENT_STRIPE_PUBLIC_KEY: &str = "PAYMENT_STRIPE_PUBLIC_KEY";

/// Names served from [`StaticSettings`]
pub const STATIC_SETTING_NAMES: &[&str] = &[PAYMENT_STRIPE_PUBLIC_KEY];

/// Environment-derived values, captured once at startup
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
	pub payment_stripe_public_key: Option<String>,
}

impl StaticSettings {
	pub fn from_env() -> Self {
		let payment_stripe_public_key =
			std::env::var(PAYMENT_STRIPE_PUBLIC_KEY).ok().filter(|v| !v.is_empty());
		Self { payment_stripe_public_key }
	}

	fn entries(&self) -> Vec<(&'static str, Option<SettingValue>)> {
		vec![(
			PAYMENT_STRIPE_PUBLIC_KEY,
			self.payment_stripe_public_key.clone().map(SettingValue::String),
		)]
	}
}

/// Ordered name -> value list. `None` marks a static value missing from the
/// environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicSettings {
	entries: Vec<(String, Option<SettingValue>)>,
}

impl PublicSettings {
	pub fn get(&self, name: &str) -> Option<&Option<SettingValue>> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.iter().any(|(n, _)| n == name)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(n, _)| n.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&SettingValue>)> {
		self.entries.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

pub struct SettingsFacade {
	settings: Arc<SettingsService>,
	static_settings: StaticSettings,
	auth: Arc<dyn AuthAdapter>,
}

impl SettingsFacade {
	pub fn new(
		settings: Arc<SettingsService>,
		static_settings: StaticSettings,
		auth: Arc<dyn AuthAdapter>,
	) -> Self {
		Self { settings, static_settings, auth }
	}

	/// Exposed registry values, in registry order
	pub async fn public_dynamic_settings(&self) -> PublicSettings {
		let mut res = PublicSettings::default();
		for def in self.settings.registry().list().filter(|def| is_exposed(&def.key)) {
			let value = self.settings.get(&def.key).await;
			res.entries.push((def.key.clone(), Some(value)));
		}
		res
	}

	/// Exposed environment-derived values. Missing ones are `None`.
	pub fn public_static_settings(&self) -> PublicSettings {
		let entries = self
			.static_settings
			.entries()
			.into_iter()
			.filter(|(name, _)| is_exposed(name))
			.map(|(name, value)| (name.to_string(), value))
			.collect();
		PublicSettings { entries }
	}

	/// Static values overlaid by dynamic ones: on a name collision the
	/// dynamic value wins. Dynamic names come first, in registry order.
	pub async fn merged_public_settings(&self) -> PublicSettings {
		let mut merged = self.public_dynamic_settings().await;
		for (name, value) in self.public_static_settings().entries {
			if !merged.contains(&name) {
				merged.entries.push((name, value));
			}
		}
		merged
	}

	pub fn type_of(&self, name: &str) -> SettingType {
		self.settings.registry().type_of(name)
	}

	/// Every public name with its declared type, in merge order
	pub async fn public_schema(&self) -> Vec<(String, SettingType)> {
		self.merged_public_settings()
			.await
			.names()
			.map(|name| (name.to_string(), self.type_of(name)))
			.collect()
	}

	/// Recipients of the "no prices" notification; invalid entries dropped
	pub async fn notification_recipients(&self) -> Vec<String> {
		parse_email_list(&self.settings.get_str(NO_PRICES_NOTIFICATION_RECIPIENTS).await)
	}

	/// Extra customer balances per email; malformed pairs dropped
	pub async fn extra_customer_balances(&self) -> Vec<BalancePair> {
		parse_balance_pairs(&self.settings.get_str(BALANCE_PAIRS_SETTING).await)
	}

	pub async fn grant_change_permission(&self, group_name: &str) -> ClResult<GrantResult> {
		perm::grant_change_permission(self.auth.as_ref(), group_name).await
	}

	pub fn settings(&self) -> &Arc<SettingsService> {
		&self.settings
	}
}


// vim: ts=4
