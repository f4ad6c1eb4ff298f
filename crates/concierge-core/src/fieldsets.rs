//! Field groups for the admin edit screen
//!
//! Presentation only. A name may appear in more than one group.

use crate::settings::{FrozenSettingsRegistry, SettingDefinition};

pub struct FieldGroup {
	pub title: &'static str,
	pub fields: &'static [&'static str],
}

/// Title of the trailing group holding settings listed nowhere else
pub const OTHER_OPTIONS: &str = "Other Options";

pub const FIELD_GROUPS: &[FieldGroup] = &[
	FieldGroup {
		title: "General Options",
		fields: &[
			"FEATURE_CLEANING_ENABLED",
			"FEATURE_RECURRENT_SCHEDULING_ENABLED",
			"HOURS_PAY_BEFORE_APPOINTMENT",
			"FEATURE_GYM_ENABLED",
			"FEATURE_DOG_WALKING_ENABLED",
			"FEATURE_MASSAGE_ENABLED",
			"FEATURE_TRANSPORTATION_ENABLED",
			"SPA_PAYMENT_URL",
			"FIRST_CHARGING_ATTEMPT_HOURS",
			"SECOND_CHARGING_ATTEMPT_HOURS",
			"CONCIERGE_EMAIL",
			"CONCIERGE_PHONE",
			"PM_INTEGRATION_RESIDENT_MODIFICATION_THRESHOLD",
			"CELERY_TASK_RESULT_EXPIRES",
			"PROPERTIES_2_WAY_SYNC",
			"YARDI_API_LICENSE_KEY",
			"ADD_EVENT_TYPEFORM_URL",
			"NO_PRICES_NOTIFICATION_RECIPIENTS",
			"REDIRECTION_AFTER_AUTHORISE_CONNECT_ACCOUNT",
			"DAYS_AVAILABLE_BOOKING",
			"DAYS_BETWEEN_ACTIVATION_EMAILS",
			"DAYS_UPCOMING_CLEANING_SUBSCRIPTION_NOTIFICATION",
			"DAYS_UPCOMING_DOG_WALKING_SUBSCRIPTION_NOTIFICATION",
			"STORE_INTEGRATION_DATA",
			"HOURS_PERIOD_SUBSCRIPTION_DIGEST",
			"PUSH_APPOINTMENT_REMINDER_TEXT",
		],
	},
	FieldGroup {
		title: "Mandrill Options",
		fields: &[
			"PASSWORD_RESET_TEMPLATE",
			"USER_REPORT_ISSUE_TEMPLATE",
			"NO_PRICES_NOTIFICATION_TEMPLATE",
			"SUB_PAR_REVIEW_TEMPLATE",
			"RESIDENT_ONBOARDING_TEMPLATE",
			"UPCOMING_CLEANING_RESIDENT_TEMPLATE",
			"UPCOMING_DOG_WALKING_RESIDENT_TEMPLATE",
			"UPCOMING_CLEANING_PROPERTY_MANAGER_TEMPLATE",
			"UPCOMING_DOG_WALKING_PROPERTY_MANAGER_TEMPLATE",
			"UPCOMING_CLEANING_SERVICE_PROVIDER_TEMPLATE",
			"UPCOMING_DOG_WALKING_SERVICE_PROVIDER_TEMPLATE",
			"CLEANING_SUBSCRIPTION_NOTIFICATION_TEMPLATE",
			"NEW_SUBSCRIBERS_TEMPLATE",
			"MANDRILL_ERROR_NOTIFICATION_TEMPLATE",
			"SUBSCRIBERS_DIGEST_TEMPLATE",
			"RESIDENT_SKIPPING_SERVICE_TEMPLATE",
			"RESIDENT_SKIPPING_SERVICE_CC",
			"DOG_WALKING_SUBSCRIPTION_NOTIFICATION_TEMPLATE",
			"ENABLE_ACTIVATION_EMAILS",
			"PROVIDER_NEW_MEET_AND_GREET_TEMPLATE",
			"RESIDENT_NEW_MEET_AND_GREET_TEMPLATE",
		],
	},
	FieldGroup {
		title: "Zapier Options",
		fields: &[
			"ZAPIER_NEW_SUBSCRIBER_URL",
			"ZAPIER_NEW_REVIEW_URL",
			"ZAPIER_CANCELLED_SUBSCRIPTION_URL",
			"ZAPIER_MOVED_IN_RESIDENT_URL",
		],
	},
	FieldGroup {
		title: "Twilio Options",
		fields: &[
			"LOCAL_SERVICE_REMINDER_TIME",
			"SMS_CLEANING_REMINDER_TEXT",
			"SMS_DOG_WALKING_REMINDER_TEXT",
			"SMS_SERVICE_REMINDER_PHONE_NUMBER",
			"LOCAL_CLEANING_POST_EVENT_FEEDBACK_TIME",
			"SMS_CLEANING_POST_EVENT_FEEDBACK_TEXT",
			"SMS_DOG_WALKING_POST_EVENT_FEEDBACK_TEXT",
			"SMS_CLEANING_POST_EVENT_FEEDBACK_PHONE_NUMBER",
			"SKIPPING_EVENT_FLOW_ID",
			"SKIPPING_EVENT_PHONE_NUMBER",
		],
	},
	FieldGroup {
		title: "Stripe Options",
		fields: &[
			"STRIPE_60MIN_DOG_WALKING_PRODUCT_CODE",
			"STRIPE_30MIN_DOG_WALKING_PRODUCT_CODE",
			"STRIPE_DOG_WALKING_SUBSCRIPTION_PRODUCT_CODE",
			"REDIRECTION_AFTER_AUTHORISE_CONNECT_ACCOUNT",
			"STRIPE_INITIAL_CUSTOMER_BALANCE",
			"STRIPE_EXTRA_CUSTOMER_BALANCE_PER_EMAIL",
		],
	},
];

/// Resolve the groups against the registry
///
/// Groups keep their declared order; definitions not named by any group are
/// appended under [`OTHER_OPTIONS`] in registry order. Empty groups are
/// skipped.
pub fn grouped_definitions(
	registry: &FrozenSettingsRegistry,
) -> Vec<(&'static str, Vec<&SettingDefinition>)> {
	let mut groups: Vec<(&'static str, Vec<&SettingDefinition>)> = FIELD_GROUPS
		.iter()
		.map(|group| {
			(group.title, group.fields.iter().filter_map(|name| registry.get(name)).collect())
		})
		.collect();

	let other: Vec<&SettingDefinition> = registry
		.list()
		.filter(|def| !FIELD_GROUPS.iter().any(|g| g.fields.contains(&def.key.as_str())))
		.collect();
	groups.push((OTHER_OPTIONS, other));

	groups.retain(|(_, defs)| !defs.is_empty());
	groups
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::register_settings;
	use crate::settings::SettingsRegistry;

	#[test]
	fn test_grouped_definitions_collects_leftovers() {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();
		let registry = registry.freeze();

		let groups = grouped_definitions(&registry);
		let titles: Vec<&str> = groups.iter().map(|(t, _)| *t).collect();
		assert_eq!(
			titles,
			vec![
				"General Options",
				"Mandrill Options",
				"Zapier Options",
				"Twilio Options",
				"Stripe Options",
				"Other Options"
			]
		);

		let (_, other) = &groups[5];
		let names: Vec<&str> = other.iter().map(|d| d.key.as_str()).collect();
		assert!(names.contains(&"LOCAL_SERVICE_REVIEW_TIME"));
		assert!(names.contains(&"PUSH_APPOINTMENT_RATING_TEXT"));
		assert!(!names.contains(&"CONCIERGE_EMAIL"));
	}

	#[test]
	fn test_every_setting_is_listed() {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();
		let registry = registry.freeze();

		let groups = grouped_definitions(&registry);
		for def in registry.list() {
			assert!(
				groups.iter().any(|(_, defs)| defs.iter().any(|d| d.key == def.key)),
				"{} is not listed",
				def.key
			);
		}
	}
}

// vim: ts=4
