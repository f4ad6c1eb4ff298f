//! Settings catalog
//!
//! The canonical, ordered table of configurable values with their defaults,
//! plus the allow-list of names visible to API clients. Changing either
//! requires a deployment.

use chrono::NaiveTime;

use crate::fieldsets::FIELD_GROUPS;
use crate::prelude::*;
use crate::settings::{SettingDefinition, SettingValue, SettingsRegistry};
use crate::validate::{BALANCE_PAIRS_SETTING, validate_balance_pairs};

/// Setting holding the recipients of the "no prices" notification
pub const NO_PRICES_NOTIFICATION_RECIPIENTS: &str = "NO_PRICES_NOTIFICATION_RECIPIENTS";

/// Settings that are publicly visible in the API call
pub const EXPOSED_SETTINGS: &[&str] = &[
	"FEATURE_CLEANING_ENABLED",
	"FEATURE_RECURRENT_SCHEDULING_ENABLED",
	"HOURS_PAY_BEFORE_APPOINTMENT",
	"PAYMENT_STRIPE_PUBLIC_KEY",
	"SPA_PAYMENT_URL",
	"FEATURE_GYM_ENABLED",
	"FEATURE_DOG_WALKING_ENABLED",
	"FEATURE_MASSAGE_ENABLED",
	"FEATURE_TRANSPORTATION_ENABLED",
	"CONCIERGE_EMAIL",
	"CONCIERGE_PHONE",
	"ADD_EVENT_TYPEFORM_URL",
];

pub fn is_exposed(key: &str) -> bool {
	EXPOSED_SETTINGS.contains(&key)
}

fn add(
	registry: &mut SettingsRegistry,
	key: &str,
	default: SettingValue,
	description: &str,
) -> ClResult<()> {
	registry.register(SettingDefinition::builder(key).description(description).default(default).build()?)
}

fn int(v: i64) -> SettingValue {
	SettingValue::Int(v)
}

fn float(v: f64) -> SettingValue {
	SettingValue::Float(v)
}

fn flag(v: bool) -> SettingValue {
	SettingValue::Bool(v)
}

fn text(v: &str) -> SettingValue {
	SettingValue::String(v.to_string())
}

fn time(hour: u32, min: u32) -> ClResult<SettingValue> {
	NaiveTime::from_hms_opt(hour, min, 0)
		.map(SettingValue::Time)
		.ok_or_else(|| Error::ConfigError(format!("Invalid time of day {}:{}", hour, min)))
}

/// Register the whole catalog, in presentation order
pub fn register_settings(registry: &mut SettingsRegistry) -> ClResult<()> {
	let r = registry;

	// Feature flags
	add(r, "FEATURE_CLEANING_ENABLED", flag(true), "Enable cleaning services")?;
	add(r, "FEATURE_RECURRENT_SCHEDULING_ENABLED", flag(true), "Enable recurrent scheduling")?;
	add(r, "FEATURE_GYM_ENABLED", flag(false), "Enable gym services")?;
	add(r, "FEATURE_DOG_WALKING_ENABLED", flag(true), "Enable dog walking services")?;
	add(r, "FEATURE_MASSAGE_ENABLED", flag(false), "Enable massage services")?;
	add(r, "FEATURE_TRANSPORTATION_ENABLED", flag(false), "Enable transportation services")?;
	add(r, "SPA_PAYMENT_URL", text(""), "Payment page of the resident portal")?;

	// Charging
	add(
		r,
		"HOURS_PAY_BEFORE_APPOINTMENT",
		int(24),
		"How many hours before NOW will the appointment be paid?",
	)?;
	add(
		r,
		"FIRST_CHARGING_ATTEMPT_HOURS",
		int(72),
		"Hours passed after purchase creating when we make a first charge attempt",
	)?;
	add(
		r,
		"SECOND_CHARGING_ATTEMPT_HOURS",
		int(120),
		"Hours passed after purchase creating when we make a second charge attempt",
	)?;

	add(r, "CONCIERGE_EMAIL", text("concierge@whatsmycut.com"), "Default whatsmycut concierge email")?;
	add(r, "CONCIERGE_PHONE", text("415-733-0284"), "Default whatsmycut concierge phone")?;
	add(
		r,
		"PM_INTEGRATION_RESIDENT_MODIFICATION_THRESHOLD",
		float(0.05),
		"Relative threshold for changing of deleted/new residents number",
	)?;
	// 604800 secs = 7 days
	add(r, "CELERY_TASK_RESULT_EXPIRES", int(604_800), "Expire after [seconds]")?;
	add(
		r,
		"PROPERTIES_2_WAY_SYNC",
		flag(false),
		"Enable Property post_save sync from Django to SF?",
	)?;
	add(
		r,
		"YARDI_API_LICENSE_KEY",
		text("license key"),
		"Using to connect YARDI while pm_integration",
	)?;
	add(
		r,
		"ADD_EVENT_TYPEFORM_URL",
		text("https://whatsmycut.typeform.com/to/gKLDRp"),
		"A TypeForm URL to request for a new event (Event)",
	)?;
	add(r, NO_PRICES_NOTIFICATION_RECIPIENTS, text(""), "A comma-separated list of emails")?;
	add(
		r,
		"REDIRECTION_AFTER_AUTHORISE_CONNECT_ACCOUNT",
		text("https://dashboard.stripe.com"),
		"Redirection URL after authorize connect account",
	)?;
	add(
		r,
		"DAYS_AVAILABLE_BOOKING",
		int(3),
		"How many days from NOW will the appointment be available to book",
	)?;
	add(
		r,
		"DAYS_BETWEEN_ACTIVATION_EMAILS",
		text("4,4,4"),
		"How many days between activation series emails the delay is. A comma-separated list of \
		 three integers where the first one is the amount of days between the 1st email and the \
		 2nd; next one is between the 2nd and the 3rd; etc..",
	)?;
	add(
		r,
		"ENABLE_ACTIVATION_EMAILS",
		flag(false),
		"When checked, send resident activation series emails",
	)?;
	add(
		r,
		"DAYS_UPCOMING_CLEANING_SUBSCRIPTION_NOTIFICATION",
		int(2),
		"How many days before coming subscription will a notification be sent",
	)?;
	add(
		r,
		"DAYS_UPCOMING_DOG_WALKING_SUBSCRIPTION_NOTIFICATION",
		int(2),
		"How many days before coming subscription will a notification be sent",
	)?;

	// Zapier
	add(r, "ZAPIER_NEW_SUBSCRIBER_URL", text(""), "Zapier url to catch request with new subscriber")?;
	add(r, "ZAPIER_NEW_REVIEW_URL", text(""), "Zapier url to catch request with new review info")?;

	// Mandrill templates
	add(
		r,
		"UPCOMING_CLEANING_RESIDENT_TEMPLATE",
		text("upcoming_cleaning_resident"),
		"Mandrill template for upcoming_cleaning_subscription_notification",
	)?;
	add(
		r,
		"UPCOMING_DOG_WALKING_RESIDENT_TEMPLATE",
		text("upcoming_dog_walking_resident"),
		"Mandrill template for upcoming_dog_walking_subscription_notification",
	)?;
	add(
		r,
		"UPCOMING_CLEANING_PROPERTY_MANAGER_TEMPLATE",
		text("upcoming_cleaning_property_manager"),
		"Mandrill template for upcoming_cleaning_subscription_notification",
	)?;
	add(
		r,
		"UPCOMING_DOG_WALKING_PROPERTY_MANAGER_TEMPLATE",
		text("upcoming_dog_walking_property_manager"),
		"Mandrill template for upcoming_dog_walking_subscription_notification",
	)?;
	add(
		r,
		"UPCOMING_CLEANING_SERVICE_PROVIDER_TEMPLATE",
		text("upcoming_cleaning_service_provider"),
		"Mandrill template for upcoming_cleaning_subscription_notification",
	)?;
	add(
		r,
		"UPCOMING_DOG_WALKING_SERVICE_PROVIDER_TEMPLATE",
		text("upcoming_dog_walking_service_provider"),
		"Mandrill template for upcoming_cleaning_subscription_notification",
	)?;
	add(
		r,
		"NEW_SUBSCRIBERS_TEMPLATE",
		text("new_subscribers"),
		"Mandrill template for new subscribers notification",
	)?;
	add(
		r,
		"CLEANING_SUBSCRIPTION_NOTIFICATION_TEMPLATE",
		text("cleaning_subscription_notification"),
		"Mandrill template for new cleaning subscription to admin",
	)?;
	add(
		r,
		"DOG_WALKING_SUBSCRIPTION_NOTIFICATION_TEMPLATE",
		text("dog_walking_subscription_notification"),
		"Mandrill template for new dog walking subscription to admin",
	)?;
	add(
		r,
		"PROVIDER_NEW_MEET_AND_GREET_TEMPLATE",
		text("provider_new_meet_and_greet"),
		"Mandrill template for new meet and greets to providers",
	)?;
	add(
		r,
		"RESIDENT_NEW_MEET_AND_GREET_TEMPLATE",
		text("resident_new_meet_and_greet"),
		"Mandrill template for new meet and greets to resident",
	)?;
	add(
		r,
		"USER_REPORT_ISSUE_TEMPLATE",
		text("user_reported_issue"),
		"Mandrill template for user report issue",
	)?;
	add(r, "PASSWORD_RESET_TEMPLATE", text("password_reset"), "Mandrill template for password reset")?;
	add(
		r,
		"NO_PRICES_NOTIFICATION_TEMPLATE",
		text("no_prices_notification"),
		"Mandrill template for no prices notification",
	)?;
	add(
		r,
		"RESIDENT_ONBOARDING_TEMPLATE",
		text("Plaint Text Email 1"),
		"Mandrill template for resident onboarding email",
	)?;
	add(
		r,
		"SUB_PAR_REVIEW_TEMPLATE",
		text("sub_par_review"),
		"Mandrill template for subscription review",
	)?;
	add(
		r,
		"MANDRILL_ERROR_NOTIFICATION_TEMPLATE",
		text("error-notification"),
		"mandrill template name for an error notification",
	)?;
	add(r, "STORE_INTEGRATION_DATA", flag(true), "Enable to store the integration data?")?;
	add(
		r,
		"ZAPIER_CANCELLED_SUBSCRIPTION_URL",
		text(""),
		"Zapier url to catch request with cancelled subscriptions info",
	)?;
	add(
		r,
		"ZAPIER_MOVED_IN_RESIDENT_URL",
		text(""),
		"Zapier url to catch request with moved in resident info",
	)?;
	add(
		r,
		"SUBSCRIBERS_DIGEST_TEMPLATE",
		text("subscribers_digest"),
		"Mandrill template for subscribers digest",
	)?;
	add(
		r,
		"RESIDENT_SKIPPING_SERVICE_TEMPLATE",
		text("resident_skipping_service"),
		"Mandrill template for Resident Skipping Service",
	)?;
	add(r, "RESIDENT_SKIPPING_SERVICE_CC", text(""), "Extra emails to send a copy to")?;
	add(
		r,
		"HOURS_PERIOD_SUBSCRIPTION_DIGEST",
		int(168),
		"Time period in hours for subscription digest",
	)?;

	// Twilio and push
	add(
		r,
		"LOCAL_SERVICE_REMINDER_TIME",
		time(15, 30)?,
		"User local time to get an SMS service reminder. If the minutes change, you need to \
		 change the task execution time.",
	)?;
	add(
		r,
		"LOCAL_SERVICE_REVIEW_TIME",
		time(19, 0)?,
		"User local time 7pm to get a push notification to review a booking.",
	)?;
	add(
		r,
		"SMS_CLEANING_REMINDER_TEXT",
		text(
			"Hi {resident} - This is Maddie with whatsmycut. Yay! Tomorrow is a cleaning day. \
			 Please make sure you’re prepared for {provider}.\nThe cleaners need access to \
			 countertops and floors. Please put away personal belongings.\nClose all doors to \
			 rooms you do not wish to be cleaned.\nPlease ensure pets are safely secured. If left \
			 out, we may have to leave your unit before the clean is completed. \nPlease place \
			 trash and recycling in containers. Cleaners will not dispose of anything not already \
			 in the trash.\nPlease put dishes in the dishwasher so the sink is accessible.\nClick \
			 here to see what’s not included: https://bit.ly/2IYzW50",
		),
		"",
	)?;
	add(
		r,
		"SMS_DOG_WALKING_REMINDER_TEXT",
		text(
			"Hi {resident} - This is Maddie with whatsmycut. Yay! Tomorrow is {dog_name}’s walk. \
			 Please make sure you’re prepared for {provider}.",
		),
		"",
	)?;
	add(
		r,
		"PUSH_APPOINTMENT_REMINDER_TEXT",
		text("Hi {resident} - This is a reminder of your upcoming {provider} {type} booking tomorrow"),
		"",
	)?;
	add(
		r,
		"PUSH_APPOINTMENT_RATING_TEXT",
		text("Hi {resident} - Tell us how {provider} treated your apartment!"),
		"",
	)?;
	add(
		r,
		"SMS_SERVICE_REMINDER_PHONE_NUMBER",
		text("+16507508081"),
		"Outbound Twilio phone number with SMS capabilities",
	)?;
	add(
		r,
		"LOCAL_CLEANING_POST_EVENT_FEEDBACK_TIME",
		time(19, 0)?,
		"User local time to get an SMS cleaning feedback invitation. If the minutes change, you \
		 need to change the task execution time.",
	)?;
	add(
		r,
		"SMS_CLEANING_POST_EVENT_FEEDBACK_TEXT",
		text("We see you had a cleaning today. Let us know how {provider} did. https://bit.ly/2KGUDWl"),
		"",
	)?;
	add(
		r,
		"SMS_DOG_WALKING_POST_EVENT_FEEDBACK_TEXT",
		text(
			"We see you had a dog walk today. Let us know how {provider} did. Please rate them \
			 0 - 10. :)",
		),
		"",
	)?;
	add(
		r,
		"SMS_CLEANING_POST_EVENT_FEEDBACK_PHONE_NUMBER",
		text("+16503341449"),
		"Outbound Twilio phone number with SMS capabilities",
	)?;
	add(
		r,
		"SKIPPING_EVENT_PHONE_NUMBER",
		text("+16502723798"),
		"Outbound Twilio phone number with SMS capabilities conntected to the Skipping Event flow",
	)?;
	add(
		r,
		"SKIPPING_EVENT_FLOW_ID",
		text("FWd34b2948131d94bab85d408424fca3af"),
		"\"Skipping Event\" Twilio flow id",
	)?;

	// Stripe
	add(
		r,
		"STRIPE_DOG_WALKING_SUBSCRIPTION_PRODUCT_CODE",
		text(""),
		"Stripe product code to set for all DW subscriptions",
	)?;
	add(
		r,
		"STRIPE_30MIN_DOG_WALKING_PRODUCT_CODE",
		text(""),
		"Stripe product code to set for all 30 min single dog walks",
	)?;
	add(
		r,
		"STRIPE_60MIN_DOG_WALKING_PRODUCT_CODE",
		text(""),
		"Stripe product code to set for all 60 min single dog walks",
	)?;
	add(
		r,
		"STRIPE_INITIAL_CUSTOMER_BALANCE",
		int(0),
		"Automatically add $ to every new Stripe customer (unless his email is specified in \
		 STRIPE_EXTRA_CUSTOMER_BALANCE_PER_EMAIL) used to pay for whatsmycut services",
	)?;
	r.register(
		SettingDefinition::builder(BALANCE_PAIRS_SETTING)
			.description(
				"A list of comma separated {email}={amount$} pairs.\nEXAMPLE: a@a.com=5$, \
				 b@b.com=15$\nThis dollar amount will be added to Stripe upon next resident \
				 booking. The resident can be either a new customer or existing one. \
				 Amounts are limited to 9223372036854775807$",
			)
			.default(text(""))
			.validator(|v| match v {
				SettingValue::String(s) => validate_balance_pairs(s).map(|_| ()),
				_ => Err(Error::ValidationError("Expected a string".into())),
			})
			.build()?,
	)?;

	Ok(())
}

/// Check the static tables against each other
///
/// Every exposed name must be a registered setting or one of
/// `static_names`; every field-group member must be registered.
pub fn check_catalog(
	registry: &crate::settings::FrozenSettingsRegistry,
	static_names: &[&str],
) -> ClResult<()> {
	for name in EXPOSED_SETTINGS {
		if !registry.contains(name) && !static_names.contains(name) {
			return Err(Error::ConfigError(format!("Exposed setting '{}' is not defined", name)));
		}
	}
	for group in FIELD_GROUPS {
		for name in group.fields {
			if !registry.contains(name) {
				return Err(Error::ConfigError(format!(
					"Setting '{}' of field group '{}' is not defined",
					name, group.title
				)));
			}
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::SettingType;

	fn registry() -> crate::settings::FrozenSettingsRegistry {
		let mut registry = SettingsRegistry::new();
		register_settings(&mut registry).unwrap();
		registry.freeze()
	}

	#[test]
	fn test_catalog_is_consistent() {
		let registry = registry();
		assert!(check_catalog(&registry, &["PAYMENT_STRIPE_PUBLIC_KEY"]).is_ok());
	}

	#[test]
	fn test_catalog_requires_static_names() {
		let registry = registry();
		let err = check_catalog(&registry, &[]).unwrap_err();
		assert!(err.to_string().contains("PAYMENT_STRIPE_PUBLIC_KEY"));
	}

	#[test]
	fn test_catalog_declared_types() {
		let registry = registry();
		assert_eq!(registry.type_of("HOURS_PAY_BEFORE_APPOINTMENT"), SettingType::Int);
		assert_eq!(
			registry.type_of("PM_INTEGRATION_RESIDENT_MODIFICATION_THRESHOLD"),
			SettingType::Float
		);
		assert_eq!(registry.type_of("FEATURE_CLEANING_ENABLED"), SettingType::Bool);
		assert_eq!(registry.type_of("LOCAL_SERVICE_REMINDER_TIME"), SettingType::Time);
		assert_eq!(registry.type_of("CONCIERGE_EMAIL"), SettingType::Str);
	}

	#[test]
	fn test_catalog_order_starts_with_feature_flags() {
		let registry = registry();
		let first = registry.list().next().map(|d| d.key.as_str());
		assert_eq!(first, Some("FEATURE_CLEANING_ENABLED"));
	}

	#[test]
	fn test_balance_pairs_setting_is_validated() {
		let registry = registry();
		let def = registry.get(BALANCE_PAIRS_SETTING).unwrap();
		assert!(def.validate(&text("a@a.com=5$")).is_ok());
		assert!(def.validate(&text("a@a.com=5$, not-a-pair, b@b.com=abc")).is_err());
	}
}

// vim: ts=4
