//! Validators for admin-authored setting values
//!
//! Two flavours of the same comma-separated formats: strict validators that
//! reject the first offending segment (used when an administrator saves a
//! value) and tolerant parsers that drop bad entries (used by consumers at
//! the point of use).

use regex::Regex;
use std::num::{IntErrorKind, ParseIntError};
use std::sync::LazyLock;

use crate::prelude::*;

// Local part: dot-atom or quoted string
static EMAIL_USER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(concat!(
		r#"(?i)(^[-!#$%&'*+/=?^_`{}|~0-9A-Z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Z]+)*$"#,
		r#"|^"([\x01-\x08\x0b\x0c\x0e-\x1f!#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*"$)"#,
	))
	.inspect_err(|err| error!("Invalid email user regex: {}", err))
	.ok()
});

// Domain: labels of up to 63 chars, TLD of at least two chars not ending in '-'
static EMAIL_DOMAIN_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^((?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+)(?:[A-Z0-9-]{1,62}[A-Z0-9])$",
	)
	.inspect_err(|err| error!("Invalid email domain regex: {}", err))
	.ok()
});

static EMAIL_LITERAL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(r"^\[(25[0-5]|2[0-4]\d|1?\d?\d)(\.(25[0-5]|2[0-4]\d|1?\d?\d)){3}\]$")
		.inspect_err(|err| error!("Invalid email literal regex: {}", err))
		.ok()
});

const DOMAIN_ALLOWLIST: [&str; 1] = ["localhost"];

fn re_match(re: &LazyLock<Option<Regex>>, s: &str) -> bool {
	re.as_ref().is_some_and(|re| re.is_match(s))
}

/// Syntactic email check
pub fn is_valid_email(email: &str) -> bool {
	let Some((user, domain)) = email.rsplit_once('@') else {
		return false;
	};
	if user.is_empty() || !re_match(&EMAIL_USER_RE, user) {
		return false;
	}
	if DOMAIN_ALLOWLIST.contains(&domain) {
		return true;
	}
	re_match(&EMAIL_DOMAIN_RE, domain) || re_match(&EMAIL_LITERAL_RE, domain)
}

/// Setting validated by [`validate_balance_pairs`]
pub const BALANCE_PAIRS_SETTING: &str = "STRIPE_EXTRA_CUSTOMER_BALANCE_PER_EMAIL";

/// One `email=amount$` segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancePair {
	pub email: String,
	pub amount: i64,
}

/// Largest amount a pair may carry, in either direction
pub const MAX_BALANCE_AMOUNT: i64 = i64::MAX;

fn parse_amount(raw: &str) -> Result<i64, ParseIntError> {
	raw.trim().trim_end_matches('$').trim_end().parse()
}

/// Strict check of a comma-separated `email=amount$` list
///
/// Scans left to right and fails on the first offending segment: not exactly
/// one `=`, an invalid email, or an amount that is not an integer once the
/// trailing `$` is removed. Amounts beyond [`MAX_BALANCE_AMOUNT`] are
/// reported as out of range. Empty segments are ignored.
pub fn validate_balance_pairs(raw: &str) -> ClResult<Vec<BalancePair>> {
	let mut pairs = Vec::new();
	for segment in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
		let parts: Vec<&str> = segment.split('=').collect();
		let [email, amount] = parts.as_slice() else {
			return Err(Error::ValidationError(format!(
				"Invalid {{email}}={{amount$}} pair of values in {}: {}",
				BALANCE_PAIRS_SETTING, segment
			)));
		};
		let email = email.trim();
		if !is_valid_email(email) {
			return Err(Error::ValidationError(format!(
				"Invalid \"email\" in {}: {}",
				BALANCE_PAIRS_SETTING, email
			)));
		}
		let amount = match parse_amount(amount) {
			Ok(amount) => amount,
			Err(err)
				if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
			{
				return Err(Error::ValidationError(format!(
					"\"amount\" out of range in {} (at most {}): {}",
					BALANCE_PAIRS_SETTING,
					MAX_BALANCE_AMOUNT,
					amount.trim()
				)));
			}
			Err(_) => {
				return Err(Error::ValidationError(format!(
					"Invalid \"amount\" in {}: {}",
					BALANCE_PAIRS_SETTING,
					amount.trim()
				)));
			}
		};
		pairs.push(BalancePair { email: email.to_string(), amount });
	}
	Ok(pairs)
}

/// Tolerant parse of the same list: bad segments are dropped
pub fn parse_balance_pairs(raw: &str) -> Vec<BalancePair> {
	raw.split(',')
		.filter_map(|segment| {
			let (email, amount) = segment.trim().split_once('=')?;
			if amount.contains('=') {
				return None;
			}
			let email = email.trim();
			if !is_valid_email(email) {
				return None;
			}
			Some(BalancePair { email: email.to_string(), amount: parse_amount(amount).ok()? })
		})
		.collect()
}

/// Comma-separated email list; invalid entries are silently dropped
pub fn parse_email_list(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|email| is_valid_email(email))
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_valid_emails() {
		for email in [
			"a@a.com",
			"concierge@whatsmycut.com",
			"first.last+tag@sub.example.co",
			"user@localhost",
			"\"quoted.user\"@example.com",
			"x@[127.0.0.1]",
		] {
			assert!(is_valid_email(email), "{} should be valid", email);
		}
	}

	#[test]
	fn test_invalid_emails() {
		for email in [
			"",
			"bad-email",
			"@example.com",
			"user@",
			"user@example",
			"user@-example.com",
			"user@example.c-",
			"us er@example.com",
			"user..dots@example.com",
		] {
			assert!(!is_valid_email(email), "{} should be invalid", email);
		}
	}

	#[test]
	fn test_balance_pairs_accepts_currency_suffix() {
		let pairs = validate_balance_pairs("a@a.com=5$, b@b.com=15$").unwrap();
		assert_eq!(
			pairs,
			vec![
				BalancePair { email: "a@a.com".into(), amount: 5 },
				BalancePair { email: "b@b.com".into(), amount: 15 },
			]
		);
	}

	#[test]
	fn test_balance_pairs_ignores_empty_segments() {
		assert!(validate_balance_pairs("").unwrap().is_empty());
		assert_eq!(validate_balance_pairs(",a@a.com=1,,").unwrap().len(), 1);
	}

	#[test]
	fn test_balance_pairs_reports_first_offending_segment() {
		let err = validate_balance_pairs("a@a.com=5$, not-a-pair, b@b.com=abc").unwrap_err();
		assert!(matches!(err, Error::ValidationError(_)));
		let msg = err.to_string();
		assert!(msg.starts_with("Invalid {email}={amount$} pair"), "{}", msg);
		assert!(msg.ends_with(": not-a-pair"), "{}", msg);
		assert!(!msg.contains("abc"));
	}

	#[test]
	fn test_balance_pairs_invalid_email() {
		let err = validate_balance_pairs("a@a.com=5$, nobody=3").unwrap_err();
		assert_eq!(
			err.to_string(),
			"Invalid \"email\" in STRIPE_EXTRA_CUSTOMER_BALANCE_PER_EMAIL: nobody"
		);
	}

	#[test]
	fn test_balance_pairs_invalid_amount() {
		let err = validate_balance_pairs("b@b.com=abc").unwrap_err();
		assert_eq!(
			err.to_string(),
			"Invalid \"amount\" in STRIPE_EXTRA_CUSTOMER_BALANCE_PER_EMAIL: abc"
		);
	}

	#[test]
	fn test_balance_pairs_amount_out_of_range() {
		let err = validate_balance_pairs("a@a.com=99999999999999999999$").unwrap_err();
		let msg = err.to_string();
		assert!(msg.starts_with("\"amount\" out of range in"), "{}", msg);
		assert!(msg.ends_with(": 99999999999999999999$"), "{}", msg);

		let pairs = validate_balance_pairs("a@a.com=9223372036854775807$").unwrap();
		assert_eq!(pairs[0].amount, MAX_BALANCE_AMOUNT);
		assert!(parse_balance_pairs("a@a.com=99999999999999999999").is_empty());
	}

	#[test]
	fn test_balance_pairs_rejects_double_equals() {
		assert!(validate_balance_pairs("a@a.com=5=6").is_err());
	}

	#[test]
	fn test_parse_balance_pairs_drops_bad_entries() {
		let pairs = parse_balance_pairs("a@a.com=5$, not-a-pair, b@b.com=abc, c@c.com=7");
		let emails: Vec<&str> = pairs.iter().map(|p| p.email.as_str()).collect();
		assert_eq!(emails, vec!["a@a.com", "c@c.com"]);
	}

	#[test]
	fn test_parse_email_list() {
		assert_eq!(
			parse_email_list("a@a.com, bad-email, b@b.com"),
			vec!["a@a.com".to_string(), "b@b.com".to_string()]
		);
		assert!(parse_email_list("").is_empty());
	}
}

// vim: ts=4
