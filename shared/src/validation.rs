//! Input validation functions
//!
//! Format checks for account fields. Checks never touch the store; they only
//! decide whether a request is well-formed, and report every failing field so
//! the client can show all problems at once.

use crate::types::{RegisterRequest, UpdateUserRequest};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Minimum username length, in characters
pub const MIN_USERNAME_LEN: usize = 5;

/// Validate username length
pub fn validate_username_length(username: &str) -> Result<(), String> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(format!(
            "Username must be at least {} characters long",
            MIN_USERNAME_LEN
        ));
    }
    Ok(())
}

/// Validate username characters (ASCII letters and digits only)
pub fn validate_username_charset(username: &str) -> Result<(), String> {
    if username.is_empty() || !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Username contains non alphanumeric characters - not allowed".to_string());
    }
    Ok(())
}

/// Validate that a password was supplied
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

/// Validate email format
///
/// On top of the HTML5 address grammar the domain must carry a top-level
/// part (`user@host` is rejected).
pub fn validate_email(email: &str) -> Result<(), String> {
    let has_tld = email
        .rsplit_once('@')
        .map(|(_, domain)| {
            domain
                .rsplit_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        })
        .unwrap_or(false);

    if !has_tld || !email.validate_email() {
        return Err("Email does not appear to be valid".to_string());
    }
    Ok(())
}

/// Parse a birthday given as `YYYY-MM-DD` or as an RFC 3339 timestamp
pub fn parse_birthday(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| "Birthday must be a date in YYYY-MM-DD format".to_string())
}

/// Map technical field names to the labels clients see in error lists
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "username" => "Username",
        "password" => "Password",
        "email" => "Email",
        "birthday" => "Birthday",
        _ => field_name,
    }
}

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: get_field_display_label(field).to_string(),
            message: message.into(),
        }
    }
}

/// Collects field failures in check order
#[derive(Debug, Default)]
struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.0.push(FieldError::new(field, message));
        }
    }

    fn check_username(&mut self, username: &str) {
        self.check("username", validate_username_length(username));
        self.check("username", validate_username_charset(username));
    }

    fn parse_birthday(&mut self, raw: Option<&str>) -> Option<NaiveDate> {
        match raw.map(parse_birthday) {
            Some(Ok(date)) => Some(date),
            Some(Err(message)) => {
                self.0.push(FieldError::new("birthday", message));
                None
            }
            None => None,
        }
    }

    fn finish<T>(self, value: T) -> Result<T, Vec<FieldError>> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self.0)
        }
    }
}

/// Validate a registration request
///
/// Returns the parsed birthday on success, or every failing field check.
pub fn validate_registration(req: &RegisterRequest) -> Result<Option<NaiveDate>, Vec<FieldError>> {
    let mut errors = FieldErrors::default();
    errors.check_username(&req.username);
    errors.check("password", validate_password(&req.password));
    errors.check("email", validate_email(&req.email));
    let birthday = errors.parse_birthday(req.birthday.as_deref());
    errors.finish(birthday)
}

/// Validate the supplied fields of an update request
///
/// Absent fields are not checked. Returns the parsed birthday, if one was
/// supplied.
pub fn validate_update(req: &UpdateUserRequest) -> Result<Option<NaiveDate>, Vec<FieldError>> {
    let mut errors = FieldErrors::default();
    if let Some(username) = &req.username {
        errors.check_username(username);
    }
    if let Some(password) = &req.password {
        errors.check("password", validate_password(password));
    }
    if let Some(email) = &req.email {
        errors.check("email", validate_email(email));
    }
    let birthday = errors.parse_birthday(req.birthday.as_deref());
    errors.finish(birthday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn registration(username: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            birthday: None,
        }
    }

    #[rstest]
    #[case("test@example.com", true)]
    #[case("user.name@domain.co.uk", true)]
    #[case("", false)]
    #[case("invalid", false)]
    #[case("no@dot", false)]
    #[case("spaces in@email.com", false)]
    #[case("@example.com", false)]
    fn test_validate_email(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email).is_ok(), valid, "email: {email:?}");
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username_length("alice1").is_ok());
        assert!(validate_username_length("abcde").is_ok());
        assert!(validate_username_length("abcd").is_err());
        assert!(validate_username_charset("alice1").is_ok());
        assert!(validate_username_charset("alice_1").is_err());
        assert!(validate_username_charset("alice 1").is_err());
        assert!(validate_username_charset("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("x").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_parse_birthday() {
        let expected = NaiveDate::from_ymd_opt(1990, 4, 12).unwrap();
        assert_eq!(parse_birthday("1990-04-12").unwrap(), expected);
        assert_eq!(parse_birthday("1990-04-12T00:00:00Z").unwrap(), expected);
        assert!(parse_birthday("12/04/1990").is_err());
        assert!(parse_birthday("1990-13-01").is_err());
    }

    #[test]
    fn test_valid_registration_passes() {
        let mut req = registration("alice1", "secret", "alice@example.com");
        req.birthday = Some("1990-04-12".to_string());

        let birthday = validate_registration(&req).unwrap();
        assert_eq!(birthday, NaiveDate::from_ymd_opt(1990, 4, 12));
    }

    #[test]
    fn test_registration_reports_every_failing_field() {
        let mut req = registration("ab!", "", "nope");
        req.birthday = Some("yesterday".to_string());

        let errors = validate_registration(&req).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["Username", "Username", "Password", "Email", "Birthday"]
        );
    }

    #[test]
    fn test_update_checks_only_supplied_fields() {
        let req = UpdateUserRequest {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_update(&req), Ok(None));

        let req = UpdateUserRequest {
            username: Some("bob".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };
        let errors = validate_update(&req).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "Username"));
        assert!(errors.iter().any(|e| e.field == "Password"));
    }

    #[test]
    fn test_field_error_uses_display_label() {
        let error = FieldError::new("email", "Email does not appear to be valid");
        assert_eq!(error.field, "Email");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every username shorter than the minimum is rejected with a
        /// field error naming Username.
        #[test]
        fn prop_short_username_names_username_field(username in "[a-zA-Z0-9]{0,4}") {
            let req = registration(&username, "secret", "alice@example.com");
            let errors = validate_registration(&req).unwrap_err();
            prop_assert!(errors.iter().any(|e| e.field == "Username"));
        }

        #[test]
        fn prop_alphanumeric_usernames_accepted(username in "[a-zA-Z0-9]{5,30}") {
            let req = registration(&username, "secret", "alice@example.com");
            prop_assert!(validate_registration(&req).is_ok());
        }
    }
}
