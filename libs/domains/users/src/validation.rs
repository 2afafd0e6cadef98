//! Field rules for user records.
//!
//! The rules themselves run through `validator` derives on [`CreateUser`] and
//! [`UpdateUser`]. This module supplies the custom checks those derives call
//! and turns the resulting [`ValidationErrors`] into a single message: the
//! first failing field in the order firstName, lastName, email, DOB.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserPatch};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 30;
pub const MIN_DOMAIN_SEGMENTS: usize = 2;

/// Wire format of `DOB`
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Regex pattern for ASCII letters and digits only
static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// (struct field, wire label) in reporting order
const FIELD_ORDER: [(&str, &str); 4] = [
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("email", "email"),
    ("dob", "DOB"),
];

/// Custom validator for first and last names
pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("empty"));
    }
    if !ALPHANUMERIC.is_match(name) {
        return Err(ValidationError::new("alphanum"));
    }
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name.len()) {
        return Err(ValidationError::new("length"));
    }
    Ok(())
}

/// Custom validator for emails: standard grammar plus at least two domain labels
pub(crate) fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("empty"));
    }
    if !email.validate_email() {
        return Err(ValidationError::new("email"));
    }

    let segments = email
        .rsplit_once('@')
        .map(|(_, domain)| domain.split('.').filter(|label| !label.is_empty()).count())
        .unwrap_or(0);
    if segments < MIN_DOMAIN_SEGMENTS {
        return Err(ValidationError::new("email_domain_segments"));
    }
    Ok(())
}

/// Custom validator for `YYYY-MM-DD` calendar dates
pub(crate) fn validate_iso_date(date: &str) -> Result<(), ValidationError> {
    if date.is_empty() {
        return Err(ValidationError::new("empty"));
    }
    if parse_dob(date).is_none() {
        return Err(ValidationError::new("iso_date"));
    }
    Ok(())
}

fn parse_dob(date: &str) -> Option<NaiveDate> {
    if !ISO_DATE.is_match(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, DOB_FORMAT).ok()
}

/// Human-readable message for a failed rule on `label`.
fn render(label: &str, code: &str) -> String {
    match code {
        "required" => format!("\"{label}\" is required"),
        "empty" => format!("\"{label}\" is not allowed to be empty"),
        "alphanum" => format!("\"{label}\" must only contain alpha-numeric characters"),
        "length" => format!(
            "\"{label}\" length must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
        ),
        "email" => format!("\"{label}\" must be a valid email"),
        "email_domain_segments" => {
            format!("\"{label}\" must have at least {MIN_DOMAIN_SEGMENTS} domain segments")
        }
        "iso_date" => format!("\"{label}\" must be in ISO 8601 date format (YYYY-MM-DD)"),
        "immutable" => format!("\"{label}\" cannot be changed"),
        _ => format!("\"{label}\" is invalid"),
    }
}

/// Message of the first failing field, in reporting order.
pub fn first_error(errors: &ValidationErrors) -> Option<String> {
    let by_field = errors.field_errors();

    FIELD_ORDER.iter().find_map(|(field, label)| {
        by_field
            .get(*field)
            .or_else(|| by_field.get(*label))
            .and_then(|errs| errs.first())
            .map(|err| render(label, &err.code))
    })
}

fn check<T: Validate>(input: &T) -> UserResult<()> {
    input.validate().map_err(|errors| {
        UserError::Validation(
            first_error(&errors).unwrap_or_else(|| "Invalid user record".to_string()),
        )
    })
}

fn required<T>(value: Option<T>, label: &str) -> UserResult<T> {
    value.ok_or_else(|| UserError::Validation(render(label, "required")))
}

fn dob_of(date: &str) -> UserResult<NaiveDate> {
    parse_dob(date).ok_or_else(|| UserError::Validation(render("DOB", "iso_date")))
}

/// Validate a POST body and build the record it describes.
pub fn validate_new_user(input: CreateUser) -> UserResult<User> {
    check(&input)?;

    Ok(User {
        first_name: required(input.first_name, "firstName")?,
        last_name: required(input.last_name, "lastName")?,
        email: required(input.email, "email")?,
        dob: dob_of(&required(input.dob, "DOB")?)?,
    })
}

/// Validate a PUT body addressed to `email` and extract the changes.
///
/// A body `email` is accepted only when it names the same record.
pub fn validate_patch(email: &str, input: UpdateUser) -> UserResult<UserPatch> {
    let changes_email = input
        .email
        .as_deref()
        .is_some_and(|body_email| !body_email.eq_ignore_ascii_case(email));

    if let Err(mut errors) = input.validate() {
        if changes_email {
            errors.add("email", ValidationError::new("immutable"));
        }
        return Err(UserError::Validation(
            first_error(&errors).unwrap_or_else(|| "Invalid user record".to_string()),
        ));
    }
    if changes_email {
        return Err(UserError::Validation(render("email", "immutable")));
    }

    Ok(UserPatch {
        first_name: input.first_name,
        last_name: input.last_name,
        dob: input.dob.as_deref().map(dob_of).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CreateUser {
        CreateUser {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@mail.example.com".to_string()),
            dob: Some("1815-12-10".to_string()),
        }
    }

    fn message_of(result: UserResult<User>) -> String {
        match result {
            Err(UserError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_input_builds_record() {
        let user = validate_new_user(valid_input()).unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.dob, NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());
    }

    #[test]
    fn test_short_first_name_is_rejected() {
        let input = CreateUser {
            first_name: Some("Jo".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("a@b.com".to_string()),
            dob: Some("1990-01-01".to_string()),
        };
        assert_eq!(
            message_of(validate_new_user(input)),
            "\"firstName\" length must be between 3 and 30 characters"
        );
    }

    #[test]
    fn test_only_first_failing_field_is_reported() {
        let input = CreateUser {
            first_name: None,
            last_name: Some("x!".to_string()),
            email: Some("nope".to_string()),
            dob: Some("yesterday".to_string()),
        };
        assert_eq!(message_of(validate_new_user(input)), "\"firstName\" is required");

        let input = CreateUser {
            last_name: Some("o'brien".to_string()),
            email: Some("nope".to_string()),
            ..valid_input()
        };
        assert_eq!(
            message_of(validate_new_user(input)),
            "\"lastName\" must only contain alpha-numeric characters"
        );
    }

    #[test]
    fn test_name_rules() {
        assert!(validate_name("abc").is_ok());
        assert!(validate_name(&"a".repeat(30)).is_ok());
        assert_eq!(validate_name(&"a".repeat(31)).unwrap_err().code, "length");
        assert_eq!(validate_name("ab").unwrap_err().code, "length");
        assert_eq!(validate_name("a b c").unwrap_err().code, "alphanum");
        assert_eq!(validate_name("").unwrap_err().code, "empty");
    }

    #[test]
    fn test_email_needs_two_domain_segments() {
        assert!(validate_email_address("user@mail.example.com").is_ok());
        assert!(validate_email_address("a@b.com").is_ok());
        assert_eq!(
            validate_email_address("user@localhost").unwrap_err().code,
            "email_domain_segments"
        );
        assert_eq!(validate_email_address("not-an-email").unwrap_err().code, "email");
    }

    #[test]
    fn test_dob_must_be_calendar_date() {
        assert!(validate_iso_date("2000-02-29").is_ok());
        assert_eq!(validate_iso_date("2001-02-29").unwrap_err().code, "iso_date");
        assert_eq!(validate_iso_date("22-01-1990").unwrap_err().code, "iso_date");
        assert_eq!(validate_iso_date("1990-1-22").unwrap_err().code, "iso_date");

        let input = CreateUser {
            dob: Some("22-01-1990".to_string()),
            ..valid_input()
        };
        assert_eq!(
            message_of(validate_new_user(input)),
            "\"DOB\" must be in ISO 8601 date format (YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_patch_keeps_only_supplied_fields() {
        let patch = validate_patch(
            "ada@mail.example.com",
            UpdateUser {
                dob: Some("1816-01-01".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(patch.first_name, None);
        assert_eq!(patch.dob, NaiveDate::from_ymd_opt(1816, 1, 1));
    }

    #[test]
    fn test_patch_cannot_change_email() {
        let same = UpdateUser {
            email: Some("ADA@mail.example.com".to_string()),
            ..Default::default()
        };
        assert!(validate_patch("ada@mail.example.com", same).is_ok());

        let other = UpdateUser {
            email: Some("eve@mail.example.com".to_string()),
            ..Default::default()
        };
        match validate_patch("ada@mail.example.com", other) {
            Err(UserError::Validation(msg)) => assert_eq!(msg, "\"email\" cannot be changed"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_patch_reports_earlier_field_before_email_change() {
        let input = UpdateUser {
            first_name: Some("J".to_string()),
            email: Some("eve@mail.example.com".to_string()),
            ..Default::default()
        };
        match validate_patch("ada@mail.example.com", input) {
            Err(UserError::Validation(msg)) => {
                assert_eq!(msg, "\"firstName\" length must be between 3 and 30 characters")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
