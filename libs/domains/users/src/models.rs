use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_email_address, validate_iso_date, validate_name};

/// User record - the unit stored in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Given name, alphanumeric, 3-30 characters
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Family name, alphanumeric, 3-30 characters
    #[serde(rename = "lastName")]
    pub last_name: String,
    /// Unique key of the record
    pub email: String,
    /// Date of birth, rendered as `YYYY-MM-DD`
    #[serde(rename = "DOB")]
    pub dob: NaiveDate,
}

/// DTO for creating a new user
///
/// Fields are optional at the type level so that a missing field is reported
/// as `"<field>" is required` instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[serde(rename = "firstName")]
    #[validate(required, custom(function = "validate_name"))]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    #[validate(required, custom(function = "validate_name"))]
    pub last_name: Option<String>,
    #[validate(required, custom(function = "validate_email_address"))]
    pub email: Option<String>,
    #[serde(rename = "DOB")]
    #[schema(example = "1990-01-22")]
    #[validate(required, custom(function = "validate_iso_date"))]
    pub dob: Option<String>,
}

/// DTO for updating an existing user
///
/// Every field is optional; `email` may be repeated but never changed.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(rename = "firstName")]
    #[validate(custom(function = "validate_name"))]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    #[validate(custom(function = "validate_name"))]
    pub last_name: Option<String>,
    #[validate(custom(function = "validate_email_address"))]
    pub email: Option<String>,
    #[serde(rename = "DOB")]
    #[schema(example = "1990-01-22")]
    #[validate(custom(function = "validate_iso_date"))]
    pub dob: Option<String>,
}

/// Validated changes to merge into a stored record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
}

/// Order for the date-of-birth sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {}", s)),
        }
    }
}

impl User {
    /// Merge a validated patch into this record. The email is never touched.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(dob) = patch.dob {
            self.dob = dob;
        }
    }
}
