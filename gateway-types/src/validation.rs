//! Field validation for request bodies.
//!
//! Request types derive [`Validate`] and tag each check with the code of a
//! [`Rule`]. [`validate`] runs the derived checks and flattens the outcome
//! into one message per failing field. The outcome is returned as data;
//! validation itself never fails.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::ValidationError;

pub use validator::Validate;

/// Kinds of rule a string field can violate.
///
/// The derive attributes carry the rule's code; each kind formats its own
/// message from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present and not blank.
    Required,
    /// ASCII digits only.
    Numeric,
    /// Character count out of bounds.
    Length,
    /// Not one of a fixed set of values.
    OneOf,
}

impl Rule {
    pub const ALL: [Rule; 4] = [Rule::Required, Rule::Numeric, Rule::Length, Rule::OneOf];

    /// Code reported by the validator for this rule.
    pub fn code(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Numeric => "numeric",
            Rule::Length => "length",
            Rule::OneOf => "oneof",
        }
    }

    pub fn from_code(code: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|rule| rule.code() == code)
    }

    /// Human-readable violation message for `field`.
    pub fn message(&self, field: &str) -> String {
        match self {
            Rule::Required => format!("{} is required", field),
            other => format!("{} invalid {}", field, other.code()),
        }
    }
}

/// Message for a single validator error on `field`.
///
/// Codes outside [`Rule`] follow the `"<field> invalid <code>"` convention.
pub fn violation_message(field: &str, error: &ValidationError) -> String {
    match Rule::from_code(&error.code) {
        Some(rule) => rule.message(field),
        None => format!("{} invalid {}", field, error.code),
    }
}

/// `custom` check: present and not blank.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(Rule::Required.code()));
    }
    Ok(())
}

/// `custom` check: ASCII digits only. Empty values pass; pair with
/// [`not_blank`].
pub fn numeric(value: &str) -> Result<(), ValidationError> {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new(Rule::Numeric.code()));
    }
    Ok(())
}

/// Field name to violation message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation, keeping the first message seen for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&validator::ValidationErrors> for ValidationErrors {
    /// One message per field. A missing value is reported as such even when
    /// other checks on the same field also failed.
    fn from(errors: &validator::ValidationErrors) -> Self {
        let mut out = ValidationErrors::new();

        for (field, field_errors) in errors.field_errors() {
            let reported = field_errors
                .iter()
                .find(|e| e.code == Rule::Required.code())
                .or_else(|| field_errors.first());

            if let Some(error) = reported {
                out.add(field.to_string(), violation_message(&field, error));
            }
        }

        out
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Runs every derived check on `value`.
///
/// Returns `Ok(())` when all fields pass, otherwise one message per failing
/// field.
pub fn validate<T: Validate + ?Sized>(value: &T) -> Result<(), ValidationErrors> {
    value
        .validate()
        .map_err(|errors| ValidationErrors::from(&errors))
}
