//! Rule evaluation over single fields and whole records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::Record;
use crate::validation::rules::RuleSet;

/// Message used when a remote validator rejects a locally valid value.
pub const REMOTE_REJECTED: &str = "The server rejected this value";

/// Message used when a remote validator fails to answer.
pub const REMOTE_FAILED: &str = "The server could not validate this value";

/// Outcome of validating one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Set once the field has been evaluated.
    pub is_dirty: bool,
}

impl FieldValidation {
    pub fn valid() -> Self {
        FieldValidation {
            is_valid: true,
            error_message: None,
            is_dirty: true,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        FieldValidation {
            is_valid: false,
            error_message: Some(message.into()),
            is_dirty: true,
        }
    }

    /// Valid and untouched.
    pub fn pristine() -> Self {
        FieldValidation {
            is_valid: true,
            error_message: None,
            is_dirty: false,
        }
    }
}

/// Per-field validation results keyed by field name.
pub type FormValidationState = BTreeMap<String, FieldValidation>;

/// Outcome of validating a whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: FormValidationState,
    pub error_count: usize,
}

impl ValidationResult {
    /// Failing fields with their messages, in field-name order.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().filter(|(_, v)| !v.is_valid).map(|(k, v)| {
            (
                k.as_str(),
                v.error_message.as_deref().unwrap_or_default(),
            )
        })
    }
}

/// A second-stage check run after local rules pass, e.g. against a server.
pub trait RemoteValidator {
    type Error: std::fmt::Display;

    fn validate(&self, field: &str, value: &Value) -> Result<bool, Self::Error>;
}

impl<F, E> RemoteValidator for F
where
    F: Fn(&str, &Value) -> Result<bool, E>,
    E: std::fmt::Display,
{
    type Error = E;

    fn validate(&self, field: &str, value: &Value) -> Result<bool, E> {
        self(field, value)
    }
}

/// Evaluates a [`RuleSet`].
#[derive(Debug, Clone)]
pub struct Validator {
    rules: RuleSet,
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(RuleSet::poster())
    }
}

impl Validator {
    pub fn new(rules: RuleSet) -> Self {
        Validator { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validate one field.
    ///
    /// Rules run in declared order and the first failure wins. A field with
    /// no rules is valid and stays pristine.
    pub fn validate_field(&self, name: &str, value: &Value) -> FieldValidation {
        let Some(rules) = self.rules.get(name) else {
            return FieldValidation::pristine();
        };

        match rules.iter().find(|rule| !rule.check(value)) {
            Some(rule) => FieldValidation::invalid(rule.message.clone()),
            None => FieldValidation::valid(),
        }
    }

    /// Validate every field present in `fields`. Rule-table fields that are
    /// missing from `fields` are skipped.
    pub fn validate_fields(&self, fields: &Map<String, Value>) -> ValidationResult {
        let mut errors = FormValidationState::new();
        let mut error_count = 0;

        for (name, value) in fields {
            let validation = self.validate_field(name, value);
            if !validation.is_valid {
                error_count += 1;
            }
            errors.insert(name.clone(), validation);
        }

        tracing::debug!(
            fields = errors.len(),
            error_count,
            "validated form"
        );

        ValidationResult {
            is_valid: error_count == 0,
            errors,
            error_count,
        }
    }

    /// Validate a whole record.
    pub fn validate_form(&self, record: &Record) -> ValidationResult {
        self.validate_fields(&record.to_fields())
    }

    /// Validate locally, then ask `remote` if local rules pass.
    pub fn validate_field_remote<R: RemoteValidator>(
        &self,
        name: &str,
        value: &Value,
        remote: &R,
    ) -> FieldValidation {
        let local = self.validate_field(name, value);
        if !local.is_valid {
            return local;
        }

        remote_outcome(name, remote.validate(name, value))
    }
}

/// Map a remote validator's answer for `name` to a field result.
pub fn remote_outcome<E: std::fmt::Display>(
    name: &str,
    answer: Result<bool, E>,
) -> FieldValidation {
    match answer {
        Ok(true) => FieldValidation::valid(),
        Ok(false) => FieldValidation::invalid(REMOTE_REJECTED),
        Err(e) => {
            tracing::warn!(field = name, "remote validation failed: {}", e);
            FieldValidation::invalid(REMOTE_FAILED)
        }
    }
}

/// Reset one field to valid and untouched, leaving every other entry as is.
pub fn clear_field_error(state: &FormValidationState, name: &str) -> FormValidationState {
    let mut next = state.clone();
    next.insert(name.to_string(), FieldValidation::pristine());
    next
}

/// True when every entry is valid (vacuously true for an empty state).
pub fn is_form_valid(state: &FormValidationState) -> bool {
    state.values().all(|field| field.is_valid)
}
