//! Stateful validation for a form being edited.
//!
//! [`FormTracker`] remembers the last result for each field so the UI can
//! decide which errors to surface: messages only show for fields that have
//! been touched (dirty) or after the whole form was validated.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::core::Record;
use crate::validation::engine::{
    clear_field_error, is_form_valid, remote_outcome, FieldValidation, FormValidationState,
    RemoteValidator, ValidationResult, Validator,
};

#[derive(Debug, Clone, Default)]
pub struct FormTracker {
    validator: Validator,
    state: FormValidationState,
    pending_remote: BTreeSet<String>,
}

impl FormTracker {
    pub fn new(validator: Validator) -> Self {
        FormTracker {
            validator,
            state: FormValidationState::new(),
            pending_remote: BTreeSet::new(),
        }
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn state(&self) -> &FormValidationState {
        &self.state
    }

    /// Validate one field and remember the result.
    pub fn validate_field(&mut self, name: &str, value: &Value) -> FieldValidation {
        let validation = self.validator.validate_field(name, value);
        self.state.insert(name.to_string(), validation.clone());
        validation
    }

    /// Validate one field locally and remotely and remember the result.
    pub fn validate_field_remote<R: RemoteValidator>(
        &mut self,
        name: &str,
        value: &Value,
        remote: &R,
    ) -> FieldValidation {
        let local = self.begin_remote(name, value);
        if !self.is_field_validating(name) {
            return local;
        }
        self.complete_remote(name, remote.validate(name, value))
    }

    /// Run local rules for a field and, if they pass, mark it as awaiting a
    /// remote answer.
    ///
    /// The field stays validating until [`FormTracker::complete_remote`] or
    /// [`FormTracker::reset`].
    pub fn begin_remote(&mut self, name: &str, value: &Value) -> FieldValidation {
        let local = self.validate_field(name, value);
        if local.is_valid {
            self.pending_remote.insert(name.to_string());
        } else {
            self.pending_remote.remove(name);
        }
        local
    }

    /// Record the remote answer for a field started with
    /// [`FormTracker::begin_remote`].
    ///
    /// Answers for fields no longer pending are dropped and the remembered
    /// result is returned unchanged.
    pub fn complete_remote<E: std::fmt::Display>(
        &mut self,
        name: &str,
        answer: Result<bool, E>,
    ) -> FieldValidation {
        if !self.pending_remote.remove(name) {
            tracing::debug!(field = name, "dropping stale remote answer");
            return self
                .state
                .get(name)
                .cloned()
                .unwrap_or_else(FieldValidation::pristine);
        }

        let validation = remote_outcome(name, answer);
        self.state.insert(name.to_string(), validation.clone());
        validation
    }

    /// Validate the whole record, replacing all remembered results.
    pub fn validate_form(&mut self, record: &Record) -> ValidationResult {
        let result = self.validator.validate_form(record);
        self.state = result.errors.clone();
        result
    }

    pub fn clear_field_error(&mut self, name: &str) {
        self.state = clear_field_error(&self.state, name);
    }

    pub fn clear_all_errors(&mut self) {
        self.state.clear();
    }

    /// Forget all results and in-flight remote checks.
    pub fn reset(&mut self) {
        self.state.clear();
        self.pending_remote.clear();
    }

    /// Fields never validated count as valid.
    pub fn is_field_valid(&self, name: &str) -> bool {
        self.state.get(name).map_or(true, |v| v.is_valid)
    }

    /// Invalid and touched.
    pub fn has_field_error(&self, name: &str) -> bool {
        self.state
            .get(name)
            .is_some_and(|v| !v.is_valid && v.is_dirty)
    }

    /// The message to surface for a field, if any.
    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.state
            .get(name)
            .filter(|v| v.is_dirty && !v.is_valid)
            .and_then(|v| v.error_message.as_deref())
    }

    pub fn is_field_validating(&self, name: &str) -> bool {
        self.pending_remote.contains(name)
    }

    pub fn is_form_valid(&self) -> bool {
        is_form_valid(&self.state)
    }

    /// Number of touched fields that are invalid.
    pub fn error_count(&self) -> usize {
        self.state
            .values()
            .filter(|v| !v.is_valid && v.is_dirty)
            .count()
    }
}
