//! Rule-driven field validation.
//!
//! Validation never fails with an error: every outcome is a
//! [`FieldValidation`] or [`ValidationResult`] value.

pub mod engine;
pub mod format;
pub mod rules;
pub mod tracker;

pub use engine::{
    clear_field_error, is_form_valid, remote_outcome, FieldValidation, FormValidationState,
    RemoteValidator, ValidationResult, Validator,
};
pub use format::format_phone;
pub use rules::{Rule, RuleKind, RuleSet};
pub use tracker::FormTracker;
