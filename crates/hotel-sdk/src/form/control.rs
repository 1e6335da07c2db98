//! Single form control

use super::validators::Validator;
use crate::validation::{ErrorKind, FieldState};

/// Text control with validators and interaction flags
#[derive(Debug, Clone, Default)]
pub struct FormControl {
    value: String,
    validators: Vec<Validator>,
    dirty: bool,
    touched: bool,
}

impl FormControl {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            validators,
            ..Default::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// User edit: updates the value and marks the control dirty
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    /// Programmatic load: updates the value, flags untouched
    pub fn patch(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Active error kinds, in validator order
    pub fn errors(&self) -> Vec<ErrorKind> {
        self.validators
            .iter()
            .filter_map(|v| v.check(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn state(&self) -> FieldState {
        FieldState {
            errors: self.errors(),
            dirty: self.dirty,
            touched: self.touched,
        }
    }

    /// Clear the value and both flags
    pub fn reset(&mut self) {
        self.value.clear();
        self.dirty = false;
        self.touched = false;
    }
}
