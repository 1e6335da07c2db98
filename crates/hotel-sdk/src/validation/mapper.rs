//! Form snapshot → error message mapping

use super::rules::{ErrorKind, ValidationRules};
use std::collections::BTreeMap;

/// One message per invalid field
pub type FormErrors = BTreeMap<String, String>;

/// Validity of a single control at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    /// Active error kinds
    pub errors: Vec<ErrorKind>,
    /// Value changed by the user
    pub dirty: bool,
    /// Control lost focus at least once
    pub touched: bool,
}

impl FieldState {
    pub fn with_errors(errors: impl IntoIterator<Item = ErrorKind>) -> Self {
        Self {
            errors: errors.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validity of a whole form at one instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    fields: BTreeMap<String, FieldState>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, state: FieldState) -> Self {
        self.insert(name, state);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, state: FieldState) {
        self.fields.insert(name.into(), state);
    }

    pub fn field(&self, name: &str) -> Option<&FieldState> {
        self.fields.get(name)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(FieldState::is_valid)
    }
}

/// Derives the error banner of each field from the rule table
#[derive(Debug, Clone)]
pub struct ErrorMapper {
    rules: ValidationRules,
}

impl ErrorMapper {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Full re-derivation of the field → message mapping.
    ///
    /// Only fields declared in the rule table are considered. A field appears
    /// when at least one of its active kinds has a declared message; the
    /// first declared match is used.
    pub fn derive_errors(&self, form: &FormSnapshot) -> FormErrors {
        self.rules
            .fields()
            .filter_map(|rules| {
                let state = form.field(&rules.field)?;
                if state.errors.is_empty() {
                    return None;
                }
                let message = rules.message_for(&state.errors)?;
                Some((rules.field.clone(), message.to_string()))
            })
            .collect()
    }
}
