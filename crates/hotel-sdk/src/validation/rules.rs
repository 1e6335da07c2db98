//! Validation rule table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of validation failure reported by a form control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Required,
    MinLength,
    Pattern,
    Range,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::MinLength => "minlength",
            ErrorKind::Pattern => "pattern",
            ErrorKind::Range => "range",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Messages for one field, in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    pub field: String,
    pub messages: Vec<(ErrorKind, String)>,
}

impl FieldRules {
    /// Message of the first declared kind that is currently active
    pub fn message_for(&self, active: &[ErrorKind]) -> Option<&str> {
        self.messages
            .iter()
            .find(|(kind, _)| active.contains(kind))
            .map(|(_, message)| message.as_str())
    }
}

/// Immutable field → (error kind → message) table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRules {
    fields: Vec<FieldRules>,
}

impl ValidationRules {
    pub fn builder() -> ValidationRulesBuilder {
        ValidationRulesBuilder::default()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.iter()
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Messages of the hotel edit form
    pub fn hotel_defaults() -> Self {
        Self::builder()
            .field(
                "hotelName",
                [
                    (ErrorKind::Required, "Le nom de l'hôtel est obligatoire"),
                    (
                        ErrorKind::MinLength,
                        "Le nom de l'hotel doit comporter au moins 4 caractères",
                    ),
                ],
            )
            .field(
                "price",
                [
                    (ErrorKind::Required, "Le prix de l'hôtel est obligatoire"),
                    (ErrorKind::Pattern, "Le prix de l'hôtel doit être un nombre"),
                ],
            )
            .field(
                "rating",
                [(ErrorKind::Range, "Donnez une note entre 1 et 5")],
            )
            .build()
    }
}

/// Builder for a [`ValidationRules`] table
#[derive(Debug, Clone, Default)]
pub struct ValidationRulesBuilder {
    rules: ValidationRules,
}

impl ValidationRulesBuilder {
    /// Declare messages for a field.
    ///
    /// Declaring a field twice appends to its entry; a kind already declared
    /// for the field keeps its first message.
    pub fn field<I, S>(mut self, field: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = (ErrorKind, S)>,
        S: Into<String>,
    {
        let field = field.into();
        let index = match self.rules.fields.iter().position(|f| f.field == field) {
            Some(index) => index,
            None => {
                self.rules.fields.push(FieldRules {
                    field,
                    messages: Vec::new(),
                });
                self.rules.fields.len() - 1
            }
        };

        let entry = &mut self.rules.fields[index];
        for (kind, message) in messages {
            if entry.messages.iter().all(|(k, _)| *k != kind) {
                entry.messages.push((kind, message.into()));
            }
        }
        self
    }

    pub fn build(self) -> ValidationRules {
        self.rules
    }
}
