//! Reactive form validation
//!
//! A declarative rule table maps each field to an ordered list of
//! `error kind → message` entries. [`ErrorMapper`] turns a form snapshot into
//! one message per invalid field, and [`ErrorStream`] recomputes that mapping
//! on form events through a debounce that switches off after a submit attempt.

mod debounce;
mod mapper;
mod rules;
mod stream;

pub use debounce::{spawn_debounced, SubmitFlag};
pub use mapper::{ErrorMapper, FieldState, FormErrors, FormSnapshot};
pub use rules::{ErrorKind, FieldRules, ValidationRules, ValidationRulesBuilder};
pub use stream::{ErrorStream, FormEvent, ValidationConfig};
