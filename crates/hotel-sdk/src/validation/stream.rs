//! Debounced error recomputation driven by form events

use super::debounce::{spawn_debounced, SubmitFlag};
use super::mapper::{ErrorMapper, FormErrors, FormSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

/// Validation timing
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Quiet window before errors are recomputed
    pub quiet_period: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(800),
        }
    }
}

/// Interaction that may change what errors should be shown
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Any value of the form changed
    ValueChanged(FormSnapshot),
    /// A single field lost focus
    Blur {
        field: String,
        snapshot: FormSnapshot,
    },
}

impl FormEvent {
    pub fn snapshot(&self) -> &FormSnapshot {
        match self {
            FormEvent::ValueChanged(snapshot) => snapshot,
            FormEvent::Blur { snapshot, .. } => snapshot,
        }
    }
}

/// Form error messages, recomputed on value changes and blurs.
///
/// Both event kinds go through one debounced trigger. After
/// [`mark_submitted`](Self::mark_submitted) every event recomputes at once.
/// Dropping the stream stops its task.
pub struct ErrorStream {
    events: mpsc::UnboundedSender<FormEvent>,
    errors: watch::Receiver<FormErrors>,
    submitted: SubmitFlag,
    task: JoinHandle<()>,
}

impl ErrorStream {
    /// Start the recomputation task. Must be called inside a Tokio runtime.
    pub fn spawn(mapper: Arc<ErrorMapper>, config: ValidationConfig) -> Self {
        let (events, rx) = mpsc::unbounded_channel::<FormEvent>();
        let (errors_tx, errors) = watch::channel(FormErrors::new());
        let submitted = SubmitFlag::new();

        let task = spawn_debounced(rx, config.quiet_period, submitted.clone(), move |event| {
            let errors = mapper.derive_errors(event.snapshot());
            debug!(invalid_fields = errors.len(), "Form errors recomputed");
            errors_tx.send_replace(errors);
        });

        Self {
            events,
            errors,
            submitted,
            task,
        }
    }

    /// Feed a form-wide value change
    pub fn value_changed(&self, snapshot: FormSnapshot) {
        self.emit(FormEvent::ValueChanged(snapshot));
    }

    /// Feed a blur on one field
    pub fn blurred(&self, field: impl Into<String>, snapshot: FormSnapshot) {
        self.emit(FormEvent::Blur {
            field: field.into(),
            snapshot,
        });
    }

    /// Switch to immediate recomputation
    pub fn mark_submitted(&self) {
        self.submitted.set();
    }

    /// Return to debounced recomputation
    pub fn clear_submitted(&self) {
        self.submitted.clear();
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted.is_set()
    }

    /// Latest computed errors
    pub fn current(&self) -> FormErrors {
        self.errors.borrow().clone()
    }

    /// Watch handle that always holds the latest errors
    pub fn subscribe(&self) -> watch::Receiver<FormErrors> {
        self.errors.clone()
    }

    fn emit(&self, event: FormEvent) {
        if self.events.send(event).is_err() {
            debug!("Error stream stopped, dropping form event");
        }
    }
}

impl Drop for ErrorStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}
