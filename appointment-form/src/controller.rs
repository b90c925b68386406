use shared_types::{
    AppointmentForm, FieldChange, FieldErrors, FieldValue, FormField, Notification, SubmitPhase,
    SubmitResponse,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use crate::config::FormConfig;
use crate::notify::Notifier;
use crate::schema;
use crate::submitter::{SimulatedSubmitter, Submitter};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Field {field} expects a {expected} value")]
    ValueKind {
        field: FormField,
        expected: &'static str,
    },
}

/// How a call to [`FormController::submit`] ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Simulator resolved; the form was cleared
    Submitted,
    /// Validation failed; nothing was sent and the values were kept
    Invalid(FieldErrors),
    /// Simulator rejected; the values were kept
    Failed(String),
    /// Another submission is still pending; nothing happened
    Busy,
}

/// Puts a pending submission back to idle if its future is dropped before
/// the submitter resolves. Values are kept.
struct PendingSubmit<'a> {
    controller: &'a FormController,
    armed: bool,
}

impl PendingSubmit<'_> {
    fn settle(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.controller.lock();
        if state.phase.is_busy() {
            self.controller.set_phase(&mut state, SubmitPhase::Idle);
            tracing::warn!("Appointment submission dropped before completing");
        }
    }
}

#[derive(Debug, Default)]
struct FormState {
    values: AppointmentForm,
    errors: FieldErrors,
    phase: SubmitPhase,
}

/// Owns the values, errors and submit lifecycle of one appointment form.
///
/// Clones share the same form. The state lock is never held across the
/// simulated delay.
#[derive(Clone)]
pub struct FormController {
    state: Arc<Mutex<FormState>>,
    phase_tx: Arc<watch::Sender<SubmitPhase>>,
    submitter: Arc<dyn Submitter>,
    notifier: Arc<dyn Notifier>,
    config: Arc<FormConfig>,
}

impl FormController {
    pub fn new(submitter: Arc<dyn Submitter>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(FormConfig::default(), submitter, notifier)
    }

    pub fn with_config(
        config: FormConfig,
        submitter: Arc<dyn Submitter>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (phase_tx, _) = watch::channel(SubmitPhase::Idle);
        Self {
            state: Arc::new(Mutex::new(FormState::default())),
            phase_tx: Arc::new(phase_tx),
            submitter,
            notifier,
            config: Arc::new(config),
        }
    }

    /// Controller backed by the simulated submitter with the configured delay
    pub fn simulated(config: FormConfig, notifier: Arc<dyn Notifier>) -> Self {
        let submitter = Arc::new(SimulatedSubmitter::new(config.submit_delay()));
        Self::with_config(config, submitter, notifier)
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_phase(&self, state: &mut FormState, phase: SubmitPhase) {
        state.phase = phase;
        self.phase_tx.send_replace(phase);
    }

    pub fn values(&self) -> AppointmentForm {
        self.lock().values.clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase().is_busy()
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Label of the submit control for the current phase
    pub fn submit_label(&self) -> &str {
        if self.is_busy() {
            &self.config.busy_label
        } else {
            &self.config.submit_label
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmitPhase> {
        self.phase_tx.subscribe()
    }

    /// Stores the new value right away; validation only runs to clear a
    /// stale error on the edited field
    pub fn set_field(
        &self,
        field: FormField,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let mut state = self.lock();

        state
            .values
            .set(field, value.into())
            .map_err(|rejected| FormError::ValueKind {
                field,
                expected: match rejected {
                    FieldValue::Text(_) => "boolean",
                    FieldValue::Flag(_) => "text",
                },
            })?;

        tracing::debug!("Field {} changed", field);

        if state.errors.contains(field) && schema::validate_field(&state.values, field).is_none()
        {
            state.errors.remove(field);
        }

        Ok(())
    }

    pub fn apply(&self, change: FieldChange) -> Result<(), FormError> {
        self.set_field(change.field, change.value)
    }

    /// Validates the whole form and, when it passes, runs the submitter
    pub async fn submit(&self) -> SubmitResult {
        let request = {
            let mut state = self.lock();

            if state.phase.is_busy() {
                tracing::debug!("Submit ignored: a submission is already pending");
                return SubmitResult::Busy;
            }

            match schema::validate(&state.values) {
                Ok(request) => {
                    state.errors = FieldErrors::new();
                    self.set_phase(&mut state, SubmitPhase::Submitting);
                    request
                }
                Err(errors) => {
                    tracing::info!(
                        "Appointment request rejected by validation: {:?}",
                        errors.fields()
                    );
                    state.errors = errors.clone();
                    return SubmitResult::Invalid(errors);
                }
            }
        };

        tracing::info!(
            "Submitting appointment request for {} service",
            request.service_type
        );

        let mut pending = PendingSubmit {
            controller: self,
            armed: true,
        };
        let outcome = self.submitter.submit(&request).await;
        pending.settle();
        drop(pending);

        let (result, notification) = {
            let mut state = self.lock();
            match outcome {
                Ok(()) => {
                    state.values = AppointmentForm::default();
                    state.errors = FieldErrors::new();
                    self.set_phase(&mut state, SubmitPhase::Succeeded);
                    tracing::info!("Appointment request submitted");
                    (
                        SubmitResult::Submitted,
                        Notification::success(&self.config.success_message),
                    )
                }
                Err(err) => {
                    self.set_phase(&mut state, SubmitPhase::Failed);
                    tracing::warn!("Appointment submission failed: {}", err);
                    (
                        SubmitResult::Failed(err.to_string()),
                        Notification::error(&self.config.error_message),
                    )
                }
            }
        };

        self.notifier.notify(notification);
        result
    }

    /// Clears values and errors; ignored while a submission is pending
    pub fn reset(&self) -> bool {
        let mut state = self.lock();
        if state.phase.is_busy() {
            return false;
        }
        state.values = AppointmentForm::default();
        state.errors = FieldErrors::new();
        self.set_phase(&mut state, SubmitPhase::Idle);
        true
    }

    /// Snapshot for the front end after a submit attempt
    pub fn response(&self, notification: Option<Notification>) -> SubmitResponse {
        let state = self.lock();
        SubmitResponse {
            phase: state.phase,
            errors: state.errors.clone(),
            notification,
        }
    }
}
