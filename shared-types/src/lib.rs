use serde::{Deserialize, Serialize};

pub mod appointment;
pub mod service;
pub mod submission;

pub use appointment::{
    AppointmentForm, AppointmentRequest, FieldChange, FieldErrors, FieldValue, FormField,
};
pub use service::{service_options, ServiceOption, ServiceType, UnknownServiceType};
pub use submission::{Notification, NotificationKind, SubmitPhase, SubmitResponse};

/// Error response for command-line and API consumers
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
