//! Appointment request form
//!
//! Client-side workflow behind the studio's booking section: a fixed
//! validation schema, the controller that owns the form's values and submit
//! lifecycle, and the submitter seam that stands in for a real network call.
//!
//! # Example
//!
//! ```rust,ignore
//! use appointment_form::{FormConfig, FormController, ConsoleNotifier, SubmitResult};
//! use shared_types::FormField;
//! use std::sync::Arc;
//!
//! let form = FormController::simulated(FormConfig::default(), Arc::new(ConsoleNotifier));
//! form.set_field(FormField::Name, "Jo")?;
//! match form.submit().await {
//!     SubmitResult::Invalid(errors) => { /* show errors next to each input */ }
//!     _ => {}
//! }
//! ```

pub mod config;
pub mod controller;
pub mod notify;
pub mod schema;
pub mod submitter;

pub use config::FormConfig;
pub use controller::{FormController, FormError, SubmitResult};
pub use notify::{ConsoleNotifier, Notifier, RecordingNotifier};
pub use schema::{is_valid_phone, validate, validate_field};
pub use submitter::{SimulatedSubmitter, SubmitError, Submitter};
