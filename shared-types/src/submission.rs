use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::FieldErrors;

/// Lifecycle of a submit attempt.
///
/// `Succeeded` and `Failed` are idle states that remember how the last
/// attempt ended; only `Submitting` blocks another submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Blocking notice shown once a submission settles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Outcome of a submit attempt as reported to the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitResponse {
    pub phase: SubmitPhase,
    pub errors: FieldErrors,
    pub notification: Option<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormField;

    #[test]
    fn test_only_submitting_is_busy() {
        assert!(SubmitPhase::Submitting.is_busy());
        assert!(!SubmitPhase::Idle.is_busy());
        assert!(!SubmitPhase::Succeeded.is_busy());
        assert!(!SubmitPhase::Failed.is_busy());
        assert_eq!(SubmitPhase::default(), SubmitPhase::Idle);
    }

    #[test]
    fn test_submit_response_serialization() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::Phone, "Phone must match (00) 00000-0000");

        let response = SubmitResponse {
            phase: SubmitPhase::Idle,
            errors,
            notification: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["phase"], "idle");
        assert_eq!(json["errors"]["phone"], "Phone must match (00) 00000-0000");
        assert!(json["notification"].is_null());
    }

    #[test]
    fn test_notification_constructors() {
        let notice = Notification::error("nope");
        assert_eq!(notice.kind, NotificationKind::Error);
        let json = serde_json::to_string(&Notification::success("ok")).unwrap();
        assert_eq!(json, r#"{"kind":"success","message":"ok"}"#);
    }
}
