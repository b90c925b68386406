//! Validation schema for the appointment request form.
//!
//! Each rule looks at one field only. All rules run on every call so the
//! caller can show every failing field at once.

use regex::Regex;
use shared_types::{AppointmentForm, AppointmentRequest, FieldErrors, FormField, ServiceType};
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

pub const NAME_MESSAGE: &str = "Name must be at least 2 characters";
pub const EMAIL_MESSAGE: &str = "Enter a valid email address";
pub const PHONE_MESSAGE: &str = "Phone must match (00) 00000-0000";
pub const SERVICE_TYPE_MESSAGE: &str = "Select a service type";
pub const MESSAGE_MESSAGE: &str = "Message must be at most 500 characters";
pub const ACCEPT_TERMS_MESSAGE: &str = "You must accept the terms";

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MAX_CHARS: usize = 500;

/// `(DD) DDDDD-DDDD` for mobiles, `(DD) DDDD-DDDD` for landlines
const PHONE_PATTERN: &str = r"^\(\d{2}\) \d{4,5}-\d{4}$";

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"))
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

#[derive(Debug, Validate)]
struct AppointmentSchema {
    #[validate(custom(function = "validate_name"))]
    name: String,

    #[validate(custom(function = "validate_email_address"))]
    email: String,

    #[validate(custom(function = "validate_phone"))]
    phone: String,

    #[validate(custom(function = "validate_service_type"))]
    service_type: String,

    #[validate(custom(function = "validate_message"))]
    message: String,

    #[validate(custom(function = "validate_accept_terms"))]
    accept_terms: bool,
}

impl From<&AppointmentForm> for AppointmentSchema {
    fn from(form: &AppointmentForm) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            service_type: form.service_type.clone(),
            message: form.message.clone(),
            accept_terms: form.accept_terms,
        }
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() >= NAME_MIN_CHARS {
        Ok(())
    } else {
        Err(rule_error("length", NAME_MESSAGE))
    }
}

fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(rule_error("email", EMAIL_MESSAGE))
    }
}

fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.chars().count() <= MESSAGE_MAX_CHARS {
        Ok(())
    } else {
        Err(rule_error("length", MESSAGE_MESSAGE))
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(rule_error("phone_format", PHONE_MESSAGE))
    }
}

fn validate_service_type(service_type: &str) -> Result<(), ValidationError> {
    service_type
        .parse::<ServiceType>()
        .map(|_| ())
        .map_err(|_| rule_error("service_type", SERVICE_TYPE_MESSAGE))
}

fn validate_accept_terms(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(rule_error("accept_terms", ACCEPT_TERMS_MESSAGE))
    }
}

fn default_message(field: FormField) -> &'static str {
    match field {
        FormField::Name => NAME_MESSAGE,
        FormField::Email => EMAIL_MESSAGE,
        FormField::Phone => PHONE_MESSAGE,
        FormField::ServiceType => SERVICE_TYPE_MESSAGE,
        FormField::Message => MESSAGE_MESSAGE,
        FormField::AcceptTerms => ACCEPT_TERMS_MESSAGE,
        FormField::PreferredDate | FormField::PreferredTime => "Invalid value",
    }
}

fn collect_errors(report: &ValidationErrors) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (name, field_errors) in report.field_errors() {
        let Some(field) = FormField::from_name(name.as_ref()) else {
            tracing::warn!("Validation reported unknown field {}", name);
            continue;
        };
        let message = field_errors
            .iter()
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| default_message(field).to_string());
        errors.insert(field, message);
    }
    errors
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Checks the whole form and builds the request when every rule passes
pub fn validate(form: &AppointmentForm) -> Result<AppointmentRequest, FieldErrors> {
    if let Err(report) = AppointmentSchema::from(form).validate() {
        return Err(collect_errors(&report));
    }

    let service_type = form.service_type.parse::<ServiceType>().map_err(|_| {
        [(FormField::ServiceType, SERVICE_TYPE_MESSAGE.to_string())]
            .into_iter()
            .collect::<FieldErrors>()
    })?;

    Ok(AppointmentRequest {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        service_type,
        preferred_date: optional(&form.preferred_date),
        preferred_time: optional(&form.preferred_time),
        message: optional(&form.message),
        accept_terms: form.accept_terms,
    })
}

/// Message for a single field, if it currently fails
pub fn validate_field(form: &AppointmentForm, field: FormField) -> Option<String> {
    validate(form)
        .err()
        .and_then(|errors| errors.get(field).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> AppointmentForm {
        AppointmentForm {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            phone: "(11) 91234-5678".to_string(),
            service_type: "small".to_string(),
            accept_terms: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_valid_request() {
        let request = validate(&valid_form()).unwrap();
        assert_eq!(request.name, "Jo");
        assert_eq!(request.service_type, ServiceType::Small);
        assert_eq!(request.preferred_date, None);
        assert_eq!(request.preferred_time, None);
        assert_eq!(request.message, None);
        assert!(request.accept_terms);
    }

    #[test]
    fn test_full_valid_request() {
        let form = AppointmentForm {
            name: "Mariana Souza".to_string(),
            email: "mari.souza@example.com.br".to_string(),
            phone: "(21) 3456-7890".to_string(),
            service_type: "coverup".to_string(),
            preferred_date: "2026-11-02".to_string(),
            preferred_time: "14:30".to_string(),
            message: "Cover an old tribal piece on the shoulder".to_string(),
            accept_terms: true,
        };

        let request = validate(&form).unwrap();
        assert_eq!(request.service_type, ServiceType::Coverup);
        assert_eq!(request.preferred_date.as_deref(), Some("2026-11-02"));
        assert_eq!(request.preferred_time.as_deref(), Some("14:30"));
        assert!(request.message.is_some());
    }

    #[test]
    fn test_every_service_type_is_accepted() {
        for service in ServiceType::ALL {
            let form = AppointmentForm {
                service_type: service.as_str().to_string(),
                ..valid_form()
            };
            assert_eq!(validate(&form).unwrap().service_type, service);
        }
    }

    #[test]
    fn test_missing_accept_terms_fails_only_that_field() {
        let form = AppointmentForm {
            accept_terms: false,
            ..valid_form()
        };

        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::AcceptTerms]);
        assert_eq!(errors.get(FormField::AcceptTerms), Some(ACCEPT_TERMS_MESSAGE));
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = validate(&AppointmentForm::default()).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                FormField::Name,
                FormField::Email,
                FormField::Phone,
                FormField::ServiceType,
                FormField::AcceptTerms,
            ]
        );
        assert_eq!(errors.get(FormField::Name), Some(NAME_MESSAGE));
        assert_eq!(errors.get(FormField::Email), Some(EMAIL_MESSAGE));
        assert_eq!(errors.get(FormField::ServiceType), Some(SERVICE_TYPE_MESSAGE));
    }

    #[test]
    fn test_name_length() {
        let short = AppointmentForm {
            name: "J".to_string(),
            ..valid_form()
        };
        assert_eq!(validate(&short).unwrap_err().fields(), vec![FormField::Name]);

        let accented = AppointmentForm {
            name: "Zé".to_string(),
            ..valid_form()
        };
        assert!(validate(&accented).is_ok());
    }

    #[test]
    fn test_phone_patterns() {
        for phone in ["(11) 91234-5678", "(11) 1234-5678", "(99) 00000-0000"] {
            assert!(is_valid_phone(phone), "{phone} should match");
            let form = AppointmentForm {
                phone: phone.to_string(),
                ..valid_form()
            };
            assert!(validate(&form).is_ok());
        }

        for phone in [
            "12345",
            "",
            "11 91234-5678",
            "(11)91234-5678",
            "(11) 912345-678",
            "(11) 123-4567",
            "(1) 91234-5678",
            "(11) 91234-56789",
            "(11) 91234-5678 ",
            "(ab) 91234-5678",
        ] {
            assert!(!is_valid_phone(phone), "{phone:?} should not match");
            let form = AppointmentForm {
                phone: phone.to_string(),
                ..valid_form()
            };
            let errors = validate(&form).unwrap_err();
            assert_eq!(errors.fields(), vec![FormField::Phone]);
            assert_eq!(errors.get(FormField::Phone), Some(PHONE_MESSAGE));
        }
    }

    #[test]
    fn test_email_shape() {
        for email in ["", "jo", "jo@", "@x.com", "jo x@x.com"] {
            let form = AppointmentForm {
                email: email.to_string(),
                ..valid_form()
            };
            let errors = validate(&form).unwrap_err();
            assert!(errors.contains(FormField::Email), "{email:?} should fail");
        }
    }

    #[test]
    fn test_unknown_service_type() {
        let form = AppointmentForm {
            service_type: "Small".to_string(),
            ..valid_form()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::ServiceType]);
    }

    #[test]
    fn test_message_length_limit() {
        let at_limit = AppointmentForm {
            message: "a".repeat(500),
            ..valid_form()
        };
        assert!(validate(&at_limit).is_ok());

        let over_limit = AppointmentForm {
            message: "a".repeat(501),
            ..valid_form()
        };
        let errors = validate(&over_limit).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::Message]);
        assert_eq!(errors.get(FormField::Message), Some(MESSAGE_MESSAGE));
    }

    #[test]
    fn test_free_text_dates_are_not_checked() {
        let form = AppointmentForm {
            preferred_date: "next friday".to_string(),
            preferred_time: "late afternoon".to_string(),
            ..valid_form()
        };
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_every_message_matches_its_constant() {
        let form = AppointmentForm {
            message: "a".repeat(501),
            ..Default::default()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.len(), 6);
        for (field, message) in errors.iter() {
            assert_eq!(message, default_message(field), "{field}");
        }
    }

    #[test]
    fn test_only_service_type_fails() {
        let form = AppointmentForm {
            service_type: String::new(),
            ..valid_form()
        };
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::ServiceType]);
        assert_eq!(errors.get(FormField::ServiceType), Some(SERVICE_TYPE_MESSAGE));
    }

    #[test]
    fn test_validate_field() {
        let form = AppointmentForm {
            name: "J".to_string(),
            phone: "12345".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_field(&form, FormField::Phone).as_deref(), Some(PHONE_MESSAGE));
        assert_eq!(validate_field(&form, FormField::Name).as_deref(), Some(NAME_MESSAGE));
        assert_eq!(validate_field(&form, FormField::Email), None);
    }
}
