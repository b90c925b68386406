use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::ServiceType;

/// Fields of the appointment form, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    ServiceType,
    PreferredDate,
    PreferredTime,
    Message,
    AcceptTerms,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::ServiceType,
        FormField::PreferredDate,
        FormField::PreferredTime,
        FormField::Message,
        FormField::AcceptTerms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::ServiceType => "serviceType",
            FormField::PreferredDate => "preferredDate",
            FormField::PreferredTime => "preferredTime",
            FormField::Message => "message",
            FormField::AcceptTerms => "acceptTerms",
        }
    }

    /// Looks a field up by its wire name or by its Rust field name
    pub fn from_name(name: &str) -> Option<FormField> {
        match name {
            "name" => Some(FormField::Name),
            "email" => Some(FormField::Email),
            "phone" => Some(FormField::Phone),
            "serviceType" | "service_type" => Some(FormField::ServiceType),
            "preferredDate" | "preferred_date" => Some(FormField::PreferredDate),
            "preferredTime" | "preferred_time" => Some(FormField::PreferredTime),
            "message" => Some(FormField::Message),
            "acceptTerms" | "accept_terms" => Some(FormField::AcceptTerms),
            _ => None,
        }
    }

    /// `acceptTerms` is the only checkbox; everything else takes text
    pub fn is_flag(&self) -> bool {
        matches!(self, FormField::AcceptTerms)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values of the appointment form while the user is editing it.
///
/// `Default` is the empty state the form is created with and reset to after
/// a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Raw select value; empty until a service is picked
    pub service_type: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: String,
    pub accept_terms: bool,
}

impl AppointmentForm {
    pub fn is_empty(&self) -> bool {
        *self == AppointmentForm::default()
    }

    /// Current value of a field, as a change event would carry it
    pub fn value(&self, field: FormField) -> FieldValue {
        match field {
            FormField::Name => FieldValue::Text(self.name.clone()),
            FormField::Email => FieldValue::Text(self.email.clone()),
            FormField::Phone => FieldValue::Text(self.phone.clone()),
            FormField::ServiceType => FieldValue::Text(self.service_type.clone()),
            FormField::PreferredDate => FieldValue::Text(self.preferred_date.clone()),
            FormField::PreferredTime => FieldValue::Text(self.preferred_time.clone()),
            FormField::Message => FieldValue::Text(self.message.clone()),
            FormField::AcceptTerms => FieldValue::Flag(self.accept_terms),
        }
    }

    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Phone => Some(&mut self.phone),
            FormField::ServiceType => Some(&mut self.service_type),
            FormField::PreferredDate => Some(&mut self.preferred_date),
            FormField::PreferredTime => Some(&mut self.preferred_time),
            FormField::Message => Some(&mut self.message),
            FormField::AcceptTerms => None,
        }
    }

    /// Stores `value` in `field`, handing it back when its kind does not fit
    pub fn set(&mut self, field: FormField, value: FieldValue) -> Result<(), FieldValue> {
        match value {
            FieldValue::Flag(flag) if field.is_flag() => {
                self.accept_terms = flag;
                Ok(())
            }
            FieldValue::Text(text) => match self.text_mut(field) {
                Some(slot) => {
                    *slot = text;
                    Ok(())
                }
                None => Err(FieldValue::Text(text)),
            },
            rejected => Err(rejected),
        }
    }
}

/// A validated appointment request, ready to hand to a submitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub preferred_date: Option<String>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
    pub accept_terms: bool,
}

/// New value carried by a field change event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldChange {
    pub field: FormField,
    pub value: FieldValue,
}

/// One display message per failing field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message; the first message for a field wins
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl FromIterator<(FormField, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (FormField, String)>>(iter: I) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in iter {
            errors.insert(field, message);
        }
        errors
    }
}
