//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
        }
    }
}

/// A request body field: its JSON name and the label used in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName {
    name: &'static str,
    label: &'static str,
}

impl FieldName {
    pub(crate) const fn new(name: &'static str, label: &'static str) -> Self {
        Self { name, label }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.name
    }
}

pub(crate) const PHONE_FIELD: FieldName = FieldName::new("phone", "Phone number");
pub(crate) const CODE_FIELD: FieldName = FieldName::new("code", "Coupon code");

/// Error for a required field that is absent or empty.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("{} is required", field.label)).with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::MissingField.as_str(),
    }))
}

/// Return the value when it is present and non-empty. Whitespace counts.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|text| !text.is_empty())
        .ok_or_else(|| missing_field_error(field))
}
