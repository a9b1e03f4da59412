// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Validation layer: field rules, form schemas, and localized messages.
//!
//! Validators are pure. They take a candidate plus an injected
//! [`MessageLookup`] and return either normalized data or a
//! [`ValidationFailure`] listing every failing field.

pub mod error;
pub mod message;
pub mod rules;
pub mod schema;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use error::{FieldIssue, RuleFailure, ValidationFailure, Violation};
pub use message::{DefaultMessages, MessageKey, MessageLookup, MessageParams, ValidationMessages};
pub use rules::Schemas;
pub use schema::PostSchema;

/// Error record returned by a remote API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    pub fn for_field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
            code: None,
        }
    }
}

/// A field/message pair as produced by client-side validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Map API errors onto form fields. Errors without a field are dropped;
/// a later error for the same field replaces an earlier one.
pub fn convert_api_errors_to_field_errors(errors: &[ApiError]) -> BTreeMap<String, String> {
    errors
        .iter()
        .filter_map(|e| e.field.as_ref().map(|f| (f.clone(), e.message.clone())))
        .collect()
}

/// Collapse a list of field errors into a field → message map (last wins).
pub fn format_validation_errors(errors: &[ValidationError]) -> BTreeMap<String, String> {
    errors
        .iter()
        .map(|e| (e.field.clone(), e.message.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_without_field_are_dropped() {
        let errors = vec![
            ApiError::for_field("title", "bad title"),
            ApiError {
                message: "server on fire".into(),
                field: None,
                code: Some("500".into()),
            },
            ApiError::for_field("title", "worse title"),
        ];
        let map = convert_api_errors_to_field_errors(&errors);
        assert_eq!(map.len(), 1);
        assert_eq!(map["title"], "worse title");
    }

    #[test]
    fn api_error_deserializes_without_optional_fields() {
        let err: ApiError = serde_json::from_str(r#"{"message":"oops"}"#).unwrap();
        assert_eq!(err.field, None);
        assert_eq!(err.code, None);
    }

    #[test]
    fn format_validation_errors_keys_by_field() {
        let map = format_validation_errors(&[
            ValidationError {
                field: "email".into(),
                message: "Email is required".into(),
            },
            ValidationError {
                field: "phone".into(),
                message: "Please enter a valid phone number".into(),
            },
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map["email"], "Email is required");
    }
}
