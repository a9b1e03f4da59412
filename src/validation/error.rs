// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Validation failure taxonomy and the per-field error collection.

use std::collections::BTreeMap;

use thiserror::Error;

/// Which length bound a value broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthBound {
    Min(usize),
    Max(usize),
}

/// Which numeric bound a value broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeBound {
    Min(i64),
    Max(i64),
}

/// Pattern-style checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    Password,
    Phone,
    Url,
    Number,
    PublicId,
}

/// Why a single field failed. All variants are recoverable by the user.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("value is required")]
    RequiredField,
    #[error("value is not one of the allowed options")]
    InvalidEnum,
    #[error("length violates {0:?}")]
    LengthViolation(LengthBound),
    #[error("value has an invalid {0:?} format")]
    InvalidFormat(Format),
    #[error("value is out of range {0:?}")]
    OutOfRange(RangeBound),
    #[error("value does not match its confirmation")]
    Mismatch,
}

/// The first failing rule of one field pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleFailure {
    pub violation: Violation,
    pub message: String,
}

impl RuleFailure {
    pub fn new(violation: Violation, message: String) -> Self {
        Self { violation, message }
    }
}

/// One reported problem, attributed to a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub violation: Violation,
    pub message: String,
}

/// Every field failure from one validation pass, in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Error)]
#[error("validation failed for {} field(s)", .issues.len())]
pub struct ValidationFailure {
    issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, failure: RuleFailure) {
        self.issues.push(FieldIssue {
            field: field.to_string(),
            violation: failure.violation,
            message: failure.message,
        });
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// First violation reported for `field`.
    pub fn violation(&self, field: &str) -> Option<Violation> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| issue.violation)
    }

    /// Field name → first message for that field.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for issue in &self.issues {
            map.entry(issue.field.clone())
                .or_insert_with(|| issue.message.clone());
        }
        map
    }

    /// `Ok(value)` when nothing was pushed, otherwise `Err(self)`.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_keep_first_message_per_field() {
        let mut failure = ValidationFailure::new();
        failure.push(
            "title",
            RuleFailure::new(Violation::RequiredField, "first".into()),
        );
        failure.push(
            "title",
            RuleFailure::new(Violation::LengthViolation(LengthBound::Min(5)), "second".into()),
        );
        failure.push(
            "publicId",
            RuleFailure::new(Violation::RequiredField, "id".into()),
        );

        let map = failure.field_errors();
        assert_eq!(map.len(), 2);
        assert_eq!(map["title"], "first");
        assert_eq!(failure.violation("publicId"), Some(Violation::RequiredField));
        assert_eq!(failure.to_string(), "validation failed for 3 field(s)");
    }

    #[test]
    fn empty_failure_converts_to_ok() {
        let res = ValidationFailure::new().into_result(|| 7);
        assert_eq!(res, Ok(7));
    }
}
