// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Post schema: static per-field rules plus one cross-field rule.
//!
//! - `title`, `description`: required after trimming (optionally length-bounded).
//! - `visibility`: one of `private` / `public`; absent means `private`.
//! - `publicId`: required only when `visibility` is `public`, error attributed
//!   to `publicId`. For `private` posts the value is never inspected.
//!
//! Every failing field is reported in one pass.

use serde_json::Value;

use crate::models::post::{PostDraft, RawPostInput, Visibility};
use crate::validation::error::ValidationFailure;
use crate::validation::message::MessageLookup;
use crate::validation::rules::{Picklist, StringCheck, StringRule};

/// Form field names as reported in error mappings.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const VISIBILITY: &str = "visibility";
    pub const PUBLIC_ID: &str = "publicId";
}

pub const TITLE_LABEL: &str = "Title";
pub const DESCRIPTION_LABEL: &str = "Description";
pub const VISIBILITY_LABEL: &str = "Visibility";
pub const PUBLIC_ID_LABEL: &str = "Public ID";

/// Length bounds used by [`PostSchema::with_length_bounds`].
pub const TITLE_LENGTH: (usize, usize) = (5, 200);
pub const DESCRIPTION_LENGTH: (usize, usize) = (10, 1000);

/// Validator for [`PostDraft`] candidates over an injected message lookup.
pub struct PostSchema<L> {
    lookup: L,
    title: StringRule,
    description: StringRule,
    visibility: Picklist,
    public_id: StringRule,
}

impl<L: MessageLookup> PostSchema<L> {
    /// Required title and description, closed visibility set, conditional public ID.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            title: StringRule::required(TITLE_LABEL),
            description: StringRule::required(DESCRIPTION_LABEL),
            visibility: Picklist::new(
                VISIBILITY_LABEL,
                &[Visibility::Private.as_str(), Visibility::Public.as_str()],
            ),
            public_id: StringRule::required(PUBLIC_ID_LABEL),
        }
    }

    /// Same as [`PostSchema::new`] with title 5–200 and description 10–1000 characters.
    pub fn with_length_bounds(lookup: L) -> Self {
        let mut schema = Self::new(lookup);
        schema.title = StringRule::with_length(TITLE_LABEL, TITLE_LENGTH.0, Some(TITLE_LENGTH.1));
        schema.description = StringRule::with_length(
            DESCRIPTION_LABEL,
            DESCRIPTION_LENGTH.0,
            Some(DESCRIPTION_LENGTH.1),
        );
        schema
    }

    /// Additionally require a public ID to use letters, digits, `-` and `_` only.
    pub fn with_public_id_format(mut self) -> Self {
        self.public_id = self.public_id.check(StringCheck::PublicId);
        self
    }

    /// Validate a candidate, collecting every failing field.
    pub fn validate(&self, input: &RawPostInput) -> Result<PostDraft, ValidationFailure> {
        let mut failure = ValidationFailure::new();

        let title = self.field(&mut failure, fields::TITLE, &self.title, input.title.as_deref());
        let description = self.field(
            &mut failure,
            fields::DESCRIPTION,
            &self.description,
            input.description.as_deref(),
        );
        let visibility = self.visibility(&mut failure, input.visibility.as_deref());

        // Cross-field rule: only evaluated once visibility itself is known.
        let public_id = match visibility {
            Some(Visibility::Public) => self.field(
                &mut failure,
                fields::PUBLIC_ID,
                &self.public_id,
                input.public_id.as_deref(),
            ),
            Some(Visibility::Private) => input
                .public_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            None => None,
        };

        failure.into_result(|| PostDraft {
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            visibility: visibility.unwrap_or_default(),
            public_id,
        })
    }

    /// Validate a JSON payload, normalizing loose field types first.
    pub fn validate_value(&self, value: &Value) -> Result<PostDraft, ValidationFailure> {
        self.validate(&RawPostInput::from_value(value))
    }

    /// Validate a single field for live feedback (e.g. on blur).
    ///
    /// Returns the message for `field` if it currently fails, using the whole
    /// candidate so that `publicId` honours the visibility it depends on.
    pub fn validate_field(&self, input: &RawPostInput, field: &str) -> Option<String> {
        self.validate(input)
            .err()
            .and_then(|failure| failure.field_errors().remove(field))
    }

    fn field(
        &self,
        failure: &mut ValidationFailure,
        name: &str,
        rule: &StringRule,
        value: Option<&str>,
    ) -> Option<String> {
        match rule.validate(value, &self.lookup) {
            Ok(value) => value,
            Err(err) => {
                failure.push(name, err);
                None
            }
        }
    }

    fn visibility(
        &self,
        failure: &mut ValidationFailure,
        value: Option<&str>,
    ) -> Option<Visibility> {
        let Some(raw) = value else {
            return Some(Visibility::default());
        };
        match self.visibility.validate(Some(raw), &self.lookup) {
            Ok(token) => token.parse().ok(),
            Err(err) => {
                failure.push(fields::VISIBILITY, err);
                None
            }
        }
    }
}
