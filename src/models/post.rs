// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Post draft domain model and the loosely typed record it is validated from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who can see a post once it is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

impl Visibility {
    /// Every accepted value, in display order.
    pub const ALL: [Visibility; 2] = [Visibility::Private, Visibility::Public];

    /// Wire token for this visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a visibility token is outside the closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVisibility(pub String);

impl FromStr for Visibility {
    type Err = UnknownVisibility;

    /// Parse an exact, case-sensitive token (`"private"` or `"public"`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "private" => Ok(Self::Private),
            "public" => Ok(Self::Public),
            other => Err(UnknownVisibility(other.to_string())),
        }
    }
}

/// A validated, normalized post draft.
///
/// String fields are trimmed and `public_id` is `Some` with a non-empty value
/// whenever `visibility` is [`Visibility::Public`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

impl PostDraft {
    /// Convert back into a boundary record, e.g. to re-validate a stored draft.
    pub fn to_input(&self) -> RawPostInput {
        RawPostInput {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            visibility: Some(self.visibility.as_str().to_string()),
            public_id: self.public_id.clone(),
        }
    }
}

/// Candidate post record as it arrives from a form or JSON payload.
///
/// Every field may be missing. `public_id` is canonicalized so that a missing
/// key, `null` and `""` all end up as `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawPostInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<String>,
    pub public_id: Option<String>,
}

impl RawPostInput {
    /// Build a candidate from loose form values.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        visibility: impl Into<String>,
        public_id: Option<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            visibility: Some(visibility.into()),
            public_id: public_id.filter(|id| !id.is_empty()),
        }
    }

    /// Read a candidate out of an arbitrary JSON object.
    ///
    /// Strings are taken verbatim, numbers and booleans are stringified, and
    /// `null`, arrays, objects or missing keys count as absent. A non-object
    /// value yields an all-absent candidate.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| loose_string(value.get(key));
        Self {
            title: field("title"),
            description: field("description"),
            visibility: field("visibility"),
            public_id: field("publicId").filter(|id| !id.is_empty()),
        }
    }
}

impl From<&PostDraft> for RawPostInput {
    fn from(draft: &PostDraft) -> Self {
        draft.to_input()
    }
}

fn loose_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn visibility_parses_only_exact_tokens() {
        assert_eq!("private".parse::<Visibility>(), Ok(Visibility::Private));
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        assert!("Public".parse::<Visibility>().is_err());
        assert!("".parse::<Visibility>().is_err());
    }

    #[test]
    fn visibility_defaults_to_private() {
        assert_eq!(Visibility::default(), Visibility::Private);
    }

    #[test]
    fn loose_public_id_forms_collapse_to_none() {
        for payload in [
            json!({ "visibility": "public" }),
            json!({ "visibility": "public", "publicId": null }),
            json!({ "visibility": "public", "publicId": "" }),
        ] {
            assert_eq!(RawPostInput::from_value(&payload).public_id, None);
        }
    }

    #[test]
    fn from_value_stringifies_scalars() {
        let raw = RawPostInput::from_value(&json!({
            "title": 42,
            "description": true,
            "visibility": ["public"],
            "publicId": "my-post"
        }));
        assert_eq!(raw.title.as_deref(), Some("42"));
        assert_eq!(raw.description.as_deref(), Some("true"));
        assert_eq!(raw.visibility, None);
        assert_eq!(raw.public_id.as_deref(), Some("my-post"));
    }

    #[test]
    fn draft_serializes_camel_case_and_skips_absent_id() {
        let draft = PostDraft {
            title: "T".into(),
            description: "D".into(),
            visibility: Visibility::Private,
            public_id: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({ "title": "T", "description": "D", "visibility": "private" })
        );

        let public = PostDraft {
            visibility: Visibility::Public,
            public_id: Some("slug".into()),
            ..draft
        };
        assert_eq!(serde_json::to_value(&public).unwrap()["publicId"], "slug");
    }

    #[test]
    fn to_input_round_trips_through_boundary_record() {
        let draft = PostDraft {
            title: "T".into(),
            description: "D".into(),
            visibility: Visibility::Public,
            public_id: Some("id".into()),
        };
        let raw = RawPostInput::from(&draft);
        assert_eq!(raw.visibility.as_deref(), Some("public"));
        assert_eq!(raw.public_id.as_deref(), Some("id"));
    }
}
