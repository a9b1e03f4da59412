// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Reusable field rules: ordered check pipelines that stop at the first failure.
//!
//! Rules are plain data. Messages are produced at check time through the
//! injected [`MessageLookup`], so one rule set can serve every locale.

use std::sync::LazyLock;

use email_address::EmailAddress;
use regex::Regex;
use url::Url;

use super::error::{Format, LengthBound, RangeBound, RuleFailure, Violation};
use super::message::{MessageLookup, ValidationMessages};

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+84|0)[0-9]{9,10}$").expect("phone pattern compiles")
});

/// Dotted domain ending in a TLD of two or more letters.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

static PUBLIC_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("public id pattern compiles"));

/// Minimum password length enforced by [`StringRule::password`].
pub const PASSWORD_MIN_LENGTH: usize = 8;

const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// One step of a string pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringCheck {
    /// Non-empty (after trimming, when the rule trims).
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    PasswordMinLength(usize),
    PasswordCharacters,
    Phone,
    Url,
    PublicId,
    /// Must equal the given value exactly.
    Matches(String),
}

/// A labelled, ordered pipeline of string checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringRule {
    label: String,
    trim: bool,
    optional: bool,
    checks: Vec<StringCheck>,
}

impl StringRule {
    /// Empty pipeline that trims its input and requires presence.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            trim: true,
            optional: false,
            checks: Vec::new(),
        }
    }

    /// Non-empty after trimming.
    pub fn required(label: impl Into<String>) -> Self {
        Self::new(label).check(StringCheck::Required)
    }

    /// Absent values pass without running any check.
    pub fn optional_string() -> Self {
        Self::new("Field").optional()
    }

    /// Required, at least `min` characters and (optionally) at most `max`.
    pub fn with_length(label: impl Into<String>, min: usize, max: Option<usize>) -> Self {
        let rule = Self::required(label).check(StringCheck::MinLength(min));
        match max {
            Some(max) => rule.check(StringCheck::MaxLength(max)),
            None => rule,
        }
    }

    pub fn email() -> Self {
        Self::required("Email").check(StringCheck::Email)
    }

    /// Passwords are never trimmed.
    pub fn password() -> Self {
        Self::required("Password")
            .untrimmed()
            .check(StringCheck::PasswordMinLength(PASSWORD_MIN_LENGTH))
            .check(StringCheck::PasswordCharacters)
    }

    pub fn phone() -> Self {
        Self::required("Phone").check(StringCheck::Phone)
    }

    pub fn url() -> Self {
        Self::required("URL").check(StringCheck::Url)
    }

    /// Required and equal to `password`.
    pub fn confirm_password(password: impl Into<String>) -> Self {
        Self::required("Confirm Password")
            .untrimmed()
            .check(StringCheck::Matches(password.into()))
    }

    /// Append a check to the pipeline.
    pub fn check(mut self, check: StringCheck) -> Self {
        self.checks.push(check);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the pipeline against a loose value.
    ///
    /// Returns the normalized value (`None` only for an absent optional value)
    /// or the first failing check.
    pub fn validate(
        &self,
        value: Option<&str>,
        lookup: &dyn MessageLookup,
    ) -> Result<Option<String>, RuleFailure> {
        let messages = ValidationMessages::new(lookup);
        let Some(raw) = value else {
            if self.optional {
                return Ok(None);
            }
            return Err(RuleFailure::new(
                Violation::RequiredField,
                messages.required(&self.label),
            ));
        };

        let value = if self.trim { raw.trim() } else { raw };
        for check in &self.checks {
            if let Some(failure) = self.run_check(check, value, &messages) {
                return Err(failure);
            }
        }
        Ok(Some(value.to_string()))
    }

    fn run_check(
        &self,
        check: &StringCheck,
        value: &str,
        messages: &ValidationMessages<'_>,
    ) -> Option<RuleFailure> {
        let len = value.chars().count();
        let label = self.label.as_str();
        match check {
            StringCheck::Required => value.is_empty().then(|| {
                RuleFailure::new(Violation::RequiredField, messages.required(label))
            }),
            StringCheck::MinLength(min) => (len < *min).then(|| {
                RuleFailure::new(
                    Violation::LengthViolation(LengthBound::Min(*min)),
                    messages.string_min_length(label, *min),
                )
            }),
            StringCheck::MaxLength(max) => (len > *max).then(|| {
                RuleFailure::new(
                    Violation::LengthViolation(LengthBound::Max(*max)),
                    messages.string_max_length(label, *max),
                )
            }),
            StringCheck::Email => (!is_valid_email(value)).then(|| {
                RuleFailure::new(Violation::InvalidFormat(Format::Email), messages.email_invalid())
            }),
            StringCheck::PasswordMinLength(min) => (len < *min).then(|| {
                RuleFailure::new(
                    Violation::LengthViolation(LengthBound::Min(*min)),
                    messages.password_min_length(*min),
                )
            }),
            StringCheck::PasswordCharacters => (!is_strong_password(value)).then(|| {
                RuleFailure::new(
                    Violation::InvalidFormat(Format::Password),
                    messages.password_required_characters(),
                )
            }),
            StringCheck::Phone => (!PHONE_PATTERN.is_match(value)).then(|| {
                RuleFailure::new(Violation::InvalidFormat(Format::Phone), messages.phone_invalid())
            }),
            StringCheck::Url => (!is_valid_url(value)).then(|| {
                RuleFailure::new(Violation::InvalidFormat(Format::Url), messages.url_invalid())
            }),
            StringCheck::PublicId => (!is_valid_public_id(value)).then(|| {
                RuleFailure::new(
                    Violation::InvalidFormat(Format::PublicId),
                    messages.public_id_invalid(label),
                )
            }),
            StringCheck::Matches(expected) => (value != expected).then(|| {
                RuleFailure::new(Violation::Mismatch, messages.confirm_password_mismatch())
            }),
        }
    }
}

/// Inclusive numeric bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberRule {
    label: String,
    min: Option<i64>,
    max: Option<i64>,
}

impl NumberRule {
    pub fn new(label: impl Into<String>, min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    /// Reject non-finite values, then check the lower and upper bounds.
    pub fn validate(&self, value: f64, lookup: &dyn MessageLookup) -> Result<f64, RuleFailure> {
        let messages = ValidationMessages::new(lookup);
        if !value.is_finite() {
            return Err(RuleFailure::new(
                Violation::InvalidFormat(Format::Number),
                messages.number_invalid(&self.label),
            ));
        }
        if let Some(min) = self.min
            && value < min as f64
        {
            return Err(RuleFailure::new(
                Violation::OutOfRange(RangeBound::Min(min)),
                messages.number_min(&self.label, min),
            ));
        }
        if let Some(max) = self.max
            && value > max as f64
        {
            return Err(RuleFailure::new(
                Violation::OutOfRange(RangeBound::Max(max)),
                messages.number_max(&self.label, max),
            ));
        }
        Ok(value)
    }
}

/// A closed set of accepted tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Picklist {
    label: String,
    options: Vec<&'static str>,
}

impl Picklist {
    pub fn new(label: impl Into<String>, options: &[&'static str]) -> Self {
        Self {
            label: label.into(),
            options: options.to_vec(),
        }
    }

    /// Exact, untrimmed match against the options.
    pub fn validate(
        &self,
        value: Option<&str>,
        lookup: &dyn MessageLookup,
    ) -> Result<&'static str, RuleFailure> {
        value
            .and_then(|v| self.options.iter().copied().find(|opt| *opt == v))
            .ok_or_else(|| {
                RuleFailure::new(
                    Violation::InvalidEnum,
                    ValidationMessages::new(lookup).enum_invalid(&self.label, &self.options),
                )
            })
    }
}

/// Rule constructors bound to one message lookup.
///
/// ```ignore
/// let schemas = Schemas::new(DefaultMessages);
/// let email = schemas.email().validate(Some("user@example.com"))?;
/// ```
pub struct Schemas<L> {
    lookup: L,
}

/// A rule paired with the lookup that renders its messages.
pub struct Bound<'a, R> {
    pub rule: R,
    lookup: &'a dyn MessageLookup,
}

impl<L: MessageLookup> Schemas<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    fn bind<R>(&self, rule: R) -> Bound<'_, R> {
        Bound {
            rule,
            lookup: &self.lookup,
        }
    }

    pub fn required_string(&self, label: &str) -> Bound<'_, StringRule> {
        self.bind(StringRule::required(label))
    }

    pub fn optional_string(&self) -> Bound<'_, StringRule> {
        self.bind(StringRule::optional_string())
    }

    pub fn string_with_length(&self, label: &str, min: usize, max: usize) -> Bound<'_, StringRule> {
        self.bind(StringRule::with_length(label, min, Some(max)))
    }

    pub fn email(&self) -> Bound<'_, StringRule> {
        self.bind(StringRule::email())
    }

    pub fn password(&self) -> Bound<'_, StringRule> {
        self.bind(StringRule::password())
    }

    pub fn phone(&self) -> Bound<'_, StringRule> {
        self.bind(StringRule::phone())
    }

    pub fn url(&self) -> Bound<'_, StringRule> {
        self.bind(StringRule::url())
    }

    pub fn confirm_password(&self, password: &str) -> Bound<'_, StringRule> {
        self.bind(StringRule::confirm_password(password))
    }

    pub fn number(&self, label: &str, min: i64, max: i64) -> Bound<'_, NumberRule> {
        self.bind(NumberRule::new(label, Some(min), Some(max)))
    }

    pub fn picklist(&self, label: &str, options: &[&'static str]) -> Bound<'_, Picklist> {
        self.bind(Picklist::new(label, options))
    }
}

impl Bound<'_, StringRule> {
    pub fn validate(&self, value: Option<&str>) -> Result<Option<String>, RuleFailure> {
        self.rule.validate(value, self.lookup)
    }
}

impl Bound<'_, NumberRule> {
    pub fn validate(&self, value: f64) -> Result<f64, RuleFailure> {
        self.rule.validate(value, self.lookup)
    }
}

impl Bound<'_, Picklist> {
    pub fn validate(&self, value: Option<&str>) -> Result<&'static str, RuleFailure> {
        self.rule.validate(value, self.lookup)
    }
}

fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
        && EmailAddress::parse_with_options(value, Default::default()).is_ok()
}

fn is_valid_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

fn is_strong_password(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));
    allowed
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Letters, digits, hyphens and underscores only.
pub fn is_valid_public_id(value: &str) -> bool {
    PUBLIC_ID_PATTERN.is_match(value)
}
