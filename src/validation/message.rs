// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Validation message keys, parameters and the lookup seam used to localize them.
//!
//! Validators never embed user-facing text. They ask a [`MessageLookup`] for
//! the text of a key, passing the field label and any bounds. The English
//! templates in [`default_template`] exist only as a fallback for lookups that
//! have no translation.

use std::collections::BTreeMap;
use std::fmt;

/// Message keys understood by the validation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Required,
    EnumInvalid,
    StringMinLength,
    StringMaxLength,
    EmailInvalid,
    PasswordMinLength,
    PasswordRequiredCharacters,
    ConfirmPasswordMismatch,
    PhoneInvalid,
    UrlInvalid,
    NumberMin,
    NumberMax,
    NumberInvalid,
    PublicIdInvalid,
    ApiError,
    NetworkError,
}

impl MessageKey {
    /// Every key, used by catalog completeness checks.
    pub const ALL: [MessageKey; 16] = [
        MessageKey::Required,
        MessageKey::EnumInvalid,
        MessageKey::StringMinLength,
        MessageKey::StringMaxLength,
        MessageKey::EmailInvalid,
        MessageKey::PasswordMinLength,
        MessageKey::PasswordRequiredCharacters,
        MessageKey::ConfirmPasswordMismatch,
        MessageKey::PhoneInvalid,
        MessageKey::UrlInvalid,
        MessageKey::NumberMin,
        MessageKey::NumberMax,
        MessageKey::NumberInvalid,
        MessageKey::PublicIdInvalid,
        MessageKey::ApiError,
        MessageKey::NetworkError,
    ];

    /// Dotted catalog key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "validation.required",
            Self::EnumInvalid => "validation.enum.invalid",
            Self::StringMinLength => "validation.string.minLength",
            Self::StringMaxLength => "validation.string.maxLength",
            Self::EmailInvalid => "validation.email.invalid",
            Self::PasswordMinLength => "validation.password.minLength",
            Self::PasswordRequiredCharacters => "validation.password.requiredCharacters",
            Self::ConfirmPasswordMismatch => "validation.confirmPassword.mismatch",
            Self::PhoneInvalid => "validation.phone.invalid",
            Self::UrlInvalid => "validation.url.invalid",
            Self::NumberMin => "validation.number.min",
            Self::NumberMax => "validation.number.max",
            Self::NumberInvalid => "validation.number.invalid",
            Self::PublicIdInvalid => "validation.publicId.invalid",
            Self::ApiError => "validation.api.error",
            Self::NetworkError => "validation.network.error",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single interpolation value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Number(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        Self::Number(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

/// Named interpolation parameters (`field`, `min`, `max`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageParams {
    values: BTreeMap<String, ParamValue>,
}

impl MessageParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Localization seam: produce display text for a message key.
///
/// Implementations must not fail; an unknown key should fall back to some
/// readable text (typically the key itself).
pub trait MessageLookup {
    fn lookup(&self, key: &str, params: &MessageParams) -> String;

    /// Whether `key` has a real template rather than the key fallback.
    fn has_template(&self, key: &str) -> bool {
        default_template(key).is_some()
    }
}

impl<L: MessageLookup + ?Sized> MessageLookup for &L {
    fn lookup(&self, key: &str, params: &MessageParams) -> String {
        (**self).lookup(key, params)
    }

    fn has_template(&self, key: &str) -> bool {
        (**self).has_template(key)
    }
}

/// Lookup that renders the built-in English templates.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultMessages;

impl MessageLookup for DefaultMessages {
    fn lookup(&self, key: &str, params: &MessageParams) -> String {
        match default_template(key) {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }
}

/// English fallback template for a catalog key.
pub fn default_template(key: &str) -> Option<&'static str> {
    let template = match key {
        "validation.required" => "{{field}} is required",
        "validation.enum.invalid" => "{{field}} must be one of: {{options}}",
        "validation.string.minLength" => "{{field}} must be at least {{min}} characters long",
        "validation.string.maxLength" => "{{field}} must not exceed {{max}} characters",
        "validation.email.invalid" => "Please enter a valid email address",
        "validation.password.minLength" => "Password must be at least {{min}} characters long",
        "validation.password.requiredCharacters" => {
            "Password must contain at least one uppercase letter, one lowercase letter, and one number"
        }
        "validation.confirmPassword.mismatch" => "Passwords do not match",
        "validation.phone.invalid" => "Please enter a valid phone number",
        "validation.url.invalid" => "Please enter a valid URL",
        "validation.number.min" => "{{field}} must be at least {{min}}",
        "validation.number.max" => "{{field}} must not exceed {{max}}",
        "validation.number.invalid" => "{{field}} must be a valid number",
        "validation.publicId.invalid" => {
            "{{field}} may only contain letters, numbers, hyphens and underscores"
        }
        "validation.api.error" => "An error occurred while processing your request",
        "validation.network.error" => "Network error. Please check your connection and try again",
        _ => return None,
    };
    Some(template)
}

/// Replace `{{name}}` placeholders with parameter values.
///
/// Whitespace inside the braces is ignored. Placeholders without a matching
/// parameter are left untouched so missing data stays visible.
pub fn interpolate(template: &str, params: &MessageParams) -> String {
    if params.is_empty() || !template.contains("{{") {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                match params.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Typed message constructors over an injected lookup.
pub struct ValidationMessages<'a> {
    lookup: &'a dyn MessageLookup,
}

impl<'a> ValidationMessages<'a> {
    pub fn new(lookup: &'a dyn MessageLookup) -> Self {
        Self { lookup }
    }

    fn text(&self, key: MessageKey, params: MessageParams) -> String {
        self.lookup.lookup(key.as_str(), &params)
    }

    pub fn required(&self, field: &str) -> String {
        let field = if field.is_empty() { "Field" } else { field };
        self.text(MessageKey::Required, MessageParams::new().with("field", field))
    }

    pub fn enum_invalid(&self, field: &str, options: &[&str]) -> String {
        self.text(
            MessageKey::EnumInvalid,
            MessageParams::new()
                .with("field", field)
                .with("options", options.join(", ")),
        )
    }

    pub fn string_min_length(&self, field: &str, min: usize) -> String {
        self.text(
            MessageKey::StringMinLength,
            MessageParams::new().with("field", field).with("min", min),
        )
    }

    pub fn string_max_length(&self, field: &str, max: usize) -> String {
        self.text(
            MessageKey::StringMaxLength,
            MessageParams::new().with("field", field).with("max", max),
        )
    }

    pub fn email_invalid(&self) -> String {
        self.text(MessageKey::EmailInvalid, MessageParams::new())
    }

    pub fn password_min_length(&self, min: usize) -> String {
        self.text(MessageKey::PasswordMinLength, MessageParams::new().with("min", min))
    }

    pub fn password_required_characters(&self) -> String {
        self.text(MessageKey::PasswordRequiredCharacters, MessageParams::new())
    }

    pub fn confirm_password_mismatch(&self) -> String {
        self.text(MessageKey::ConfirmPasswordMismatch, MessageParams::new())
    }

    pub fn phone_invalid(&self) -> String {
        self.text(MessageKey::PhoneInvalid, MessageParams::new())
    }

    pub fn url_invalid(&self) -> String {
        self.text(MessageKey::UrlInvalid, MessageParams::new())
    }

    pub fn number_min(&self, field: &str, min: i64) -> String {
        self.text(
            MessageKey::NumberMin,
            MessageParams::new().with("field", field).with("min", min),
        )
    }

    pub fn number_max(&self, field: &str, max: i64) -> String {
        self.text(
            MessageKey::NumberMax,
            MessageParams::new().with("field", field).with("max", max),
        )
    }

    pub fn number_invalid(&self, field: &str) -> String {
        self.text(MessageKey::NumberInvalid, MessageParams::new().with("field", field))
    }

    pub fn public_id_invalid(&self, field: &str) -> String {
        self.text(MessageKey::PublicIdInvalid, MessageParams::new().with("field", field))
    }

    /// Prefer a server-supplied message, otherwise the generic API error text.
    pub fn api_error(&self, message: Option<&str>) -> String {
        match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self.text(MessageKey::ApiError, MessageParams::new()),
        }
    }

    pub fn network_error(&self) -> String {
        self.text(MessageKey::NetworkError, MessageParams::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every lookup so tests can assert on keys and params.
    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(String, MessageParams)>>,
    }

    impl MessageLookup for Recording {
        fn lookup(&self, key: &str, params: &MessageParams) -> String {
            self.calls.borrow_mut().push((key.to_string(), params.clone()));
            format!("<{key}>")
        }
    }

    #[test]
    fn interpolate_replaces_known_params() {
        let params = MessageParams::new().with("field", "Title").with("min", 5usize);
        assert_eq!(
            interpolate("{{field}} must be at least {{ min }} characters", &params),
            "Title must be at least 5 characters"
        );
    }

    #[test]
    fn interpolate_keeps_unknown_and_unterminated_placeholders() {
        let params = MessageParams::new().with("field", "Title");
        assert_eq!(interpolate("{{field}} {{max}}", &params), "Title {{max}}");
        assert_eq!(interpolate("{{field}} {{oops", &params), "Title {{oops");
    }

    #[test]
    fn default_messages_cover_every_key() {
        for key in MessageKey::ALL {
            assert!(
                default_template(key.as_str()).is_some(),
                "missing fallback for {key}"
            );
        }
    }

    #[test]
    fn default_messages_fall_back_to_key() {
        assert_eq!(
            DefaultMessages.lookup("validation.unknown", &MessageParams::new()),
            "validation.unknown"
        );
    }

    #[test]
    fn default_messages_know_their_templates() {
        assert!(DefaultMessages.has_template("validation.required"));
        assert!(!DefaultMessages.has_template("503"));
    }

    #[test]
    fn required_defaults_field_label() {
        let messages = ValidationMessages::new(&DefaultMessages);
        assert_eq!(messages.required(""), "Field is required");
        assert_eq!(messages.required("Public ID"), "Public ID is required");
    }

    #[test]
    fn messages_pass_bounds_to_lookup() {
        let recording = Recording::default();
        let messages = ValidationMessages::new(&recording);
        assert_eq!(messages.string_max_length("Title", 200), "<validation.string.maxLength>");

        let calls = recording.calls.borrow();
        let (key, params) = &calls[0];
        assert_eq!(key, "validation.string.maxLength");
        assert_eq!(params.get("field"), Some(&ParamValue::Text("Title".into())));
        assert_eq!(params.get("max"), Some(&ParamValue::Number(200)));
    }

    #[test]
    fn api_error_prefers_server_message() {
        let messages = ValidationMessages::new(&DefaultMessages);
        assert_eq!(messages.api_error(Some("Boom")), "Boom");
        assert_eq!(
            messages.api_error(None),
            "An error occurred while processing your request"
        );
    }
}
