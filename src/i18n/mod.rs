// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Embedded translation catalogs and the translator that serves them.
//!
//! Catalogs are nested JSON objects flattened into dotted keys
//! (`post.publicId`). Lookups fall back from the active locale to English,
//! then to the built-in validation templates, then to the key itself.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::message::{MessageLookup, MessageParams, default_template, interpolate};

const EN_CATALOG: &str = include_str!("../../locales/en.json");
const JA_CATALOG: &str = include_str!("../../locales/ja.json");

/// Supported UI languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ja];

    /// BCP 47 primary language tag.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }

    /// Name of the language in that language, for the switcher.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ja => "日本語",
        }
    }

    /// Resolve a tag such as `ja`, `ja-JP` or `en_US`; unknown tags map to English.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ja" => Self::Ja,
            _ => Self::En,
        }
    }

    fn catalog_source(&self) -> &'static str {
        match self {
            Self::En => EN_CATALOG,
            Self::Ja => JA_CATALOG,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Flattened key → template map for one locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Parse a nested JSON catalog. Leaves must be strings.
    pub fn parse(source: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(source).context("catalog is not valid JSON")?;
        if !root.is_object() {
            bail!("catalog root must be a JSON object");
        }
        let mut entries = HashMap::new();
        flatten("", &root, &mut entries)?;
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out)?;
            }
            Ok(())
        }
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
            Ok(())
        }
        other => bail!("catalog entry '{prefix}' must be a string, found {other}"),
    }
}

/// Locale-aware lookup over the embedded catalogs.
///
/// Cloning is cheap; catalogs are shared.
#[derive(Clone, Debug)]
pub struct Translator {
    locale: Locale,
    catalogs: Arc<HashMap<Locale, Catalog>>,
}

impl Translator {
    /// Load every embedded catalog and activate `locale`.
    pub fn new(locale: Locale) -> Result<Self> {
        let mut catalogs = HashMap::new();
        for loc in Locale::ALL {
            let catalog = Catalog::parse(loc.catalog_source())
                .with_context(|| format!("failed to load '{loc}' catalog"))?;
            catalogs.insert(loc, catalog);
        }
        Ok(Self {
            locale,
            catalogs: Arc::new(catalogs),
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale != locale {
            tracing::info!(from = %self.locale, to = %locale, "locale changed");
        }
        self.locale = locale;
    }

    /// Translate a key without parameters.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &MessageParams::new())
    }

    /// Translate a key and interpolate `{{name}}` placeholders.
    pub fn t_with(&self, key: &str, params: &MessageParams) -> String {
        match self.resolve(key) {
            Some(template) => interpolate(template, params),
            None => {
                tracing::debug!(key, locale = %self.locale, "missing translation");
                key.to_string()
            }
        }
    }

    /// Whether any fallback level has a template for `key`.
    pub fn has(&self, key: &str) -> bool {
        self.resolve(key).is_some()
    }

    fn resolve(&self, key: &str) -> Option<&str> {
        self.template(self.locale, key)
            .or_else(|| self.template(Locale::En, key))
            .or_else(|| default_template(key))
    }

    fn template(&self, locale: Locale, key: &str) -> Option<&str> {
        self.catalogs.get(&locale).and_then(|c| c.get(key))
    }
}

impl MessageLookup for Translator {
    fn lookup(&self, key: &str, params: &MessageParams) -> String {
        self.t_with(key, params)
    }

    fn has_template(&self, key: &str) -> bool {
        self.has(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::message::MessageKey;

    #[test]
    fn embedded_catalogs_share_the_same_keys() {
        let en = Catalog::parse(EN_CATALOG).unwrap();
        let ja = Catalog::parse(JA_CATALOG).unwrap();
        let mut en_keys: Vec<_> = en.keys().collect();
        let mut ja_keys: Vec<_> = ja.keys().collect();
        en_keys.sort_unstable();
        ja_keys.sort_unstable();
        assert_eq!(en_keys, ja_keys);
    }

    #[test]
    fn catalogs_translate_every_validation_key() {
        let en = Catalog::parse(EN_CATALOG).unwrap();
        for key in MessageKey::ALL {
            assert!(en.get(key.as_str()).is_some(), "en missing {key}");
        }
    }

    #[test]
    fn parse_rejects_non_string_leaves() {
        let err = Catalog::parse(r#"{"a": {"b": 1}}"#).unwrap_err();
        assert!(err.to_string().contains("a.b"));
        assert!(Catalog::parse("[]").is_err());
    }

    #[test]
    fn locale_from_code_handles_regions() {
        assert_eq!(Locale::from_code("ja"), Locale::Ja);
        assert_eq!(Locale::from_code("ja-JP"), Locale::Ja);
        assert_eq!(Locale::from_code("en_US"), Locale::En);
        assert_eq!(Locale::from_code("fr"), Locale::En);
        assert_eq!(Locale::from_code(""), Locale::En);
    }

    #[test]
    fn translator_interpolates_and_switches_locale() {
        let mut t = Translator::new(Locale::En).unwrap();
        let params = MessageParams::new().with("field", "Public ID");
        assert_eq!(t.lookup("validation.required", &params), "Public ID is required");

        t.set_locale(Locale::Ja);
        assert_eq!(t.lookup("validation.required", &params), "Public IDは必須です");
        assert_eq!(t.t("form.submit"), "送信");
    }

    #[test]
    fn translator_falls_back_to_key() {
        let t = Translator::new(Locale::Ja).unwrap();
        assert_eq!(t.t("does.not.exist"), "does.not.exist");
        assert!(!t.has("does.not.exist"));
        assert!(t.has("post.errors.publicIdTaken"));
    }

    #[test]
    fn clones_share_catalogs_but_not_locale() {
        let en = Translator::new(Locale::En).unwrap();
        let mut ja = en.clone();
        ja.set_locale(Locale::Ja);
        assert_eq!(en.t("nav.home"), "Home");
        assert_eq!(ja.t("nav.home"), "ホーム");
    }
}
