//! Localized string resolution and the in-memory catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use super::substitution::substitute;
use super::types::{TemplateError, TemplateResult, TemplateVars};
use crate::locale::FALLBACK_LOCALE;

/// Source of localized strings, normally backed by the host platform.
///
/// `get_string` resolves `key` within `component` for `locale` and fills the
/// placeholders of the result from `vars`. A missing key is an error: a
/// notification with broken text is a user-visible defect the caller must
/// learn about rather than something to swallow.
pub trait StringResolver: Send + Sync {
    fn get_string(
        &self,
        key: &str,
        component: &str,
        vars: &TemplateVars,
        locale: &str,
    ) -> TemplateResult<String>;
}

/// In-memory string catalog holding language packs per component and locale.
///
/// Lookups that miss the requested locale retry the fallback locale before
/// reporting the string as missing.
pub struct StringCatalog {
    strings: DashMap<(String, String, String), String>,
}

impl Default for StringCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StringCatalog {
    pub fn new() -> Self {
        Self {
            strings: DashMap::new(),
        }
    }

    /// Register a single localized string.
    pub fn register(
        &self,
        component: impl Into<String>,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.strings
            .insert((component.into(), locale.into(), key.into()), text.into());
    }

    /// Load a whole language pack from a flat JSON object of key -> text.
    ///
    /// Returns the number of strings registered.
    pub fn load_pack(&self, component: &str, locale: &str, json: &str) -> TemplateResult<usize> {
        let pack: BTreeMap<String, String> = serde_json::from_str(json)
            .map_err(|e| TemplateError::MalformedPack(e.to_string()))?;
        let count = pack.len();
        for (key, text) in pack {
            self.register(component, locale, key, text);
        }
        tracing::debug!(component, locale, count, "language pack loaded");
        Ok(count)
    }

    /// Number of strings currently registered.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    fn lookup(&self, component: &str, locale: &str, key: &str) -> Option<String> {
        self.strings
            .get(&(component.to_string(), locale.to_string(), key.to_string()))
            .map(|entry| entry.value().clone())
    }
}

impl StringResolver for StringCatalog {
    fn get_string(
        &self,
        key: &str,
        component: &str,
        vars: &TemplateVars,
        locale: &str,
    ) -> TemplateResult<String> {
        let text = self
            .lookup(component, locale, key)
            .or_else(|| {
                if locale != FALLBACK_LOCALE {
                    self.lookup(component, FALLBACK_LOCALE, key)
                } else {
                    None
                }
            })
            .ok_or_else(|| TemplateError::MissingString {
                key: key.to_string(),
                component: component.to_string(),
                locale: locale.to_string(),
            })?;

        Ok(substitute(&text, vars))
    }
}

/// Create an Arc-wrapped string catalog.
pub fn create_string_catalog() -> Arc<StringCatalog> {
    Arc::new(StringCatalog::new())
}
