//! Message catalogs loaded from per-locale TOML files.
//!
//! Each `<code>.toml` in the locale directory is one locale. Messages are
//! nested tables addressed with dotted keys (`dialogs.error_title`); the
//! optional `[meta]` table carries the human-readable `language_name`.
//!
//! ```toml
//! [meta]
//! language_name = "English"
//!
//! [players]
//! default_name = "Player {index}"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashMap;

use super::format::format_named;
use super::Translator;
use crate::core::{MemoryError, Result};

/// All loaded locales plus the active and fallback language.
#[derive(Clone, Debug)]
pub struct Catalog {
    messages: BTreeMap<String, toml::Table>,
    labels: FxHashMap<String, String>,
    /// Fallback as configured; `default` is derived from it.
    configured_default: String,
    default: String,
    /// Language last asked for; `lang` is the closest loaded match.
    requested: String,
    lang: String,
}

impl Catalog {
    /// A catalog with no locales. Every lookup returns the raw key.
    #[must_use]
    pub fn empty(default: &str) -> Self {
        let default = normalize_code(default);
        Self {
            messages: BTreeMap::new(),
            labels: FxHashMap::default(),
            configured_default: default.clone(),
            default: default.clone(),
            requested: default.clone(),
            lang: default,
        }
    }

    /// Load every `*.toml` file in `dir`.
    ///
    /// A missing directory gives an empty catalog; unreadable or malformed
    /// files are logged and skipped.
    #[must_use]
    pub fn load(dir: &Path, default: &str) -> Self {
        let mut catalog = Self::empty(default);

        let mut files: Vec<_> = match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == "toml"))
                .collect(),
            Err(err) => {
                log::warn!("cannot read locale directory {}: {}", dir.display(), err);
                Vec::new()
            }
        };
        files.sort();

        for path in files {
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match read_locale(&path) {
                Ok(table) => catalog.insert_locale(code, table),
                Err(err) => log::warn!("skipping locale: {}", err),
            }
        }

        catalog.settle_default();
        log::info!(
            "loaded {} locale(s) from {}, language {}",
            catalog.messages.len(),
            dir.display(),
            catalog.lang
        );
        catalog
    }

    /// Register a locale from already-parsed messages.
    ///
    /// A top-level `meta` table is removed from the messages; its
    /// `language_name` becomes the locale's label.
    pub fn add_locale(&mut self, code: &str, table: toml::Table) {
        self.insert_locale(code, table);
        self.settle_default();
    }

    fn insert_locale(&mut self, code: &str, mut table: toml::Table) {
        let code = normalize_code(code);
        if let Some(toml::Value::Table(meta)) = table.remove("meta") {
            if let Some(label) = meta.get("language_name").and_then(|v| v.as_str()) {
                let label = label.trim();
                if !label.is_empty() {
                    self.labels.insert(code.clone(), label.to_string());
                }
            }
        }
        self.messages.insert(code, table);
    }

    /// Parse and register a locale from TOML text.
    pub fn add_locale_str(&mut self, code: &str, text: &str) -> std::result::Result<(), toml::de::Error> {
        let table: toml::Table = toml::from_str(text)?;
        self.add_locale(code, table);
        Ok(())
    }

    /// Derive the fallback from the configured default (or the first
    /// locale when it is missing), then re-apply the requested language.
    fn settle_default(&mut self) {
        self.default = if self.messages.contains_key(&self.configured_default) {
            self.configured_default.clone()
        } else {
            self.messages
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| self.configured_default.clone())
        };
        self.apply_requested();
    }

    /// Switch the active language. Returns true if it changed.
    ///
    /// Unknown codes fall back to the default locale, then to the first
    /// loaded one.
    pub fn set_language(&mut self, code: &str) -> bool {
        self.requested = normalize_code(code);
        self.apply_requested()
    }

    fn apply_requested(&mut self) -> bool {
        let resolved = if self.messages.contains_key(&self.requested) {
            self.requested.clone()
        } else if self.messages.contains_key(&self.default) {
            self.default.clone()
        } else if let Some(first) = self.messages.keys().next() {
            first.clone()
        } else {
            self.lang.clone()
        };
        let changed = resolved != self.lang;
        self.lang = resolved;
        changed
    }

    /// Active language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.lang
    }

    /// Fallback language code.
    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default
    }

    /// Display name of a locale, or the code itself.
    #[must_use]
    pub fn language_label(&self, code: &str) -> String {
        let normalized = normalize_code(code);
        if let Some(label) = self.labels.get(&normalized) {
            return label.clone();
        }
        if normalized.is_empty() {
            self.lang.clone()
        } else {
            normalized
        }
    }

    /// `(code, label)` for every locale, sorted by label ignoring case.
    #[must_use]
    pub fn language_options(&self) -> Vec<(String, String)> {
        let mut options: Vec<_> = self
            .messages
            .keys()
            .map(|code| (code.clone(), self.language_label(code)))
            .collect();
        options.sort_by_cached_key(|(_, label)| label.to_lowercase());
        options
    }

    fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        let mut current = self.messages.get(code)?;
        let mut parts = key.split('.').peekable();
        while let Some(part) = parts.next() {
            let value = current.get(part)?;
            if parts.peek().is_none() {
                return value.as_str();
            }
            current = value.as_table()?;
        }
        None
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String {
        if key.is_empty() {
            return String::new();
        }
        let template = self
            .lookup(&self.lang, key)
            .or_else(|| self.lookup(&self.default, key));
        let Some(template) = template else {
            return key.to_string();
        };
        if params.is_empty() {
            return template.to_string();
        }
        format_named(template, params).unwrap_or_else(|| template.to_string())
    }
}

fn read_locale(path: &Path) -> Result<toml::Table> {
    let text = std::fs::read_to_string(path).map_err(|e| MemoryError::io(path, e))?;
    toml::from_str(&text).map_err(|source| MemoryError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}
