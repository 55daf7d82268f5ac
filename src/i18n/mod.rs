//! Localization.
//!
//! Hosts talk to the [`Translator`] trait; [`Catalog`] is the file-backed
//! implementation. Lookup order is: active locale, default locale, raw key.

pub mod catalog;
mod format;

pub use catalog::Catalog;

/// Key + named parameters → localized string.
pub trait Translator {
    /// Translate `key`, substituting `{name}` placeholders from `params`.
    fn translate(&self, key: &str, params: &[(&str, String)]) -> String;

    /// Translate a key without parameters.
    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}
