//! Localization lookup.
//!
//! Enum labels are resolved through a [`Translator`], keyed by
//! `<namespace>.<slug>.<name>`. This crate only builds the key; resolution
//! belongs to whatever translation layer the application already has.
//! [`Catalog`] is a small stand-alone translator over locale files shaped like:
//!
//! ```yaml
//! en:
//!   richenum:
//!     emotion_enum:
//!       happy: "Happy"
//!       angry: "Angry"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Resolves a dotted key to display text.
///
/// Implementations return their own "missing" text for unknown keys rather
/// than failing.
pub trait Translator {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Flat key → text table for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    locale: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: HashMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
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

    /// Parse a YAML locale document, keeping the entries under `locale`.
    pub fn from_yaml_str(locale: &str, source: &str) -> Result<Self> {
        let document: serde_yaml::Value = serde_yaml::from_str(source)?;
        let mut catalog = Self::new(locale);
        if let Some(root) = document.get(locale) {
            flatten_yaml(root, String::new(), &mut catalog.entries);
        }
        Ok(catalog)
    }

    /// Parse a JSON locale document, keeping the entries under `locale`.
    pub fn from_json_str(locale: &str, source: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(source)?;
        let mut catalog = Self::new(locale);
        if let Some(root) = document.get(locale) {
            flatten_json(root, String::new(), &mut catalog.entries);
        }
        Ok(catalog)
    }

    /// Load a locale file, picking the parser from the extension.
    ///
    /// `.json` files are read as JSON, anything else as YAML.
    pub fn from_path(locale: &str, path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(locale, &source),
            _ => Self::from_yaml_str(locale, &source),
        }
    }

    /// Add every entry of `other`, overwriting existing keys.
    pub fn merge(&mut self, other: Catalog) {
        self.entries.extend(other.entries);
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => text.clone(),
            None => format!("translation missing: {}.{}", self.locale, key),
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn flatten_yaml(node: &serde_yaml::Value, prefix: String, out: &mut HashMap<String, String>) {
    use serde_yaml::Value;

    match node {
        Value::Mapping(map) => {
            for (key, child) in map {
                let key = match key {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                flatten_yaml(child, join(&prefix, &key), out);
            }
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            out.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix, b.to_string());
        }
        _ => {}
    }
}

fn flatten_json(node: &serde_json::Value, prefix: String, out: &mut HashMap<String, String>) {
    use serde_json::Value;

    match node {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_json(child, join(&prefix, key), out);
            }
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Number(n) => {
            out.insert(prefix, n.to_string());
        }
        Value::Bool(b) => {
            out.insert(prefix, b.to_string());
        }
        _ => {}
    }
}
