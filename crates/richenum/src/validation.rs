//! The enum validation rule.
//!
//! Validation never fails loudly: problems are reported to an [`ErrorSink`]
//! so that several issues on one record surface together, and the record is
//! left for the caller to inspect.

use indexmap::IndexMap;

use crate::value::Value;

/// Collects validation messages per attribute.
pub trait ErrorSink {
    fn add_error(&mut self, attribute: &str, message: String);
}

/// Accumulated validation messages, in the order attributes first failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: IndexMap<String, Vec<String>>,
}

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded for `attribute` (empty when it passed).
    pub fn get(&self, attribute: &str) -> &[String] {
        self.entries
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(attribute, messages)| {
            messages
                .iter()
                .map(move |message| (attribute.as_str(), message.as_str()))
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ErrorSink for Errors {
    fn add_error(&mut self, attribute: &str, message: String) {
        self.entries
            .entry(attribute.to_string())
            .or_default()
            .push(message);
    }
}

/// Checks that an attribute holds a declared value of a concrete enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValidator {
    attribute: String,
    allow_nil: bool,
}

impl EnumValidator {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            allow_nil: false,
        }
    }

    pub fn allow_nil(mut self, allow: bool) -> Self {
        self.allow_nil = allow;
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn allows_nil(&self) -> bool {
        self.allow_nil
    }

    /// Validate the attribute's current (wrapped) value.
    ///
    /// Returns `true` when nothing was recorded. Past the absence check, the
    /// type and membership checks both run, so one call can record two
    /// messages.
    pub fn validate(&self, value: &Value, sink: &mut dyn ErrorSink) -> bool {
        let attribute = self.attribute.as_str();

        if value.is_null() {
            if self.allow_nil {
                return true;
            }
            sink.add_error(
                attribute,
                format!("nil value for {} is not allowed", attribute),
            );
            return false;
        }

        let instance = value.as_enum();
        let mut valid = true;

        if instance.and_then(|e| e.kind()).is_none() {
            sink.add_error(
                attribute,
                format!("{} is not a valid subclass of EnumValue", value),
            );
            valid = false;
        }

        if !instance.is_some_and(|e| e.is_declared()) {
            sink.add_error(
                attribute,
                format!("{} is not a valid {} type", value, attribute),
            );
            valid = false;
        }

        valid
    }
}
