//! # Host integration
//!
//! The host is the record layer that owns persistence. This crate talks to it
//! through two narrow traits:
//!
//! - [`ModelType`]: the record *type*. It provides the native enum facility
//!   ([`ModelType::define_enum`], which generates the host's own predicates,
//!   bang setters and scopes) and a method table where bindings are installed.
//! - [`AttributeStore`]: a record *instance*. Reads and writes go through the
//!   host's own attribute primitives, so the host keeps its native coercion.
//!
//! [`memory`] is a complete in-memory host implementing both.
//!
//! Binding declarations mutate type-level metadata and are expected to run
//! once, before records of that type exist.

pub mod memory;

use crate::enum_value::EnumKind;
use crate::error::Result;
use crate::value::Value;
use crate::value_set::ValueSet;

/// Naming affix applied to generated convenience methods and scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Affix {
    #[default]
    None,
    /// Use the attribute name (`size_big?`).
    Attribute,
    /// Use a custom word (`shirt_big?`).
    Custom(String),
}

impl Affix {
    /// The affix text for `attribute`, if any.
    pub fn resolve(&self, attribute: &str) -> Option<String> {
        match self {
            Affix::None => None,
            Affix::Attribute => Some(attribute.to_string()),
            Affix::Custom(word) => Some(word.clone()),
        }
    }
}

/// Options forwarded untouched to the host's native enum facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOptions {
    pub prefix: Affix,
    pub suffix: Affix,
    /// Whether to generate query scopes.
    pub scopes: bool,
}

impl Default for EnumOptions {
    fn default() -> Self {
        Self {
            prefix: Affix::None,
            suffix: Affix::None,
            scopes: true,
        }
    }
}

impl EnumOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix generated names with the attribute name.
    pub fn prefixed(mut self) -> Self {
        self.prefix = Affix::Attribute;
        self
    }

    pub fn prefix(mut self, word: impl Into<String>) -> Self {
        self.prefix = Affix::Custom(word.into());
        self
    }

    /// Suffix generated names with the attribute name.
    pub fn suffixed(mut self) -> Self {
        self.suffix = Affix::Attribute;
        self
    }

    pub fn suffix(mut self, word: impl Into<String>) -> Self {
        self.suffix = Affix::Custom(word.into());
        self
    }

    pub fn without_scopes(mut self) -> Self {
        self.scopes = false;
        self
    }

    /// Base name of the convenience methods generated for `name`.
    pub fn method_name(&self, attribute: &str, name: &str) -> String {
        let mut method = String::new();
        if let Some(prefix) = self.prefix.resolve(attribute) {
            method.push_str(&prefix);
            method.push('_');
        }
        method.push_str(name);
        if let Some(suffix) = self.suffix.resolve(attribute) {
            method.push('_');
            method.push_str(&suffix);
        }
        method
    }
}

/// Method-table entry recording that an attribute reads as an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAttribute {
    pub attribute: String,
    pub kind: EnumKind,
    pub options: EnumOptions,
}

/// A host record type.
pub trait ModelType {
    /// Native enum facility: map `attribute` onto `values` and generate the
    /// host's convenience methods according to `options`.
    ///
    /// Defining the same attribute again replaces the earlier definition.
    fn define_enum(&mut self, attribute: &str, values: &ValueSet, options: &EnumOptions)
        -> Result<()>;

    /// Install (or replace) the binding entry for `binding.attribute`.
    fn install_binding(&mut self, binding: BoundAttribute);

    fn binding(&self, attribute: &str) -> Option<&BoundAttribute>;
}

/// A host record instance.
pub trait AttributeStore {
    /// The attribute as the host reads it; `Value::Null` when unset.
    fn read_attribute(&self, attribute: &str) -> Value;

    /// Write through the host's own coercion.
    fn write_attribute(&mut self, attribute: &str, value: Value) -> Result<()>;
}
