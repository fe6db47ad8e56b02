//! Symbolic names, persisted representations and dynamic host values.
//!
//! Three shapes flow through the crate:
//!
//! - [`Symbol`]: the human-readable name of one enum case (`happy`).
//! - [`Repr`]: what the host persists for that case, an integer or a string.
//! - [`Value`]: whatever application code hands to a setter or a lookup. It
//!   mirrors what a host attribute accepts; boundary operations reject the
//!   wrong shape at runtime.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enum_value::AnyEnum;

/// The name of one enum case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for Symbol {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Symbol {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Shorthand for [`Symbol::new`].
pub fn sym(name: &str) -> Symbol {
    Symbol::new(name)
}

/// The persisted representation of an enum case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repr {
    Int(i64),
    Text(String),
}

impl Repr {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Repr::Int(n) => Some(*n),
            Repr::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Repr::Text(s) => Some(s),
            Repr::Int(_) => None,
        }
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repr::Int(n) => write!(f, "{}", n),
            Repr::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Repr {
    fn from(n: i64) -> Self {
        Repr::Int(n)
    }
}

impl From<i32> for Repr {
    fn from(n: i32) -> Self {
        Repr::Int(n.into())
    }
}

impl From<&str> for Repr {
    fn from(s: &str) -> Self {
        Repr::Text(s.to_string())
    }
}

impl From<String> for Repr {
    fn from(s: String) -> Self {
        Repr::Text(s)
    }
}

/// A dynamically shaped attribute value.
///
/// `Null` is the absence marker. It is never coerced into a `"null"` name.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Symbol(Symbol),
    Text(String),
    Int(i64),
    Enum(AnyEnum),
}

impl Value {
    /// Name of the shape, as reported in key-type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Nil",
            Value::Symbol(_) => "Symbol",
            Value::Text(_) => "String",
            Value::Int(_) => "Integer",
            Value::Enum(_) => "Enum",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null, or text made only of whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Textual form of the value, `None` for absence.
    ///
    /// Enum instances render their symbolic name.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Symbol(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Text(s) => Some(Cow::Borrowed(s)),
            Value::Int(n) => Some(Cow::Owned(n.to_string())),
            Value::Enum(e) => e.value().map(|s| Cow::Borrowed(s.as_str())),
        }
    }

    pub fn as_enum(&self) -> Option<&AnyEnum> {
        match self {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<&Symbol> for Value {
    fn from(s: &Symbol) -> Self {
        Value::Symbol(s.clone())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<Repr> for Value {
    fn from(repr: Repr) -> Self {
        match repr {
            Repr::Int(n) => Value::Int(n),
            Repr::Text(s) => Value::Text(s),
        }
    }
}

impl From<AnyEnum> for Value {
    fn from(e: AnyEnum) -> Self {
        Value::Enum(e)
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_accessors_match_variant() {
        assert_eq!(Repr::Int(3).as_int(), Some(3));
        assert_eq!(Repr::Int(3).as_text(), None);
        assert_eq!(Repr::from("big").as_text(), Some("big"));
        assert_eq!(Repr::from("big").as_int(), None);
    }

    #[test]
    fn type_names_match_shapes() {
        assert_eq!(Value::Null.type_name(), "Nil");
        assert_eq!(Value::from(sym("happy")).type_name(), "Symbol");
        assert_eq!(Value::from("happy").type_name(), "String");
        assert_eq!(Value::from(1).type_name(), "Integer");
    }

    #[test]
    fn option_none_is_null() {
        let v: Value = Option::<Symbol>::None.into();
        assert!(v.is_null());
        let v: Value = Some("big").into();
        assert_eq!(v, Value::Text("big".into()));
    }

    #[test]
    fn blank_covers_null_and_whitespace() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("").is_blank());
        assert!(Value::from("  ").is_blank());
        assert!(!Value::from("big").is_blank());
        assert!(!Value::from(0).is_blank());
    }

    #[test]
    fn repr_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Repr::Int(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Repr::from("big")).unwrap(),
            "\"big\""
        );
        let parsed: Repr = serde_json::from_str("\"small\"").unwrap();
        assert_eq!(parsed, Repr::Text("small".into()));
    }

    #[test]
    fn display_renders_absence_as_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(7).to_string(), "7");
        assert_eq!(sym("tired").to_string(), "tired");
    }
}
