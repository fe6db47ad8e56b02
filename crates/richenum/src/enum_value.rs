//! # Enum value objects
//!
//! An enum type is a closed, named set of cases whose instances are value
//! objects: they can carry behavior (computed properties, predicates, labels)
//! while persisting as a plain integer or string.
//!
//! ```ignore
//! richenum::enum_value! {
//!     /// Payment lifecycle.
//!     pub struct PaymentStatus => "payment_status";
//! }
//!
//! impl PaymentStatus {
//!     pub fn is_settled(&self) -> bool {
//!         *self == "completed"
//!     }
//! }
//!
//! PaymentStatus::declare_values(Declaration::mapping([
//!     ("pending", 0),
//!     ("processing", 10),
//!     ("completed", 20),
//! ]))?;
//!
//! let status = PaymentStatus::lookup(sym("completed"))?;
//! assert!(status.is_settled());
//! ```
//!
//! ## Construction vs. lookup
//!
//! Construction (`new`/`wrap`) accepts any name, and the absence marker, as
//! is. Only [`EnumValue::lookup`] and the validation rule check membership
//! in the declared value set; the binding layer relies on this to wrap stale
//! raw values without losing them.
//!
//! ## Equality
//!
//! Two instances are equal when they are the same enum type and carry the same
//! name. An instance also equals a bare name (`Symbol`, `&str`, `String`).
//! Erased instances ([`AnyEnum`]) of different enum types never compare equal,
//! whatever their names or representations.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::config;
use crate::error::{ConfigurationError, Error, Result};
use crate::locale::Translator;
use crate::value::{Symbol, Value};
use crate::value_set::{self, Declaration, ValueSet};

/// Structural identity of a concrete enum type.
#[derive(Debug, Clone, Copy)]
pub struct EnumKind {
    id: TypeId,
    slug: &'static str,
}

impl EnumKind {
    pub fn of<E: EnumValue>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            slug: E::SLUG,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The explicit slug declared by the enum type.
    pub fn slug(&self) -> &'static str {
        self.slug
    }

    /// The value set currently declared for this kind.
    pub fn value_set(&self) -> Result<Arc<ValueSet>> {
        value_set::registered(self).ok_or_else(|| {
            ConfigurationError::Undeclared { kind: self.slug }.into()
        })
    }
}

impl PartialEq for EnumKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EnumKind {}

/// A type-erased enum instance.
///
/// `kind` is `None` for an instance of the abstract base itself, which no
/// concrete enum type can produce; the validation rule rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyEnum {
    kind: Option<EnumKind>,
    value: Option<Symbol>,
}

impl AnyEnum {
    pub fn new(kind: EnumKind, value: Option<Symbol>) -> Self {
        Self {
            kind: Some(kind),
            value,
        }
    }

    /// An instance of the abstract base, with no concrete enum type.
    pub fn untyped(value: Option<Symbol>) -> Self {
        Self { kind: None, value }
    }

    pub fn kind(&self) -> Option<&EnumKind> {
        self.kind.as_ref()
    }

    pub fn value(&self) -> Option<&Symbol> {
        self.value.as_ref()
    }

    /// Whether the name is declared in the kind's value set.
    pub fn is_declared(&self) -> bool {
        match (&self.kind, &self.value) {
            (Some(kind), Some(value)) => kind
                .value_set()
                .map(|set| set.contains(value.as_str()))
                .unwrap_or(false),
            _ => false,
        }
    }
}

impl fmt::Display for AnyEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}", value),
            None => Ok(()),
        }
    }
}

/// Symbolic name carried by a loosely shaped value, as construction sees it.
///
/// Absence stays absence; integers are taken by their text.
pub(crate) fn symbol_of(value: Value) -> Option<Symbol> {
    match value {
        Value::Null => None,
        Value::Symbol(s) => Some(s),
        Value::Text(s) => Some(Symbol::from(s)),
        Value::Int(n) => Some(Symbol::new(n.to_string())),
        Value::Enum(e) => e.value,
    }
}

/// A concrete enum type.
///
/// Implement it with [`enum_value!`](crate::enum_value!) rather than by hand.
pub trait EnumValue: Clone + fmt::Debug + Send + Sync + Sized + 'static {
    /// Slug used in localization keys (`<namespace>.<slug>.<name>`).
    const SLUG: &'static str;

    fn from_symbol(value: Option<Symbol>) -> Self;

    fn symbol(&self) -> Option<&Symbol>;

    fn kind() -> EnumKind {
        EnumKind::of::<Self>()
    }

    /// Construct from a name, a string token, or absence. Never fails.
    fn wrap(value: impl Into<Value>) -> Self {
        Self::from_symbol(symbol_of(value.into()))
    }

    /// Declare this type's values, replacing any earlier declaration.
    ///
    /// With `strict_declarations` configured, a second declaration fails.
    fn declare_values(declaration: impl Into<Declaration>) -> Result<()> {
        let values = declaration.into().into_value_set()?;
        let strict = config::current().strict_declarations;
        value_set::register(&Self::kind(), values, strict)?;
        Ok(())
    }

    fn value_set() -> Result<Arc<ValueSet>> {
        Self::kind().value_set()
    }

    /// Alias of [`all_cases`](EnumValue::all_cases).
    fn all() -> Result<Vec<Self>> {
        Self::all_cases()
    }

    /// One instance per declared name, in declaration order.
    fn all_cases() -> Result<Vec<Self>> {
        Ok(Self::value_set()?
            .names()
            .map(|name| Self::from_symbol(Some(name.clone())))
            .collect())
    }

    /// Checked construction.
    ///
    /// `key` must be a [`Symbol`]; any other shape (including a string with
    /// the right text) is a caller mistake and reported as such.
    fn lookup(key: impl Into<Value>) -> Result<Self> {
        let key = match key.into() {
            Value::Symbol(s) => s,
            other => {
                return Err(Error::InvalidKeyType {
                    found: other.type_name(),
                })
            }
        };
        let values = Self::value_set()?;
        if !values.contains(key.as_str()) {
            return Err(Error::UnknownValue {
                value: key.to_string(),
                valid: values.names().cloned().collect(),
            });
        }
        Ok(Self::from_symbol(Some(key)))
    }

    fn value(&self) -> Option<&Symbol> {
        self.symbol()
    }

    fn to_any(&self) -> AnyEnum {
        AnyEnum::new(Self::kind(), self.symbol().cloned())
    }

    fn equals(&self, other: &Value) -> bool {
        match other {
            Value::Symbol(s) => self.symbol() == Some(s),
            Value::Text(t) => self.symbol().is_some_and(|s| s == t.as_str()),
            Value::Enum(e) => e.kind() == Some(&Self::kind()) && e.value() == self.symbol(),
            Value::Null | Value::Int(_) => false,
        }
    }

    /// Whether any element of `collection` equals this instance.
    fn included_in<V: Into<Value>>(&self, collection: impl IntoIterator<Item = V>) -> bool {
        collection
            .into_iter()
            .any(|item| self.equals(&item.into()))
    }

    /// Whether the name is one of the declared values.
    fn is_declared(&self) -> bool {
        self.to_any().is_declared()
    }

    fn label_key(&self) -> Option<String> {
        let value = self.symbol()?;
        Some(format!(
            "{}.{}.{}",
            config::current().namespace,
            Self::SLUG.to_lowercase(),
            value
        ))
    }

    /// Display label resolved by `translator`, `None` for absence.
    ///
    /// Whatever the translator returns is passed through, including its
    /// missing-translation text.
    fn localized_label(&self, translator: &dyn Translator) -> Option<String> {
        self.label_key().map(|key| translator.translate(&key))
    }

    fn to_text(&self) -> String {
        self.symbol().map(Symbol::to_string).unwrap_or_default()
    }
}

/// Declare a concrete enum type.
///
/// ```ignore
/// richenum::enum_value! {
///     /// Shirt sizes.
///     pub struct SizeEnum => "size_enum";
/// }
/// ```
///
/// Generates the struct, its [`EnumValue`] impl, an inherent `new`, equality
/// against instances and bare names, `Hash`, `Display` and conversion into
/// [`Value`].
#[macro_export]
macro_rules! enum_value {
    ($(#[$meta:meta])* $vis:vis struct $name:ident => $slug:literal $(;)?) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        $vis struct $name {
            value: Option<$crate::Symbol>,
        }

        impl $crate::EnumValue for $name {
            const SLUG: &'static str = $slug;

            fn from_symbol(value: Option<$crate::Symbol>) -> Self {
                Self { value }
            }

            fn symbol(&self) -> Option<&$crate::Symbol> {
                self.value.as_ref()
            }
        }

        impl $name {
            /// Permissive construction from a name, string token or absence.
            #[allow(dead_code)]
            pub fn new(value: impl Into<$crate::Value>) -> Self {
                <Self as $crate::EnumValue>::wrap(value)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                self.value.hash(state);
            }
        }

        impl PartialEq<$crate::Symbol> for $name {
            fn eq(&self, other: &$crate::Symbol) -> bool {
                self.value.as_ref() == Some(other)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.value.as_ref().is_some_and(|v| v.as_str() == other)
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                *self == **other
            }
        }

        impl PartialEq<String> for $name {
            fn eq(&self, other: &String) -> bool {
                *self == *other.as_str()
            }
        }

        impl PartialEq<$crate::Value> for $name {
            fn eq(&self, other: &$crate::Value) -> bool {
                $crate::EnumValue::equals(self, other)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&$crate::EnumValue::to_text(self))
            }
        }

        impl From<$name> for $crate::Value {
            fn from(e: $name) -> Self {
                $crate::Value::Enum($crate::EnumValue::to_any(&e))
            }
        }

        impl From<&$name> for $crate::Value {
            fn from(e: &$name) -> Self {
                $crate::Value::Enum($crate::EnumValue::to_any(e))
            }
        }
    };
}
