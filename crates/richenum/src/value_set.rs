//! Value sets and the registration table.
//!
//! A [`ValueSet`] is the ordered mapping from every declared name of one enum
//! type to its persisted representation. Value sets are built from a
//! [`Declaration`] and stored, immutable, in a process-wide table keyed by
//! the enum type's identity. Declaring again replaces the entry (last write
//! wins) unless strict declarations are configured.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::enum_value::EnumKind;
use crate::error::ConfigurationError;
use crate::value::{Repr, Symbol, Value};

/// Ordered mapping from symbolic name to persisted representation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueSet {
    entries: IndexMap<Symbol, Repr>,
}

impl ValueSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Persisted representation for a name.
    pub fn get(&self, name: &str) -> Option<&Repr> {
        self.entries.get(name)
    }

    /// Reverse lookup: the name persisted as `repr`.
    pub fn name_for(&self, repr: &Repr) -> Option<&Symbol> {
        self.entries
            .iter()
            .find(|(_, r)| *r == repr)
            .map(|(name, _)| name)
    }

    /// Declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Repr)> {
        self.entries.iter()
    }

    /// The mapping with names rendered as plain strings.
    pub fn to_raws(&self) -> IndexMap<String, Repr> {
        self.entries
            .iter()
            .map(|(name, repr)| (name.to_string(), repr.clone()))
            .collect()
    }
}

/// How an enum type states its values.
///
/// - `Mapping`: explicit name → representation pairs.
/// - `Names`: a plain list; each name persists as its own text.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Mapping(Vec<(Symbol, Repr)>),
    Names(Vec<Value>),
}

impl Declaration {
    pub fn mapping<K, R>(pairs: impl IntoIterator<Item = (K, R)>) -> Self
    where
        K: Into<Symbol>,
        R: Into<Repr>,
    {
        Declaration::Mapping(
            pairs
                .into_iter()
                .map(|(k, r)| (k.into(), r.into()))
                .collect(),
        )
    }

    pub fn names<V: Into<Value>>(names: impl IntoIterator<Item = V>) -> Self {
        Declaration::Names(names.into_iter().map(Into::into).collect())
    }

    /// Build the value set, rejecting list elements that are not names.
    pub fn into_value_set(self) -> Result<ValueSet, ConfigurationError> {
        let entries: IndexMap<Symbol, Repr> = match self {
            Declaration::Mapping(pairs) => {
                warn_on_duplicate_reprs(&pairs);
                pairs.into_iter().collect()
            }
            Declaration::Names(names) => names
                .into_iter()
                .enumerate()
                .map(|(index, name)| {
                    let name = match name {
                        Value::Symbol(s) => s,
                        Value::Text(s) => Symbol::from(s),
                        other => {
                            return Err(ConfigurationError::InvalidName {
                                index,
                                found: other.type_name(),
                            })
                        }
                    };
                    let repr = Repr::Text(name.to_string());
                    Ok((name, repr))
                })
                .collect::<Result<_, _>>()?,
        };
        Ok(ValueSet { entries })
    }
}

fn warn_on_duplicate_reprs(pairs: &[(Symbol, Repr)]) {
    let mut seen = HashSet::new();
    for (name, repr) in pairs {
        if !seen.insert(repr) {
            tracing::warn!(%name, %repr, "duplicate persisted representation in value set");
        }
    }
}

static REGISTRY: Lazy<RwLock<HashMap<TypeId, Arc<ValueSet>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Store `values` for `kind`, replacing any earlier declaration unless `strict`.
pub(crate) fn register(
    kind: &EnumKind,
    values: ValueSet,
    strict: bool,
) -> Result<Arc<ValueSet>, ConfigurationError> {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if registry.contains_key(&kind.id()) {
        if strict {
            return Err(ConfigurationError::Redeclared { kind: kind.slug() });
        }
        tracing::warn!(kind = kind.slug(), "redeclaring enum values");
    }
    tracing::debug!(kind = kind.slug(), count = values.len(), "declared enum values");
    let values = Arc::new(values);
    registry.insert(kind.id(), Arc::clone(&values));
    Ok(values)
}

/// The value set declared for `kind`, if any.
pub(crate) fn registered(kind: &EnumKind) -> Option<Arc<ValueSet>> {
    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&kind.id())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enum_value::EnumValue;

    crate::enum_value! {
        pub struct Replaced => "replaced_enum";
    }

    crate::enum_value! {
        pub struct Strict => "strict_enum";
    }

    fn set(names: &[&str]) -> ValueSet {
        Declaration::names(names.iter().copied())
            .into_value_set()
            .unwrap()
    }

    #[test]
    fn register_replaces_earlier_declaration() {
        let kind = Replaced::kind();
        register(&kind, set(&["a"]), false).unwrap();
        register(&kind, set(&["b"]), false).unwrap();

        let current = registered(&kind).unwrap();
        assert!(!current.contains("a"));
        assert!(current.contains("b"));
    }

    #[test]
    fn strict_register_rejects_redeclaration() {
        let kind = Strict::kind();
        register(&kind, set(&["a"]), true).unwrap();
        let err = register(&kind, set(&["b"]), true).unwrap_err();
        assert_eq!(err, ConfigurationError::Redeclared { kind: "strict_enum" });
        assert_eq!(err.to_string(), "Values for strict_enum are already declared");

        let current = registered(&kind).unwrap();
        assert!(current.contains("a"));
        assert!(!current.contains("b"));
    }

    #[test]
    fn mapping_preserves_declaration_order() {
        let set = Declaration::mapping([("confused", 0), ("happy", 1), ("angry", 2)])
            .into_value_set()
            .unwrap();
        let names: Vec<_> = set.names().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["confused", "happy", "angry"]);
        assert_eq!(set.get("happy"), Some(&Repr::Int(1)));
    }

    #[test]
    fn names_persist_as_their_own_text() {
        let set = Declaration::names([Value::from(Symbol::new("pending")), Value::from("done")])
            .into_value_set()
            .unwrap();
        assert_eq!(set.get("pending"), Some(&Repr::Text("pending".into())));
        assert_eq!(set.get("done"), Some(&Repr::Text("done".into())));
    }

    #[test]
    fn names_reject_non_name_elements() {
        let err = Declaration::names([Value::from("ok"), Value::from(3)])
            .into_value_set()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::InvalidName {
                index: 1,
                found: "Integer"
            }
        );
    }

    #[test]
    fn reverse_lookup_finds_name() {
        let set = Declaration::mapping([("big", 0), ("small", 1)])
            .into_value_set()
            .unwrap();
        assert_eq!(set.name_for(&Repr::Int(1)), Some(&Symbol::new("small")));
        assert_eq!(set.name_for(&Repr::Int(9)), None);
    }

    #[test]
    fn to_raws_uses_string_keys() {
        let set = Declaration::mapping([("big", 0), ("small", 1)])
            .into_value_set()
            .unwrap();
        let raws = set.to_raws();
        assert_eq!(raws.get("big"), Some(&Repr::Int(0)));
        assert_eq!(raws.len(), 2);
    }

    #[test]
    fn value_set_serializes_as_object() {
        let set = Declaration::mapping([("big", 0), ("small", 1)])
            .into_value_set()
            .unwrap();
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"big":0,"small":1}"#
        );
    }
}
