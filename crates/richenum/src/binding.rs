//! # Attribute binding
//!
//! [`EnumAttribute::bind`] attaches an enum type to a host attribute. The host
//! keeps storing its native raw form; the returned handle is the generated
//! accessor surface:
//!
//! | Handle method | Accessor | Behavior |
//! |---------------|----------|----------|
//! | [`get`](EnumAttribute::get) | `<attr>` | Read raw, wrap as the enum type (absent stays absent) |
//! | [`set`](EnumAttribute::set) | `<attr>=` | Unwrap instances of the bound type, pass anything else to the native setter |
//! | [`raw`](EnumAttribute::raw) | `<attr>_raw` | Native read, unwrapped |
//! | [`set_raw`](EnumAttribute::set_raw) | `<attr>_raw=` | Native write, no unwrapping |
//! | [`raws`](EnumAttribute::raws) | `<attr>_raws` | Declared mapping with string keys |
//!
//! Reads are never cached: every `get` goes back to the host.

use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::config;
use crate::enum_value::{symbol_of, AnyEnum, EnumKind, EnumValue};
use crate::error::Result;
use crate::host::{AttributeStore, BoundAttribute, EnumOptions, ModelType};
use crate::validation::EnumValidator;
use crate::value::{Repr, Symbol, Value};

/// Accessors for one enum-typed attribute of a host type.
#[derive(Debug)]
pub struct EnumAttribute<E> {
    attribute: String,
    options: EnumOptions,
    _kind: PhantomData<fn() -> E>,
}

impl<E> Clone for EnumAttribute<E> {
    fn clone(&self) -> Self {
        Self {
            attribute: self.attribute.clone(),
            options: self.options.clone(),
            _kind: PhantomData,
        }
    }
}

impl<E: EnumValue> EnumAttribute<E> {
    /// Bind `attribute` of `model` to the enum type `E`.
    ///
    /// Registers `E`'s value set with the native enum facility (forwarding
    /// `options`), then installs the method-table entry. Binding the same
    /// attribute again replaces both.
    pub fn bind<M>(model: &mut M, attribute: impl Into<String>, options: EnumOptions) -> Result<Self>
    where
        M: ModelType + ?Sized,
    {
        let attribute = attribute.into();
        let values = E::value_set()?;
        model.define_enum(&attribute, &values, &options)?;
        model.install_binding(BoundAttribute {
            attribute: attribute.clone(),
            kind: E::kind(),
            options: options.clone(),
        });
        tracing::debug!(attribute = %attribute, kind = E::SLUG, "bound enum attribute");
        Ok(Self {
            attribute,
            options,
            _kind: PhantomData,
        })
    }

    pub fn name(&self) -> &str {
        &self.attribute
    }

    pub fn options(&self) -> &EnumOptions {
        &self.options
    }

    /// `<attr>`: the current value as an `E`, `None` when absent or blank.
    pub fn get<R: AttributeStore + ?Sized>(&self, record: &R) -> Option<E> {
        wrap_raw(record.read_attribute(&self.attribute), &E::kind())
            .map(|value| E::from_symbol(Some(value)))
    }

    /// `<attr>=`: instances of `E` are unwrapped to their name; anything else
    /// reaches the native setter unchanged.
    pub fn set<R: AttributeStore + ?Sized>(&self, record: &mut R, value: impl Into<Value>) -> Result<()> {
        let value = match value.into() {
            Value::Enum(instance) if instance.kind() == Some(&E::kind()) => {
                instance.value().cloned().into()
            }
            other => other,
        };
        record.write_attribute(&self.attribute, value)
    }

    /// `<attr>_raw`: the native read.
    pub fn raw<R: AttributeStore + ?Sized>(&self, record: &R) -> Value {
        record.read_attribute(&self.attribute)
    }

    /// `<attr>_raw=`: the native write, bypassing enum wrapping.
    pub fn set_raw<R: AttributeStore + ?Sized>(&self, record: &mut R, value: impl Into<Value>) -> Result<()> {
        record.write_attribute(&self.attribute, value.into())
    }

    /// `<attr>_raws`: every declared name (as a string) and its representation.
    pub fn raws(&self) -> Result<IndexMap<String, Repr>> {
        Ok(E::value_set()?.to_raws())
    }

    /// The validation rule for this attribute.
    pub fn validator(&self) -> EnumValidator {
        EnumValidator::new(self.attribute.clone())
    }
}

/// Erased `<attr>` read for a bound attribute, as the validation rule sees it.
pub fn read_bound<R: AttributeStore + ?Sized>(binding: &BoundAttribute, record: &R) -> Value {
    match wrap_raw(record.read_attribute(&binding.attribute), &binding.kind) {
        Some(value) => Value::Enum(AnyEnum::new(binding.kind, Some(value))),
        None => Value::Null,
    }
}

/// The name to wrap for a raw read, `None` when there is nothing to wrap.
///
/// Undeclared names pass through; flagging them is the validator's job.
fn wrap_raw(raw: Value, kind: &EnumKind) -> Option<Symbol> {
    if raw.is_null() || (config::current().blank_is_absent && raw.is_blank()) {
        return None;
    }
    let value = symbol_of(raw)?;
    if tracing::enabled!(tracing::Level::TRACE) {
        let declared = kind
            .value_set()
            .map(|set| set.contains(value.as_str()))
            .unwrap_or(false);
        if !declared {
            tracing::trace!(kind = kind.slug(), value = %value, "wrapping undeclared enum value");
        }
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryModel, MemoryRecord};
    use crate::value::sym;
    use crate::value_set::Declaration;
    use std::sync::Arc;

    crate::enum_value! {
        pub struct Level => "level_enum";
    }

    fn model() -> (Arc<MemoryModel>, EnumAttribute<Level>) {
        Level::declare_values(Declaration::mapping([("low", 0), ("high", 1)])).unwrap();
        let mut model = MemoryModel::new("gauge").with_column("level");
        let level = EnumAttribute::<Level>::bind(&mut model, "level", EnumOptions::new()).unwrap();
        (Arc::new(model), level)
    }

    #[test]
    fn get_wraps_and_absent_stays_absent() {
        let (model, level) = model();
        let mut record = MemoryRecord::new(&model);
        assert_eq!(level.get(&record), None);

        level.set(&mut record, sym("high")).unwrap();
        assert_eq!(level.get(&record), Some(Level::new(sym("high"))));
    }

    #[test]
    fn set_unwraps_bound_instances() {
        let (model, level) = model();
        let mut record = MemoryRecord::new(&model);
        level.set(&mut record, Level::new(sym("low"))).unwrap();
        assert_eq!(record.column("level"), Some(&Repr::Int(0)));
    }

    #[test]
    fn read_bound_matches_typed_getter() {
        let (model, level) = model();
        let mut record = MemoryRecord::new(&model);
        let binding = model.binding("level").unwrap().clone();
        assert_eq!(read_bound(&binding, &record), Value::Null);

        level.set(&mut record, sym("high")).unwrap();
        let erased = read_bound(&binding, &record);
        assert_eq!(erased, Value::from(Level::new(sym("high"))));
    }

    #[test]
    fn blank_raw_reads_as_absent() {
        let kind = Level::kind();
        assert_eq!(wrap_raw(Value::from(""), &kind), None);
        assert_eq!(wrap_raw(Value::Null, &kind), None);
        assert_eq!(wrap_raw(Value::from("999"), &kind), Some(sym("999")));
    }

    #[test]
    fn handle_reports_attribute_and_options() {
        let (model, level) = model();
        assert_eq!(level.name(), "level");
        assert_eq!(level.options(), &EnumOptions::new());
        assert_eq!(model.enum_options("level"), Some(level.options()));
    }

    #[test]
    fn raws_lists_declared_mapping() {
        let (_model, level) = model();
        let raws = level.raws().unwrap();
        assert_eq!(
            serde_json::to_value(&raws).unwrap(),
            serde_json::json!({"low": 0, "high": 1})
        );
    }
}
