//! In-memory host.
//!
//! [`MemoryModel`] is a record type with a native enum facility shaped like
//! the ones ORMs ship: for every declared name it generates a predicate
//! (`happy?`), a bang setter (`happy!`) and a pair of scopes (`happy`,
//! `not_happy`), named with the configured prefix/suffix. [`MemoryRecord`]
//! stores one raw column value per attribute and coerces writes the way a
//! native enum column does.
//!
//! Models are configured mutably (columns, enums, bindings, validators) and
//! then shared behind an `Arc` by the records created from them.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use super::{AttributeStore, BoundAttribute, EnumOptions, ModelType};
use crate::binding::read_bound;
use crate::error::{Error, Result};
use crate::validation::{EnumValidator, Errors};
use crate::value::{Repr, Symbol, Value};
use crate::value_set::ValueSet;

#[derive(Debug, Clone)]
struct NativeEnum {
    values: ValueSet,
    options: EnumOptions,
}

/// A generated convenience method: which attribute it reads/writes and the
/// name it tests for or assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Generated {
    attribute: String,
    value: Symbol,
}

/// A generated query scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    attribute: String,
    repr: Repr,
    negated: bool,
}

impl Scope {
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Whether `record` is selected. Records with no value never are.
    pub fn matches(&self, record: &MemoryRecord) -> bool {
        match record.column(&self.attribute) {
            Some(repr) => (*repr == self.repr) != self.negated,
            None => false,
        }
    }

    pub fn filter<'a>(
        &self,
        records: impl IntoIterator<Item = &'a MemoryRecord>,
    ) -> Vec<&'a MemoryRecord> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryModel {
    name: String,
    columns: IndexSet<String>,
    enums: IndexMap<String, NativeEnum>,
    methods: HashMap<String, Generated>,
    scopes: HashMap<String, Scope>,
    bindings: IndexMap<String, BoundAttribute>,
    validators: Vec<EnumValidator>,
}

impl MemoryModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.columns.insert(column.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Run `validator` whenever a record of this model is validated.
    pub fn validates(&mut self, validator: EnumValidator) {
        self.validators.push(validator);
    }

    /// The native plural accessor: declared names (as strings) to their
    /// persisted representations.
    pub fn enum_mapping(&self, attribute: &str) -> Option<IndexMap<String, Repr>> {
        self.enums
            .get(attribute)
            .map(|native| native.values.to_raws())
    }

    /// Options the native enum for `attribute` was defined with.
    pub fn enum_options(&self, attribute: &str) -> Option<&EnumOptions> {
        self.enums.get(attribute).map(|native| &native.options)
    }

    /// Whether a generated predicate/bang method exists (`happy`, `happy?`, `happy!`).
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method_base(method))
    }

    pub fn scope(&self, name: &str) -> Result<&Scope> {
        self.scopes
            .get(name)
            .ok_or_else(|| Error::UnknownMethod(name.to_string()))
    }

    fn generated(&self, method: &str) -> Result<&Generated> {
        self.methods
            .get(method_base(method))
            .ok_or_else(|| Error::UnknownMethod(method.to_string()))
    }

    /// Drop everything previously generated for `attribute`.
    fn forget(&mut self, attribute: &str) {
        self.methods.retain(|_, g| g.attribute != attribute);
        self.scopes.retain(|_, s| s.attribute != attribute);
    }

    /// Native write coercion.
    fn cast_write(&self, attribute: &str, value: Value) -> Result<Option<Repr>> {
        if !self.has_column(attribute) {
            return Err(Error::UnknownAttribute(attribute.to_string()));
        }
        let Some(native) = self.enums.get(attribute) else {
            return Ok(match value {
                Value::Null => None,
                Value::Int(n) => Some(Repr::Int(n)),
                other => other.as_text().map(|text| Repr::Text(text.into_owned())),
            });
        };
        if value.is_blank() {
            return Ok(None);
        }
        let values = &native.values;
        let repr = match &value {
            Value::Int(n) => values.name_for(&Repr::Int(*n)).map(|_| Repr::Int(*n)),
            other => other.as_text().and_then(|text| {
                values
                    .get(&text)
                    .cloned()
                    .or_else(|| declared_repr(values, &text))
            }),
        };
        repr.map(Some).ok_or_else(|| Error::InvalidEnumValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
    }

    /// Native read: enum columns read as their declared name, or as the raw
    /// text when the stored value matches no name.
    fn cast_read(&self, attribute: &str, stored: Option<&Repr>) -> Value {
        let Some(repr) = stored else {
            return Value::Null;
        };
        match self.enums.get(attribute) {
            Some(native) => match native.values.name_for(repr) {
                Some(name) => Value::Text(name.to_string()),
                None => Value::Text(repr.to_string()),
            },
            None => repr.clone().into(),
        }
    }
}

/// A text that is itself a declared representation (`"1"` for an integer
/// column, `"big"` for a string column).
fn declared_repr(values: &ValueSet, text: &str) -> Option<Repr> {
    let candidate = match text.parse::<i64>() {
        Ok(n) => Repr::Int(n),
        Err(_) => Repr::Text(text.to_string()),
    };
    values.name_for(&candidate).map(|_| candidate)
}

fn method_base(method: &str) -> &str {
    method.trim_end_matches(['?', '!'])
}

impl ModelType for MemoryModel {
    fn define_enum(
        &mut self,
        attribute: &str,
        values: &ValueSet,
        options: &EnumOptions,
    ) -> Result<()> {
        if !self.has_column(attribute) {
            return Err(Error::UnknownAttribute(attribute.to_string()));
        }

        let mut generated = Vec::with_capacity(values.len());
        for (name, repr) in values.iter() {
            let method = options.method_name(attribute, name.as_str());
            if let Some(existing) = self.methods.get(&method) {
                if existing.attribute != attribute {
                    return Err(Error::MethodConflict {
                        attribute: attribute.to_string(),
                        method,
                        existing: existing.attribute.clone(),
                    });
                }
            }
            generated.push((method, name.clone(), repr.clone()));
        }

        self.forget(attribute);
        for (method, name, repr) in generated {
            if options.scopes {
                self.scopes.insert(
                    format!("not_{}", method),
                    Scope {
                        attribute: attribute.to_string(),
                        repr: repr.clone(),
                        negated: true,
                    },
                );
                self.scopes.insert(
                    method.clone(),
                    Scope {
                        attribute: attribute.to_string(),
                        repr,
                        negated: false,
                    },
                );
            }
            self.methods.insert(
                method,
                Generated {
                    attribute: attribute.to_string(),
                    value: name,
                },
            );
        }
        self.enums.insert(
            attribute.to_string(),
            NativeEnum {
                values: values.clone(),
                options: options.clone(),
            },
        );
        tracing::debug!(model = %self.name, attribute, count = values.len(), "defined native enum");
        Ok(())
    }

    fn install_binding(&mut self, binding: BoundAttribute) {
        self.bindings.insert(binding.attribute.clone(), binding);
    }

    fn binding(&self, attribute: &str) -> Option<&BoundAttribute> {
        self.bindings.get(attribute)
    }
}

/// One record of a [`MemoryModel`].
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    model: Arc<MemoryModel>,
    columns: HashMap<String, Option<Repr>>,
}

impl MemoryRecord {
    pub fn new(model: &Arc<MemoryModel>) -> Self {
        Self {
            model: Arc::clone(model),
            columns: HashMap::new(),
        }
    }

    pub fn model(&self) -> &MemoryModel {
        &self.model
    }

    /// The persisted form of a column.
    pub fn column(&self, attribute: &str) -> Option<&Repr> {
        self.columns.get(attribute).and_then(Option::as_ref)
    }

    /// Store `repr` without any coercion or checks, like a direct column update.
    pub fn update_column(&mut self, attribute: &str, repr: impl Into<Option<Repr>>) -> Result<()> {
        if !self.model.has_column(attribute) {
            return Err(Error::UnknownAttribute(attribute.to_string()));
        }
        self.columns.insert(attribute.to_string(), repr.into());
        Ok(())
    }

    /// Generated predicate: `record.query("happy?")`.
    pub fn query(&self, method: &str) -> Result<bool> {
        let generated = self.model.generated(method)?;
        let current = self.read_attribute(&generated.attribute);
        Ok(current.as_text().as_deref() == Some(generated.value.as_str()))
    }

    /// Generated bang setter: `record.bang("angry!")`.
    pub fn bang(&mut self, method: &str) -> Result<()> {
        let generated = self.model.generated(method)?.clone();
        self.write_attribute(&generated.attribute, Value::Symbol(generated.value))
    }

    /// Run the model's validators against the current values.
    pub fn validate(&self) -> Errors {
        let mut errors = Errors::new();
        for validator in &self.model.validators {
            let value = match self.model.binding(validator.attribute()) {
                Some(binding) => read_bound(binding, self),
                None => self.read_attribute(validator.attribute()),
            };
            validator.validate(&value, &mut errors);
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl AttributeStore for MemoryRecord {
    fn read_attribute(&self, attribute: &str) -> Value {
        self.model.cast_read(attribute, self.column(attribute))
    }

    fn write_attribute(&mut self, attribute: &str, value: Value) -> Result<()> {
        let repr = self.model.cast_write(attribute, value)?;
        self.columns.insert(attribute.to_string(), repr);
        Ok(())
    }
}
