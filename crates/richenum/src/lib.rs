//! # richenum
//!
//! Enum attributes that read and write as value objects.
//!
//! ORMs usually expose an enum column as a bare name: `order.status` is
//! `"pending"`. richenum keeps the host's native enum column (and its
//! generated predicates, bang setters and scopes) but makes the attribute read
//! as an instance of your own type, which can carry behavior:
//!
//! ```ignore
//! use richenum::{enum_value, sym, Declaration, EnumAttribute, EnumOptions, EnumValue};
//!
//! enum_value! {
//!     pub struct SizeEnum => "size_enum";
//! }
//!
//! impl SizeEnum {
//!     pub fn height_ft(&self) -> Option<u32> {
//!         match self.value()?.as_str() {
//!             "big" => Some(8),
//!             "small" => Some(5),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! SizeEnum::declare_values(Declaration::mapping([("big", 0), ("small", 1)]))?;
//!
//! let size = EnumAttribute::<SizeEnum>::bind(&mut model, "size", EnumOptions::new().prefixed())?;
//! size.set(&mut record, SizeEnum::lookup(sym("big"))?)?;
//! assert_eq!(size.get(&record).and_then(|s| s.height_ft()), Some(8));
//! assert_eq!(size.raw(&record), richenum::Value::from("big"));
//! ```
//!
//! ## Modules
//!
//! - [`enum_value`]: the enum type trait, erased instances and the declaration macro
//! - [`value_set`]: value sets, declarations and the registration table
//! - [`binding`]: attaching an enum type to a host attribute
//! - [`validation`]: the validation rule and error accumulation
//! - [`host`]: the traits a host implements, plus an in-memory host
//! - [`locale`]: translation lookup for enum labels
//! - [`config`]: process-wide settings

pub mod binding;
pub mod config;
pub mod enum_value;
pub mod error;
pub mod host;
pub mod locale;
pub mod validation;
pub mod value;
pub mod value_set;

pub use binding::{read_bound, EnumAttribute};
pub use config::Settings;
pub use enum_value::{AnyEnum, EnumKind, EnumValue};
pub use error::{ConfigurationError, Error, Result};
pub use host::{Affix, AttributeStore, BoundAttribute, EnumOptions, ModelType};
pub use locale::{Catalog, Translator};
pub use validation::{EnumValidator, ErrorSink, Errors};
pub use value::{sym, Repr, Symbol, Value};
pub use value_set::{Declaration, ValueSet};
