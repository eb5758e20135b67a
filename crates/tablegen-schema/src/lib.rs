//! Schema model, type registry, validation and layout planning for tablegen.

pub mod doc;
pub mod error;
pub mod layout;
pub mod node;
pub mod registry;
pub mod types;
pub mod validate;

/// Maximum length for table, enum, field and variant identifiers.
pub const MAX_NAME_LEN: usize = 64;

/// Maximum number of variants in one enum; keeps every enum one byte wide.
pub const MAX_ENUM_VARIANTS: usize = 256;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        doc::{RawSchema, RawTable},
        error::{ErrorList, SchemaError},
        layout::{DynamicSlot, Layout, StaticSlot, plan},
        node::*,
        registry::TypeRegistry,
        types::{Primitive, TypeDescriptor},
        validate::validate,
    };
}
