use crate::{
    error::SchemaError,
    node::EnumDef,
    types::{Primitive, TypeDescriptor},
};
use indexmap::IndexMap;

///
/// TypeRegistry
///
/// Resolves type names to descriptors. Primitive names always win; anything
/// else must be a registered enum.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TypeRegistry {
    enums: IndexMap<String, usize>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from enum definitions, keeping declaration order.
    #[must_use]
    pub fn from_enums<'a>(enums: impl IntoIterator<Item = &'a EnumDef>) -> Self {
        let mut registry = Self::new();
        for def in enums {
            registry.register_enum(def);
        }

        registry
    }

    pub fn register_enum(&mut self, def: &EnumDef) {
        self.enums.insert(def.name.clone(), def.variant_count());
    }

    #[must_use]
    pub fn contains_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// Look a type name up without error context.
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> Option<TypeDescriptor> {
        if let Ok(primitive) = type_name.parse::<Primitive>() {
            return Some(TypeDescriptor::Primitive(primitive));
        }

        self.enums
            .get(type_name)
            .map(|variant_count| TypeDescriptor::Enum {
                name: type_name.to_string(),
                variant_count: *variant_count,
            })
    }

    /// Resolve the declared type of `table.field`.
    pub fn resolve(
        &self,
        type_name: &str,
        table: &str,
        field: &str,
    ) -> Result<TypeDescriptor, SchemaError> {
        self.lookup(type_name)
            .ok_or_else(|| SchemaError::UnknownType {
                table: table.to_string(),
                field: field.to_string(),
                type_name: type_name.to_string(),
            })
    }
}
