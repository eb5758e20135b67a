use crate::{
    node::{EnumDef, Table},
    registry::TypeRegistry,
};

///
/// ValidatedSchema
///
/// Immutable output of validation. Every later stage reads from this value;
/// there is no shared registry elsewhere.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidatedSchema {
    registry: TypeRegistry,
    tables: Vec<Table>,
    enums: Vec<EnumDef>,
}

impl ValidatedSchema {
    pub(crate) const fn new(registry: TypeRegistry, tables: Vec<Table>, enums: Vec<EnumDef>) -> Self {
        Self {
            registry,
            tables,
            enums,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Tables in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Enums in declaration order.
    #[must_use]
    pub fn enums(&self) -> &[EnumDef] {
        &self.enums
    }

    #[must_use]
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }
}
