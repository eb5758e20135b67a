use crate::node::Field;

///
/// Table
///
/// A validated table: at least one static key field, at least one value
/// field, both in declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Table {
    pub name: String,
    pub key_fields: Vec<Field>,
    pub value_fields: Vec<Field>,
}

impl Table {
    /// Module and file stem of the generated artifact.
    #[must_use]
    pub fn artifact_name(&self) -> String {
        artifact_name(&self.name)
    }

    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.key_fields
            .iter()
            .chain(&self.value_fields)
            .find(|f| f.name == name)
    }
}

/// Artifact stem for a table name.
#[must_use]
pub fn artifact_name(table: &str) -> String {
    table.to_ascii_lowercase()
}
