use crate::{
    doc::RawTable,
    error::{ErrorList, IdentScope, SchemaError},
    node::{Field, Table},
    registry::TypeRegistry,
    validate::naming::validate_ident,
};

/// Validate one table, recording every defect in `errs`.
///
/// The returned table is only meaningful when no error was recorded for it.
pub fn validate_table(
    name: &str,
    raw: &RawTable,
    registry: &TypeRegistry,
    errs: &mut ErrorList,
) -> Table {
    validate_ident(errs, IdentScope::Table, name);

    if raw.primary_keys.is_empty() {
        errs.add(SchemaError::EmptyKeySet {
            table: name.to_string(),
        });
    }
    if raw.schema.is_empty() {
        errs.add(SchemaError::EmptySchema {
            table: name.to_string(),
        });
    }

    // key fields: resolvable and statically sized
    let mut key_fields = Vec::with_capacity(raw.primary_keys.len());
    for (field, type_name) in &raw.primary_keys {
        validate_ident(errs, IdentScope::Field, field);

        match registry.resolve(type_name, name, field) {
            Ok(ty) if ty.is_dynamic() => errs.add(SchemaError::InvalidKeyType {
                table: name.to_string(),
                field: field.clone(),
                type_name: type_name.clone(),
            }),
            Ok(ty) => key_fields.push(Field::new(field, ty)),
            Err(e) => errs.add(e),
        }
    }

    // value fields: resolvable and disjoint from the key set
    let mut value_fields = Vec::with_capacity(raw.schema.len());
    for (field, type_name) in &raw.schema {
        if raw.primary_keys.contains_key(field) {
            errs.add(SchemaError::DuplicateFieldName {
                table: name.to_string(),
                field: field.clone(),
            });
            continue;
        }
        validate_ident(errs, IdentScope::Field, field);

        match registry.resolve(type_name, name, field) {
            Ok(ty) => value_fields.push(Field::new(field, ty)),
            Err(e) => errs.add(e),
        }
    }

    Table {
        name: name.to_string(),
        key_fields,
        value_fields,
    }
}
