//! Schema validation orchestration.
//!
//! Every pass appends to one shared [`ErrorList`]; nothing short-circuits, so a
//! single run reports every defect in the document.

pub mod enums;
pub mod naming;
pub mod reserved;
pub mod table;

use crate::{
    doc::RawSchema,
    error::ErrorList,
    node::{Table, ValidatedSchema},
    registry::TypeRegistry,
};

/// Validate a raw document into an immutable [`ValidatedSchema`].
pub fn validate(raw: &RawSchema) -> Result<ValidatedSchema, ErrorList> {
    let mut errs = ErrorList::new();

    // Phase 1: enums first, so tables may reference enums declared after them.
    let enums = enums::validate_enums(raw, &mut errs);
    let registry = TypeRegistry::from_enums(&enums);

    // Phase 2: per-table structure and type resolution.
    let tables: Vec<Table> = raw
        .tables
        .iter()
        .map(|(name, table)| table::validate_table(name, table, &registry, &mut errs))
        .collect();

    // Phase 3: document-wide invariants.
    naming::validate_artifact_names(&tables, &mut errs);

    errs.result()?;

    Ok(ValidatedSchema::new(registry, tables, enums))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        doc::RawTable,
        error::{EnumDefect, IdentDefect, IdentScope, SchemaError},
        types::{Primitive, TypeDescriptor},
    };
    use std::collections::HashSet;

    fn example() -> RawSchema {
        RawSchema::new()
            .table(
                "Table1",
                RawTable::new()
                    .key("k1", "uint256")
                    .value("v1", "bool")
                    .value("v2", "Enum1"),
            )
            .enumeration("Enum1", ["E1", "E2", "E3"])
    }

    fn errors(raw: &RawSchema) -> ErrorList {
        validate(raw).expect_err("schema should be rejected")
    }

    #[test]
    fn example_schema_validates() {
        let schema = validate(&example()).expect("example is valid");
        let table = schema.get_table("Table1").expect("table exists");

        assert_eq!(table.key_fields.len(), 1);
        assert_eq!(
            table.get_field("v2").map(|f| &f.ty),
            Some(&TypeDescriptor::Enum {
                name: "Enum1".to_string(),
                variant_count: 3
            })
        );
        assert_eq!(schema.enums().len(), 1);
    }

    #[test]
    fn enum_renamed_in_field_only_reports_one_unknown_type() {
        let mut raw = example();
        raw.tables["Table1"].schema["v2"] = "Enum9".to_string();

        let errs = errors(&raw);
        assert_eq!(
            errs.as_slice(),
            [SchemaError::UnknownType {
                table: "Table1".to_string(),
                field: "v2".to_string(),
                type_name: "Enum9".to_string(),
            }]
        );
    }

    #[test]
    fn enums_may_be_declared_after_use() {
        let raw = RawSchema::new()
            .table("T", RawTable::new().key("k", "Later").value("v", "bool"))
            .enumeration("Later", ["A"]);

        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn empty_key_and_value_sets_are_rejected() {
        let raw = RawSchema::new()
            .table("NoKeys", RawTable::new().value("v", "bool"))
            .table("NoValues", RawTable::new().key("k", "uint8"));

        let errs = errors(&raw);
        assert!(errs.contains(&SchemaError::EmptyKeySet {
            table: "NoKeys".to_string()
        }));
        assert!(errs.contains(&SchemaError::EmptySchema {
            table: "NoValues".to_string()
        }));
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn dynamic_key_types_are_rejected() {
        let raw = RawSchema::new().table(
            "T",
            RawTable::new()
                .key("name", "string")
                .key("blob", "bytes")
                .value("v", "bool"),
        );

        let errs = errors(&raw);
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|e| matches!(e, SchemaError::InvalidKeyType { .. })));
    }

    #[test]
    fn field_in_both_sets_is_a_duplicate() {
        let raw = RawSchema::new().table(
            "T",
            RawTable::new()
                .key("id", "uint32")
                .value("id", "uint32")
                .value("v", "bool"),
        );

        assert_eq!(
            errors(&raw).as_slice(),
            [SchemaError::DuplicateFieldName {
                table: "T".to_string(),
                field: "id".to_string()
            }]
        );
    }

    #[test]
    fn defective_enums_are_reported_without_cascading() {
        let raw = RawSchema::new()
            .table("T", RawTable::new().key("k", "uint8").value("v", "Dup"))
            .enumeration("Dup", ["A", "B", "A", "A"])
            .enumeration("Empty", Vec::<String>::new())
            .enumeration("bool", ["X"]);

        let errs = errors(&raw);
        assert_eq!(
            errs.as_slice(),
            [
                SchemaError::InvalidEnum {
                    name: "Dup".to_string(),
                    defect: EnumDefect::DuplicateVariant("A".to_string()),
                },
                SchemaError::InvalidEnum {
                    name: "Empty".to_string(),
                    defect: EnumDefect::NoVariants,
                },
                SchemaError::InvalidEnum {
                    name: "bool".to_string(),
                    defect: EnumDefect::ShadowsPrimitive,
                },
            ]
        );
    }

    #[test]
    fn oversized_enum_is_rejected() {
        let variants: Vec<String> = (0..=crate::MAX_ENUM_VARIANTS).map(|i| format!("V{i}")).collect();
        let raw = RawSchema::new().enumeration("Big", variants);

        assert!(errors(&raw).iter().any(|e| matches!(
            e,
            SchemaError::InvalidEnum {
                defect: EnumDefect::TooManyVariants { count: 257, .. },
                ..
            }
        )));
    }

    #[test]
    fn errors_accumulate_across_tables() {
        let raw = RawSchema::new()
            .table("A", RawTable::new().key("k", "nope").value("v", "bool"))
            .table("B", RawTable::new().key("k", "uint8").value("v", "also_nope"))
            .table("C", RawTable::new());

        assert_eq!(errors(&raw).len(), 4);
    }

    #[test]
    fn error_set_ignores_table_order() {
        let a = ("A", RawTable::new().key("k", "string").value("v", "missing"));
        let b = ("B", RawTable::new().value("type", "bool"));

        let forward = RawSchema::new().table(a.0, a.1.clone()).table(b.0, b.1.clone());
        let backward = RawSchema::new().table(b.0, b.1).table(a.0, a.1);

        let forward: HashSet<_> = errors(&forward).into_iter().collect();
        let backward: HashSet<_> = errors(&backward).into_iter().collect();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 4);
    }

    #[test]
    fn variants_named_after_enum_methods_are_rejected() {
        let raw = RawSchema::new().enumeration("Enum3", ["from_u8", "B"]);

        assert_eq!(
            errors(&raw).as_slice(),
            [SchemaError::InvalidIdentifier {
                scope: IdentScope::Variant,
                name: "from_u8".to_string(),
                defect: IdentDefect::Reserved,
            }]
        );
    }

    #[test]
    fn collision_errors_ignore_table_order() {
        let table = RawTable::new().key("k", "uint8").value("v", "bool");
        let forward = RawSchema::new()
            .table("Position", table.clone())
            .table("position", table.clone());
        let backward = RawSchema::new()
            .table("position", table.clone())
            .table("Position", table);

        let expected = [SchemaError::ArtifactNameCollision {
            table: "position".to_string(),
            other: "Position".to_string(),
            artifact: "position".to_string(),
        }];
        assert_eq!(errors(&forward).as_slice(), expected);
        assert_eq!(errors(&backward).as_slice(), expected);
    }

    #[test]
    fn identifiers_are_checked() {
        let raw = RawSchema::new().table(
            "my table",
            RawTable::new().key("fn", "uint8").value("ok", "bool"),
        );

        let errs = errors(&raw);
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|e| matches!(e, SchemaError::InvalidIdentifier { .. })));
    }

    #[test]
    fn validated_types_match_registry() {
        let schema = validate(&example()).unwrap();
        assert_eq!(
            schema.registry().lookup("uint256"),
            Some(TypeDescriptor::Primitive(Primitive::Uint(256)))
        );
        assert!(schema.registry().contains_enum("Enum1"));
    }
}
