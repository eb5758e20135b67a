use crate::{
    MAX_NAME_LEN,
    error::{ErrorList, IdentDefect, IdentScope, SchemaError},
    node::Table,
    validate::reserved::{is_reserved_type, is_reserved_variant, is_reserved_word},
};
use std::collections::BTreeMap;

/// Artifact stems the driver emits besides the per-table files.
pub const RESERVED_ARTIFACTS: [&str; 2] = ["enums", "mod"];

/// Ensure a name can be emitted verbatim as a Rust identifier.
pub fn validate_ident(errs: &mut ErrorList, scope: IdentScope, name: &str) {
    let checked = check_ident(name).and_then(|()| {
        let shadows = match scope {
            IdentScope::Table | IdentScope::Enum => is_reserved_type(name),
            IdentScope::Variant => is_reserved_variant(name),
            IdentScope::Field => false,
        };
        if shadows {
            Err(IdentDefect::Reserved)
        } else {
            Ok(())
        }
    });

    if let Err(defect) = checked {
        errs.add(SchemaError::InvalidIdentifier {
            scope,
            name: name.to_string(),
            defect,
        });
    }
}

fn check_ident(name: &str) -> Result<(), IdentDefect> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(IdentDefect::Empty);
    };
    if name.len() > MAX_NAME_LEN {
        return Err(IdentDefect::TooLong { max: MAX_NAME_LEN });
    }
    if !(first.is_ascii_alphabetic() || first == '_')
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(IdentDefect::NotIdentifier);
    }
    if is_reserved_word(name) {
        return Err(IdentDefect::Reserved);
    }

    Ok(())
}

/// Two tables must never write the same file.
///
/// Colliding tables are reported against the name that sorts first, so the
/// errors do not depend on declaration order.
pub fn validate_artifact_names(tables: &[Table], errs: &mut ErrorList) {
    let mut groups: BTreeMap<String, Vec<&str>> = BTreeMap::new();

    for table in tables {
        let artifact = table.artifact_name();

        // lowercasing can turn a valid name into a keyword: `Type` -> `type`
        if is_reserved_word(&artifact) && !is_reserved_word(&table.name) {
            errs.add(SchemaError::InvalidIdentifier {
                scope: IdentScope::Table,
                name: table.name.clone(),
                defect: IdentDefect::Reserved,
            });
            continue;
        }

        if let Some(reserved) = RESERVED_ARTIFACTS.iter().find(|r| **r == artifact) {
            errs.add(SchemaError::ArtifactNameCollision {
                table: table.name.clone(),
                other: format!("<{reserved}>"),
                artifact,
            });
            continue;
        }

        groups.entry(artifact).or_default().push(&table.name);
    }

    for (artifact, mut names) in groups {
        names.sort_unstable();
        let Some((first, rest)) = names.split_first() else {
            continue;
        };

        for name in rest {
            errs.add(SchemaError::ArtifactNameCollision {
                table: (*name).to_string(),
                other: (*first).to_string(),
                artifact: artifact.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::artifact_name;

    fn defect(name: &str) -> Option<IdentDefect> {
        check_ident(name).err()
    }

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["k1", "Table1", "_private", "snake_case", "E1"] {
            assert_eq!(defect(name), None, "{name} should be accepted");
        }
    }

    #[test]
    fn rejects_bad_identifiers() {
        assert_eq!(defect(""), Some(IdentDefect::Empty));
        assert_eq!(defect("1abc"), Some(IdentDefect::NotIdentifier));
        assert_eq!(defect("has space"), Some(IdentDefect::NotIdentifier));
        assert_eq!(defect("café"), Some(IdentDefect::NotIdentifier));
        assert_eq!(defect("type"), Some(IdentDefect::Reserved));
        assert_eq!(defect("_"), Some(IdentDefect::Reserved));
        assert_eq!(
            defect(&"a".repeat(MAX_NAME_LEN + 1)),
            Some(IdentDefect::TooLong { max: MAX_NAME_LEN })
        );
    }

    #[test]
    fn artifact_names_must_be_unique_ignoring_case() {
        let table = |name: &str| Table {
            name: name.to_string(),
            key_fields: Vec::new(),
            value_fields: Vec::new(),
        };
        let mut errs = ErrorList::new();
        validate_artifact_names(&[table("Position"), table("position"), table("Enums")], &mut errs);

        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|e| matches!(e, SchemaError::ArtifactNameCollision { .. })));
        assert_eq!(artifact_name("Position"), "position");
    }

    #[test]
    fn collisions_blame_the_later_sorting_name() {
        let table = |name: &str| Table {
            name: name.to_string(),
            key_fields: Vec::new(),
            value_fields: Vec::new(),
        };
        let expected = [SchemaError::ArtifactNameCollision {
            table: "position".to_string(),
            other: "Position".to_string(),
            artifact: "position".to_string(),
        }];

        for order in [["Position", "position"], ["position", "Position"]] {
            let mut errs = ErrorList::new();
            validate_artifact_names(&order.map(table), &mut errs);
            assert_eq!(errs.as_slice(), expected);
        }
    }

    #[test]
    fn lowercased_keyword_table_names_are_rejected() {
        let mut errs = ErrorList::new();
        let table = Table {
            name: "Type".to_string(),
            key_fields: Vec::new(),
            value_fields: Vec::new(),
        };
        validate_artifact_names(&[table], &mut errs);

        assert_eq!(
            errs.as_slice(),
            [SchemaError::InvalidIdentifier {
                scope: IdentScope::Table,
                name: "Type".to_string(),
                defect: IdentDefect::Reserved,
            }]
        );
    }

    #[test]
    fn variants_cannot_shadow_generated_items() {
        let mut errs = ErrorList::new();
        validate_ident(&mut errs, IdentScope::Variant, "NAMES");
        validate_ident(&mut errs, IdentScope::Field, "NAMES");

        assert_eq!(errs.len(), 1);
    }

    #[test]
    fn type_names_cannot_shadow_primitives() {
        let mut errs = ErrorList::new();
        validate_ident(&mut errs, IdentScope::Table, "u8");
        validate_ident(&mut errs, IdentScope::Enum, "str");
        validate_ident(&mut errs, IdentScope::Field, "u8");

        assert_eq!(errs.len(), 2);
    }
}
