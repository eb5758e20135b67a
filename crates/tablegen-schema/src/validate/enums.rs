use crate::{
    MAX_ENUM_VARIANTS,
    doc::RawSchema,
    error::{EnumDefect, ErrorList, IdentScope, SchemaError},
    node::EnumDef,
    types::Primitive,
    validate::naming::validate_ident,
};
use std::collections::HashSet;

/// Validate every declared enum and return all of them for registration.
///
/// Defective enums are still returned so that fields referencing them do not
/// pile up extra `UnknownType` errors; the defect itself is already recorded.
pub fn validate_enums(raw: &RawSchema, errs: &mut ErrorList) -> Vec<EnumDef> {
    raw.enums
        .iter()
        .map(|(name, variants)| {
            validate_enum(name, variants, errs);

            EnumDef {
                name: name.clone(),
                variants: variants.clone(),
            }
        })
        .collect()
}

fn validate_enum(name: &str, variants: &[String], errs: &mut ErrorList) {
    let mut defect = |defect| {
        errs.add(SchemaError::InvalidEnum {
            name: name.to_string(),
            defect,
        });
    };

    let shadows_primitive = name.parse::<Primitive>().is_ok();
    if shadows_primitive {
        defect(EnumDefect::ShadowsPrimitive);
    }
    if variants.is_empty() {
        defect(EnumDefect::NoVariants);
    }
    if variants.len() > MAX_ENUM_VARIANTS {
        defect(EnumDefect::TooManyVariants {
            count: variants.len(),
            max: MAX_ENUM_VARIANTS,
        });
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for variant in variants {
        if !seen.insert(variant.as_str()) && reported.insert(variant.as_str()) {
            defect(EnumDefect::DuplicateVariant(variant.clone()));
        }
    }

    // `bool` is both a schema primitive and a Rust type; report it once
    if !shadows_primitive {
        validate_ident(errs, IdentScope::Enum, name);
    }
    for variant in variants {
        validate_ident(errs, IdentScope::Variant, variant);
    }
}
