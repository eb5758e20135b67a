use crate::types::TypeDescriptor;

///
/// EnumDef
///
/// Variant order is the encoding order: variant `i` encodes as `i`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumDef {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumDef {
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Encoded value of a variant, if it exists.
    #[must_use]
    pub fn position(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == variant)
    }

    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::Enum {
            name: self.name.clone(),
            variant_count: self.variant_count(),
        }
    }
}
