use crate::types::TypeDescriptor;

///
/// Field
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.ty.is_dynamic()
    }
}
