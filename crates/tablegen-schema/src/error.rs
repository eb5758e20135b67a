use derive_more::{Deref, IntoIterator};
use std::fmt::{self, Display};
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// One defect found while validating a schema document.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, ThisError)]
#[remain::sorted]
pub enum SchemaError {
    #[error("table '{table}' and table '{other}' both generate the artifact '{artifact}'")]
    ArtifactNameCollision {
        table: String,
        other: String,
        artifact: String,
    },

    #[error("table '{table}': field '{field}' is declared as both a key and a value")]
    DuplicateFieldName { table: String, field: String },

    #[error("table '{table}' declares no primary key fields")]
    EmptyKeySet { table: String },

    #[error("table '{table}' declares no value fields")]
    EmptySchema { table: String },

    #[error("enum '{name}': {defect}")]
    InvalidEnum { name: String, defect: EnumDefect },

    #[error("{scope} name '{name}' {defect}")]
    InvalidIdentifier {
        scope: IdentScope,
        name: String,
        defect: IdentDefect,
    },

    #[error("table '{table}': key field '{field}' has dynamic type '{type_name}'")]
    InvalidKeyType {
        table: String,
        field: String,
        type_name: String,
    },

    #[error("table '{table}': field '{field}' has unknown type '{type_name}'")]
    UnknownType {
        table: String,
        field: String,
        type_name: String,
    },
}

///
/// EnumDefect
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, ThisError)]
pub enum EnumDefect {
    #[error("variant list is empty")]
    NoVariants,

    #[error("variant '{0}' is declared more than once")]
    DuplicateVariant(String),

    #[error("{count} variants exceeds the limit of {max}")]
    TooManyVariants { count: usize, max: usize },

    #[error("name shadows the primitive type of the same name")]
    ShadowsPrimitive,
}

///
/// IdentScope
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IdentScope {
    Table,
    Enum,
    Field,
    Variant,
}

impl Display for IdentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Enum => "enum",
            Self::Field => "field",
            Self::Variant => "variant",
        })
    }
}

///
/// IdentDefect
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, ThisError)]
pub enum IdentDefect {
    #[error("is empty")]
    Empty,

    #[error("exceeds the maximum length of {max} bytes")]
    TooLong { max: usize },

    #[error("is not an ASCII identifier")]
    NotIdentifier,

    #[error("is a reserved word")]
    Reserved,
}

///
/// ErrorList
///
/// Accumulated validation errors. Validation never stops at the first
/// defect; the caller gets the whole list.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct ErrorList(#[into_iterator(owned, ref)] Vec<SchemaError>);

impl ErrorList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, err: SchemaError) {
        self.0.push(err);
    }

    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// `Ok(())` when nothing was collected, otherwise the list itself.
    pub fn result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorList {}

impl From<SchemaError> for ErrorList {
    fn from(err: SchemaError) -> Self {
        Self(vec![err])
    }
}
