use thiserror::Error as ThisError;

///
/// EncodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EncodeError {
    #[error("dynamic field '{field}' is {len} bytes, which exceeds the u32 length prefix")]
    FieldTooLong { field: &'static str, len: usize },
}

///
/// DecodeError
///
/// Raised by generated `decode` functions and raw-blob accessors.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum DecodeError {
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    #[error("invalid value {value} for enum {enum_name}")]
    InvalidEnumValue { enum_name: &'static str, value: u8 },

    #[error("invalid length: expected {expected} bytes, found {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid utf-8 in string field")]
    InvalidUtf8,

    #[error("trailing bytes: {count} bytes left after the last field")]
    TrailingBytes { count: usize },

    #[error("truncated record: needed {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
}

///
/// ParseEnumError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown variant '{name}' for enum {enum_name}")]
pub struct ParseEnumError {
    pub enum_name: &'static str,
    pub name: String,
}
