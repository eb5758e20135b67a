use derive_more::Display;
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Largest declared integer width, in bits.
pub const MAX_INT_BITS: u16 = 256;

/// Largest fixed byte array length.
pub const MAX_FIXED_BYTES: u8 = 32;

///
/// UnknownPrimitive
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("'{0}' is not a primitive type name")]
pub struct UnknownPrimitive(pub String);

///
/// Primitive
///
/// Closed set of built-in column types. Integer widths are in bits, byte
/// array lengths in bytes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum Primitive {
    Address,
    Bool,
    Bytes(u8),
    DynBytes,
    Int(u16),
    String,
    Uint(u16),
}

impl Primitive {
    /// Fixed byte width, or `None` for dynamic types.
    #[must_use]
    pub const fn byte_width(self) -> Option<usize> {
        match self {
            Self::Address => Some(20),
            Self::Bool => Some(1),
            Self::Bytes(len) => Some(len as usize),
            Self::Int(bits) | Self::Uint(bits) => Some(bits as usize / 8),
            Self::DynBytes | Self::String => None,
        }
    }

    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        self.byte_width().is_none()
    }

    // parse_width
    // digits must be canonical: no sign, no leading zero
    fn parse_width(digits: &str) -> Option<u16> {
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse().ok()
    }

    const fn valid_bits(bits: u16) -> bool {
        bits >= 8 && bits <= MAX_INT_BITS && bits % 8 == 0
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::Bytes(len) => write!(f, "bytes{len}"),
            Self::DynBytes => f.write_str("bytes"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::String => f.write_str("string"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
        }
    }
}

impl FromStr for Primitive {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownPrimitive(s.to_string());

        match s {
            "address" => return Ok(Self::Address),
            "bool" => return Ok(Self::Bool),
            "bytes" => return Ok(Self::DynBytes),
            "string" => return Ok(Self::String),
            _ => {}
        }

        if let Some(digits) = s.strip_prefix("uint") {
            let bits = Self::parse_width(digits).filter(|b| Self::valid_bits(*b));
            return bits.map(Self::Uint).ok_or_else(unknown);
        }
        if let Some(digits) = s.strip_prefix("int") {
            let bits = Self::parse_width(digits).filter(|b| Self::valid_bits(*b));
            return bits.map(Self::Int).ok_or_else(unknown);
        }
        if let Some(digits) = s.strip_prefix("bytes") {
            let len = Self::parse_width(digits)
                .and_then(|len| u8::try_from(len).ok())
                .filter(|len| *len <= MAX_FIXED_BYTES);
            return len.map(Self::Bytes).ok_or_else(unknown);
        }

        Err(unknown())
    }
}

///
/// TypeDescriptor
///
/// Resolved type of a field: a primitive, or a reference to a registered enum.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum TypeDescriptor {
    #[display("{_0}")]
    Primitive(Primitive),

    #[display("{name}")]
    Enum { name: String, variant_count: usize },
}

impl TypeDescriptor {
    #[must_use]
    pub fn byte_width(&self) -> Option<usize> {
        match self {
            Self::Primitive(primitive) => primitive.byte_width(),
            Self::Enum { variant_count, .. } => Some(enum_width(*variant_count)),
        }
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        self.byte_width().is_none()
    }

    #[must_use]
    pub const fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Primitive(primitive) => Some(*primitive),
            Self::Enum { .. } => None,
        }
    }
}

/// Smallest integer width, in bytes, that can number `variant_count` variants.
#[must_use]
pub const fn enum_width(variant_count: usize) -> usize {
    let mut width = 1;
    while width < 8 && (variant_count as u128) > (1_u128 << (width * 8)) {
        width *= 2;
    }

    width
}
