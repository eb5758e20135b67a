//! Runtime support for code emitted by `tablegen`.
//!
//! Generated table modules only ever talk to this crate: fixed-width fields
//! go through [`StaticCodec`], variable-width fields through [`DynamicCodec`]
//! and the length-prefixed [`DynamicReader`]/[`DynamicWriter`] pair.

pub mod codec;
pub mod dynamic;
pub mod error;
pub mod types;

pub use codec::{StaticCodec, check_width, slot, slot_mut, split_static};
pub use dynamic::{DynamicCodec, DynamicReader, DynamicWriter, LENGTH_PREFIX_WIDTH};
pub use error::{DecodeError, EncodeError, ParseEnumError};
pub use types::{Address, Int, Uint};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        codec::StaticCodec,
        dynamic::DynamicCodec,
        error::{DecodeError, EncodeError},
        types::{Address, Int, Uint},
    };
}
