//! Variable-width field codec.
//!
//! Dynamic fields trail the static data blob in declaration order. Each one is
//! framed as a big-endian `u32` byte length followed by that many bytes.

use crate::error::{DecodeError, EncodeError};

/// Width of the length prefix in front of every dynamic field.
pub const LENGTH_PREFIX_WIDTH: usize = 4;

///
/// DynamicCodec
///

pub trait DynamicCodec: Sized {
    /// Raw payload bytes, without the length prefix.
    fn payload(&self) -> &[u8];

    fn from_payload(bytes: &[u8]) -> Result<Self, DecodeError>;
}

impl DynamicCodec for Vec<u8> {
    fn payload(&self) -> &[u8] {
        self
    }

    fn from_payload(bytes: &[u8]) -> Result<Self, DecodeError> {
        Ok(bytes.to_vec())
    }
}

impl DynamicCodec for String {
    fn payload(&self) -> &[u8] {
        self.as_bytes()
    }

    fn from_payload(bytes: &[u8]) -> Result<Self, DecodeError> {
        std::str::from_utf8(bytes)
            .map(ToString::to_string)
            .map_err(|_| DecodeError::InvalidUtf8)
    }
}

///
/// DynamicWriter
///

pub struct DynamicWriter<'a> {
    out: &'a mut Vec<u8>,
}

impl<'a> DynamicWriter<'a> {
    pub const fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out }
    }

    /// Append one length-prefixed field.
    pub fn push<T: DynamicCodec>(&mut self, field: &'static str, value: &T) -> Result<(), EncodeError> {
        let payload = value.payload();
        let len = u32::try_from(payload.len()).map_err(|_| EncodeError::FieldTooLong {
            field,
            len: payload.len(),
        })?;

        self.out.extend_from_slice(&len.to_be_bytes());
        self.out.extend_from_slice(payload);

        Ok(())
    }
}

///
/// DynamicReader
///
/// Cursor over the dynamic section of a value blob.
///

pub struct DynamicReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> DynamicReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Decode the next field.
    pub fn read<T: DynamicCodec>(&mut self) -> Result<T, DecodeError> {
        let payload = self.next_payload()?;

        T::from_payload(payload)
    }

    /// Step over the next field without decoding it.
    pub fn skip(&mut self) -> Result<(), DecodeError> {
        self.next_payload().map(|_| ())
    }

    /// Require that every byte has been consumed.
    pub const fn finish(self) -> Result<(), DecodeError> {
        let count = self.bytes.len() - self.pos;
        if count == 0 {
            Ok(())
        } else {
            Err(DecodeError::TrailingBytes { count })
        }
    }

    fn next_payload(&mut self) -> Result<&'a [u8], DecodeError> {
        let prefix = self.take(LENGTH_PREFIX_WIDTH)?;
        let len = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;

        self.take(len)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.bytes;
        let end = self.pos.saturating_add(len);
        let chunk = bytes.get(self.pos..end).ok_or(DecodeError::Truncated {
            expected: end,
            actual: bytes.len(),
        })?;
        self.pos = end;

        Ok(chunk)
    }
}
