//! Fixed-width field codec.
//!
//! Every static field occupies exactly `WIDTH` bytes inside its blob. Integers
//! are big-endian; signed values are two's complement.

use crate::error::DecodeError;
use std::mem::size_of;

///
/// StaticCodec
///
/// A value with a byte width known at schema-compile time.
///

pub trait StaticCodec: Sized {
    const WIDTH: usize;

    /// Write the value into `out`, which is exactly `WIDTH` bytes long.
    fn write_to(&self, out: &mut [u8]);

    /// Read the value back from exactly `WIDTH` bytes.
    fn read_from(bytes: &[u8]) -> Result<Self, DecodeError>;
}

// exact
// borrow a slice as a fixed array, rejecting any other length
fn exact<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

macro_rules! impl_static_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StaticCodec for $ty {
                const WIDTH: usize = size_of::<$ty>();

                fn write_to(&self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_be_bytes());
                }

                fn read_from(bytes: &[u8]) -> Result<Self, DecodeError> {
                    exact::<{ size_of::<$ty>() }>(bytes).map(<$ty>::from_be_bytes)
                }
            }
        )*
    };
}

impl_static_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl StaticCodec for bool {
    const WIDTH: usize = 1;

    fn write_to(&self, out: &mut [u8]) {
        out[0] = u8::from(*self);
    }

    fn read_from(bytes: &[u8]) -> Result<Self, DecodeError> {
        match exact::<1>(bytes)? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(DecodeError::InvalidBool(other)),
        }
    }
}

impl<const N: usize> StaticCodec for [u8; N] {
    const WIDTH: usize = N;

    fn write_to(&self, out: &mut [u8]) {
        out.copy_from_slice(self);
    }

    fn read_from(bytes: &[u8]) -> Result<Self, DecodeError> {
        exact::<N>(bytes)
    }
}

/// Reject a blob whose length is not exactly `width`.
pub const fn check_width(bytes: &[u8], width: usize) -> Result<(), DecodeError> {
    if bytes.len() == width {
        Ok(())
    } else {
        Err(DecodeError::InvalidLength {
            expected: width,
            actual: bytes.len(),
        })
    }
}

/// Split a value blob into its static section and the dynamic tail.
pub fn split_static(bytes: &[u8], width: usize) -> Result<(&[u8], &[u8]), DecodeError> {
    if bytes.len() < width {
        return Err(DecodeError::Truncated {
            expected: width,
            actual: bytes.len(),
        });
    }

    Ok(bytes.split_at(width))
}

/// Borrow the `width` bytes at `offset`.
pub fn slot(bytes: &[u8], offset: usize, width: usize) -> Result<&[u8], DecodeError> {
    let end = offset + width;
    bytes.get(offset..end).ok_or(DecodeError::Truncated {
        expected: end,
        actual: bytes.len(),
    })
}

/// Mutably borrow the `width` bytes at `offset`.
pub fn slot_mut(bytes: &mut [u8], offset: usize, width: usize) -> Result<&mut [u8], DecodeError> {
    let end = offset + width;
    let actual = bytes.len();
    bytes.get_mut(offset..end).ok_or(DecodeError::Truncated {
        expected: end,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode<T: StaticCodec>(value: &T) -> Vec<u8> {
        let mut out = vec![0; T::WIDTH];
        value.write_to(&mut out);
        out
    }

    #[test]
    fn integers_are_big_endian() {
        assert_eq!(encode(&0x0102_u16), vec![0x01, 0x02]);
        assert_eq!(encode(&-1_i32), vec![0xff; 4]);
        assert_eq!(u32::read_from(&[0, 0, 1, 0]), Ok(256));
    }

    #[test]
    fn bool_rejects_non_canonical_bytes() {
        assert_eq!(bool::read_from(&[1]), Ok(true));
        assert_eq!(bool::read_from(&[0]), Ok(false));
        assert_eq!(bool::read_from(&[2]), Err(DecodeError::InvalidBool(2)));
    }

    #[test]
    fn wrong_width_is_rejected() {
        assert_eq!(
            u16::read_from(&[1, 2, 3]),
            Err(DecodeError::InvalidLength {
                expected: 2,
                actual: 3
            })
        );
        assert!(<[u8; 4]>::read_from(&[0; 3]).is_err());
    }

    #[test]
    fn split_static_reports_truncation() {
        let err = split_static(&[1, 2], 3).expect_err("short blob must fail");
        assert_eq!(
            err,
            DecodeError::Truncated {
                expected: 3,
                actual: 2
            }
        );

        let (head, tail) = split_static(&[1, 2, 3, 4], 3).expect("long enough");
        assert_eq!(head, &[1, 2, 3]);
        assert_eq!(tail, &[4]);
    }

    #[test]
    fn slot_bounds_are_checked() {
        let mut data = [0_u8; 4];
        slot_mut(&mut data, 2, 2)
            .expect("in bounds")
            .copy_from_slice(&[7, 8]);
        assert_eq!(slot(&data, 2, 2), Ok(&[7_u8, 8][..]));
        assert!(slot(&data, 3, 2).is_err());
    }

    proptest! {
        #[test]
        fn i64_survives_the_codec(value in any::<i64>()) {
            prop_assert_eq!(i64::read_from(&encode(&value)), Ok(value));
        }
    }
}
