//! Fixed-width value types with no native Rust counterpart.

use crate::{codec::StaticCodec, error::DecodeError};
use num_bigint::{BigInt, BigUint};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};

///
/// Address
///
/// 20-byte account address.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const WIDTH: usize = 20;

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }

        Ok(())
    }
}

impl FromStr for Address {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != Self::WIDTH * 2 || !hex.is_ascii() {
            return Err(DecodeError::InvalidLength {
                expected: Self::WIDTH * 2,
                actual: hex.len(),
            });
        }

        let mut out = [0_u8; 20];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| {
                DecodeError::InvalidLength {
                    expected: Self::WIDTH * 2,
                    actual: hex.len(),
                }
            })?;
        }

        Ok(Self(out))
    }
}

impl StaticCodec for Address {
    const WIDTH: usize = 20;

    fn write_to(&self, out: &mut [u8]) {
        self.0.write_to(out);
    }

    fn read_from(bytes: &[u8]) -> Result<Self, DecodeError> {
        <[u8; 20]>::read_from(bytes).map(Self)
    }
}

///
/// Uint
///
/// Unsigned integer stored as exactly `N` big-endian bytes.
/// Used for widths that are not 1, 2, 4, 8 or 16 bytes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Uint<const N: usize>([u8; N]);

impl<const N: usize> Uint<N> {
    pub const ZERO: Self = Self([0; N]);

    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; N] {
        self.0
    }

    /// Narrow a `u128`, returning `None` when it does not fit in `N` bytes.
    #[must_use]
    pub fn from_u128(value: u128) -> Option<Self> {
        let wide = value.to_be_bytes();
        let mut out = [0_u8; N];
        if N >= 16 {
            out[N - 16..].copy_from_slice(&wide);
        } else {
            let (dropped, kept) = wide.split_at(16 - N);
            if dropped.iter().any(|b| *b != 0) {
                return None;
            }
            out.copy_from_slice(kept);
        }

        Some(Self(out))
    }

    #[must_use]
    pub fn to_u128(self) -> Option<u128> {
        let mut wide = [0_u8; 16];
        if N > 16 {
            let (dropped, kept) = self.0.split_at(N - 16);
            if dropped.iter().any(|b| *b != 0) {
                return None;
            }
            wide.copy_from_slice(kept);
        } else {
            wide[16 - N..].copy_from_slice(&self.0);
        }

        Some(u128::from_be_bytes(wide))
    }

    #[must_use]
    pub fn to_biguint(self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    #[must_use]
    pub fn from_biguint(value: &BigUint) -> Option<Self> {
        let bytes = value.to_bytes_be();
        if bytes.len() > N {
            return None;
        }
        let mut out = [0_u8; N];
        out[N - bytes.len()..].copy_from_slice(&bytes);

        Some(Self(out))
    }
}

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Display for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl<const N: usize> StaticCodec for Uint<N> {
    const WIDTH: usize = N;

    fn write_to(&self, out: &mut [u8]) {
        self.0.write_to(out);
    }

    fn read_from(bytes: &[u8]) -> Result<Self, DecodeError> {
        <[u8; N]>::read_from(bytes).map(Self)
    }
}

///
/// Int
///
/// Two's complement signed integer stored as exactly `N` big-endian bytes.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Int<const N: usize>([u8; N]);

impl<const N: usize> Int<N> {
    pub const ZERO: Self = Self([0; N]);

    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; N] {
        self.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        N > 0 && self.0[0] & 0x80 != 0
    }

    /// Narrow an `i128`, returning `None` when it does not fit in `N` bytes.
    #[must_use]
    pub fn from_i128(value: i128) -> Option<Self> {
        let wide = value.to_be_bytes();
        let fill = if value < 0 { 0xff } else { 0x00 };
        let mut out = [fill; N];
        if N >= 16 {
            out[N - 16..].copy_from_slice(&wide);
        } else {
            let (dropped, kept) = wide.split_at(16 - N);
            let sign_kept = kept[0] & 0x80 != 0;
            if dropped.iter().any(|b| *b != fill) || sign_kept != (value < 0) {
                return None;
            }
            out.copy_from_slice(kept);
        }

        Some(Self(out))
    }

    #[must_use]
    pub fn to_i128(self) -> Option<i128> {
        let fill = if self.is_negative() { 0xff } else { 0x00 };
        let mut wide = [fill; 16];
        if N > 16 {
            let (dropped, kept) = self.0.split_at(N - 16);
            let sign_kept = kept[0] & 0x80 != 0;
            if dropped.iter().any(|b| *b != fill) || sign_kept != self.is_negative() {
                return None;
            }
            wide.copy_from_slice(kept);
        } else {
            wide[16 - N..].copy_from_slice(&self.0);
        }

        Some(i128::from_be_bytes(wide))
    }

    #[must_use]
    pub fn to_bigint(self) -> BigInt {
        BigInt::from_signed_bytes_be(&self.0)
    }

    #[must_use]
    pub fn from_bigint(value: &BigInt) -> Option<Self> {
        let bytes = value.to_signed_bytes_be();
        if bytes.len() > N {
            return None;
        }
        let fill = if value.sign() == num_bigint::Sign::Minus {
            0xff
        } else {
            0x00
        };
        let mut out = [fill; N];
        out[N - bytes.len()..].copy_from_slice(&bytes);

        Some(Self(out))
    }
}

impl<const N: usize> Default for Int<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Ord for Int<N> {
    // flip the sign bit so byte order matches numeric order
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self.0.cmp(&other.0),
        }
    }
}

impl<const N: usize> PartialOrd for Int<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Display for Int<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_bigint())
    }
}

impl<const N: usize> StaticCodec for Int<N> {
    const WIDTH: usize = N;

    fn write_to(&self, out: &mut [u8]) {
        self.0.write_to(out);
    }

    fn read_from(bytes: &[u8]) -> Result<Self, DecodeError> {
        <[u8; N]>::read_from(bytes).map(Self)
    }
}
