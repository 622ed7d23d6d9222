use std::{cmp, hash};

use crate::{Error, Result};

/// Represents a time-ordered 128-bit identifier stored as 16 big-endian bytes.
///
/// Any bit pattern is a valid value: the version and variant bits are only meaningful for values
/// produced by a generator. Ordering is the unsigned big-endian comparison of the 16 bytes, so
/// identifiers from one generator sort in creation order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default)]
pub struct Uuid7([u8; 16]);

impl Uuid7 {
    /// Nil value (00000000-0000-0000-0000-000000000000)
    ///
    /// Not a valid version 7 UUID as it lacks the version bits.
    pub const NIL: Self = Self([0x00; 16]);

    /// Max value (ffffffff-ffff-ffff-ffff-ffffffffffff)
    ///
    /// Not a valid version 7 UUID as it lacks the version bits.
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte array without checking the version or variant bits.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates an object from a byte slice that must be exactly 16 bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::{Error, Uuid7};
    ///
    /// assert!(Uuid7::from_slice(&[0u8; 16]).is_ok());
    /// assert_eq!(Uuid7::from_slice(&[0u8; 15]), Err(Error::InvalidLength(15)));
    /// ```
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        <[u8; 16]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidLength(bytes.len()))
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns a copy of the underlying byte array.
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Writes the 16 bytes into the beginning of `dst`.
    ///
    /// Fails with [`Error::InvalidLength`] and leaves `dst` untouched if it is shorter than 16
    /// bytes.
    pub fn try_write_bytes(&self, dst: &mut [u8]) -> Result<()> {
        match dst.get_mut(..16) {
            Some(head) => {
                head.copy_from_slice(&self.0);
                Ok(())
            }
            None => Err(Error::InvalidLength(dst.len())),
        }
    }

    /// Returns the 48-bit millisecond counter stored in the leading six bytes.
    pub const fn timestamp_ms(&self) -> u64 {
        let b = &self.0;
        (b[0] as u64) << 40
            | (b[1] as u64) << 32
            | (b[2] as u64) << 24
            | (b[3] as u64) << 16
            | (b[4] as u64) << 8
            | b[5] as u64
    }

    /// Reports the variant field value of the UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::{Uuid7, Variant};
    ///
    /// assert_eq!(Uuid7::NIL.variant(), Variant::Nil);
    /// assert_eq!(Uuid7::MAX.variant(), Variant::Max);
    /// ```
    pub const fn variant(&self) -> Variant {
        if u128::from_be_bytes(self.0) == 0 {
            Variant::Nil
        } else if u128::from_be_bytes(self.0) == u128::MAX {
            Variant::Max
        } else {
            match self.0[8] >> 4 {
                0b0000..=0b0111 => Variant::Var0,
                0b1000..=0b1011 => Variant::Var10,
                0b1100..=0b1101 => Variant::Var110,
                _ => Variant::VarReserved,
            }
        }
    }

    /// Returns the version field value of the UUID or `None` if it does not have the variant
    /// field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 32-bit hash word: the exclusive-or of the four little-endian 32-bit words.
    ///
    /// The value matches the hash of a little-endian GUID holding the same 16 bytes. It is not a
    /// strong hash.
    pub fn hash_code(&self) -> u32 {
        self.0.chunks_exact(4).fold(0, |acc, word| {
            acc ^ u32::from_le_bytes([word[0], word[1], word[2], word[3]])
        })
    }
}

/// Compares two 16-byte values as unsigned big-endian integers.
///
/// Every comparison and equality check between identifiers and foreign UUID types goes through
/// this routine.
pub(crate) fn compare_bytes(lhs: &[u8; 16], rhs: &[u8; 16]) -> cmp::Ordering {
    lhs.cmp(rhs)
}

impl hash::Hash for Uuid7 {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl From<Uuid7> for [u8; 16] {
    fn from(src: Uuid7) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid7 {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid7 {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self> {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for Uuid7 {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid7> for u128 {
    fn from(src: Uuid7) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid7 {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// UUID variants defined by RFC 9562.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Nil UUID (`00000000-0000-0000-0000-000000000000`).
    Nil,
    /// The variant field value of `0`.
    Var0,
    /// The variant field value of `10` used by version 4 and 7 identifiers.
    Var10,
    /// The variant field value of `110`.
    Var110,
    /// The reserved variant field value of `111`.
    VarReserved,
    /// Max UUID (`ffffffff-ffff-ffff-ffff-ffffffffffff`).
    Max,
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::Uuid7;
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    impl serde::Serialize for Uuid7 {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid7 {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid7;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid7::from_slice(value).map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid7;
        use serde_test::{assert_de_tokens, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "0180ae59-078c-7b80-b113-2fe14a615fb3",
                    &[
                        1, 128, 174, 89, 7, 140, 123, 128, 177, 19, 47, 225, 74, 97, 95, 179,
                    ],
                ),
                (
                    "0180ae59-0791-7e79-8804-02ce2b5bc8d2",
                    &[
                        1, 128, 174, 89, 7, 145, 126, 121, 136, 4, 2, 206, 43, 91, 200, 210,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid7>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Accepts grouped text on deserialization
        #[test]
        fn accepts_grouped_text_on_deserialization() {
            let e: Uuid7 = "0180ae59-078c-7b80-b113-2fe14a615fb3".parse().unwrap();
            assert_de_tokens(
                &e.readable(),
                &[Token::Str("{0180AE59-078C-7B80-B113-2FE14A615FB3}")],
            );
        }
    }
}
