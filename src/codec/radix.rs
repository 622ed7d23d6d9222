//! Fixed-width positional codec that treats the 16 bytes as one unsigned big-endian integer.

use crate::error::{Encoding, Error, Result};

/// Marks bytes that are not part of an alphabet in a [`Radix::table`].
const NONE: u8 = 0xff;

/// A numeral system with its alphabet, decoding table, and fixed digit count.
pub(crate) struct Radix {
    encoding: Encoding,
    alphabet: &'static [u8],
    table: [u8; 128],
}

/// Bitcoin-style Base58, used by Id22.
pub(crate) static BASE58: Radix = Radix::new(
    Encoding::Id22,
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz",
    false,
);

/// Case-insensitive Base35 without `l`, used by Id25.
pub(crate) static BASE35: Radix =
    Radix::new(Encoding::Id25, b"0123456789abcdefghijkmnopqrstuvwxyz", true);

/// Case-insensitive hexadecimal.
pub(crate) static BASE16: Radix = Radix::new(Encoding::Hex, b"0123456789abcdef", true);

impl Radix {
    const fn new(encoding: Encoding, alphabet: &'static [u8], case_insensitive: bool) -> Self {
        let mut table = [NONE; 128];
        let mut i = 0;
        while i < alphabet.len() {
            table[alphabet[i] as usize] = i as u8;
            if case_insensitive {
                table[alphabet[i].to_ascii_uppercase() as usize] = i as u8;
            }
            i += 1;
        }
        Self {
            encoding,
            alphabet,
            table,
        }
    }

    /// Returns the digit value of `c` or `None` if `c` is outside the alphabet.
    pub(crate) fn digit(&self, c: char) -> Option<u8> {
        let d = *self.table.get(c as usize)?;
        (d != NONE).then_some(d)
    }

    /// Renders `value` as exactly `N` digits, left-padded with the zero digit.
    pub(crate) fn encode<const N: usize>(&self, mut value: u128) -> [u8; N] {
        let base = self.alphabet.len() as u128;
        let mut buffer = [self.alphabet[0]; N];
        for e in buffer.iter_mut().rev() {
            *e = self.alphabet[(value % base) as usize];
            value /= base;
        }
        debug_assert_eq!(value, 0, "{} digits too few for 128 bits", N);
        buffer
    }

    /// Reads the digits of `src`, skipping every character outside the alphabet, and fails unless
    /// exactly `width` digits are found.
    pub(crate) fn decode(&self, src: &str, width: usize) -> Result<u128> {
        self.decode_digits(src.chars().filter_map(|c| self.digit(c)), width)
    }

    /// Accumulates already-recognized digit values into a 128-bit integer.
    pub(crate) fn decode_digits(
        &self,
        digits: impl Iterator<Item = u8>,
        width: usize,
    ) -> Result<u128> {
        let base = self.alphabet.len() as u128;
        let mut count = 0;
        let mut value = Some(0u128);
        for d in digits {
            count += 1;
            value = value
                .and_then(|v| v.checked_mul(base))
                .and_then(|v| v.checked_add(d as u128));
        }

        if count != width {
            return Err(Error::InvalidCharCount {
                encoding: self.encoding,
                expected: width,
                found: count,
            });
        }
        value.ok_or(Error::Overflow {
            encoding: self.encoding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{BASE16, BASE35, BASE58};
    use crate::error::{Encoding, Error};

    /// Pads with the zero digit
    #[test]
    fn pads_with_the_zero_digit() {
        assert_eq!(&BASE58.encode::<22>(0), b"1111111111111111111111");
        assert_eq!(&BASE58.encode::<22>(57), b"111111111111111111111z");
        assert_eq!(&BASE58.encode::<22>(58), b"1111111111111111111121");
        assert_eq!(&BASE35.encode::<25>(34), b"000000000000000000000000z");
        assert_eq!(&BASE16.encode::<32>(0xabc), b"00000000000000000000000000000abc");
    }

    /// Maps both cases in case-insensitive alphabets only
    #[test]
    fn maps_both_cases_in_case_insensitive_alphabets_only() {
        assert_eq!(BASE35.digit('k'), Some(20));
        assert_eq!(BASE35.digit('K'), Some(20));
        assert_eq!(BASE35.digit('l'), None);
        assert_eq!(BASE35.digit('L'), None);
        assert_eq!(BASE16.digit('F'), Some(15));
        assert_eq!(BASE58.digit('a'), Some(33));
        assert_eq!(BASE58.digit('A'), Some(9));
        assert_eq!(BASE58.digit('0'), None);
        assert_eq!(BASE58.digit('O'), None);
        assert_eq!(BASE58.digit('I'), None);
        assert_eq!(BASE58.digit('l'), None);
        assert_eq!(BASE58.digit('é'), None);
    }

    /// Counts only alphabet characters
    #[test]
    fn counts_only_alphabet_characters() {
        assert_eq!(BASE58.decode("1111 1111/1111-1111_1111 12", 22), Ok(1));
        assert_eq!(
            BASE58.decode("111111111111111111111", 22),
            Err(Error::InvalidCharCount {
                encoding: Encoding::Id22,
                expected: 22,
                found: 21
            })
        );
        assert_eq!(
            BASE16.decode("", 32),
            Err(Error::InvalidCharCount {
                encoding: Encoding::Hex,
                expected: 32,
                found: 0
            })
        );
    }

    /// Rejects values wider than 128 bits
    #[test]
    fn rejects_values_wider_than_128_bits() {
        assert_eq!(
            BASE58.decode("zzzzzzzzzzzzzzzzzzzzzz", 22),
            Err(Error::Overflow {
                encoding: Encoding::Id22
            })
        );
        assert_eq!(
            BASE35.decode("zzzzzzzzzzzzzzzzzzzzzzzzz", 25),
            Err(Error::Overflow {
                encoding: Encoding::Id25
            })
        );
        assert_eq!(BASE58.decode("YcVfxkQb6JRzqk5kF2tNLv", 22), Ok(u128::MAX));
        assert_eq!(BASE35.decode("usz5xbbiqsfq7s727n0pzr2xa", 25), Ok(u128::MAX));
    }
}
