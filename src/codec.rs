//! Textual representations: five hexadecimal layouts, Id22 (Base58), and Id25 (Base35).
//!
//! Every decoder follows the same rule: characters outside the alphabet are skipped, and the
//! input is accepted only if exactly the required number of alphabet characters remain (32 for
//! hex, 22 for Id22, 25 for Id25). This accepts visually grouped input such as
//! `"1BmC zLNq YtckbKpP rroHRc"` while rejecting truncated or padded text.

use std::{fmt, str};

use fstr::FStr;

use crate::{Error, Result, Uuid7};

mod radix;
use radix::{BASE16, BASE35, BASE58};

/// Hexadecimal layouts available to [`Uuid7::to_formatted()`].
///
/// The single-letter specifiers accepted by [`str::parse`] are the ones conventionally used for
/// GUID formatting; both cases are accepted and an empty specifier selects [`Format::Default`].
///
/// | Specifier | Variant            | Example                                                            |
/// | --------- | ------------------ | ------------------------------------------------------------------ |
/// | `D`       | [`Default`]        | `01234567-89ab-7cde-b012-3456789abcde`                             |
/// | `N`       | [`NoHyphens`]      | `0123456789ab7cdeb0123456789abcde`                                 |
/// | `B`       | [`Braces`]         | `{01234567-89ab-7cde-b012-3456789abcde}`                           |
/// | `P`       | [`Parentheses`]    | `(01234567-89ab-7cde-b012-3456789abcde)`                           |
/// | `X`       | [`Hexadecimal`]    | `{0x01234567,0x89ab,0x7cde,{0xb0,0x12,0x34,0x56,0x78,0x9a,0xbc,0xde}}` |
///
/// [`Default`]: Format::Default
/// [`NoHyphens`]: Format::NoHyphens
/// [`Braces`]: Format::Braces
/// [`Parentheses`]: Format::Parentheses
/// [`Hexadecimal`]: Format::Hexadecimal
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Format {
    /// 8-4-4-4-12 groups separated by hyphens.
    #[default]
    Default,
    /// 32 digits without separators.
    NoHyphens,
    /// Default layout enclosed in braces.
    Braces,
    /// Default layout enclosed in parentheses.
    Parentheses,
    /// C struct initializer with one 32-bit, two 16-bit, and eight 8-bit fields.
    Hexadecimal,
}

impl str::FromStr for Format {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        match src {
            "" | "D" | "d" => Ok(Self::Default),
            "N" | "n" => Ok(Self::NoHyphens),
            "B" | "b" => Ok(Self::Braces),
            "P" | "p" => Ok(Self::Parentheses),
            "X" | "x" => Ok(Self::Hexadecimal),
            _ => Err(Error::UnknownFormat(src.to_owned())),
        }
    }
}

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Writes the 8-4-4-4-12 layout of `bytes` into `buffer`.
fn write_hyphenated(bytes: &[u8; 16], buffer: &mut [u8; 36]) {
    let mut buf_iter = buffer.iter_mut();
    for (i, e) in bytes.iter().enumerate() {
        for d in [DIGITS[(e >> 4) as usize], DIGITS[(e & 15) as usize]] {
            if let Some(slot) = buf_iter.next() {
                *slot = d;
            }
        }
        if matches!(i, 3 | 5 | 7 | 9) {
            if let Some(slot) = buf_iter.next() {
                *slot = b'-';
            }
        }
    }
}

/// Wraps a filled ASCII buffer into a stack-allocated string.
fn to_fstr<const N: usize>(buffer: [u8; N]) -> FStr<N> {
    debug_assert!(buffer.is_ascii());
    // SAFETY: every caller fills `buffer` from ASCII alphabets only
    unsafe { FStr::from_inner_unchecked(buffer) }
}

impl Uuid7 {
    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::Uuid7;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid7>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "01809424-3e59-7c05-9219-566f82fff672");
    /// assert_eq!(format!("{}", y), "01809424-3e59-7c05-9219-566f82fff672");
    /// # Ok::<(), uuid7_codec::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        write_hyphenated(self.as_bytes(), &mut buffer);
        to_fstr(buffer)
    }

    /// Returns the hexadecimal representation in the requested layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::{Format, Uuid7};
    ///
    /// let x = "01234567-89ab-7cde-b012-3456789abcde".parse::<Uuid7>()?;
    /// assert_eq!(x.to_formatted(Format::NoHyphens), "0123456789ab7cdeb0123456789abcde");
    /// assert_eq!(
    ///     x.to_formatted(Format::Hexadecimal),
    ///     "{0x01234567,0x89ab,0x7cde,{0xb0,0x12,0x34,0x56,0x78,0x9a,0xbc,0xde}}"
    /// );
    /// # Ok::<(), uuid7_codec::Error>(())
    /// ```
    pub fn to_formatted(&self, format: Format) -> String {
        let canonical = self.encode();
        match format {
            Format::Default => canonical.to_string(),
            Format::NoHyphens => canonical.chars().filter(|&c| c != '-').collect(),
            Format::Braces => format!("{{{canonical}}}"),
            Format::Parentheses => format!("({canonical})"),
            Format::Hexadecimal => {
                let mut text = String::with_capacity(68);
                text.push('{');
                for (i, e) in self.as_bytes().iter().enumerate() {
                    match i {
                        0 => text.push_str("0x"),
                        8 => text.push_str(",{0x"),
                        4 | 6 | 9.. => text.push_str(",0x"),
                        _ => {}
                    }
                    text.push(DIGITS[(e >> 4) as usize] as char);
                    text.push(DIGITS[(e & 15) as usize] as char);
                }
                text.push_str("}}");
                text
            }
        }
    }

    /// Returns the hexadecimal representation for a single-letter format specifier.
    ///
    /// Fails with [`Error::UnknownFormat`] if the specifier is not one of those listed in
    /// [`Format`].
    pub fn format_with(&self, specifier: &str) -> Result<String> {
        specifier.parse().map(|format| self.to_formatted(format))
    }

    /// Returns the 22-digit Id22 representation: the 128-bit value in Base58 with the Bitcoin
    /// alphabet, left-padded with `1`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::Uuid7;
    ///
    /// let x = "0180ae59-078c-7b80-b113-2fe14a615fb3".parse::<Uuid7>()?;
    /// assert_eq!(&x.to_id22() as &str, "1BmCzLNqYtckbKpPrroHRc");
    /// # Ok::<(), uuid7_codec::Error>(())
    /// ```
    pub fn to_id22(&self) -> FStr<22> {
        to_fstr(BASE58.encode(u128::from(*self)))
    }

    /// Creates an object from the Id22 representation, ignoring characters outside the Base58
    /// alphabet.
    ///
    /// Fails unless exactly 22 alphabet characters are present and their value fits in 128 bits.
    pub fn from_id22(src: &str) -> Result<Self> {
        BASE58.decode(src, 22).map(Self::from)
    }

    /// Returns the 25-digit Id25 representation: the 128-bit value in lowercase Base35 (digits and
    /// letters except `l`), left-padded with `0`.
    pub fn to_id25(&self) -> FStr<25> {
        to_fstr(BASE35.encode(u128::from(*self)))
    }

    /// Creates an object from the case-insensitive Id25 representation, ignoring characters
    /// outside the Base35 alphabet.
    ///
    /// Fails unless exactly 25 alphabet characters are present and their value fits in 128 bits.
    pub fn from_id25(src: &str) -> Result<Self> {
        BASE35.decode(src, 25).map(Self::from)
    }
}

impl fmt::Display for Uuid7 {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid7 {
    type Err = Error;

    /// Creates an object from any of the hexadecimal layouts in [`Format`].
    ///
    /// Non-hexadecimal characters are skipped and exactly 32 hexadecimal digits must remain.
    /// Digits are case-insensitive. A `0x` or `0X` that opens the input or follows a
    /// non-hexadecimal character is a prefix and is skipped as a whole; elsewhere the `0` is a digit
    /// and the `x` a separator.
    fn from_str(src: &str) -> Result<Self> {
        let mut chars = src.chars().peekable();
        let mut after_digit = false;
        let digits = std::iter::from_fn(|| loop {
            let c = chars.next()?;
            if c == '0' && !after_digit && matches!(chars.peek(), Some('x' | 'X')) {
                chars.next();
                continue;
            }
            let d = BASE16.digit(c);
            after_digit = d.is_some();
            if d.is_some() {
                return d;
            }
        });
        BASE16.decode_digits(digits, 32).map(Self::from)
    }
}

impl From<Uuid7> for String {
    fn from(src: Uuid7) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid7 {
    type Error = Error;

    fn try_from(src: String) -> Result<Self> {
        src.parse()
    }
}

impl TryFrom<&str> for Uuid7 {
    type Error = Error;

    fn try_from(src: &str) -> Result<Self> {
        src.parse()
    }
}
