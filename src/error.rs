//! Error type shared by the binary and textual conversions.

use std::fmt;

use thiserror::Error;

/// Textual encodings that can fail to decode.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Encoding {
    /// Hexadecimal UUID text in any of its grouped or ungrouped forms.
    Hex,
    /// 22-digit Base58 text.
    Id22,
    /// 25-digit case-insensitive Base35 text.
    Id25,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hex => "hexadecimal",
            Self::Id22 => "Id22",
            Self::Id25 => "Id25",
        })
    }
}

/// Error returned by fallible constructors, decoders, and formatters.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum Error {
    /// Binary input or output buffer is not 16 bytes in length.
    #[error("buffer must be exactly 16 bytes in length, got {0}")]
    InvalidLength(usize),

    /// Text does not contain the exact number of alphabet characters.
    #[error("input must contain exactly {expected} {encoding} characters, found {found}")]
    InvalidCharCount {
        encoding: Encoding,
        expected: usize,
        found: usize,
    },

    /// Text has the right length but encodes a number wider than 128 bits.
    #[error("{encoding} value does not fit in 128 bits")]
    Overflow { encoding: Encoding },

    /// Requested rendering format is not recognized.
    #[error("invalid UUID format specifier {0:?}")]
    UnknownFormat(String),
}

/// Alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::{Encoding, Error};

    /// Renders readable messages
    #[test]
    fn renders_readable_messages() {
        assert_eq!(
            Error::InvalidLength(15).to_string(),
            "buffer must be exactly 16 bytes in length, got 15"
        );
        assert_eq!(
            Error::InvalidCharCount {
                encoding: Encoding::Id22,
                expected: 22,
                found: 21
            }
            .to_string(),
            "input must contain exactly 22 Id22 characters, found 21"
        );
        assert_eq!(
            Error::Overflow {
                encoding: Encoding::Id25
            }
            .to_string(),
            "Id25 value does not fit in 128 bits"
        );
        assert_eq!(
            Error::UnknownFormat("Q".to_owned()).to_string(),
            "invalid UUID format specifier \"Q\""
        );
    }
}
