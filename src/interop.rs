//! Conversions and comparisons with the standard [`uuid::Uuid`] type.
//!
//! All conversions are explicit method calls. [`Uuid7::to_uuid()`] and [`Uuid7::from_uuid()`]
//! copy the 16 bytes unchanged, so both types render the same canonical text. The `_mssql`
//! pair reorders the first three fields (4 + 2 + 2 bytes) into the little-endian layout SQL Server
//! uses to store and sort `uniqueidentifier` columns; use it only when talking to SQL Server.

use std::cmp;

use crate::{id::compare_bytes, Uuid7};

impl Uuid7 {
    /// Creates an object holding the same 16 bytes as `src`, without checking its version or
    /// variant.
    pub const fn from_uuid(src: uuid::Uuid) -> Self {
        Self::from_bytes(src.into_bytes())
    }

    /// Returns a [`uuid::Uuid`] holding the same 16 bytes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::Uuid7;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid7>()?;
    /// assert_eq!(x.to_uuid().to_string(), x.to_string());
    /// assert_eq!(Uuid7::from_uuid(x.to_uuid()), x);
    /// # Ok::<(), uuid7_codec::Error>(())
    /// ```
    pub const fn to_uuid(&self) -> uuid::Uuid {
        uuid::Uuid::from_bytes(self.to_bytes())
    }

    /// Returns a [`uuid::Uuid`] whose first three fields are byte-swapped for SQL Server.
    ///
    /// The result sorts in SQL Server in the same order as the identifiers themselves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid7_codec::Uuid7;
    ///
    /// let x = "01809424-3e59-7c05-9219-566f82fff672".parse::<Uuid7>()?;
    /// assert_eq!(
    ///     x.to_uuid_mssql().to_string(),
    ///     "24948001-593e-057c-9219-566f82fff672"
    /// );
    /// # Ok::<(), uuid7_codec::Error>(())
    /// ```
    pub const fn to_uuid_mssql(&self) -> uuid::Uuid {
        uuid::Uuid::from_bytes_le(self.to_bytes())
    }

    /// Creates an object from a [`uuid::Uuid`] produced by [`Uuid7::to_uuid_mssql()`].
    pub fn from_uuid_mssql(src: uuid::Uuid) -> Self {
        Self::from_bytes(src.to_bytes_le())
    }

    /// Compares the binary value with a [`uuid::Uuid`] as unsigned big-endian integers.
    pub fn cmp_uuid(&self, other: &uuid::Uuid) -> cmp::Ordering {
        compare_bytes(self.as_bytes(), other.as_bytes())
    }

    /// Returns true if `other` holds exactly the same 16 bytes.
    pub fn eq_uuid(&self, other: &uuid::Uuid) -> bool {
        self.cmp_uuid(other).is_eq()
    }
}
