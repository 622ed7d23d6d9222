//! Time-ordered UUID version 7 generator with compact textual encodings
//!
//! ```rust
//! use uuid7_codec::uuid7;
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{}", uuid.to_id22()); // e.g. "1BmCzLNqYtckbKpPrroHRc"
//! println!("{}", uuid.to_id25()); // e.g. "0649gxnw2ngj0fis78b62yrht"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//! ```
//!
//! See [draft-ietf-uuidrev-rfc4122bis](https://www.ietf.org/archive/id/draft-ietf-uuidrev-rfc4122bis-03.html).
//!
//! # Field and bit layout
//!
//! This implementation produces identifiers with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |  ver  |     counter 25-14     |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var| cnt 13-8  |    cnt 7-0    |             rand              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field holds a millisecond counter that follows the Unix time in
//!   milliseconds but never goes backward: if the system clock rolls back or repeats, the counter
//!   is incremented by one instead.
//! - The 4-bit `ver` field is set at `0111`.
//! - The 26-bit `counter` field orders IDs generated within the same millisecond. It is seeded with
//!   25 random bits (the top bit is kept clear to absorb carries) whenever the millisecond changes
//!   and grows by a random step of 1 to 16 for each further ID in that millisecond.
//! - The 2-bit `var` field is set at `10`.
//! - The remaining 48 `rand` bits are filled with cryptographically strong random bytes on every
//!   call.
//!
//! Generator state lives in one [`V7Generator`] per thread, so [`uuid7()`] takes no lock. IDs are
//! strictly increasing per thread; IDs from different threads are unique thanks to the random
//! bits but not ordered among themselves.
//!
//! # Textual representations
//!
//! | Method                                   | Example                                      |
//! | ---------------------------------------- | -------------------------------------------- |
//! | [`Display`](std::fmt::Display)           | `0180ae59-078c-7b80-b113-2fe14a615fb3`       |
//! | [`Uuid7::to_formatted()`] with [`Format`] | `{0180ae59-078c-7b80-b113-2fe14a615fb3}` etc |
//! | [`Uuid7::to_id22()`]                     | `1BmCzLNqYtckbKpPrroHRc`                     |
//! | [`Uuid7::to_id25()`]                     | `0649gxnw2ngj0fis78b62yrht`                  |
//!
//! Decoders skip characters outside their alphabet and require the exact digit count, so grouped
//! input like `"0649g-xnw2n-gj0fi-s78b6-2yrht"` is accepted.
//!
//! # Other features
//!
//! This library also supports the generation of UUID version 4:
//!
//! ```rust
//! let uuid = uuid7_codec::uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! ```
//!
//! # Crate features
//!
//! - `global_gen` (default): the per-thread default generator behind [`uuid7()`] and friends.
//! - `serde`: serializes identifiers as canonical text in human-readable formats and as 16 bytes
//!   otherwise.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod entry;
mod error;
mod id;
mod interop;

pub mod generator;

pub use codec::Format;
pub use error::{Encoding, Error, Result};
pub use generator::V7Generator;
pub use id::{Uuid7, Variant};

#[cfg(feature = "global_gen")]
pub use entry::{fill, new_uuid, new_uuid_mssql, uuid4, uuid7};
