//! UUIDv7 generator and related types.

use crate::Uuid7;

mod buffered;
pub use buffered::BufferedRng;


/// A trait that defines the random byte interface for [`V7Generator`].
///
/// Implementations must deliver cryptographically strong bytes. Failure to do so is not
/// recoverable and may panic.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the current time interface for [`V7Generator`].
pub trait TimeSource {
    /// Returns the current Unix time in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads [`std::time::SystemTime`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

/// Maximum value of the 26-bit monotonic counter.
const MAX_COUNTER: u32 = (1 << 26) - 1;

/// Maximum value of the 48-bit millisecond counter.
const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// Represents a UUIDv7 generator that tracks the last observed millisecond and a counter that
/// guarantees the monotonic order of UUIDs generated within the same millisecond.
///
/// A generator holds mutable state and is meant to be owned by a single worker; identifiers from
/// different generators created in the same millisecond are unique but not mutually ordered. The
/// crate-level [`uuid7()`](crate::uuid7) keeps one generator per thread.
///
/// # Examples
///
/// ```rust
/// use uuid7_codec::V7Generator;
///
/// let mut g = V7Generator::with_rng(rand::rngs::OsRng);
/// let x = g.generate();
/// let y = g.generate();
/// assert!(x < y);
/// ```
///
/// # Algorithm
///
/// On each call the generator reads the clock. If the millisecond differs from the previous
/// reading, the 48-bit millisecond counter advances to it, or by one if the clock went backward,
/// and the 26-bit monotonic counter is reseeded from 25 fresh random bits. Otherwise the
/// monotonic counter grows by a random step between 1 and 16. Bytes 10-15 are always fresh
/// random data. Should the counter overflow, the millisecond counter is bumped and the counter
/// reseeded, so the output of one generator never goes backward. The generator panics rather than
/// let the 48-bit timestamp field wrap around.
#[derive(Debug)]
pub struct V7Generator<R, T = SystemClock> {
    /// `None` until the first call, which always starts a new step.
    last_millisecond: Option<u64>,
    ms_counter: u64,
    monotonic_counter: u32,

    /// The random number generator used by the generator.
    rand: R,

    /// The system clock used by the generator.
    time: T,
}

impl<R: RandSource> V7Generator<R> {
    /// Creates a generator with a random source and the system clock.
    pub const fn new(rand: R) -> Self {
        Self::with_rand_and_time_sources(rand, SystemClock)
    }
}

impl<G: rand::RngCore> V7Generator<BufferedRng<G>> {
    /// Creates a generator that draws from `rng` through a [`BufferedRng`] of default capacity.
    pub fn with_rng(rng: G) -> Self {
        Self::new(BufferedRng::new(rng))
    }
}

#[cfg(feature = "global_gen")]
impl Default for V7Generator<BufferedRng<rand::rngs::OsRng>> {
    fn default() -> Self {
        Self::new(BufferedRng::default())
    }
}

impl<R: RandSource, T: TimeSource> V7Generator<R, T> {
    /// Creates a generator with random number generator and timestamp sources.
    pub const fn with_rand_and_time_sources(rand: R, time: T) -> Self {
        Self {
            last_millisecond: None,
            ms_counter: 0,
            monotonic_counter: 0,
            rand,
            time,
        }
    }

    /// Generates a new UUIDv7 object from the current timestamp.
    pub fn generate(&mut self) -> Uuid7 {
        let millisecond = self.time.unix_ts_ms();
        self.generate_core(millisecond)
    }

    /// Generates a new UUIDv7 object from a clock reading in Unix milliseconds.
    ///
    /// The argument is treated like the system clock in [`generate()`](Self::generate): it may
    /// stay the same or go backward, and the output still increases as long as the millisecond
    /// counter fits in the 48-bit timestamp field.
    ///
    /// # Panics
    ///
    /// Panics if `millisecond` is not a 48-bit integer or if the millisecond counter would have
    /// to advance past `2^48 - 1` to keep the output increasing.
    pub fn generate_core(&mut self, millisecond: u64) -> Uuid7 {
        assert!(
            millisecond <= MAX_TIMESTAMP,
            "`millisecond` must be a 48-bit integer"
        );

        let mut bytes = [0u8; 16];

        let new_step = self.last_millisecond != Some(millisecond);
        if new_step {
            let first = self.last_millisecond.replace(millisecond).is_none();
            if first || self.ms_counter < millisecond {
                self.ms_counter = millisecond;
            } else {
                self.advance_ms_counter();
                tracing::debug!(
                    millisecond,
                    ms_counter = self.ms_counter,
                    "clock moved backward; continuing with logical time"
                );
            }
        }

        let monotonic_counter = if new_step {
            self.rand.fill_bytes(&mut bytes[6..]);
            seed_counter(&bytes)
        } else {
            self.rand.fill_bytes(&mut bytes[9..]);
            // random step in 1..=16
            let counter = self.monotonic_counter + (bytes[9] >> 4) as u32 + 1;
            if counter > MAX_COUNTER {
                self.advance_ms_counter();
                tracing::debug!(
                    ms_counter = self.ms_counter,
                    "monotonic counter overflowed; advancing millisecond counter"
                );
                self.rand.fill_bytes(&mut bytes[6..10]);
                seed_counter(&bytes)
            } else {
                bytes[7] = (counter >> 14) as u8;
                bytes[9] = counter as u8;
                counter
            }
        };
        self.monotonic_counter = monotonic_counter;

        bytes[..6].copy_from_slice(&self.ms_counter.to_be_bytes()[2..]);
        bytes[6] = 0x70 | ((monotonic_counter >> 22) as u8 & 0x0f);
        bytes[8] = 0x80 | ((monotonic_counter >> 8) as u8 & 0x3f);
        Uuid7::from(bytes)
    }

    /// Moves the millisecond counter one step ahead of the clock.
    fn advance_ms_counter(&mut self) {
        assert!(
            self.ms_counter < MAX_TIMESTAMP,
            "millisecond counter exhausted the 48-bit timestamp field"
        );
        self.ms_counter += 1;
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    ///
    /// The result carries no ordering guarantee and leaves the UUIDv7 state untouched.
    pub fn generate_v4(&mut self) -> Uuid7 {
        let mut bytes = [0u8; 16];
        self.rand.fill_bytes(&mut bytes);
        bytes[6] = 0x40 | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Uuid7::from(bytes)
    }
}

/// Derives a fresh monotonic counter from the random bytes 6-9.
///
/// Only the low 25 bits are taken; bit 25 starts at zero and absorbs carries later on.
fn seed_counter(bytes: &[u8; 16]) -> u32 {
    ((bytes[6] & 0x07) as u32) << 22
        | (bytes[7] as u32) << 14
        | ((bytes[8] & 0x3f) as u32) << 8
        | bytes[9] as u32
}

/// Supports operations as an infinite iterator that produces a new UUIDv7 object for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use uuid7_codec::V7Generator;
///
/// V7Generator::with_rng(rand::rngs::OsRng)
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for V7Generator<R, T> {
    type Item = Uuid7;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> std::iter::FusedIterator for V7Generator<R, T> {}
