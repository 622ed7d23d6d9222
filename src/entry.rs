//! Default per-thread generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::cell::RefCell;

use crate::{generator::BufferedRng, Uuid7, V7Generator};
use rand::rngs::OsRng;

thread_local! {
    static DEFAULT_GENERATOR: RefCell<V7Generator<BufferedRng<OsRng>>> = Default::default();
}

/// Runs `f` with the current thread's generator, replacing it first if the process has forked.
fn with_default_generator<T>(f: impl FnOnce(&mut V7Generator<BufferedRng<OsRng>>) -> T) -> T {
    DEFAULT_GENERATOR.with(|g| {
        if unix_fork_safety::pid_changed() {
            tracing::debug!("process id changed; resetting thread-local UUID generator");
            g.replace(Default::default());
        }

        f(&mut g.borrow_mut())
    })
}

/// Generates a UUIDv7 object.
///
/// This function employs a thread-local generator and guarantees the per-thread monotonic order of
/// UUIDs, even within the same millisecond and across system clock rollbacks. UUIDs generated on
/// different threads are unique but not ordered among themselves. On Unix, the generator is reset
/// when the process ID changes (i.e., upon process forks) so that a child process never replays the
/// parent's buffered random bytes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_codec::uuid7();
/// println!("{uuid}"); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = uuid7_codec::uuid7().to_string();
/// ```
pub fn uuid7() -> Uuid7 {
    with_default_generator(|g| g.generate())
}

/// Generates a UUIDv4 object from the thread-local random buffer.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid7_codec::uuid4();
/// println!("{uuid}"); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid7 {
    with_default_generator(|g| g.generate_v4())
}

/// Generates a UUIDv7 and returns it as a [`uuid::Uuid`] holding the same bytes.
pub fn new_uuid() -> uuid::Uuid {
    uuid7().to_uuid()
}

/// Generates a UUIDv7 and returns it as a [`uuid::Uuid`] laid out for SQL Server.
///
/// See [`Uuid7::to_uuid_mssql()`]. Use this only with SQL Server `uniqueidentifier` columns.
pub fn new_uuid_mssql() -> uuid::Uuid {
    uuid7().to_uuid_mssql()
}

/// Fills `dst` with fresh UUIDv7 objects in increasing order.
///
/// # Examples
///
/// ```rust
/// use uuid7_codec::Uuid7;
///
/// let mut ids = [Uuid7::NIL; 8];
/// uuid7_codec::fill(&mut ids);
/// assert!(ids.windows(2).all(|w| w[0] < w[1]));
/// ```
pub fn fill(dst: &mut [Uuid7]) {
    with_default_generator(|g| {
        for e in dst {
            *e = g.generate();
        }
    })
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Returns true once per thread after the process ID changes.
    pub fn pid_changed() -> bool {
        PID.with(|last_pid| {
            let pid = process::id();
            pid != last_pid.replace(pid)
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn pid_changed() -> bool {
        false
    }
}


#[cfg(test)]
mod tests_v4 {
    use super::{uuid4, uuid7};
    use crate::{Uuid7, Variant};

    const N_SAMPLES: usize = 50_000;
    thread_local!(static SAMPLES: Vec<Uuid7> = (0..N_SAMPLES).map(|_| uuid4()).collect());

    /// Counts set bits per position, most significant bit first.
    fn count_ones(samples: &[Uuid7]) -> [u32; 128] {
        let mut bins = [0u32; 128];
        for e in samples {
            let value = u128::from(*e);
            for (i, bin) in bins.iter_mut().enumerate() {
                *bin += (value >> (127 - i)) as u32 & 1;
            }
        }
        bins
    }

    /// Stamps version 4 and variant 10 on canonical text
    #[test]
    fn stamps_version_4_and_variant_10_on_canonical_text() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(&e.encode()));
                assert_eq!(e.variant(), Variant::Var10);
                assert_eq!(e.version(), Some(4));
            }
        });
    }

    /// Draws every other bit from the buffered random stream
    #[test]
    fn draws_every_other_bit_from_the_buffered_random_stream() {
        use std::collections::HashSet;
        let bins = SAMPLES.with(|samples| {
            assert_eq!(samples.iter().collect::<HashSet<_>>().len(), N_SAMPLES);
            count_ones(samples)
        });

        let n = N_SAMPLES as u32;
        assert_eq!(bins[48..52], [0, n, 0, 0], "version bits");
        assert_eq!(bins[64..66], [n, 0], "variant bits");

        // binomial 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for (i, &bin) in bins.iter().enumerate() {
            if !(48..52).contains(&i) && !(64..66).contains(&i) {
                let p = bin as f64 / N_SAMPLES as f64;
                assert!((p - 0.5).abs() < margin, "random bit {i}: {p}");
            }
        }
    }

    /// Shares the thread-local state without disturbing UUIDv7 order
    #[test]
    fn shares_the_thread_local_state_without_disturbing_uuidv7_order() {
        let mut prev = uuid7();
        for _ in 0..10_000 {
            let v4 = uuid4();
            let curr = uuid7();
            assert!(prev < curr);
            assert_ne!(v4, curr);
            assert_eq!(v4.version(), Some(4));
            assert_eq!(curr.version(), Some(7));
            prev = curr;
        }
    }
}
