//! Random byte source that amortizes calls to a cryptographically strong generator.

use std::fmt;

use rand::RngCore;

use super::RandSource;

/// A [`RandSource`] that serves bytes from an internal buffer refilled in large chunks from the
/// wrapped [`RngCore`].
///
/// When a request is larger than what is left in the buffer, the remainder is drained first and
/// the rest is taken from a fresh chunk, so callers see exactly the byte stream the wrapped
/// generator produces. A zero capacity disables buffering.
///
/// Each instance belongs to one worker and is never locked.
pub struct BufferedRng<R> {
    inner: R,
    buffer: Box<[u8]>,
    index: usize,
}

impl<R: RngCore> BufferedRng<R> {
    /// Default buffer size in bytes.
    pub const DEFAULT_CAPACITY: usize = 2048;

    /// Creates a buffered source with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, Self::DEFAULT_CAPACITY)
    }

    /// Creates a buffered source that refills `capacity` bytes at a time.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            buffer: vec![0u8; capacity].into_boxed_slice(),
            // first request refills no matter what
            index: capacity,
        }
    }

    /// Returns the number of buffered bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.index
    }

    fn refill(&mut self) {
        self.inner.fill_bytes(&mut self.buffer);
        self.index = 0;
        tracing::trace!(capacity = self.buffer.len(), "refilled random buffer");
    }
}

impl<R: RngCore> RandSource for BufferedRng<R> {
    fn fill_bytes(&mut self, mut dest: &mut [u8]) {
        if self.buffer.is_empty() {
            self.inner.fill_bytes(dest);
            return;
        }

        while !dest.is_empty() {
            if self.index == self.buffer.len() {
                self.refill();
            }
            let n = dest.len().min(self.buffer.len() - self.index);
            let (head, tail) = std::mem::take(&mut dest).split_at_mut(n);
            head.copy_from_slice(&self.buffer[self.index..self.index + n]);
            self.index += n;
            dest = tail;
        }
    }
}

#[cfg(feature = "global_gen")]
impl Default for BufferedRng<rand::rngs::OsRng> {
    fn default() -> Self {
        Self::new(rand::rngs::OsRng)
    }
}

impl<R> fmt::Debug for BufferedRng<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedRng")
            .field("capacity", &self.buffer.len())
            .field("remaining", &(self.buffer.len() - self.index))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{BufferedRng, RandSource};
    use rand::RngCore;

    /// Emits 0, 1, 2, ... and counts the bulk requests it receives.
    #[derive(Default)]
    struct CountingRng {
        next: u8,
        calls: usize,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            let mut bytes = [0u8; 4];
            self.fill_bytes(&mut bytes);
            u32::from_le_bytes(bytes)
        }

        fn next_u64(&mut self) -> u64 {
            let mut bytes = [0u8; 8];
            self.fill_bytes(&mut bytes);
            u64::from_le_bytes(bytes)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.calls += 1;
            for e in dest {
                *e = self.next;
                self.next = self.next.wrapping_add(1);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Drains the buffer before refilling it
    #[test]
    fn drains_the_buffer_before_refilling_it() {
        let mut g = BufferedRng::with_capacity(CountingRng::default(), 8);

        let mut first = [0u8; 5];
        g.fill_bytes(&mut first);
        assert_eq!(first, [0, 1, 2, 3, 4]);
        assert_eq!(g.remaining(), 3);

        let mut second = [0u8; 5];
        g.fill_bytes(&mut second);
        assert_eq!(second, [5, 6, 7, 8, 9]);
        assert_eq!(g.remaining(), 6);
        assert_eq!(g.inner.calls, 2);
    }

    /// Serves requests larger than its capacity
    #[test]
    fn serves_requests_larger_than_its_capacity() {
        let mut g = BufferedRng::with_capacity(CountingRng::default(), 8);
        let mut bytes = [0u8; 20];
        g.fill_bytes(&mut bytes);
        assert_eq!(bytes, core::array::from_fn::<u8, 20, _>(|i| i as u8));
        assert_eq!(g.inner.calls, 3);
        assert_eq!(g.remaining(), 4);
    }

    /// Passes requests through when capacity is zero
    #[test]
    fn passes_requests_through_when_capacity_is_zero() {
        let mut g = BufferedRng::with_capacity(CountingRng::default(), 0);
        let mut bytes = [0u8; 4];
        g.fill_bytes(&mut bytes);
        g.fill_bytes(&mut bytes);
        assert_eq!(bytes, [4, 5, 6, 7]);
        assert_eq!(g.inner.calls, 2);
        assert_eq!(g.remaining(), 0);
    }

    /// Hides buffered bytes from debug output
    #[test]
    fn hides_buffered_bytes_from_debug_output() {
        let g = BufferedRng::with_capacity(CountingRng::default(), 8);
        assert_eq!(
            format!("{g:?}"),
            "BufferedRng { capacity: 8, remaining: 0, .. }"
        );
    }
}
