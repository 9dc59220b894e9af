use std::collections::TryReserveError;
use std::io::{self, Read};

/// Fixed-capacity byte queue backed by a single allocation.
///
/// `head` is the next byte to drain and `tail` the next slot to fill, both
/// modulo the capacity. The `len` bytes from `head` onwards are unread
/// data; every other slot is stale.
#[derive(Debug)]
pub struct RingBuffer {
    slots: Box<[u8]>,
    head: usize,
    tail: usize,
    len: usize,
}

impl RingBuffer {
    /// Allocate a ring of `capacity` bytes, reporting allocation failure
    /// instead of aborting.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize(capacity, 0);

        Ok(Self {
            slots: slots.into_boxed_slice(),
            head: 0,
            tail: 0,
            len: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn free(&self) -> usize {
        self.capacity() - self.len
    }

    /// Forget all buffered bytes.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    /// Unread bytes in order, split at the wrap-around point.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        if self.is_empty() {
            return (&[], &[]);
        }

        let end = self.head + self.len;
        if end <= self.capacity() {
            (&self.slots[self.head..end], &[])
        } else {
            (
                &self.slots[self.head..],
                &self.slots[..end - self.capacity()],
            )
        }
    }

    /// Top up the free space from `source`.
    ///
    /// Keeps reading until the ring is full or the source reports end of
    /// input, so a ring that is not full afterwards means the source is
    /// exhausted. Bytes read before an error stay buffered.
    pub fn fill_from<R: Read>(&mut self, source: &mut R) -> io::Result<usize> {
        let mut added = 0;

        while !self.is_full() {
            let region = if self.tail < self.head {
                self.tail..self.head
            } else {
                self.tail..self.capacity()
            };

            match source.read(&mut self.slots[region]) {
                Ok(0) => break,
                Ok(n) => {
                    self.tail = (self.tail + n) % self.capacity();
                    self.len += n;
                    added += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(added)
    }

    /// Move every buffered byte to the end of `out`.
    pub fn drain_all(&mut self, out: &mut Vec<u8>) -> usize {
        let count = self.len;
        self.consume(count, out);
        count
    }

    /// Move bytes to `out` until at least `min_size` bytes were moved and
    /// the last one equals `delimiter`, or until the ring runs dry.
    pub fn drain_until(&mut self, min_size: usize, delimiter: u8, out: &mut Vec<u8>) -> usize {
        let skip = min_size.saturating_sub(1);
        let (first, second) = self.as_slices();

        let count = first
            .iter()
            .chain(second)
            .skip(skip)
            .position(|&byte| byte == delimiter)
            .map_or(self.len, |offset| skip + offset + 1);

        self.consume(count, out);
        count
    }

    fn consume(&mut self, count: usize, out: &mut Vec<u8>) {
        debug_assert!(count <= self.len);

        let (first, second) = self.as_slices();
        let from_first = count.min(first.len());
        out.extend_from_slice(&first[..from_first]);
        out.extend_from_slice(&second[..count - from_first]);

        self.head = (self.head + count) % self.capacity().max(1);
        self.len -= count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ring_with(capacity: usize, data: &[u8]) -> RingBuffer {
        let mut ring = RingBuffer::try_with_capacity(capacity).unwrap();
        ring.fill_from(&mut Cursor::new(data.to_vec())).unwrap();
        ring
    }

    #[test]
    fn test_fill_stops_at_capacity() {
        let mut source = Cursor::new(b"abcdefghij".to_vec());
        let mut ring = RingBuffer::try_with_capacity(4).unwrap();

        assert_eq!(ring.fill_from(&mut source).unwrap(), 4);
        assert!(ring.is_full());
        assert_eq!(ring.fill_from(&mut source).unwrap(), 0);
        assert_eq!(ring.as_slices(), (&b"abcd"[..], &b""[..]));
    }

    #[test]
    fn test_fill_short_source_leaves_room() {
        let ring = ring_with(8, b"abc");
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.free(), 5);
        assert!(!ring.is_full());
    }

    #[test]
    fn test_drain_all_empties_ring() {
        let mut ring = ring_with(8, b"hello");
        let mut out = Vec::new();

        assert_eq!(ring.drain_all(&mut out), 5);
        assert_eq!(out, b"hello");
        assert!(ring.is_empty());
        assert_eq!(ring.drain_all(&mut out), 0);
    }

    #[test]
    fn test_drain_until_stops_on_delimiter_after_min() {
        let mut ring = ring_with(16, b"ab cd ef gh");
        let mut out = Vec::new();

        // The space at index 2 is too early; the one at index 5 qualifies
        assert_eq!(ring.drain_until(4, b' ', &mut out), 6);
        assert_eq!(out, b"ab cd ");
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn test_drain_until_accepts_delimiter_exactly_at_min() {
        let mut ring = ring_with(16, b"abc def");
        let mut out = Vec::new();

        assert_eq!(ring.drain_until(4, b' ', &mut out), 4);
        assert_eq!(out, b"abc ");
    }

    #[test]
    fn test_drain_until_runs_dry_without_delimiter() {
        let mut ring = ring_with(16, b"abcdefgh");
        let mut out = Vec::new();

        assert_eq!(ring.drain_until(2, b' ', &mut out), 8);
        assert_eq!(out, b"abcdefgh");
        assert!(ring.is_empty());
    }

    #[test]
    fn test_wraparound_preserves_order() {
        let mut source = Cursor::new(b"0123456789abcdef".to_vec());
        let mut ring = RingBuffer::try_with_capacity(6).unwrap();
        let mut out = Vec::new();

        ring.fill_from(&mut source).unwrap();
        ring.drain_until(4, b'3', &mut out);
        assert_eq!(out, b"0123");

        // Refill wraps the tail around to the front of the allocation
        assert_eq!(ring.fill_from(&mut source).unwrap(), 4);
        assert!(ring.is_full());
        assert_eq!(ring.as_slices(), (&b"45"[..], &b"6789"[..]));

        out.clear();
        assert_eq!(ring.drain_until(3, b'8', &mut out), 5);
        assert_eq!(out, b"45678");

        out.clear();
        ring.fill_from(&mut source).unwrap();
        ring.drain_all(&mut out);
        assert_eq!(out, b"9abcde");
    }

    /// Hands out its bytes, then fails every later read
    struct FailingSource {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::other("device went away")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_error_keeps_bytes_already_buffered() {
        let mut source = FailingSource {
            data: Cursor::new(b"abc de".to_vec()),
        };
        let mut ring = RingBuffer::try_with_capacity(16).unwrap();

        let err = ring.fill_from(&mut source).unwrap_err();
        assert_eq!(err.to_string(), "device went away");
        assert_eq!(ring.len(), 6);
        assert!(!ring.is_full());

        let mut out = Vec::new();
        assert_eq!(ring.drain_all(&mut out), 6);
        assert_eq!(out, b"abc de");
    }

    #[test]
    fn test_clear_resets_offsets() {
        let mut ring = ring_with(4, b"abcd");
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.as_slices(), (&b""[..], &b""[..]));
    }
}
