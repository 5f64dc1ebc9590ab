use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, RingError};

/// Fixed-capacity FIFO ring buffer. Pushing onto a full buffer is an error;
/// the oldest entry is never overwritten.
///
/// `head` is the slot of the newest element, `tail` the slot of the oldest.
/// While `len > 0` the live elements occupy `tail..=head` walking forward with
/// wraparound, so logical position `i` sits at `(tail + i) % cap` and
/// `head == (tail + len - 1) % cap`. Slots outside that range are stale.
#[derive(Debug)]
pub struct RingBuffer<T> {
    data: Vec<Option<T>>,
    head: usize,
    tail: usize,
    len:  usize,
    cap:  usize,
}

/// Point-in-time view of the cursors, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub len:      usize,
    pub capacity: usize,
    pub head:     usize,
    pub tail:     usize,
}

fn fail(op: &'static str, err: RingError) -> RingError {
    debug!(op, kind = err.kind_name(), "{}", err);
    err
}

impl<T> RingBuffer<T> {
    /// Allocates storage for exactly `cap` elements.
    pub fn new(cap: usize) -> Result<Self> {
        if cap == 0 {
            return Err(fail("init", RingError::InvalidArgument { reason: "capacity must be positive" }));
        }
        let mut data = Vec::new();
        if data.try_reserve_exact(cap).is_err() {
            return Err(fail("init", RingError::OutOfMemory { requested: cap }));
        }
        data.resize_with(cap, || None);
        Ok(Self { data, head: 0, tail: 0, len: 0, cap })
    }

    /// Releases storage and zeroes every field. Calling it again is a no-op.
    ///
    /// A torn-down buffer has capacity 0: `push` reports `BufferFull` and
    /// `pop` reports `BufferEmpty`.
    pub fn deinit(&mut self) {
        self.data = Vec::new();
        self.head = 0;
        self.tail = 0;
        self.len = 0;
        self.cap = 0;
    }

    pub fn push(&mut self, val: T) -> Result<()> {
        if self.is_full() {
            return Err(fail("push", RingError::BufferFull { capacity: self.cap }));
        }
        self.write_next(val);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(fail("pop", RingError::BufferEmpty));
        }
        let slot = self.data[self.tail].take();
        debug_assert!(slot.is_some(), "live slot {} holds no value", self.tail);
        let Some(val) = slot else {
            return Err(fail("pop", RingError::BufferEmpty));
        };
        // With one element left the cursor stays put; the next push lands on it.
        if self.len > 1 {
            self.tail = (self.tail + 1) % self.cap;
        }
        self.len -= 1;
        Ok(val)
    }

    /// Resets the cursors in O(1). Cleared values stay in their slots and are
    /// only dropped when a later push overwrites them, or on `deinit`/drop.
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn is_full(&self) -> bool { self.len == self.cap }
    pub fn len(&self) -> usize { self.len }
    pub fn capacity(&self) -> usize { self.cap }

    /// Pops up to `dest.len() - offset` elements into `dest[offset..]`, oldest first.
    ///
    /// Every slot of `dest` is reset to `None` before writing. Returns the
    /// number of elements moved, which is 0 when the buffer is empty or
    /// `offset` is at or past the end of `dest`.
    pub fn drain_into(&mut self, dest: &mut [Option<T>], offset: usize) -> Result<usize> {
        if dest.is_empty() {
            return Err(fail("drain_into", RingError::InvalidArgument { reason: "destination must not be empty" }));
        }
        dest.fill_with(|| None);

        let n = dest.len().saturating_sub(offset).min(self.len);
        for slot in dest.iter_mut().skip(offset).take(n) {
            *slot = Some(self.pop()?);
        }
        trace!(op = "drain_into", count = n, remaining = self.len);
        Ok(n)
    }

    /// Pushes clones of `source[offset..]` in order until the source runs out
    /// or the buffer fills. Returns the number pushed.
    pub fn fill_from(&mut self, source: &[T], offset: usize) -> usize
    where
        T: Clone,
    {
        let mut count = 0;
        for val in source.iter().skip(offset) {
            if self.is_full() {
                break;
            }
            self.write_next(val.clone());
            count += 1;
        }
        trace!(op = "fill_from", count, len = self.len);
        count
    }

    /// Copies live elements into `dest[offset..]` without removing them,
    /// starting `buf_offset` elements in from the oldest.
    ///
    /// Copies `min(len - buf_offset, dest.len() - offset)` elements (0 when
    /// either side is exhausted). `dest` is reset to `None` first, as in
    /// [`drain_into`](Self::drain_into).
    pub fn peek(&self, dest: &mut [Option<T>], offset: usize, buf_offset: usize) -> Result<usize>
    where
        T: Clone,
    {
        if dest.is_empty() {
            return Err(fail("peek", RingError::InvalidArgument { reason: "destination must not be empty" }));
        }
        dest.fill_with(|| None);

        let n = dest.len().saturating_sub(offset).min(self.len.saturating_sub(buf_offset));
        for (i, slot) in dest.iter_mut().skip(offset).take(n).enumerate() {
            *slot = self.data[(self.tail + buf_offset + i) % self.cap].clone();
        }
        trace!(op = "peek", count = n, buf_offset);
        Ok(n)
    }

    /// Element at logical position `i` (0 = oldest).
    pub fn get(&self, i: usize) -> Option<&T> {
        if i >= self.len {
            return None;
        }
        self.data[(self.tail + i) % self.cap].as_ref()
    }

    pub fn front(&self) -> Option<&T> { self.get(0) }

    pub fn back(&self) -> Option<&T> {
        if self.len == 0 { None } else { self.data[self.head].as_ref() }
    }

    /// Live elements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot { len: self.len, capacity: self.cap, head: self.head, tail: self.tail }
    }

    fn write_next(&mut self, val: T) {
        if self.len > 0 {
            self.head = (self.head + 1) % self.cap;
        }
        self.data[self.head] = Some(val);
        self.len += 1;
    }
}
