//! Fixed-capacity circular buffer that overwrites its oldest entry when full.
//!
//! Storage is allocated once at construction; a write cursor advances modulo
//! the capacity and a full flag flips the first time it wraps. Entries are
//! only ever overwritten in place or cleared wholesale by
//! [`reset`](RingBuffer::reset) — there is no per-entry removal.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        RingBuffer<T>                             │
//!   │                                                                  │
//!   │   slots: Vec<Option<T>>      cursor: next write position         │
//!   │   full: bool                 (wraps modulo capacity)             │
//!   │                                                                  │
//!   │   After push(A), push(B), push(C), push(D) with capacity 3:      │
//!   │                                                                  │
//!   │   Index:    0     1     2                                        │
//!   │           ┌─────┬─────┬─────┐                                    │
//!   │   slots:  │  D  │  B  │  C  │      cursor = 1, full = true       │
//!   │           └─────┴─────┴─────┘                                    │
//!   │                   ▲                                              │
//!   │                   └── oldest lives at cursor once full           │
//!   │                                                                  │
//!   │   Forward traversal (oldest → newest):                           │
//!   │     not full: 0 .. cursor                                        │
//!   │     full:     cursor .. capacity, then 0 .. cursor               │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation               | Time | Notes                              |
//! |-------------------------|------|------------------------------------|
//! | `push`                  | O(1) | Overwrites the oldest slot if full |
//! | `peek_oldest`/`newest`  | O(1) | Index math, no traversal           |
//! | `iter` / `iter_rev`     | O(n) | Oldest→newest / newest→oldest      |
//! | `reset`                 | O(n) | Drops every held value             |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::ds::RingBuffer;
//!
//! let mut buf = RingBuffer::new(3);
//! for item in ["a", "b", "c", "d", "e"] {
//!     buf.push(item);
//! }
//!
//! // Only the last `capacity` items survive, oldest first.
//! assert_eq!(buf.to_vec(), vec!["c", "d", "e"]);
//! assert_eq!(buf.front(), Some(&"c"));
//! assert_eq!(buf.back(), Some(&"e"));
//! ```

use crate::error::ConfigError;

/// Fixed-capacity circular sequence; the oldest entry is overwritten on
/// overflow.
///
/// # Example
///
/// ```
/// use evictkit::ds::RingBuffer;
///
/// let mut recent = RingBuffer::new(2);
/// assert_eq!(recent.push(10), 1);
/// assert_eq!(recent.push(20), 2);
/// assert_eq!(recent.push(30), 2); // 10 was overwritten
/// assert_eq!(recent.to_vec(), vec![20, 30]);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    cursor: usize,
    full: bool,
}

impl<T> RingBuffer<T> {
    /// Creates a buffer with room for `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to
    /// handle invalid capacities without panicking.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(buf) => buf,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a buffer with room for `capacity` entries.
    ///
    /// Returns a [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            cursor: 0,
            full: false,
        })
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live entries: the capacity once full, otherwise
    /// the number of pushes so far.
    pub fn len(&self) -> usize {
        if self.full { self.capacity() } else { self.cursor }
    }

    /// Returns `true` if nothing has been pushed since construction/reset.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `item`, overwriting the oldest entry if the buffer is full.
    /// Returns the new length.
    pub fn push(&mut self, item: T) -> usize {
        self.slots[self.cursor] = Some(item);
        self.cursor += 1;
        if self.cursor == self.capacity() {
            self.cursor = 0;
            self.full = true;
        }
        self.len()
    }

    /// Returns the physical slot index of the oldest entry, or `None` when
    /// empty.
    pub fn oldest_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(if self.full { self.cursor } else { 0 })
    }

    /// Returns the physical slot index of the newest entry, or `None` when
    /// empty.
    pub fn newest_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(if self.cursor > 0 {
            self.cursor - 1
        } else {
            self.capacity() - 1
        })
    }

    /// Returns the oldest entry without removing it.
    pub fn peek_oldest(&self) -> Option<&T> {
        self.oldest_index().and_then(|idx| self.slots[idx].as_ref())
    }

    /// Returns the newest entry without removing it.
    pub fn peek_newest(&self) -> Option<&T> {
        self.newest_index().and_then(|idx| self.slots[idx].as_ref())
    }

    /// Alias for [`peek_oldest`](Self::peek_oldest).
    pub fn front(&self) -> Option<&T> {
        self.peek_oldest()
    }

    /// Alias for [`peek_newest`](Self::peek_newest).
    pub fn back(&self) -> Option<&T> {
        self.peek_newest()
    }

    /// Iterates oldest→newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            start: self.oldest_index().unwrap_or(0),
            len: self.len(),
            front: 0,
            back: self.len(),
        }
    }

    /// Iterates newest→oldest: the exact inverse of [`iter`](Self::iter).
    pub fn iter_rev(&self) -> std::iter::Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    /// Collects the live entries into a `Vec`, oldest first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Calls `f` for each entry oldest→newest with its logical position
    /// (0 = oldest), not the physical slot index.
    pub fn for_each(&self, mut f: impl FnMut(&T, usize)) {
        for (position, item) in self.iter().enumerate() {
            f(item, position);
        }
    }

    /// Calls `f` for each entry newest→oldest with its logical position
    /// (0 = newest).
    pub fn for_each_rev(&self, mut f: impl FnMut(&T, usize)) {
        for (position, item) in self.iter_rev().enumerate() {
            f(item, position);
        }
    }

    /// Maps each entry oldest→newest; `f` receives the logical position.
    pub fn map<U>(&self, mut f: impl FnMut(&T, usize) -> U) -> Vec<U> {
        self.iter()
            .enumerate()
            .map(|(position, item)| f(item, position))
            .collect()
    }

    /// Maps each entry newest→oldest; `f` receives the logical position.
    pub fn map_rev<U>(&self, mut f: impl FnMut(&T, usize) -> U) -> Vec<U> {
        self.iter_rev()
            .enumerate()
            .map(|(position, item)| f(item, position))
            .collect()
    }

    /// Clears every slot (dropping held values), the cursor, and the full
    /// flag, returning the buffer to its freshly constructed state.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.cursor = 0;
        self.full = false;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.cursor < self.capacity());
        assert!(self.len() <= self.capacity());
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, self.len());
    }
}

/// Borrowed iterator over a [`RingBuffer`], oldest→newest.
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    start: usize,
    len: usize,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let idx = (self.start + self.front) % self.slots.len();
        self.front += 1;
        self.slots[idx].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let idx = (self.start + self.back) % self.slots.len();
        self.slots[idx].as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
