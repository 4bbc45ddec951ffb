//! Reorder Buffer (ROB) for in-order retirement.
//!
//! The ROB is a fixed-capacity circular arena of slots that tracks in-flight
//! instructions from rename through retire. It provides:
//! 1. **Allocation:** Hands out slot indices in program order at rename.
//! 2. **Wakeup Lists:** Records which consumers wait on each slot's result.
//! 3. **Completion:** Marks a slot ready once its result has been broadcast.
//! 4. **In-order Retire:** Releases slots from the head in allocation order.
//!
//! Instructions refer to their slot by [`RobSlot`] index, and dependency edges are
//! stored on the slot as consumer sequence indices, so no slot ever holds a
//! reference back into the instruction table.

use serde::Serialize;

use crate::pipeline::instruction::SrcOperand;

/// Index of a slot in the ROB arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub struct RobSlot(pub usize);

/// Dependency edge: the consumer operand woken when the slot's producer completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Wakeup {
    /// Sequence index of the waiting instruction.
    pub consumer: usize,
    /// Which of its operands this slot produces.
    pub operand: SrcOperand,
}

/// A single entry in the Reorder Buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RobEntry {
    /// Sequence index of the owning instruction.
    pub seq: usize,
    /// Program counter of the owning instruction.
    pub pc: u64,
    /// Destination register index.
    pub dst: Option<usize>,
    /// Result has been broadcast; the entry may retire.
    pub ready: bool,
    /// Consumers waiting on this entry's result.
    pub waiters: Vec<Wakeup>,
}

/// Reorder Buffer: circular buffer for in-order retirement.
#[derive(Debug)]
pub struct Rob {
    /// Fixed-size entry arena.
    entries: Vec<RobEntry>,
    /// Index of the oldest entry (retire point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Distinguishes a full buffer from an empty one when `head == tail`.
    full: bool,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; configuration validation rejects that earlier.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ROB capacity must be positive");
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, RobEntry::default);
        Self {
            entries,
            head: 0,
            tail: 0,
            full: false,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        if self.full {
            self.capacity()
        } else {
            (self.tail + self.capacity() - self.head) % self.capacity()
        }
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail && !self.full
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Returns the number of free slots (0 when full).
    #[inline]
    pub fn empty_size(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Index of the oldest slot.
    #[inline]
    pub fn head(&self) -> RobSlot {
        RobSlot(self.head)
    }

    /// Index of the next slot to allocate.
    #[inline]
    pub fn tail(&self) -> RobSlot {
        RobSlot(self.tail)
    }

    /// Allocates the tail slot for instruction `seq`. Returns `None` if the ROB is full.
    ///
    /// The slot is reset: not ready, no waiters.
    pub fn allocate(&mut self, seq: usize, pc: u64, dst: Option<usize>) -> Option<RobSlot> {
        if self.full {
            return None;
        }

        let slot = RobSlot(self.tail);
        self.entries[self.tail] = RobEntry {
            seq,
            pc,
            dst,
            ready: false,
            waiters: Vec::new(),
        };

        self.tail = (self.tail + 1) % self.capacity();
        self.full = self.tail == self.head;
        Some(slot)
    }

    /// Returns the head entry (oldest), if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.is_empty() {
            None
        } else {
            Some(&self.entries[self.head])
        }
    }

    /// Releases the head entry. Returns its slot and contents, or `None` if the ROB is empty.
    pub fn pop_head(&mut self) -> Option<(RobSlot, RobEntry)> {
        if self.is_empty() {
            return None;
        }

        let slot = RobSlot(self.head);
        let entry = std::mem::take(&mut self.entries[self.head]);
        self.head = (self.head + 1) % self.capacity();
        self.full = false;
        Some((slot, entry))
    }

    /// Whether `slot` lies between head and tail.
    pub fn is_live(&self, slot: RobSlot) -> bool {
        if slot.0 >= self.capacity() || self.is_empty() {
            return false;
        }
        let offset = (slot.0 + self.capacity() - self.head) % self.capacity();
        offset < self.len()
    }

    /// Returns the entry in `slot` if it is live.
    pub fn entry(&self, slot: RobSlot) -> Option<&RobEntry> {
        if self.is_live(slot) {
            Some(&self.entries[slot.0])
        } else {
            None
        }
    }

    /// Whether the live entry in `slot` has broadcast its result.
    #[inline]
    pub fn is_ready(&self, slot: RobSlot) -> bool {
        self.entry(slot).is_some_and(|e| e.ready)
    }

    /// Records that `wakeup` waits on the producer in `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not live.
    pub fn add_waiter(&mut self, slot: RobSlot, wakeup: Wakeup) {
        assert!(self.is_live(slot), "waiter added to dead ROB slot {}", slot.0);
        self.entries[slot.0].waiters.push(wakeup);
    }

    /// Marks `slot` ready and returns its waiting consumers, leaving the list empty.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not live.
    pub fn complete(&mut self, slot: RobSlot) -> Vec<Wakeup> {
        assert!(self.is_live(slot), "completion of dead ROB slot {}", slot.0);
        let entry = &mut self.entries[slot.0];
        entry.ready = true;
        std::mem::take(&mut entry.waiters)
    }

    /// Iterates over live entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (RobSlot, &RobEntry)> + '_ {
        let cap = self.capacity();
        (0..self.len()).map(move |i| {
            let idx = (self.head + i) % cap;
            (RobSlot(idx), &self.entries[idx])
        })
    }
}
