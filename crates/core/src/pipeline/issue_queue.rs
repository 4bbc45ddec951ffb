//! Issue Queue (IQ) with oldest-first out-of-order selection.
//!
//! Dispatched instructions wait here until both source operands are ready.
//! Entries are keyed by sequence index, so iteration order is program order and
//! selection is a single ascending scan: the first `width` entries that are
//! valid and fully ready issue, everything else stays queued.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::pipeline::instruction::{Instruction, SrcOperand};

/// One dispatched instruction waiting for its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IqEntry {
    /// Sequence index of the queued instruction.
    pub seq: usize,
    /// First source operand is available.
    pub src1_ready: bool,
    /// Second source operand is available.
    pub src2_ready: bool,
    /// Entry holds a live instruction.
    pub valid: bool,
}

impl IqEntry {
    /// Wraps `inst`, seeding readiness from whether each source still waits on a producer.
    pub const fn new(inst: &Instruction) -> Self {
        Self {
            seq: inst.seq,
            src1_ready: !inst.src1_tag.is_waiting(),
            src2_ready: !inst.src2_tag.is_waiting(),
            valid: true,
        }
    }

    /// Whether the entry may be selected for issue.
    #[inline]
    pub const fn can_issue(&self) -> bool {
        self.valid && self.src1_ready && self.src2_ready
    }
}

/// Issue queue.
#[derive(Debug, Clone)]
pub struct IssueQueue {
    entries: BTreeMap<usize, IqEntry>,
    capacity: usize,
    width: usize,
}

impl IssueQueue {
    /// Creates an empty queue holding up to `capacity` entries and issuing up to `width` per cycle.
    pub const fn new(capacity: usize, width: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity,
            width,
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of queued entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of free entries.
    #[inline]
    pub fn free_size(&self) -> usize {
        self.capacity - self.entries.len()
    }

    /// Inserts one entry.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full or already holds the same instruction.
    pub fn insert(&mut self, entry: IqEntry) {
        assert!(self.free_size() > 0, "insert into full issue queue");
        let previous = self.entries.insert(entry.seq, entry);
        assert!(
            previous.is_none(),
            "instruction {} dispatched twice",
            entry.seq
        );
    }

    /// Inserts every entry of a dispatch bundle.
    pub fn insert_bundle(&mut self, entries: impl IntoIterator<Item = IqEntry>) {
        for entry in entries {
            self.insert(entry);
        }
    }

    /// Sets `operand` ready for instruction `seq`. Returns false if `seq` is not queued.
    pub fn wake(&mut self, seq: usize, operand: SrcOperand) -> bool {
        match self.entries.get_mut(&seq) {
            Some(entry) => {
                match operand {
                    SrcOperand::Src1 => entry.src1_ready = true,
                    SrcOperand::Src2 => entry.src2_ready = true,
                }
                true
            }
            None => false,
        }
    }

    /// Selects and removes up to `width` issuable entries, oldest first.
    ///
    /// Returns the sequence indices in ascending order.
    pub fn issue(&mut self) -> Vec<usize> {
        let selected: Vec<usize> = self
            .entries
            .values()
            .filter(|e| e.can_issue())
            .map(|e| e.seq)
            .take(self.width)
            .collect();

        for seq in &selected {
            let removed = self.entries.remove(seq);
            assert!(
                removed.is_some_and(|e| e.valid),
                "issue of invalid IQ entry {seq}"
            );
        }
        selected
    }

    /// Iterates over queued entries in program order.
    pub fn iter(&self) -> impl Iterator<Item = &IqEntry> + '_ {
        self.entries.values()
    }
}
