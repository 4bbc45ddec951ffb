//! Register Map Table (RMT) for register renaming.
//!
//! Maps each architectural register to the ROB slot of its latest in-flight
//! producer, or `None` if no producer is pending and the architectural value is
//! current. The table never holds values and never tracks readiness: readiness
//! lives on the ROB slot and in the issue queue.

use crate::pipeline::rob::RobSlot;

/// Rename table: architectural register → latest in-flight producer slot.
#[derive(Debug, Clone)]
pub struct RenameMapTable {
    map: Vec<Option<RobSlot>>,
}

impl RenameMapTable {
    /// Create a table for `num_regs` registers, all with no pending producer.
    pub fn new(num_regs: usize) -> Self {
        Self {
            map: vec![None; num_regs],
        }
    }

    /// Number of architectural registers covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table covers no registers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the slot of the latest pending producer of `reg`.
    /// Returns None if the architectural value is already current.
    #[inline]
    pub fn lookup(&self, reg: usize) -> Option<RobSlot> {
        self.map[reg]
    }

    /// Mark `reg` as produced by the instruction in `slot`, replacing any older producer.
    #[inline]
    pub fn bind(&mut self, reg: usize, slot: RobSlot) {
        self.map[reg] = Some(slot);
    }

    /// Clear `reg`'s producer, but ONLY if it is still `slot`.
    /// A retiring instruction must not clear a mapping set by a newer rename (WAW).
    pub fn clear_if_match(&mut self, reg: usize, slot: RobSlot) {
        if self.map[reg] == Some(slot) {
            self.map[reg] = None;
        }
    }

    /// Iterates over every register's mapping in register order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<RobSlot>)> + '_ {
        self.map.iter().copied().enumerate()
    }
}
