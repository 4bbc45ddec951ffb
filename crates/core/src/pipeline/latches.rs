//! Pipeline latch structures for inter-stage communication.
//!
//! The front of the pipeline is a chain of single-bundle latches:
//! Fetch → Decode → Rename → RegRead → Dispatch. A latch holds at most one
//! bundle (an ordered group of up to `width` instruction sequence indices), and
//! a stage may only move a bundle into a latch that is currently empty.

/// Ordered group of instruction sequence indices moving together through a stage.
pub type Bundle = Vec<usize>;

/// Single-bundle buffer between two adjacent stages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latch {
    bundle: Option<Bundle>,
}

impl Latch {
    /// Creates an empty latch.
    pub const fn new() -> Self {
        Self { bundle: None }
    }

    /// Whether the latch holds no bundle.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bundle.is_none()
    }

    /// Number of instructions held.
    #[inline]
    pub fn len(&self) -> usize {
        self.bundle.as_ref().map_or(0, Vec::len)
    }

    /// The held bundle, if any.
    #[inline]
    pub fn peek(&self) -> Option<&[usize]> {
        self.bundle.as_deref()
    }

    /// Places `bundle` in the latch.
    ///
    /// # Panics
    ///
    /// Panics if the latch is occupied or `bundle` is empty.
    pub fn push(&mut self, bundle: Bundle) {
        assert!(self.bundle.is_none(), "push into occupied latch");
        assert!(!bundle.is_empty(), "push of empty bundle");
        self.bundle = Some(bundle);
    }

    /// Removes and returns the held bundle.
    pub fn take(&mut self) -> Option<Bundle> {
        self.bundle.take()
    }

    /// Copy of the held instruction indices (empty when the latch is empty).
    pub fn to_vec(&self) -> Vec<usize> {
        self.peek().map(<[usize]>::to_vec).unwrap_or_default()
    }
}
