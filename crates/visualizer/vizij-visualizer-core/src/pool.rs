//! Unused primitive slots awaiting reuse.

/// LIFO free list of primitive slot indices.
///
/// Every index in the pool refers to a primitive that is allocated but hidden
/// with its resource cleared.
#[derive(Debug, Default, Clone)]
pub struct SlotPool {
    free: Vec<usize>,
}

impl SlotPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
        }
    }

    /// Return a slot. Pushing a slot that is already pooled is a double free.
    #[inline]
    pub fn push(&mut self, slot: usize) {
        debug_assert!(
            !self.free.contains(&slot),
            "slot {slot} returned to the pool twice"
        );
        self.free.push(slot);
    }

    /// Most recently returned slot, if any.
    #[inline]
    pub fn pop(&mut self) -> Option<usize> {
        self.free.pop()
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.free.contains(&slot)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.free
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}
