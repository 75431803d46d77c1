//! Slot-indexed primitive arena.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use vizij_entity_core::EntityId;

/// A renderable primitive living in a [`PrimitiveCollection`] slot.
pub trait Primitive: Default + fmt::Debug {
    /// Slot index inside the owning collection.
    fn index(&self) -> usize;
    fn set_index(&mut self, index: usize);

    /// Entity currently represented by this primitive (used for picking).
    fn owner(&self) -> Option<&EntityId>;
    fn set_owner(&mut self, owner: Option<EntityId>);

    fn is_shown(&self) -> bool;

    /// Hide the primitive, clear its resource reference and owner so it can sit in
    /// the unused-slot pool without rendering stale content.
    fn release(&mut self);
}

/// Process-unique identity of a [`PrimitiveCollection`]. Never reused, so hosts
/// can key per-slot state by `(CollectionId, slot)` after collections are dropped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CollectionId(u64);

impl CollectionId {
    fn alloc() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        CollectionId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Arena of primitives addressed by slot index in O(1). Slots are never compacted,
/// so an index stays valid for the lifetime of the collection.
#[derive(Debug)]
pub struct PrimitiveCollection<P> {
    id: CollectionId,
    primitives: Vec<P>,
}

/// Collection shared between the visualizer (sole writer) and the rendering host.
pub type SharedPrimitives<P> = Rc<RefCell<PrimitiveCollection<P>>>;

impl<P> Default for PrimitiveCollection<P> {
    fn default() -> Self {
        Self {
            id: CollectionId::alloc(),
            primitives: Vec::new(),
        }
    }
}

impl<P: Primitive> PrimitiveCollection<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: CollectionId::alloc(),
            primitives: Vec::with_capacity(capacity),
        }
    }

    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn into_shared(self) -> SharedPrimitives<P> {
        Rc::new(RefCell::new(self))
    }

    /// Allocate a new primitive in the next slot.
    pub fn add(&mut self) -> &mut P {
        let index = self.primitives.len();
        let mut primitive = P::default();
        primitive.set_index(index);
        self.primitives.push(primitive);
        &mut self.primitives[index]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&P> {
        self.primitives.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut P> {
        self.primitives.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.primitives.iter()
    }

    /// Primitives currently shown.
    pub fn shown(&self) -> impl Iterator<Item = &P> {
        self.primitives.iter().filter(|p| p.is_shown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billboard::Billboard;

    #[test]
    fn collections_get_distinct_ids() {
        let a = PrimitiveCollection::<Billboard>::new();
        let b = PrimitiveCollection::<Billboard>::with_capacity(4);
        assert_ne!(a.id(), b.id());
        let a_id = a.id();
        drop(a);
        assert_ne!(PrimitiveCollection::<Billboard>::new().id(), a_id);
    }

    #[test]
    fn add_assigns_sequential_slots() {
        let mut c = PrimitiveCollection::<Billboard>::new();
        assert_eq!(c.add().index(), 0);
        assert_eq!(c.add().index(), 1);
        assert_eq!(c.len(), 2);
    }
}
