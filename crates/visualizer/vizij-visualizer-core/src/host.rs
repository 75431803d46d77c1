//! Rendering hosts that accept primitive collections.

use std::cell::RefCell;
use std::rc::Rc;

use crate::billboard::{Billboard, SharedBillboards};
use crate::primitive::{Primitive, SharedPrimitives};

/// Something that renders collections of `P`. Collections are registered once and
/// stay registered until removed.
pub trait PrimitiveHost<P> {
    fn add(&mut self, collection: SharedPrimitives<P>);

    /// Returns false when `collection` was not registered.
    fn remove(&mut self, collection: &SharedPrimitives<P>) -> bool;
}

pub type SharedHost<P> = Rc<RefCell<dyn PrimitiveHost<P>>>;

/// Minimal in-memory scene holding billboard collections.
#[derive(Debug, Default)]
pub struct Scene {
    billboards: Vec<SharedBillboards>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> Rc<RefCell<Scene>> {
        Rc::new(RefCell::new(self))
    }

    pub fn billboard_collections(&self) -> &[SharedBillboards] {
        &self.billboards
    }

    /// Snapshot of every shown billboard across all registered collections.
    pub fn visible_billboards(&self) -> Vec<Billboard> {
        self.billboards
            .iter()
            .flat_map(|c| c.borrow().shown().cloned().collect::<Vec<_>>())
            .collect()
    }

    pub fn shown_count(&self) -> usize {
        self.billboards
            .iter()
            .map(|c| c.borrow().iter().filter(|b| b.is_shown()).count())
            .sum()
    }
}

impl PrimitiveHost<Billboard> for Scene {
    fn add(&mut self, collection: SharedBillboards) {
        if !self.billboards.iter().any(|c| Rc::ptr_eq(c, &collection)) {
            self.billboards.push(collection);
        }
    }

    fn remove(&mut self, collection: &SharedBillboards) -> bool {
        let before = self.billboards.len();
        self.billboards.retain(|c| !Rc::ptr_eq(c, collection));
        self.billboards.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billboard::BillboardCollection;

    #[test]
    fn collections_register_once_and_remove_by_identity() {
        let mut scene = Scene::new();
        let a = BillboardCollection::new().into_shared();
        let b = BillboardCollection::new().into_shared();
        scene.add(a.clone());
        scene.add(a.clone());
        assert_eq!(scene.billboard_collections().len(), 1);
        assert!(!scene.remove(&b));
        assert!(scene.remove(&a));
        assert!(scene.billboard_collections().is_empty());
    }
}
