//! Observable entity collection.
//!
//! Every mutation is reported to subscribers as one [`CollectionChanged`] batch.
//! Between `suspend_events` and `resume_events` mutations are coalesced so a single
//! batch is delivered whose added/removed/changed sequences are disjoint:
//! - add then remove cancels out
//! - remove then add reports `changed`
//! - change then remove reports `removed`
//! - change of a pending add stays `added`
//!
//! Listeners run synchronously inside the mutating call while the collection is
//! mutably borrowed; they must not call back into the collection.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::entity::{Entity, EntityId, EntityRef};
use crate::error::EntityError;
use crate::event::{Event, ListenerId};

/// One batch of collection mutations. Entities in `changed` already reflect their
/// new state; an entity never appears in more than one sequence.
#[derive(Debug, Clone, Default)]
pub struct CollectionChanged {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub changed: Vec<EntityRef>,
}

impl CollectionChanged {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Collection shared between producers and visualizers.
pub type SharedEntityCollection = Rc<RefCell<EntityCollection>>;

#[derive(Debug, Default)]
struct Pending {
    added: IndexMap<EntityId, EntityRef>,
    removed: IndexMap<EntityId, EntityRef>,
    changed: IndexMap<EntityId, EntityRef>,
}

impl Pending {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    fn take(&mut self) -> CollectionChanged {
        CollectionChanged {
            added: std::mem::take(&mut self.added).into_values().collect(),
            removed: std::mem::take(&mut self.removed).into_values().collect(),
            changed: std::mem::take(&mut self.changed).into_values().collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct EntityCollection {
    entities: IndexMap<EntityId, EntityRef>,
    suspend_count: u32,
    pending: Pending,
    collection_changed: Event<CollectionChanged>,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedEntityCollection {
        Rc::new(RefCell::new(self))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn get_by_id(&self, id: &EntityId) -> Option<&EntityRef> {
        self.entities.get(id)
    }

    /// Entities in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &EntityRef> {
        self.entities.values()
    }

    /// A batch listing every current entity as added; used to bring a new observer
    /// up to date.
    pub fn as_added(&self) -> CollectionChanged {
        CollectionChanged {
            added: self.entities.values().cloned().collect(),
            ..CollectionChanged::default()
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CollectionChanged) + 'static) -> ListenerId {
        self.collection_changed.add_listener(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.collection_changed.remove_listener(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.collection_changed.len()
    }

    pub fn add(&mut self, entity: Entity) -> Result<EntityRef, EntityError> {
        let id = entity.id().clone();
        if self.entities.contains_key(&id) {
            return Err(EntityError::DuplicateId(id));
        }
        let entity = entity.into_ref();
        self.entities.insert(id.clone(), entity.clone());

        if self.pending.removed.shift_remove(&id).is_some() {
            // Re-added within one batch: observers see a replacement.
            self.pending.changed.insert(id, entity.clone());
        } else {
            self.pending.added.insert(id, entity.clone());
        }
        self.fire_if_ready();
        Ok(entity)
    }

    /// Returns false when no entity with `id` exists.
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let Some(entity) = self.entities.shift_remove(id) else {
            return false;
        };
        if self.pending.added.shift_remove(id).is_none() {
            self.pending.changed.shift_remove(id);
            self.pending.removed.insert(id.clone(), entity);
        }
        self.fire_if_ready();
        true
    }

    /// Remove every entity, reported as one batch.
    pub fn remove_all(&mut self) {
        self.suspend_events();
        let ids: Vec<EntityId> = self.entities.keys().cloned().collect();
        for id in &ids {
            self.remove(id);
        }
        self.resume_after_internal_suspend();
    }

    /// Mutate an entity in place and report it as changed.
    pub fn modify<R>(
        &mut self,
        id: &EntityId,
        f: impl FnOnce(&mut Entity) -> R,
    ) -> Result<R, EntityError> {
        let entity = self
            .entities
            .get(id)
            .cloned()
            .ok_or_else(|| EntityError::NotFound(id.clone()))?;
        let out = f(&mut entity.borrow_mut());
        self.record_changed(id, entity);
        Ok(out)
    }

    /// Report an entity that was mutated through its [`EntityRef`] directly.
    pub fn notify_changed(&mut self, id: &EntityId) -> Result<(), EntityError> {
        let entity = self
            .entities
            .get(id)
            .cloned()
            .ok_or_else(|| EntityError::NotFound(id.clone()))?;
        self.record_changed(id, entity);
        Ok(())
    }

    /// Hold back change notifications until the matching `resume_events`. Nests.
    pub fn suspend_events(&mut self) {
        self.suspend_count += 1;
    }

    pub fn resume_events(&mut self) -> Result<(), EntityError> {
        if self.suspend_count == 0 {
            log::warn!("resume_events called on an entity collection that is not suspended");
            return Err(EntityError::EventsNotSuspended);
        }
        self.suspend_count -= 1;
        self.fire_if_ready();
        Ok(())
    }

    pub fn is_suspended(&self) -> bool {
        self.suspend_count > 0
    }

    fn resume_after_internal_suspend(&mut self) {
        self.suspend_count = self.suspend_count.saturating_sub(1);
        self.fire_if_ready();
    }

    fn record_changed(&mut self, id: &EntityId, entity: EntityRef) {
        if !self.pending.added.contains_key(id) && !self.pending.removed.contains_key(id) {
            self.pending.changed.insert(id.clone(), entity);
        }
        self.fire_if_ready();
    }

    fn fire_if_ready(&mut self) {
        if self.suspend_count > 0 || self.pending.is_empty() {
            return;
        }
        let batch = self.pending.take();
        log::trace!(
            "entity collection changed: {} added, {} removed, {} changed",
            batch.added.len(),
            batch.removed.len(),
            batch.changed.len()
        );
        self.collection_changed.raise(&batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut c = EntityCollection::new();
        c.add(Entity::new("a")).unwrap();
        assert_eq!(
            c.add(Entity::new("a")).unwrap_err(),
            EntityError::DuplicateId(EntityId::new("a"))
        );
    }

    #[test]
    fn resume_without_suspend_fails() {
        let mut c = EntityCollection::new();
        assert_eq!(c.resume_events(), Err(EntityError::EventsNotSuspended));
    }

    #[test]
    fn remove_preserves_insertion_order_of_rest() {
        let mut c = EntityCollection::new();
        for id in ["a", "b", "c"] {
            c.add(Entity::new(id)).unwrap();
        }
        assert!(c.remove(&EntityId::new("b")));
        assert!(!c.remove(&EntityId::new("b")));
        let ids: Vec<String> = c
            .values()
            .map(|e| e.borrow().id().as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
