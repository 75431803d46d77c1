//! Reconciliation engine.
//!
//! A [`PrimitiveVisualizer`] watches an entity collection, keeps a registry of the
//! entities that carry its attribute group, and on every `update` mirrors their
//! sampled attributes onto pooled primitives. Primitives of entities that stop
//! rendering are hidden and their slots recycled; nothing is ever deallocated
//! before the visualizer is destroyed.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use vizij_entity_core::{
    Cartesian3, CollectionChanged, Entity, EntityId, EntityRef, ListenerId, SharedEntityCollection,
    SimTime, WeakEntityRef,
};

use crate::config::VisualizerConfig;
use crate::error::VisualizerError;
use crate::host::SharedHost;
use crate::kind::{BillboardKind, FrameSample, GraphicsKind};
use crate::pool::SlotPool;
use crate::primitive::{Primitive, PrimitiveCollection, SharedPrimitives};

pub type BillboardVisualizer = PrimitiveVisualizer<BillboardKind>;

/// Common surface of per-frame visualizers.
pub trait Visualizer {
    /// Bring primitives in line with entity state at `time`. `Ok(true)` means the
    /// frame is complete.
    fn update(&mut self, time: SimTime) -> Result<bool, VisualizerError>;

    fn is_destroyed(&self) -> bool;

    /// Release every primitive and detach from the entity collection.
    fn destroy(&mut self) -> Result<(), VisualizerError>;
}

#[derive(Debug)]
struct RegistryEntry {
    entity: WeakEntityRef,
    slot: Option<usize>,
}

struct VisualizerState<K: GraphicsKind> {
    config: VisualizerConfig,
    registry: IndexMap<EntityId, RegistryEntry>,
    unused: SlotPool,
    primitives: Option<SharedPrimitives<K::Primitive>>,
    position: Cartesian3,
    scratch: K::Scratch,
    detached: bool,
}

fn qualifies<K: GraphicsKind>(entity: &Entity) -> bool {
    K::graphics(entity).is_some() && entity.position.is_some()
}

fn primitive_at<'a, P: Primitive>(
    collection: &'a mut PrimitiveCollection<P>,
    slot: usize,
    id: &EntityId,
) -> &'a mut P {
    let len = collection.len();
    match collection.get_mut(slot) {
        Some(p) => p,
        None => panic!(
            "registry slot {slot} for entity '{id}' does not index a live primitive ({len} allocated)"
        ),
    }
}

/// Hide the entry's primitive and put its slot back in the pool.
fn return_primitive<P: Primitive>(
    id: &EntityId,
    entry: &mut RegistryEntry,
    primitives: &Option<SharedPrimitives<P>>,
    unused: &mut SlotPool,
) {
    let Some(slot) = entry.slot.take() else {
        return;
    };
    let Some(collection) = primitives else {
        panic!("entity '{id}' holds slot {slot} but no primitive collection exists");
    };
    primitive_at(&mut collection.borrow_mut(), slot, id).release();
    unused.push(slot);
    log::trace!("returned slot {slot} of entity '{id}' to the pool");
}

impl<K: GraphicsKind> VisualizerState<K> {
    fn new(config: VisualizerConfig) -> Self {
        Self {
            registry: IndexMap::with_capacity(config.registry_capacity),
            unused: SlotPool::with_capacity(config.pool_capacity),
            primitives: None,
            position: Cartesian3::ZERO,
            scratch: K::Scratch::default(),
            detached: false,
            config,
        }
    }

    fn upsert(&mut self, id: EntityId, entity: &EntityRef) {
        let weak = Rc::downgrade(entity);
        match self.registry.get_mut(&id) {
            // Keep the slot; the entity object may have been replaced under the same id.
            Some(entry) => entry.entity = weak,
            None => {
                self.registry.insert(
                    id,
                    RegistryEntry {
                        entity: weak,
                        slot: None,
                    },
                );
            }
        }
    }

    fn forget(&mut self, id: &EntityId) {
        if let Some(mut entry) = self.registry.swap_remove(id) {
            return_primitive(id, &mut entry, &self.primitives, &mut self.unused);
        }
    }

    fn on_collection_changed(&mut self, change: &CollectionChanged) {
        if self.detached {
            return;
        }
        for entity in change.added.iter().rev() {
            let e = entity.borrow();
            if qualifies::<K>(&e) {
                self.upsert(e.id().clone(), entity);
            }
        }
        for entity in change.changed.iter().rev() {
            let e = entity.borrow();
            if qualifies::<K>(&e) {
                self.upsert(e.id().clone(), entity);
            } else {
                self.forget(e.id());
            }
        }
        for entity in change.removed.iter().rev() {
            let e = entity.borrow();
            self.forget(e.id());
        }
        log::trace!(
            "{} visualizer registry now tracks {} entities",
            K::NAME,
            self.registry.len()
        );
    }

    fn ensure_primitives(
        primitives: &mut Option<SharedPrimitives<K::Primitive>>,
        host: &SharedHost<K::Primitive>,
        capacity: usize,
    ) -> SharedPrimitives<K::Primitive> {
        if let Some(collection) = primitives {
            return collection.clone();
        }
        let collection = PrimitiveCollection::with_capacity(capacity).into_shared();
        host.borrow_mut().add(collection.clone());
        log::debug!("{} visualizer created its primitive collection", K::NAME);
        *primitives = Some(collection.clone());
        collection
    }

    fn update(&mut self, time: SimTime, host: &SharedHost<K::Primitive>) {
        let Self {
            config,
            registry,
            unused,
            primitives,
            position,
            scratch,
            ..
        } = self;

        for (id, entry) in registry.iter_mut() {
            let Some(entity) = entry.entity.upgrade() else {
                log::warn!("entity '{id}' was dropped without a removal notification");
                return_primitive(id, entry, primitives, unused);
                continue;
            };
            let entity = entity.borrow();
            let Some(graphics) = K::graphics(&entity) else {
                return_primitive(id, entry, primitives, unused);
                continue;
            };

            let resource = if entity.is_available(time) && K::show(graphics, time) {
                let has_position = entity
                    .position
                    .as_deref()
                    .is_some_and(|p| p.value_into(time, position));
                K::resource(graphics, time).filter(|_| has_position)
            } else {
                None
            };
            let Some(resource) = resource else {
                return_primitive(id, entry, primitives, unused);
                continue;
            };

            let collection = Self::ensure_primitives(primitives, host, config.primitive_capacity);
            let mut collection = collection.borrow_mut();
            let slot = match entry.slot {
                Some(slot) => slot,
                None => {
                    let slot = match unused.pop() {
                        Some(slot) => {
                            log::trace!("entity '{id}' reuses pooled slot {slot}");
                            slot
                        }
                        None => collection.add().index(),
                    };
                    primitive_at(&mut collection, slot, id).set_owner(Some(id.clone()));
                    entry.slot = Some(slot);
                    slot
                }
            };
            let sample = FrameSample {
                time,
                position: *position,
                resource,
            };
            K::write(
                primitive_at(&mut collection, slot, id),
                graphics,
                sample,
                scratch,
            );
        }
    }

    fn clear(&mut self) {
        self.registry.clear();
        self.unused.clear();
        self.detached = true;
    }
}

/// Reconciles one attribute group of an entity collection into pooled primitives
/// registered with a rendering host.
pub struct PrimitiveVisualizer<K: GraphicsKind> {
    host: SharedHost<K::Primitive>,
    entities: SharedEntityCollection,
    listener: Option<ListenerId>,
    state: Rc<RefCell<VisualizerState<K>>>,
    destroyed: bool,
}

pub struct VisualizerBuilder<K: GraphicsKind> {
    host: Option<SharedHost<K::Primitive>>,
    entities: Option<SharedEntityCollection>,
    config: VisualizerConfig,
}

impl<K: GraphicsKind> Default for VisualizerBuilder<K> {
    fn default() -> Self {
        Self {
            host: None,
            entities: None,
            config: VisualizerConfig::default(),
        }
    }
}

impl<K: GraphicsKind> VisualizerBuilder<K> {
    pub fn host(mut self, host: SharedHost<K::Primitive>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn entities(mut self, entities: SharedEntityCollection) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn config(mut self, config: VisualizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Subscribe to the collection and reconcile every entity already in it.
    pub fn build(self) -> Result<PrimitiveVisualizer<K>, VisualizerError> {
        let host = self
            .host
            .ok_or_else(|| VisualizerError::InvalidArgument("primitive host is required".into()))?;
        let entities = self.entities.ok_or_else(|| {
            VisualizerError::InvalidArgument("entity collection is required".into())
        })?;

        let state = Rc::new(RefCell::new(VisualizerState::<K>::new(self.config)));
        let listener = {
            let mut collection = entities.try_borrow_mut().map_err(|_| {
                VisualizerError::InvalidArgument(
                    "entity collection is borrowed while constructing a visualizer".into(),
                )
            })?;
            state
                .borrow_mut()
                .on_collection_changed(&collection.as_added());
            let weak = Rc::downgrade(&state);
            collection.subscribe(move |change| {
                if let Some(state) = weak.upgrade() {
                    state.borrow_mut().on_collection_changed(change);
                }
            })
        };
        log::debug!(
            "{} visualizer attached with {} tracked entities",
            K::NAME,
            state.borrow().registry.len()
        );

        Ok(PrimitiveVisualizer {
            host,
            entities,
            listener: Some(listener),
            state,
            destroyed: false,
        })
    }
}

impl<K: GraphicsKind> PrimitiveVisualizer<K> {
    pub fn new(
        host: SharedHost<K::Primitive>,
        entities: SharedEntityCollection,
    ) -> Result<Self, VisualizerError> {
        Self::builder().host(host).entities(entities).build()
    }

    pub fn builder() -> VisualizerBuilder<K> {
        VisualizerBuilder::default()
    }

    fn ensure_live(&self) -> Result<(), VisualizerError> {
        if self.destroyed {
            Err(VisualizerError::Destroyed)
        } else {
            Ok(())
        }
    }

    /// Apply one change batch. Normally invoked through the collection
    /// subscription; exposed so callers can drive the visualizer directly.
    pub fn on_collection_changed(
        &mut self,
        change: &CollectionChanged,
    ) -> Result<(), VisualizerError> {
        self.ensure_live()?;
        self.state.borrow_mut().on_collection_changed(change);
        Ok(())
    }

    pub fn update(&mut self, time: SimTime) -> Result<bool, VisualizerError> {
        self.ensure_live()?;
        self.state.borrow_mut().update(time, &self.host);
        Ok(true)
    }

    /// [`update`](Self::update) at a raw seconds value; non-finite times are rejected.
    pub fn update_seconds(&mut self, seconds: f64) -> Result<bool, VisualizerError> {
        let time = SimTime::from_seconds(seconds)?;
        self.update(time)
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) -> Result<(), VisualizerError> {
        self.ensure_live()?;
        self.teardown();
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some(listener) = self.listener.take() {
            match self.entities.try_borrow_mut() {
                Ok(mut collection) => {
                    collection.unsubscribe(listener);
                }
                Err(_) => log::warn!(
                    "entity collection busy while detaching {} visualizer; listener left inert",
                    K::NAME
                ),
            }
        }
        let mut state = self.state.borrow_mut();
        if let Some(collection) = state.primitives.take() {
            match self.host.try_borrow_mut() {
                Ok(mut host) => {
                    host.remove(&collection);
                }
                Err(_) => log::warn!(
                    "primitive host busy while destroying {} visualizer",
                    K::NAME
                ),
            }
        }
        state.clear();
        self.destroyed = true;
        log::debug!("{} visualizer destroyed", K::NAME);
    }

    /// Number of entities currently tracked.
    pub fn registry_len(&self) -> usize {
        self.state.borrow().registry.len()
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.state.borrow().registry.contains_key(id)
    }

    /// Slot assigned to `id`, if it is tracked and currently rendering.
    pub fn slot_for(&self, id: &EntityId) -> Option<usize> {
        self.state
            .borrow()
            .registry
            .get(id)
            .and_then(|entry| entry.slot)
    }

    /// Slots awaiting reuse, most recently returned last.
    pub fn pooled_slots(&self) -> Vec<usize> {
        self.state.borrow().unused.as_slice().to_vec()
    }

    /// The primitive collection, once the first primitive has been needed.
    pub fn primitives(&self) -> Option<SharedPrimitives<K::Primitive>> {
        self.state.borrow().primitives.clone()
    }
}

impl<K: GraphicsKind> Visualizer for PrimitiveVisualizer<K> {
    fn update(&mut self, time: SimTime) -> Result<bool, VisualizerError> {
        PrimitiveVisualizer::update(self, time)
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) -> Result<(), VisualizerError> {
        PrimitiveVisualizer::destroy(self)
    }
}

impl<K: GraphicsKind> Drop for PrimitiveVisualizer<K> {
    fn drop(&mut self) {
        if !self.destroyed {
            self.teardown();
        }
    }
}
