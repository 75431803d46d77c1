use std::cell::RefCell;
use std::rc::Rc;

use bevy::prelude::*;
use hashbrown::HashMap;
use vizij_entity_core::{
    parse_document, Entity as SimEntity, EntityCollection, EntityError, EntityRef,
    SharedEntityCollection, SimTime,
};
use vizij_visualizer_core::{
    Billboard, BillboardVisualizer, CollectionId, Scene, SharedHost, VisualizerConfig,
    VisualizerError, VisualizerSet,
};

/// Start time and rate of the simulation clock.
#[derive(Clone, Debug, PartialEq)]
pub struct ClockSettings {
    pub start: SimTime,
    /// Simulation seconds per wall-clock second.
    pub multiplier: f64,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            start: SimTime::ZERO,
            multiplier: 1.0,
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationClock {
    pub current: SimTime,
    pub multiplier: f64,
    pub paused: bool,
}

impl From<&ClockSettings> for SimulationClock {
    fn from(settings: &ClockSettings) -> Self {
        Self {
            current: settings.start,
            multiplier: settings.multiplier,
            paused: false,
        }
    }
}

/// Result of the last visualizer pass.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct VisualizerFrame {
    pub frames: u64,
    pub complete: bool,
}

/// Sprite spawned for each (primitive collection, slot). Entries of collections
/// no longer registered with the scene are despawned on the next sync.
#[derive(Resource, Default, Debug)]
pub struct BillboardSprites {
    pub map: HashMap<(CollectionId, usize), Entity>,
}

/// Entity collection, scene and visualizers. Holds `Rc` handles, so it lives as
/// a non-send resource on the main thread.
pub struct VisualizerWorld {
    entities: SharedEntityCollection,
    scene: Rc<RefCell<Scene>>,
    visualizers: VisualizerSet,
}

impl VisualizerWorld {
    /// Empty collection with a billboard visualizer attached.
    pub fn new(config: VisualizerConfig) -> Result<Self, VisualizerError> {
        let entities = EntityCollection::new().into_shared();
        let scene = Scene::new().into_shared();
        let host: SharedHost<Billboard> = scene.clone();
        let billboards = BillboardVisualizer::builder()
            .host(host)
            .entities(entities.clone())
            .config(config)
            .build()?;
        let mut visualizers = VisualizerSet::new();
        visualizers.push(billboards);
        Ok(Self {
            entities,
            scene,
            visualizers,
        })
    }

    pub fn entities(&self) -> &SharedEntityCollection {
        &self.entities
    }

    pub fn scene(&self) -> &Rc<RefCell<Scene>> {
        &self.scene
    }

    pub fn visualizers_mut(&mut self) -> &mut VisualizerSet {
        &mut self.visualizers
    }

    pub fn add_entity(&self, entity: SimEntity) -> Result<EntityRef, EntityError> {
        self.entities.borrow_mut().add(entity)
    }

    /// Parse a scene document and add its entities as one batch.
    pub fn load_document(&self, json: &str) -> Result<Vec<EntityRef>, EntityError> {
        let document = parse_document(json)?;
        document.load_into(&mut self.entities.borrow_mut())
    }
}
