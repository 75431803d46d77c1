//! Entities: identified bags of optional, independently time-sampled attributes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::graphics::{BillboardGraphics, BoxedProperty};
use crate::property::Property;
use crate::time::{SimTime, TimeIntervalCollection};
use crate::value::Cartesian3;

/// Stable entity key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random (v4 UUID) id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Shared handle owned by an [`EntityCollection`](crate::collection::EntityCollection).
pub type EntityRef = Rc<RefCell<Entity>>;
/// Non-owning handle held by visualizers.
pub type WeakEntityRef = Weak<RefCell<Entity>>;

#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    pub name: Option<String>,
    /// Times at which the entity exists; `None` means always.
    pub availability: Option<TimeIntervalCollection>,
    pub position: Option<BoxedProperty<Cartesian3>>,
    pub billboard: Option<BillboardGraphics>,
}

impl Entity {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            availability: None,
            position: None,
            billboard: None,
        }
    }

    /// Entity with a generated id.
    pub fn anonymous() -> Self {
        Self::new(EntityId::generate())
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_availability(mut self, availability: TimeIntervalCollection) -> Self {
        self.availability = Some(availability);
        self
    }

    pub fn with_position(mut self, position: impl Property<Cartesian3> + 'static) -> Self {
        self.position = Some(Box::new(position));
        self
    }

    pub fn with_billboard(mut self, billboard: BillboardGraphics) -> Self {
        self.billboard = Some(billboard);
        self
    }

    pub fn is_available(&self, time: SimTime) -> bool {
        self.availability
            .as_ref()
            .map_or(true, |intervals| intervals.contains(time))
    }

    pub fn into_ref(self) -> EntityRef {
        Rc::new(RefCell::new(self))
    }
}
