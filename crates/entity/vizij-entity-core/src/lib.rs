//! Vizij Entity Core (engine-agnostic)
//!
//! Entities are identified bags of optional, independently time-sampled attributes.
//! This crate defines the time model, value types, the sampled-property contract
//! and its implementations, the billboard attribute group, and an observable
//! entity collection that reports mutations as disjoint added/removed/changed batches.

pub mod collection;
pub mod document;
pub mod entity;
pub mod error;
pub mod event;
pub mod graphics;
pub mod interp;
pub mod property;
pub mod sampled;
pub mod time;
pub mod value;

pub use collection::{CollectionChanged, EntityCollection, SharedEntityCollection};
pub use document::{parse_document, SceneDocument};
pub use entity::{Entity, EntityId, EntityRef, WeakEntityRef};
pub use error::EntityError;
pub use event::{Event, ListenerId};
pub use graphics::{BillboardGraphics, BoxedProperty};
pub use interp::Interpolate;
pub use property::{
    value_or_default, value_or_default_into, value_or_undefined, value_or_undefined_into,
    CallbackProperty, ConstantProperty, Property, TimeIntervalCollectionProperty,
};
pub use sampled::{ExtrapolationType, InterpolationAlgorithm, SampledProperty};
pub use time::{SimTime, TimeInterval, TimeIntervalCollection};
pub use value::{
    Cartesian2, Cartesian3, Color, HorizontalOrigin, ImageHandle, NearFarScalar, VerticalOrigin,
};
