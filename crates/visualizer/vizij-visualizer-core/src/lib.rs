//! Vizij Visualizer Core (engine-agnostic)
//!
//! Keeps a pool of render primitives in sync with an observable entity collection.
//! A visualizer tracks the entities that carry its attribute group, samples their
//! properties once per `update`, and writes the results onto primitives registered
//! with a [`PrimitiveHost`]. Primitives are recycled through a free-slot pool and
//! only released when the visualizer is destroyed.

pub mod billboard;
pub mod config;
pub mod error;
pub mod host;
pub mod kind;
pub mod pool;
pub mod primitive;
pub mod set;
pub mod visualizer;

pub use billboard::{Billboard, BillboardCollection, SharedBillboards};
pub use config::VisualizerConfig;
pub use error::VisualizerError;
pub use host::{PrimitiveHost, Scene, SharedHost};
pub use kind::{BillboardKind, BillboardScratch, FrameSample, GraphicsKind};
pub use pool::SlotPool;
pub use primitive::{CollectionId, Primitive, PrimitiveCollection, SharedPrimitives};
pub use set::VisualizerSet;
pub use visualizer::{BillboardVisualizer, PrimitiveVisualizer, Visualizer, VisualizerBuilder};
