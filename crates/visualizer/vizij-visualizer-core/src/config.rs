//! Visualizer configuration.

use serde::{Deserialize, Serialize};

/// Sizing hints for visualizer-owned storage.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// Initial capacity of the entity registry.
    pub registry_capacity: usize,
    /// Initial capacity of the unused-slot pool.
    pub pool_capacity: usize,
    /// Initial capacity of the primitive arena, reserved when it is first created.
    pub primitive_capacity: usize,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            registry_capacity: 64,
            pool_capacity: 16,
            primitive_capacity: 64,
        }
    }
}
