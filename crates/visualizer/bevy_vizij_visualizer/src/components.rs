use bevy::prelude::*;

/// Marks a sprite that mirrors one billboard slot.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct VizijBillboard {
    pub slot: usize,
    /// Id of the entity currently rendered in the slot.
    pub owner: Option<String>,
}
