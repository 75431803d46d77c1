//! Bevy integration for Vizij visualizers.
//!
//! The plugin owns an entity collection with a billboard visualizer attached,
//! advances a simulation clock every frame, runs the visualizers and mirrors each
//! billboard slot into a sprite.

use bevy::prelude::*;
use vizij_visualizer_core::VisualizerConfig;

pub mod components;
pub mod resources;
pub mod systems;

pub use components::VizijBillboard;
pub use resources::{
    BillboardSprites, ClockSettings, SimulationClock, VisualizerFrame, VisualizerWorld,
};

#[derive(Default)]
pub struct VizijVisualizerPlugin {
    pub clock: ClockSettings,
    pub config: VisualizerConfig,
}

impl Plugin for VizijVisualizerPlugin {
    fn build(&self, app: &mut App) {
        match VisualizerWorld::new(self.config.clone()) {
            Ok(world) => {
                app.insert_non_send_resource(world);
            }
            Err(err) => {
                error!("failed to create visualizer world: {err}");
                return;
            }
        }
        app.insert_resource(SimulationClock::from(&self.clock))
            .insert_resource(VisualizerFrame::default())
            .insert_resource(BillboardSprites::default())
            .add_systems(
                Update,
                (
                    systems::advance_clock_system,
                    systems::update_visualizers_system,
                    systems::sync_billboard_sprites_system,
                )
                    .chain(),
            );
    }
}
