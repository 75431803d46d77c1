//! Groups of visualizers updated together.

use vizij_entity_core::SimTime;

use crate::error::VisualizerError;
use crate::visualizer::Visualizer;

/// Owns several visualizers and drives them as one.
#[derive(Default)]
pub struct VisualizerSet {
    visualizers: Vec<Box<dyn Visualizer>>,
}

impl VisualizerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, visualizer: impl Visualizer + 'static) {
        self.visualizers.push(Box::new(visualizer));
    }

    pub fn len(&self) -> usize {
        self.visualizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visualizers.is_empty()
    }

    /// Update every member; the frame is complete only when all of them report so.
    /// Every member is updated even after one reports an incomplete frame.
    pub fn update(&mut self, time: SimTime) -> Result<bool, VisualizerError> {
        let mut complete = true;
        for visualizer in &mut self.visualizers {
            complete &= visualizer.update(time)?;
        }
        Ok(complete)
    }

    /// Destroy and drop every member.
    pub fn destroy(&mut self) -> Result<(), VisualizerError> {
        for mut visualizer in self.visualizers.drain(..) {
            if !visualizer.is_destroyed() {
                visualizer.destroy()?;
            }
        }
        Ok(())
    }
}
