//! Sky changes.

use rewind_core::{Operation, OperationResult};

use crate::scene::Scene;
use crate::sky::SkySettings;

/// Replaces the scene's sky settings.
#[derive(Debug)]
pub struct SetSky {
    old: SkySettings,
    new: SkySettings,
}

impl SetSky {
    pub fn apply(scene: &mut Scene, sky: SkySettings) -> Self {
        let old = scene.set_sky(sky);
        Self { old, new: sky }
    }
}

impl Operation<Scene> for SetSky {
    fn undo(&mut self, scene: &mut Scene) -> OperationResult {
        scene.set_sky(self.old);
        Ok(())
    }

    fn redo(&mut self, scene: &mut Scene) -> OperationResult {
        scene.set_sky(self.new);
        Ok(())
    }

    fn label(&self) -> &str {
        "Change sky"
    }
}
