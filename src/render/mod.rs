pub mod instance;

use instance::{EffectInstance, PreyInstance};

/// Whatever draws the play area: a GPU pipeline, a canvas, a test recorder.
///
/// The engine hands over plain instance data once per frame; taps come back
/// through `PlayArea::handle_tap` / `PlayArea::tap_at` rather than callbacks.
pub trait RenderSink {
    fn render_entity(&mut self, id: hecs::Entity, instance: &PreyInstance);

    fn render_effect(&mut self, effect: &EffectInstance);
}

/// Keeps the latest frame in memory (tests, headless hosts).
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub entities: Vec<(hecs::Entity, PreyInstance)>,
    pub effects: Vec<EffectInstance>,
}

impl FrameRecorder {
    pub fn clear(&mut self) {
        self.entities.clear();
        self.effects.clear();
    }
}

impl RenderSink for FrameRecorder {
    fn render_entity(&mut self, id: hecs::Entity, instance: &PreyInstance) {
        self.entities.push((id, *instance));
    }

    fn render_effect(&mut self, effect: &EffectInstance) {
        self.effects.push(*effect);
    }
}
