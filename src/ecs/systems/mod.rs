pub mod catch;
pub mod movement;

use crate::config::PlayConfig;
use crate::effects::CatchEffects;
use crate::registry::EntityRegistry;
use crate::timers::TimerQueue;

/// Run all simulation systems for one fixed tick at virtual time `now`.
pub fn tick(
    registry: &mut EntityRegistry,
    effects: &mut CatchEffects,
    timers: &mut TimerQueue,
    config: &PlayConfig,
    speed_multiplier: f32,
    now: f64,
) {
    // 1. Delayed respawns + sparkle expiry
    catch::fire_due(registry, effects, timers, now);

    // 2. Seek / wobble / clamp
    let viewport = registry.viewport();
    movement::integrate(
        &mut registry.world,
        viewport,
        config,
        speed_multiplier,
        now,
        &mut registry.rng,
    );
}
