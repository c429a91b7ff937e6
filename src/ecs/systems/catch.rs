use glam::Vec2;

use crate::config::PlayConfig;
use crate::effects::CatchEffects;
use crate::registry::EntityRegistry;
use crate::species::Species;
use crate::timers::{TimedAction, TimerQueue};

/// A critter was tapped and caught.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchEvent {
    /// Retired id of the caught critter.
    pub id: hecs::Entity,
    pub species: Species,
    /// Last known position, where the sparkle is drawn.
    pub position: Vec2,
}

/// Resolve a tap on `id` at virtual time `now`.
///
/// Removes the critter immediately, drops a sparkle at its last position and
/// schedules both the sparkle's expiry and a same-species replacement.
/// Tapping an id that is already gone yields `None` and changes nothing.
pub fn resolve(
    registry: &mut EntityRegistry,
    effects: &mut CatchEffects,
    timers: &mut TimerQueue,
    config: &PlayConfig,
    id: hecs::Entity,
    now: f64,
) -> Option<CatchEvent> {
    let prey = registry.get(id)?;
    if !registry.remove(id) {
        return None;
    }

    let effect = effects.spawn(prey.position, now);
    timers.schedule(now + config.effect_lifetime, TimedAction::ExpireEffect(effect));
    timers.schedule(now + config.respawn_delay, TimedAction::Respawn(prey.species));

    log::debug!(
        "Caught {} at ({:.0}, {:.0})",
        prey.species.label(),
        prey.position.x,
        prey.position.y
    );

    Some(CatchEvent {
        id,
        species: prey.species,
        position: prey.position,
    })
}

/// Apply every timer that has come due: respawns and sparkle expiry.
pub fn fire_due(
    registry: &mut EntityRegistry,
    effects: &mut CatchEffects,
    timers: &mut TimerQueue,
    now: f64,
) {
    for action in timers.drain_due(now) {
        match action {
            TimedAction::Respawn(species) => {
                if registry.respawn(species).is_none() {
                    log::debug!("Dropped {} respawn: viewport not ready", species.label());
                }
            }
            TimedAction::ExpireEffect(id) => effects.expire(id),
        }
    }
}
