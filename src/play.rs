use glam::Vec2;

use crate::clock::FrameClock;
use crate::config::PlayConfig;
use crate::ecs::systems;
use crate::ecs::systems::catch::{self, CatchEvent};
use crate::effects::{CatchEffect, CatchEffects};
use crate::geometry::Viewport;
use crate::prefs;
use crate::registry::{EntityRegistry, Prey};
use crate::render::instance::{self, EffectInstance, PreyInstance};
use crate::render::RenderSink;
use crate::species::Species;
use crate::stats::CatchCounts;
use crate::timers::TimerQueue;

/// One play screen: the critters, their motion, taps and pending timers.
///
/// Single-threaded and frame driven. The host calls `advance` from whatever
/// frame callback it has, `resize` when the layout changes and `handle_tap`
/// / `tap_at` on input. Nothing here reads a global clock.
pub struct PlayArea {
    config: PlayConfig,
    selected: Vec<Species>,
    registry: EntityRegistry,
    effects: CatchEffects,
    timers: TimerQueue,
    clock: FrameClock,
    speed: f32,
    /// Initial batch placed (happens on the first usable viewport).
    spawned: bool,
    /// Cleared by `teardown`; a torn-down area never ticks again.
    alive: bool,
    session_catches: CatchCounts,
    events: Vec<CatchEvent>,
    instance_buf: Vec<(hecs::Entity, PreyInstance)>,
}

impl PlayArea {
    pub fn new(selected: &[Species], config: PlayConfig, rng: fastrand::Rng) -> Self {
        let mut unique = Vec::with_capacity(selected.len());
        for &s in selected {
            if !unique.contains(&s) {
                unique.push(s);
            }
        }
        let capacity = unique.len() * config.count_per_species;
        Self {
            registry: EntityRegistry::new(config.padding, rng),
            effects: CatchEffects::new(),
            timers: TimerQueue::new(),
            clock: FrameClock::new(config.tick_rate, config.max_accumulator),
            speed: 1.0,
            spawned: false,
            alive: true,
            session_catches: CatchCounts::new(),
            events: Vec::new(),
            instance_buf: Vec::with_capacity(capacity),
            selected: unique,
            config,
        }
    }

    /// Speed multiplier applied to every species' base speed, kept within
    /// the same bounds as the saved preference.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = prefs::clamp_speed(speed);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// New playable bounds. A usable size after none (first layout, or after
    /// collapsing to zero) spawns the initial batch.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height);
        self.registry.set_viewport(viewport);
        log::info!(
            "Play area resized to {}x{} ({:?})",
            viewport.width,
            viewport.height,
            viewport.orientation()
        );

        if !viewport.is_ready() {
            // No layout, no critters: drop the field and anything pending.
            // The next usable size starts a fresh batch.
            if self.spawned {
                self.registry.clear();
                self.timers.clear();
                self.effects.clear();
                self.spawned = false;
                log::info!("Play area collapsed, critters and pending respawns dropped");
            }
            return;
        }

        if self.alive && !self.spawned {
            self.registry
                .spawn_initial(&self.selected, self.config.count_per_species);
            self.spawned = true;
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.registry.viewport()
    }

    /// Ready to simulate: not torn down and laid out.
    pub fn is_active(&self) -> bool {
        self.alive && self.registry.viewport().is_ready()
    }

    /// Feed `dt` seconds of frame time; runs however many fixed ticks fit.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !self.is_active() {
            return 0;
        }
        let due = self.clock.accumulate(dt);
        for _ in 0..due {
            self.step();
        }
        due
    }

    /// Run exactly one fixed tick.
    pub fn step(&mut self) {
        if !self.is_active() {
            return;
        }
        let now = self.clock.advance_tick();
        systems::tick(
            &mut self.registry,
            &mut self.effects,
            &mut self.timers,
            &self.config,
            self.speed,
            now,
        );
    }

    /// Virtual seconds simulated so far.
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Catch the critter `id`. Stale ids (already caught) and taps while the
    /// area is not laid out are a no-op.
    pub fn handle_tap(&mut self, id: hecs::Entity) -> Option<CatchEvent> {
        if !self.is_active() {
            return None;
        }
        let event = catch::resolve(
            &mut self.registry,
            &mut self.effects,
            &mut self.timers,
            &self.config,
            id,
            self.clock.elapsed(),
        )?;
        *self.session_catches.entry(event.species).or_insert(0) += 1;
        self.events.push(event);
        Some(event)
    }

    /// Catch whatever critter is under a raw screen tap, if any.
    pub fn tap_at(&mut self, point: Vec2) -> Option<CatchEvent> {
        let id = self.registry.hit_test(point, self.config.tap_radius)?;
        self.handle_tap(id)
    }

    /// Catch events since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<CatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn entities(&self) -> Vec<Prey> {
        self.registry.all()
    }

    pub fn entity(&self, id: hecs::Entity) -> Option<Prey> {
        self.registry.get(id)
    }

    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    pub fn effects(&self) -> impl Iterator<Item = &CatchEffect> {
        self.effects.iter()
    }

    /// Pending respawns and sparkle expiries.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Per-species catches since this play area opened.
    pub fn session_catches(&self) -> &CatchCounts {
        &self.session_catches
    }

    pub fn catch_count(&self) -> u32 {
        self.session_catches.values().sum()
    }

    /// Push the current frame to a renderer.
    pub fn render(&mut self, sink: &mut impl RenderSink) {
        let alpha = self.clock.interpolation_alpha();
        instance::build_instances(&self.registry.world, alpha, &mut self.instance_buf);
        for (id, inst) in &self.instance_buf {
            sink.render_entity(*id, inst);
        }

        let now = self.clock.elapsed();
        for effect in self.effects.iter() {
            sink.render_effect(&EffectInstance::from_effect(
                effect,
                now,
                self.config.effect_lifetime,
            ));
        }
    }

    /// Leave the play screen: stop ticking, drop critters and timers.
    pub fn teardown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.timers.clear();
        self.effects.clear();
        self.registry.clear();
        log::info!(
            "Play area torn down after {:.1}s ({} ticks, {} catches)",
            self.clock.elapsed(),
            self.clock.tick_count(),
            self.catch_count()
        );
    }
}
