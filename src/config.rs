use crate::species::{Species, SpeciesProfile};

/// Critters spawned per selected species when a session starts.
pub const DEFAULT_COUNT_PER_SPECIES: usize = 3;
/// Keep-out margin so critters never wander under UI chrome.
pub const BOUNDARY_PADDING: f32 = 60.0;
/// Distance at which a critter has "arrived" and picks a new target.
pub const ARRIVAL_THRESHOLD: f32 = 20.0;
/// Delay before a caught critter's replacement appears (seconds).
pub const RESPAWN_DELAY: f64 = 0.8;
/// Lifetime of the sparkle shown where a critter was caught (seconds).
pub const CATCH_EFFECT_LIFETIME: f64 = 0.5;
/// Radius used to map a raw screen tap onto the nearest critter.
pub const TAP_RADIUS: f32 = 60.0;
/// Simulation tick rate (seconds per tick).
pub const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated frame time before clamping (prevents spiral of death).
pub const MAX_ACCUMULATOR: f64 = 0.25;

/// Engine tunables for one play area.
#[derive(Debug, Clone)]
pub struct PlayConfig {
    pub count_per_species: usize,
    pub padding: f32,
    pub arrival_threshold: f32,
    pub respawn_delay: f64,
    pub effect_lifetime: f64,
    pub tap_radius: f32,
    pub tick_rate: f64,
    pub max_accumulator: f64,
    /// Locomotion profile per species, indexed by `Species as usize`.
    pub profiles: [SpeciesProfile; 9],
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            count_per_species: DEFAULT_COUNT_PER_SPECIES,
            padding: BOUNDARY_PADDING,
            arrival_threshold: ARRIVAL_THRESHOLD,
            respawn_delay: RESPAWN_DELAY,
            effect_lifetime: CATCH_EFFECT_LIFETIME,
            tap_radius: TAP_RADIUS,
            tick_rate: TICK_RATE,
            max_accumulator: MAX_ACCUMULATOR,
            profiles: Species::ALL.map(Species::profile),
        }
    }
}

impl PlayConfig {
    pub fn profile(&self, species: Species) -> &SpeciesProfile {
        &self.profiles[species as usize]
    }

    /// Override one species' base speed, keeping its gait.
    pub fn with_base_speed(mut self, species: Species, base_speed: f32) -> Self {
        self.profiles[species as usize].base_speed = base_speed.max(0.0);
        self
    }
}
