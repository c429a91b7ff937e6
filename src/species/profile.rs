use super::Species;

/// Locomotion personality of a species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesProfile {
    /// Pixels moved per tick at speed multiplier 1.0.
    pub base_speed: f32,
    /// Peak lateral offset of the gait, in pixels per tick.
    pub wobble_amplitude: f32,
    /// Angular rate of the gait oscillation (radians per second).
    pub wobble_rate: f32,
}

impl SpeciesProfile {
    /// Lateral gait offset at `elapsed` seconds into the session.
    pub fn wobble(&self, elapsed: f64) -> f32 {
        ((elapsed * self.wobble_rate as f64).sin() as f32) * self.wobble_amplitude
    }
}

pub(super) fn default_profile(species: Species) -> SpeciesProfile {
    // (speed, amplitude, rate). Rate 5.0 ~ one radian every 200ms.
    let (base_speed, wobble_amplitude, wobble_rate) = match species {
        Species::Fish => (1.5, 1.0, 3.0),
        Species::Mouse => (3.0, 0.8, 10.0),
        Species::Butterfly => (2.0, 2.0, 5.0),
        Species::Laser => (5.0, 4.0, 20.0),
        Species::Ladybug => (1.8, 0.6, 4.0),
        Species::Bird => (2.5, 1.5, 6.5),
        Species::Spider => (2.2, 0.5, 2.5),
        Species::Fly => (3.5, 3.0, 25.0),
        Species::Gecko => (2.0, 1.0, 5.5),
    };
    SpeciesProfile {
        base_speed,
        wobble_amplitude,
        wobble_rate,
    }
}
