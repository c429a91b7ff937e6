use serde::{Deserialize, Serialize};

use crate::storage::{self, KeyValueStore};

/// Storage key of the preferences blob.
pub const PREFERENCES_KEY: &str = "kitten-play-preferences";
/// Slowest allowed speed multiplier.
pub const MIN_SPEED: f32 = 0.3;
/// Fastest allowed speed multiplier.
pub const MAX_SPEED: f32 = 2.0;

/// Play area backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Water,
    Grass,
    Floor,
    /// Solid `custom_color`.
    Custom,
}

/// User settings that survive restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub speed: f32,
    pub background: Background,
    /// `#rrggbb`.
    pub custom_color: String,
    pub sound_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            speed: 1.0,
            background: Background::Water,
            custom_color: "#1e3a5f".to_string(),
            sound_enabled: true,
        }
    }
}

impl Preferences {
    /// Pull out-of-range values back to something playable.
    fn sanitize(mut self) -> Self {
        self.speed = clamp_speed(self.speed);
        if parse_hex_color(&self.custom_color).is_none() {
            self.custom_color = Self::default().custom_color;
        }
        self
    }
}

/// Speed multiplier pulled into `[MIN_SPEED, MAX_SPEED]`; non-finite input resets to 1.0.
pub(crate) fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        1.0
    }
}

/// Parse `#rrggbb` into RGBA packed as u32 (opaque).
pub fn parse_hex_color(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(digits, 16).ok()?;
    Some(rgb << 8 | 0xFF)
}

/// Preferences plus the store they are written back to on every change.
pub struct PreferencesStore<S: KeyValueStore> {
    store: S,
    prefs: Preferences,
}

impl<S: KeyValueStore> PreferencesStore<S> {
    /// Read the stored blob; unreadable data falls back to defaults.
    pub fn load(store: S) -> Self {
        let prefs = storage::load_blob::<Preferences, _>(&store, PREFERENCES_KEY).sanitize();
        Self { store, prefs }
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.prefs.speed = clamp_speed(speed);
        self.persist();
    }

    pub fn set_background(&mut self, background: Background) {
        self.prefs.background = background;
        self.persist();
    }

    /// Rejects anything that isn't `#rrggbb`.
    pub fn set_custom_color(&mut self, hex: &str) -> bool {
        if parse_hex_color(hex).is_none() {
            return false;
        }
        self.prefs.custom_color = hex.to_ascii_lowercase();
        self.persist();
        true
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.prefs.sound_enabled = enabled;
        self.persist();
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.set_sound_enabled(!self.prefs.sound_enabled);
        self.prefs.sound_enabled
    }

    /// Back to factory defaults.
    pub fn reset(&mut self) {
        self.prefs = Preferences::default();
        self.persist();
    }

    fn persist(&self) {
        storage::save_blob(&self.store, PREFERENCES_KEY, &self.prefs);
    }
}
