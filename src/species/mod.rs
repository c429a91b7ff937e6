pub mod profile;

use serde::{Deserialize, Serialize};

pub use profile::SpeciesProfile;

/// Every kind of critter that can roam the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Species {
    Fish,
    Mouse,
    Butterfly,
    Laser,
    Ladybug,
    Bird,
    Spider,
    Fly,
    Gecko,
}

impl Species {
    pub const ALL: [Species; 9] = [
        Self::Fish,
        Self::Mouse,
        Self::Butterfly,
        Self::Laser,
        Self::Ladybug,
        Self::Bird,
        Self::Spider,
        Self::Fly,
        Self::Gecko,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Fish => "fish",
            Self::Mouse => "mouse",
            Self::Butterfly => "butterfly",
            Self::Laser => "laser",
            Self::Ladybug => "ladybug",
            Self::Bird => "bird",
            Self::Spider => "spider",
            Self::Fly => "fly",
            Self::Gecko => "gecko",
        }
    }

    /// Parse a lowercase label (as used in the persisted blobs and env vars).
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Default locomotion profile (speed + gait).
    pub fn profile(self) -> SpeciesProfile {
        profile::default_profile(self)
    }

    /// Side-view sprites mirror horizontally when heading left.
    /// Top-down sprites (bugs, gecko) rotate to the heading instead.
    pub fn mirrors(self) -> bool {
        matches!(
            self,
            Self::Fish | Self::Mouse | Self::Bird | Self::Butterfly | Self::Laser
        )
    }

    /// Colors a freshly spawned critter can be drawn in. Empty = fixed look.
    pub fn palette(self) -> &'static [[u8; 3]] {
        match self {
            Self::Fish => &[
                [255, 123, 84],  // coral
                [255, 178, 107], // apricot
                [255, 107, 107], // salmon
                [78, 205, 196],  // teal
                [69, 183, 209],  // sky
            ],
            Self::Butterfly => &[
                [255, 217, 61],  // sunflower
                [255, 107, 157], // pink
                [196, 78, 255],  // violet
                [78, 205, 196],  // teal
                [255, 140, 66],  // tangerine
            ],
            Self::Bird => &[
                [93, 173, 226],  // blue jay
                [231, 76, 60],   // cardinal
                [244, 208, 63],  // canary
                [46, 204, 113],  // parakeet
            ],
            Self::Gecko => &[
                [93, 190, 93],   // leaf
                [241, 196, 15],  // banded yellow
                [230, 126, 34],  // tangerine
            ],
            Self::Mouse | Self::Laser | Self::Ladybug | Self::Spider | Self::Fly => &[],
        }
    }

    /// Sample a color from the palette, packed as RGBA u32.
    pub fn random_color(self, rng: &mut fastrand::Rng) -> Option<u32> {
        let palette = self.palette();
        if palette.is_empty() {
            return None;
        }
        let [r, g, b] = palette[rng.usize(0..palette.len())];
        Some((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | 0xFF)
    }
}
