use crate::species::Species;

/// Fire-and-forget sound output. Implementations swallow their own failures.
pub trait SoundPlayer {
    /// The critter's own cry (blub, squeak, flutter...).
    fn play_species_sound(&mut self, species: Species);

    /// Reward chime on every catch.
    fn play_catch_chime(&mut self);
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play_species_sound(&mut self, _species: Species) {}

    fn play_catch_chime(&mut self) {}
}

/// Writes each sound request to the log; used by the headless host.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPlayer;

impl SoundPlayer for LogPlayer {
    fn play_species_sound(&mut self, species: Species) {
        log::debug!("♪ {}", species.label());
    }

    fn play_catch_chime(&mut self) {
        log::debug!("♪ chime");
    }
}
