use glam::Vec2;

use crate::audio::SoundPlayer;
use crate::clock::Clock;
use crate::config::PlayConfig;
use crate::ecs::systems::catch::CatchEvent;
use crate::play::PlayArea;
use crate::prefs::Preferences;
use crate::species::Species;
use crate::stats::{PlaySession, SessionToken, StatsTracker};
use crate::storage::KeyValueStore;

/// What the engine reports up to the host UI.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    SessionStarted,
    Catch(Species),
    SessionEnded(PlaySession),
}

/// The play screen wired to stats and sound.
///
/// Catches from the play area are forwarded to the stats tracker (all-time
/// totals move immediately) and to the sound player; the session record is
/// written when the screen closes.
pub struct Game<S: KeyValueStore, C: Clock, P: SoundPlayer> {
    stats: StatsTracker<S, C>,
    sound: P,
    sound_enabled: bool,
    play: Option<PlayArea>,
    token: Option<SessionToken>,
    events: Vec<HostEvent>,
}

impl<S: KeyValueStore, C: Clock, P: SoundPlayer> Game<S, C, P> {
    pub fn new(stats: StatsTracker<S, C>, sound: P) -> Self {
        Self {
            stats,
            sound,
            sound_enabled: true,
            play: None,
            token: None,
            events: Vec::new(),
        }
    }

    /// Open a play screen with the chosen critters. Ends any running session first.
    pub fn start(
        &mut self,
        selected: &[Species],
        prefs: &Preferences,
        config: PlayConfig,
        rng: fastrand::Rng,
    ) {
        if self.play.is_some() {
            self.end();
        }
        let mut play = PlayArea::new(selected, config, rng);
        play.set_speed(prefs.speed);
        self.sound_enabled = prefs.sound_enabled;
        self.play = Some(play);
        self.token = Some(self.stats.start_session());
        self.events.push(HostEvent::SessionStarted);
    }

    /// Settings changed mid-session.
    pub fn apply_preferences(&mut self, prefs: &Preferences) {
        self.sound_enabled = prefs.sound_enabled;
        if let Some(play) = &mut self.play {
            play.set_speed(prefs.speed);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(play) = &mut self.play {
            play.resize(width, height);
        }
    }

    pub fn advance(&mut self, dt: f64) -> u32 {
        self.play.as_mut().map_or(0, |play| play.advance(dt))
    }

    pub fn tap(&mut self, id: hecs::Entity) -> Option<CatchEvent> {
        let event = self.play.as_mut()?.handle_tap(id)?;
        self.on_catch(&event);
        Some(event)
    }

    pub fn tap_at(&mut self, point: Vec2) -> Option<CatchEvent> {
        let event = self.play.as_mut()?.tap_at(point)?;
        self.on_catch(&event);
        Some(event)
    }

    fn on_catch(&mut self, event: &CatchEvent) {
        self.stats.record_catch(event.species);
        if self.sound_enabled {
            self.sound.play_species_sound(event.species);
            self.sound.play_catch_chime();
        }
        self.events.push(HostEvent::Catch(event.species));
    }

    /// Close the play screen and record the session.
    pub fn end(&mut self) -> Option<PlaySession> {
        let mut play = self.play.take()?;
        play.teardown();
        let token = self.token.take()?;
        let session = self.stats.end_session(token, play.session_catches());
        self.events.push(HostEvent::SessionEnded(session.clone()));
        Some(session)
    }

    pub fn play(&self) -> Option<&PlayArea> {
        self.play.as_ref()
    }

    pub fn play_mut(&mut self) -> Option<&mut PlayArea> {
        self.play.as_mut()
    }

    pub fn stats(&self) -> &StatsTracker<S, C> {
        &self.stats
    }

    pub fn sound(&self) -> &P {
        &self.sound
    }

    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.events)
    }
}
