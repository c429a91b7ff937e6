use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use glam::Vec2;
use instant::Instant;

use pounce::audio::LogPlayer;
use pounce::clock::SystemClock;
use pounce::config::PlayConfig;
use pounce::prefs::PreferencesStore;
use pounce::render::FrameRecorder;
use pounce::stats::StatsTracker;
use pounce::storage::{FileStore, KeyValueStore, MemoryStore};
use pounce::{Game, HostEvent, Species};

/// Where preferences and stats live unless `POUNCE_DATA_DIR` says otherwise.
const DEFAULT_DATA_DIR: &str = "pounce-data";
/// Session length unless `POUNCE_SECONDS` says otherwise.
const DEFAULT_SESSION_SECONDS: f64 = 10.0;
/// Critters played with unless `POUNCE_SPECIES` says otherwise.
const DEFAULT_SPECIES: &str = "fish,mouse,butterfly";
/// Simulated screen (a landscape tablet).
const SCREEN_W: f32 = 1280.0;
const SCREEN_H: f32 = 800.0;
/// Target frame pacing for the headless loop.
const FRAME_TIME: Duration = Duration::from_millis(16);
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;
/// Chance per frame that the simulated pet swipes at the screen.
const PAW_CHANCE: f32 = 0.04;
/// How far a paw lands from the critter it aims at (pixels).
const PAW_SPREAD: f32 = 90.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64, critters: usize) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | critters: {} | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                critters,
                self.frame_count,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// Host settings
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "pounce")]
#[command(about = "Headless prey toy session: critters roam, a simulated paw swipes at them")]
struct HostArgs {
    /// Directory holding the preferences and stats blobs.
    #[arg(long, env = "POUNCE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    /// Session length in seconds.
    #[arg(
        long,
        env = "POUNCE_SECONDS",
        default_value_t = DEFAULT_SESSION_SECONDS,
        value_parser = parse_seconds
    )]
    seconds: f64,
    /// Comma separated critters, e.g. `fish,mouse,butterfly`.
    #[arg(
        long,
        env = "POUNCE_SPECIES",
        value_delimiter = ',',
        default_value = DEFAULT_SPECIES,
        value_parser = parse_species
    )]
    species: Vec<Species>,
}

fn parse_seconds(raw: &str) -> Result<f64, String> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number of seconds"))?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("session length must be positive, got {raw}"));
    }
    Ok(seconds)
}

fn parse_species(raw: &str) -> Result<Species, String> {
    Species::from_label(raw).ok_or_else(|| {
        let known: Vec<&str> = Species::ALL.iter().map(|s| s.label()).collect();
        format!("unknown species `{raw}` (expected one of {})", known.join(", "))
    })
}

/// Storage falls back to memory when the data dir can't be used.
fn open_store(dir: &Path) -> Box<dyn KeyValueStore> {
    match FileStore::new(dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Storage unavailable, progress won't be saved: {e:#}");
            Box::new(MemoryStore::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Headless session
// ---------------------------------------------------------------------------

/// Entry point: play one session with a simulated pet, then report stats.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = HostArgs::parse();
    let store = open_store(&settings.data_dir);
    let prefs = PreferencesStore::load(&*store);
    let stats = StatsTracker::load(&*store, SystemClock);

    let mut game = Game::new(stats, LogPlayer);
    let mut paw_rng = fastrand::Rng::new();
    let mut frame_stats = FrameStats::new();
    let mut frame = FrameRecorder::default();

    let names: Vec<&str> = settings.species.iter().map(|s| s.label()).collect();
    log::info!(
        "Playing {:.0}s with {} (speed {:.1}x, sound {})",
        settings.seconds,
        names.join(", "),
        prefs.get().speed,
        if prefs.get().sound_enabled { "on" } else { "off" }
    );

    game.start(
        &settings.species,
        prefs.get(),
        PlayConfig::default(),
        fastrand::Rng::new(),
    );
    game.resize(SCREEN_W, SCREEN_H);

    let started = Instant::now();
    let mut last_frame_time = Instant::now();
    while started.elapsed().as_secs_f64() < settings.seconds {
        std::thread::sleep(FRAME_TIME);

        // --- Timing ---
        let now = Instant::now();
        let dt = now.duration_since(last_frame_time).as_secs_f64();
        last_frame_time = now;
        game.advance(dt);

        // --- Pet input ---
        if paw_rng.f32() < PAW_CHANCE {
            swipe(&mut game, &mut paw_rng);
        }

        // --- Render ---
        if let Some(play) = game.play_mut() {
            frame.clear();
            play.render(&mut frame);
            frame_stats.record_frame(dt, frame.entities.len());
        }

        for event in game.drain_events() {
            if let HostEvent::Catch(species) = event {
                log::info!("Caught a {}!", species.label());
            }
        }
    }

    if let Some(session) = game.end() {
        log::info!(
            "Session over: {}s, {} catches",
            session.duration_seconds,
            session.total_catches
        );
    }

    let tracker = game.stats();
    let totals = tracker.stats();
    log::info!(
        "All time: {} catches, {}s played, streak {} (best {}), favorite {}",
        totals.total_catches,
        totals.total_play_time_seconds,
        totals.current_streak,
        totals.longest_streak,
        tracker
            .favorite_species()
            .map_or("none yet", |s| s.label())
    );
    log::info!(
        "Sessions today: {}, this week: {}",
        tracker.sessions_today().len(),
        tracker.recent_sessions(7).len()
    );
    Ok(())
}

/// A paw lands somewhere near a random critter; it may or may not connect.
fn swipe<S, C, P>(game: &mut Game<S, C, P>, rng: &mut fastrand::Rng)
where
    S: KeyValueStore,
    C: pounce::clock::Clock,
    P: pounce::audio::SoundPlayer,
{
    let Some(play) = game.play() else {
        return;
    };
    let critters = play.entities();
    if critters.is_empty() {
        return;
    }
    let aim = critters[rng.usize(0..critters.len())].position;
    let miss = Vec2::new(rng.f32() - 0.5, rng.f32() - 0.5) * PAW_SPREAD * 2.0;
    if game.tap_at(aim + miss).is_none() {
        log::debug!("Swipe missed at ({:.0}, {:.0})", aim.x + miss.x, aim.y + miss.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let args = HostArgs::try_parse_from(["pounce"]).unwrap();
        assert_eq!(args.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(args.seconds, DEFAULT_SESSION_SECONDS);
        assert_eq!(
            args.species,
            vec![Species::Fish, Species::Mouse, Species::Butterfly]
        );
    }

    #[test]
    fn species_list_is_comma_separated() {
        let args = HostArgs::try_parse_from(["pounce", "--species", "gecko,Fly"]).unwrap();
        assert_eq!(args.species, vec![Species::Gecko, Species::Fly]);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(HostArgs::try_parse_from(["pounce", "--seconds", "abc"]).is_err());
        assert!(HostArgs::try_parse_from(["pounce", "--seconds=-5"]).is_err());
        assert!(HostArgs::try_parse_from(["pounce", "--seconds", "0"]).is_err());
        assert!(HostArgs::try_parse_from(["pounce", "--species", "fish,dragon"]).is_err());
    }
}
