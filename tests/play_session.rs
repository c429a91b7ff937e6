use chrono::{Duration, TimeZone, Utc};
use glam::Vec2;

use pounce::audio::SilentPlayer;
use pounce::clock::FixedClock;
use pounce::config::{PlayConfig, BOUNDARY_PADDING, RESPAWN_DELAY};
use pounce::prefs::{Background, Preferences, PreferencesStore};
use pounce::render::FrameRecorder;
use pounce::stats::{StatsTracker, MAX_SESSIONS};
use pounce::storage::{FileStore, MemoryStore};
use pounce::{Game, HostEvent, PlayArea, Species};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 18, 0, 0).unwrap())
}

/// Drive the area with 30 fps frames for `seconds`.
fn run_for(play: &mut PlayArea, seconds: f64) {
    let frames = (seconds * 30.0).ceil() as u32;
    for _ in 0..frames {
        play.advance(1.0 / 30.0);
    }
}

fn in_bounds(p: Vec2, w: f32, h: f32) -> bool {
    p.x >= BOUNDARY_PADDING
        && p.x <= w - BOUNDARY_PADDING
        && p.y >= BOUNDARY_PADDING
        && p.y <= h - BOUNDARY_PADDING
}

#[test]
fn three_fish_caught_in_one_session() {
    let store = MemoryStore::new();
    let clock = clock();
    let mut game = Game::new(StatsTracker::load(&store, &clock), SilentPlayer);
    game.start(
        &[Species::Fish],
        &Preferences::default(),
        PlayConfig::default(),
        fastrand::Rng::with_seed(11),
    );
    game.resize(1024.0, 768.0);

    for _ in 0..3 {
        let id = game.play().unwrap().entities()[0].id;
        assert!(game.tap(id).is_some());
    }
    clock.advance(Duration::seconds(90));
    let session = game.end().unwrap();

    assert_eq!(session.total_catches, 3);
    assert_eq!(session.catches_by_species.get(&Species::Fish), Some(&3));
    assert_eq!(session.duration_seconds, 90);

    let stats = game.stats().stats();
    assert_eq!(stats.catches_by_species[&Species::Fish], 3);
    assert_eq!(stats.total_catches, 3);
    assert_eq!(stats.total_play_time_seconds, 90);
    assert_eq!(game.stats().favorite_species(), Some(Species::Fish));

    let events = game.drain_events();
    assert_eq!(events.first(), Some(&HostEvent::SessionStarted));
    assert_eq!(
        events.iter().filter(|e| **e == HostEvent::Catch(Species::Fish)).count(),
        3
    );
    assert!(matches!(events.last(), Some(HostEvent::SessionEnded(s)) if s.total_catches == 3));
}

#[test]
fn tapped_critter_comes_back_after_delay() {
    let mut play = PlayArea::new(
        &[Species::Mouse, Species::Ladybug],
        PlayConfig::default(),
        fastrand::Rng::with_seed(5),
    );
    play.resize(900.0, 700.0);
    assert_eq!(play.entity_count(), 6);

    let victim = play
        .entities()
        .into_iter()
        .find(|p| p.species == Species::Mouse)
        .unwrap();
    let survivors: Vec<_> = play
        .entities()
        .into_iter()
        .filter(|p| p.species == Species::Mouse && p.id != victim.id)
        .map(|p| p.id)
        .collect();
    let caught = play.tap_at(victim.position).unwrap();
    assert_eq!(caught.id, victim.id);
    assert!(play.entity(victim.id).is_none());
    assert_eq!(play.entity_count(), 5);

    // Not yet
    run_for(&mut play, RESPAWN_DELAY / 2.0);
    assert_eq!(play.entity_count(), 5);

    run_for(&mut play, RESPAWN_DELAY / 2.0 + 0.1);
    let mice: Vec<_> = play
        .entities()
        .into_iter()
        .filter(|p| p.species == Species::Mouse)
        .collect();
    assert_eq!(mice.len(), 3);
    assert!(mice.iter().all(|m| m.id != victim.id));
    assert_eq!(play.entity_count(), 6);

    let newcomer = mice.iter().find(|m| !survivors.contains(&m.id)).unwrap();
    assert!(in_bounds(newcomer.position, 900.0, 700.0));
    assert!(in_bounds(newcomer.target, 900.0, 700.0));
    assert_ne!(newcomer.position, victim.position);
}

#[test]
fn double_tap_is_one_catch() {
    let mut play = PlayArea::new(
        &[Species::Spider],
        PlayConfig::default(),
        fastrand::Rng::with_seed(9),
    );
    play.resize(640.0, 480.0);
    let id = play.entities()[0].id;

    assert!(play.handle_tap(id).is_some());
    assert!(play.handle_tap(id).is_none());
    assert_eq!(play.catch_count(), 1);
    assert_eq!(play.drain_events().len(), 1);
    assert_eq!(play.entity_count(), 2);
}

#[test]
fn critters_stay_inside_padding_on_any_screen() {
    let sizes = [(200.0, 200.0), (1280.0, 800.0), (375.0, 812.0), (3000.0, 150.0)];
    for (i, &(w, h)) in sizes.iter().enumerate() {
        let mut play = PlayArea::new(
            &Species::ALL,
            PlayConfig::default(),
            fastrand::Rng::with_seed(i as u64),
        );
        play.resize(w, h);
        assert_eq!(play.entity_count(), Species::ALL.len() * 3);

        for _ in 0..120 {
            run_for(&mut play, 1.0 / 30.0);
            for p in play.entities() {
                assert!(in_bounds(p.position, w, h), "{:?} escaped {w}x{h}", p.species);
                assert!(in_bounds(p.target, w, h), "{:?} target outside {w}x{h}", p.species);
            }
        }

        // Respawns land inside too
        let id = play.entities()[0].id;
        play.handle_tap(id);
        run_for(&mut play, RESPAWN_DELAY + 0.1);
        assert_eq!(play.entity_count(), Species::ALL.len() * 3);
        assert!(play.entities().iter().all(|p| in_bounds(p.position, w, h)));
    }
}

#[test]
fn shrinking_screen_pulls_critters_in() {
    let mut play = PlayArea::new(
        &[Species::Bird],
        PlayConfig::default(),
        fastrand::Rng::with_seed(2),
    );
    play.resize(1600.0, 1200.0);
    play.resize(400.0, 300.0);
    for p in play.entities() {
        assert!(in_bounds(p.position, 400.0, 300.0));
        assert!(in_bounds(p.target, 400.0, 300.0));
    }
}

#[test]
fn critters_get_new_targets_on_arrival() {
    let mut play = PlayArea::new(
        &[Species::Laser],
        PlayConfig::default(),
        fastrand::Rng::with_seed(4),
    );
    play.resize(300.0, 300.0);
    let before: Vec<Vec2> = play.entities().iter().map(|p| p.target).collect();

    // A laser dot crosses a 180px box in well under ten seconds.
    for _ in 0..600 {
        play.step();
    }
    let after: Vec<Vec2> = play.entities().iter().map(|p| p.target).collect();
    assert_ne!(before, after);
}

#[test]
fn rendering_reports_every_live_critter() {
    let mut play = PlayArea::new(
        &[Species::Gecko, Species::Fly],
        PlayConfig::default(),
        fastrand::Rng::with_seed(1),
    );
    play.resize(800.0, 600.0);
    play.advance(0.05);

    let id = play.entities()[0].id;
    play.handle_tap(id);

    let mut frame = FrameRecorder::default();
    play.render(&mut frame);
    assert_eq!(frame.entities.len(), 5);
    assert_eq!(frame.effects.len(), 1);
    assert!(frame.entities.iter().all(|(e, _)| *e != id));
}

#[test]
fn history_keeps_the_latest_thirty_sessions() {
    let store = MemoryStore::new();
    let clock = clock();
    let mut tracker = StatsTracker::load(&store, &clock);

    for i in 0..35u64 {
        let token = tracker.start_session();
        clock.advance(Duration::seconds(i as i64 + 1));
        tracker.end_session(token, &Default::default());
    }

    let sessions = &tracker.stats().sessions;
    assert_eq!(sessions.len(), MAX_SESSIONS);
    let durations: Vec<u64> = sessions.iter().map(|s| s.duration_seconds).collect();
    assert_eq!(durations, (6..=35).collect::<Vec<u64>>());
}

#[test]
fn progress_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();

    {
        let store = FileStore::new(dir.path()).unwrap();
        let mut prefs = PreferencesStore::load(&store);
        prefs.set_speed(1.5);
        prefs.set_background(Background::Grass);

        let mut game = Game::new(StatsTracker::load(&store, &clock), SilentPlayer);
        game.start(
            &[Species::Butterfly],
            prefs.get(),
            PlayConfig::default(),
            fastrand::Rng::with_seed(21),
        );
        game.resize(800.0, 600.0);
        let id = game.play().unwrap().entities()[0].id;
        game.tap(id);
        game.end();
    }

    // Next evening
    clock.advance(Duration::days(1));
    let store = FileStore::new(dir.path()).unwrap();
    let prefs = PreferencesStore::load(&store);
    assert_eq!(prefs.get().speed, 1.5);
    assert_eq!(prefs.get().background, Background::Grass);

    let mut tracker = StatsTracker::load(&store, &clock);
    assert_eq!(tracker.stats().catches_by_species[&Species::Butterfly], 1);
    assert_eq!(tracker.stats().sessions.len(), 1);

    tracker.start_session();
    assert_eq!(tracker.stats().current_streak, 2);
    assert_eq!(tracker.stats().longest_streak, 2);
}
