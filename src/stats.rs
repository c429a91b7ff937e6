use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::species::Species;
use crate::storage::{self, KeyValueStore};

/// Storage key of the stats blob.
pub const STATS_KEY: &str = "kittenplay-stats";
/// Most recent sessions kept in history.
pub const MAX_SESSIONS: usize = 30;

/// Catch counts per species.
pub type CatchCounts = BTreeMap<Species, u32>;

/// One finished play session. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaySession {
    pub date: NaiveDate,
    /// Whole seconds.
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    #[serde(rename = "catches")]
    pub catches_by_species: CatchCounts,
    pub total_catches: u32,
}

/// All-time play history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    /// Oldest first, at most `MAX_SESSIONS`.
    pub sessions: Vec<PlaySession>,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(rename = "totalPlayTime")]
    pub total_play_time_seconds: u64,
    pub total_catches: u64,
    #[serde(rename = "catchesByAnimal")]
    pub catches_by_species: BTreeMap<Species, u64>,
    pub last_play_date: Option<NaiveDate>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            current_streak: 0,
            longest_streak: 0,
            total_play_time_seconds: 0,
            total_catches: 0,
            catches_by_species: Species::ALL.iter().map(|&s| (s, 0)).collect(),
            last_play_date: None,
        }
    }
}

impl Stats {
    /// Restore invariants on data read back from storage.
    fn sanitize(mut self) -> Self {
        for species in Species::ALL {
            self.catches_by_species.entry(species).or_insert(0);
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
        trim_sessions(&mut self.sessions);
        self
    }

    /// Species with the strictly greatest all-time count.
    ///
    /// Ties go to whichever species comes first in `Species::ALL`; that order
    /// is an implementation detail, not a promise to users.
    pub fn favorite_species(&self) -> Option<Species> {
        let mut best = None;
        let mut best_count = 0;
        for species in Species::ALL {
            let count = self.catches_by_species.get(&species).copied().unwrap_or(0);
            if count > best_count {
                best_count = count;
                best = Some(species);
            }
        }
        best
    }
}

fn trim_sessions(sessions: &mut Vec<PlaySession>) {
    if sessions.len() > MAX_SESSIONS {
        let excess = sessions.len() - MAX_SESSIONS;
        sessions.drain(..excess);
    }
}

/// Handle returned by `start_session`, needed to end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    pub started_at: DateTime<Utc>,
}

/// Folds play sessions and catches into persisted `Stats`.
///
/// Every mutation is written straight back to the store; storage failures
/// are logged and play carries on with the in-memory copy.
pub struct StatsTracker<S: KeyValueStore, C: Clock> {
    store: S,
    clock: C,
    stats: Stats,
}

impl<S: KeyValueStore, C: Clock> StatsTracker<S, C> {
    pub fn load(store: S, clock: C) -> Self {
        let stats = storage::load_blob::<Stats, _>(&store, STATS_KEY).sanitize();
        Self {
            store,
            clock,
            stats,
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Begin a session and roll the daily streak forward.
    pub fn start_session(&mut self) -> SessionToken {
        let today = self.clock.today();
        let stats = &mut self.stats;

        stats.current_streak = match stats.last_play_date {
            None => 1,
            Some(last) => match (today - last).num_days() {
                1 => stats.current_streak + 1,
                d if d > 1 => 1,
                // Same day (or a clock that went backwards)
                _ => stats.current_streak,
            },
        };
        stats.longest_streak = stats.longest_streak.max(stats.current_streak);
        stats.last_play_date = Some(today);

        log::info!(
            "Session started on {today} (streak {}, best {})",
            stats.current_streak,
            stats.longest_streak
        );
        self.persist();

        SessionToken {
            started_at: self.clock.now(),
        }
    }

    /// Count a catch in the all-time totals right away.
    pub fn record_catch(&mut self, species: Species) {
        self.stats.total_catches += 1;
        *self.stats.catches_by_species.entry(species).or_insert(0) += 1;
        self.persist();
    }

    /// Close a session: append it to history and add its play time.
    pub fn end_session(&mut self, token: SessionToken, catches: &CatchCounts) -> PlaySession {
        let duration_seconds = (self.clock.now() - token.started_at).num_seconds().max(0) as u64;
        let session = PlaySession {
            date: self.clock.today(),
            duration_seconds,
            catches_by_species: catches.clone(),
            total_catches: catches.values().sum(),
        };

        self.stats.sessions.push(session.clone());
        trim_sessions(&mut self.stats.sessions);
        self.stats.total_play_time_seconds += duration_seconds;

        log::info!(
            "Session ended: {}s, {} catches",
            session.duration_seconds,
            session.total_catches
        );
        self.persist();
        session
    }

    pub fn favorite_species(&self) -> Option<Species> {
        self.stats.favorite_species()
    }

    pub fn sessions_today(&self) -> Vec<&PlaySession> {
        let today = self.clock.today();
        self.stats.sessions.iter().filter(|s| s.date == today).collect()
    }

    /// Sessions dated within the last `days` days (inclusive).
    pub fn recent_sessions(&self, days: u32) -> Vec<&PlaySession> {
        let cutoff = self.clock.today() - chrono::Duration::days(days as i64);
        self.stats.sessions.iter().filter(|s| s.date >= cutoff).collect()
    }

    fn persist(&self) {
        storage::save_blob(&self.store, STATS_KEY, &self.stats);
    }
}
