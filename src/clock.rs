use chrono::{DateTime, Local, NaiveDate, Utc};

// ---------------------------------------------------------------------------
// Fixed-timestep frame clock
// ---------------------------------------------------------------------------

/// Turns variable frame times into a whole number of fixed ticks.
///
/// The host feeds it whatever elapsed time its frame callback measured; the
/// simulation only ever sees `tick_rate`-sized steps, so it stays
/// deterministic regardless of display jitter.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_rate: f64,
    max_accumulator: f64,
    accumulator: f64,
    /// Virtual seconds simulated so far.
    elapsed: f64,
    tick_count: u64,
}

impl FrameClock {
    pub fn new(tick_rate: f64, max_accumulator: f64) -> Self {
        Self {
            tick_rate,
            max_accumulator,
            accumulator: 0.0,
            elapsed: 0.0,
            tick_count: 0,
        }
    }

    /// Bank `dt` seconds and return how many ticks are now due.
    pub fn accumulate(&mut self, dt: f64) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }
        if self.accumulator > self.max_accumulator {
            self.accumulator = self.max_accumulator;
        }
        let mut due = 0;
        while self.accumulator >= self.tick_rate {
            self.accumulator -= self.tick_rate;
            due += 1;
        }
        due
    }

    /// Record one simulated tick; returns the virtual time it ran at.
    pub fn advance_tick(&mut self) -> f64 {
        self.elapsed += self.tick_rate;
        self.tick_count += 1;
        self.elapsed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_rate(&self) -> f64 {
        self.tick_rate
    }

    /// Interpolation alpha for rendering between ticks.
    pub fn interpolation_alpha(&self) -> f32 {
        (self.accumulator / self.tick_rate) as f32
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.elapsed = 0.0;
        self.tick_count = 0;
    }
}

// ---------------------------------------------------------------------------
// Wall clock
// ---------------------------------------------------------------------------

/// Source of wall-clock time for session bookkeeping.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar day used for streaks and session dates.
    fn today(&self) -> NaiveDate;
}

/// Real system time; days follow the local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: std::cell::Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::cell::Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.now.get().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accumulates_whole_ticks() {
        let mut clock = FrameClock::new(0.25, 1.0);
        assert_eq!(clock.accumulate(0.875), 3);
        assert_eq!(clock.interpolation_alpha(), 0.5);
        assert_eq!(clock.accumulate(0.125), 1);
    }

    #[test]
    fn clamps_long_stalls() {
        let mut clock = FrameClock::new(0.125, 0.25);
        assert_eq!(clock.accumulate(10.0), 2);
        assert_eq!(clock.accumulate(-1.0), 0);
        assert_eq!(clock.accumulate(f64::NAN), 0);
    }

    #[test]
    fn advance_tracks_virtual_time() {
        let mut clock = FrameClock::new(0.5, 1.0);
        assert_eq!(clock.advance_tick(), 0.5);
        assert_eq!(clock.advance_tick(), 1.0);
        assert_eq!(clock.tick_count(), 2);
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn fixed_clock_moves_on_demand() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        clock.advance(chrono::Duration::hours(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }
}
