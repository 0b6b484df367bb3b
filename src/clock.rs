use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// What a single `tick()` did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// The clock is not running; nothing changed.
    Idle,
    Running { remaining: u32 },
    /// This tick took the clock to zero. Reported once per run.
    Expired,
}

/// How close the countdown is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerUrgency {
    Calm,
    Warning,
    Critical,
}

/// Whole-second countdown driven by an external once-per-second trigger.
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    duration_secs: u32,
    remaining_secs: u32,
    started: bool,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs;
        self.remaining_secs = duration_secs;
        self.started = true;
        self.running = duration_secs > 0;
    }

    pub fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            ClockTick::Expired
        } else {
            ClockTick::Running {
                remaining: self.remaining_secs,
            }
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Returns the clock to its never-started state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_expired(&self) -> bool {
        self.started && self.remaining_secs == 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Share of the session still left, for progress bars.
    pub fn remaining_fraction(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        f64::from(self.remaining_secs) / f64::from(self.duration_secs)
    }

    pub fn urgency(&self) -> TimerUrgency {
        match self.remaining_secs {
            0..=60 => TimerUrgency::Critical,
            61..=180 => TimerUrgency::Warning,
            _ => TimerUrgency::Calm,
        }
    }
}

/// Where the quiz reads "now" when timing answers.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced time. Clones share the same offset, so a test can keep one
/// handle while the engine owns another.
#[derive(Debug, Clone)]
pub struct ManualTime {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_inert() {
        let mut clock = SessionClock::new();
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert!(!clock.is_expired());
        assert!(!clock.is_running());
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn test_countdown_expires_once() {
        let mut clock = SessionClock::new();
        clock.start(3);
        assert_eq!(clock.tick(), ClockTick::Running { remaining: 2 });
        assert_eq!(clock.tick(), ClockTick::Running { remaining: 1 });
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert!(clock.is_expired());

        for _ in 0..10 {
            assert_eq!(clock.tick(), ClockTick::Idle);
        }
        assert_eq!(clock.remaining_secs(), 0);
    }

    #[test]
    fn test_stop_freezes_remaining() {
        let mut clock = SessionClock::new();
        clock.start(10);
        clock.tick();
        clock.stop();
        assert_eq!(clock.tick(), ClockTick::Idle);
        assert_eq!(clock.remaining_secs(), 9);
        assert!(!clock.is_expired());
    }

    #[test]
    fn test_restart_rearms_expiry() {
        let mut clock = SessionClock::new();
        clock.start(1);
        assert_eq!(clock.tick(), ClockTick::Expired);
        clock.start(2);
        assert!(!clock.is_expired());
        clock.tick();
        assert_eq!(clock.tick(), ClockTick::Expired);
    }

    #[test]
    fn test_zero_duration_is_expired_immediately() {
        let mut clock = SessionClock::new();
        clock.start(0);
        assert!(clock.is_expired());
        assert_eq!(clock.tick(), ClockTick::Idle);
    }

    #[test]
    fn test_clear_forgets_run() {
        let mut clock = SessionClock::new();
        clock.start(1);
        clock.tick();
        clock.clear();
        assert!(!clock.is_expired());
        assert_eq!(clock.duration_secs(), 0);
    }

    #[test]
    fn test_fraction_and_urgency() {
        let mut clock = SessionClock::new();
        clock.start(300);
        assert_eq!(clock.remaining_fraction(), 1.0);
        assert_eq!(clock.urgency(), TimerUrgency::Calm);
        for _ in 0..120 {
            clock.tick();
        }
        assert_eq!(clock.remaining_secs(), 180);
        assert_eq!(clock.urgency(), TimerUrgency::Warning);
        for _ in 0..120 {
            clock.tick();
        }
        assert_eq!(clock.urgency(), TimerUrgency::Critical);
        assert!((clock.remaining_fraction() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_manual_time_shares_offset() {
        let time = ManualTime::new();
        let handle = time.clone();
        let start = time.now();
        handle.advance_secs(2.5);
        assert_eq!(time.now() - start, Duration::from_millis(2500));
    }
}
