use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Identifies a recurring timer scheduled through the runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Allocates a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TimerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Fixed-interval recurring timer.
///
/// Each fire reports the wall time since the previous fire, not the nominal
/// interval, and never clamps it: a consumer integrating `dt` stays in step
/// with the wall clock across stalls. A timer that falls behind fires once and re-arms from the
/// current instant instead of bursting to catch up.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    id: TimerId,
    interval: Duration,
    last: Instant,
    next_due: Instant,
    fired: u64,
}

impl IntervalTimer {
    const MIN_INTERVAL: Duration = Duration::from_millis(1);

    pub fn new(id: TimerId, interval: Duration, start: Instant) -> Self {
        let interval = interval.max(Self::MIN_INTERVAL);
        Self {
            id,
            interval,
            last: start,
            next_due: start + interval,
            fired: 0,
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant of the next fire.
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Fires if due at `now`, returning the elapsed seconds since the previous fire.
    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        if now < self.next_due {
            return None;
        }

        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        self.fired += 1;

        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }

        log::trace!("timer {:?} fired #{} dt={:.4}", self.id, self.fired, dt);
        Some(dt)
    }
}
