use std::ops::Range;
use std::time::Duration;

/// Duration of one logical tick.
pub const TICK_DURATION: Duration = Duration::from_millis(250);

/// Default bound on catch-up ticks fired by a single advance.
pub const DEFAULT_MAX_CATCH_UP: u32 = 4;

/// Ticks due from one [`TickClock::advance`] call.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct TickBatch {
    /// Index of the first tick in this batch.
    pub first: u64,
    /// Number of ticks to run now. Never exceeds the clock's catch-up bound.
    pub count: u32,
    /// Whole ticks that were due but discarded by the catch-up bound.
    pub dropped: u64,
}

impl TickBatch {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Indices of the ticks in this batch, in order.
    #[inline]
    pub fn indices(&self) -> Range<u64> {
        self.first..self.first + u64::from(self.count)
    }
}

/// Fixed-step tick accumulator.
///
/// Elapsed wall time accumulates across calls; every full tick duration yields
/// one tick. After a long pause at most `max_catch_up` ticks fire and the
/// surplus whole ticks are discarded, so a stall never turns into unbounded
/// work and simulation speed never changes. The fractional remainder is kept.
///
/// The first `advance` only establishes the time baseline.
#[derive(Debug, Clone)]
pub struct TickClock {
    tick: Duration,
    max_catch_up: u32,
    accumulated: Duration,
    last: Option<Duration>,
    next_index: u64,
}

impl TickClock {
    /// Clock with the standard [`TICK_DURATION`].
    pub fn new(max_catch_up: u32) -> Self {
        Self::with_tick(TICK_DURATION, max_catch_up)
    }

    /// Clock with a custom tick duration. Zero durations are raised to 1 ms and
    /// a zero catch-up bound is raised to 1.
    pub fn with_tick(tick: Duration, max_catch_up: u32) -> Self {
        Self {
            tick: tick.max(Duration::from_millis(1)),
            max_catch_up: max_catch_up.max(1),
            accumulated: Duration::ZERO,
            last: None,
            next_index: 0,
        }
    }

    #[inline]
    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    #[inline]
    pub fn max_catch_up(&self) -> u32 {
        self.max_catch_up
    }

    /// Time accumulated towards the next tick.
    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Total ticks fired so far.
    #[inline]
    pub fn ticks_fired(&self) -> u64 {
        self.next_index
    }

    /// Accounts for time up to `now` and returns the ticks that are due.
    pub fn advance(&mut self, now: Duration) -> TickBatch {
        let Some(last) = self.last.replace(now) else {
            return TickBatch { first: self.next_index, ..TickBatch::default() };
        };

        self.accumulated += now.saturating_sub(last);

        let tick_ns = self.tick.as_nanos();
        let due = self.accumulated.as_nanos() / tick_ns;
        let count = due.min(u128::from(self.max_catch_up)) as u32;
        let dropped = (due - u128::from(count)) as u64;

        if dropped > 0 {
            let rem = self.accumulated.as_nanos() % tick_ns;
            self.accumulated = Duration::from_nanos(rem as u64);
            log::debug!("tick clock fell behind; dropped {dropped} ticks");
        } else {
            self.accumulated -= self.tick * count;
        }

        let batch = TickBatch { first: self.next_index, count, dropped };
        self.next_index += u64::from(count);
        batch
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CATCH_UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_advance_only_sets_baseline() {
        let mut clock = TickClock::default();
        assert!(clock.advance(ms(10_000)).is_empty());
        assert_eq!(clock.ticks_fired(), 0);
    }

    #[test]
    fn gaps_below_one_tick_fire_nothing() {
        let mut clock = TickClock::default();
        clock.advance(ms(0));
        for t in [16, 33, 50, 120, 200, 249] {
            assert!(clock.advance(ms(t)).is_empty(), "tick fired at {t} ms");
        }
        assert_eq!(clock.accumulated(), ms(249));
    }

    #[test]
    fn small_gaps_accumulate_into_one_tick() {
        let mut clock = TickClock::default();
        clock.advance(ms(0));
        clock.advance(ms(200));
        let batch = clock.advance(ms(260));
        assert_eq!(batch.count, 1);
        assert_eq!(clock.accumulated(), ms(10));
    }

    #[test]
    fn catch_up_is_bounded() {
        let mut clock = TickClock::new(4);
        clock.advance(ms(0));
        let batch = clock.advance(ms(250 * 40 + 100));
        assert_eq!(batch.count, 4);
        assert_eq!(batch.dropped, 36);
        assert_eq!(clock.accumulated(), ms(100));
        // Dropped ticks are gone for good.
        assert!(clock.advance(ms(250 * 40 + 120)).is_empty());
    }

    #[test]
    fn exactly_bound_ticks_fire_at_the_bound() {
        let mut clock = TickClock::new(3);
        clock.advance(ms(0));
        let batch = clock.advance(ms(750));
        assert_eq!(batch.count, 3);
        assert_eq!(batch.dropped, 0);
    }

    #[test]
    fn batch_indices_are_contiguous() {
        let mut clock = TickClock::new(8);
        clock.advance(ms(0));
        assert_eq!(clock.advance(ms(500)).indices(), 0..2);
        assert_eq!(clock.advance(ms(1250)).indices(), 2..5);
    }

    #[test]
    fn time_going_backwards_is_ignored() {
        let mut clock = TickClock::default();
        clock.advance(ms(1000));
        assert!(clock.advance(ms(10)).is_empty());
        assert_eq!(clock.accumulated(), Duration::ZERO);
    }
}
