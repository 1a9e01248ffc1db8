use std::time::{Duration, Instant};

use super::{ByEq, Compare};
use crate::impl_default_casts;
use crate::pipe::{EntryHandle, PipeEntry};
use crate::segment::Segment;

/// A source of monotonic-ish timestamps, abstracted so tests can drive [`RateLimit`]
/// without sleeping.
pub trait Clock {
    type Instant: Copy + PartialOrd;
    fn now(&self) -> Self::Instant;
    fn advance(instant: Self::Instant, by: Duration) -> Self::Instant;
}

/// The real wall clock, backed by [`std::time::Instant`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Instant = Instant;
    fn now(&self) -> Instant {
        Instant::now()
    }
    fn advance(instant: Instant, by: Duration) -> Instant {
        instant + by
    }
}

/// Forwards the first distinct value immediately, then buffers at most one pending
/// distinct value until `interval` has elapsed since the last forward -- at which point
/// either the next `inject` or an explicit `trigger` flushes it.
///
/// A clock reading earlier than the last one observed (a non-monotonic clock) is
/// clamped to "no forward": the deadline is treated as not yet reached rather than
/// risking a burst of suppressed values all releasing at once.
pub struct RateLimit<T, Cmp = ByEq, C = SystemClock>
where
    C: Clock,
{
    value: T,
    pending: Option<T>,
    changed: bool,
    deadline: Option<C::Instant>,
    last_seen: Option<C::Instant>,
    interval: Duration,
    downstream: EntryHandle<T>,
    compare: Cmp,
    clock: C,
}

impl<T: Default> RateLimit<T, ByEq, SystemClock> {
    pub fn new(downstream: EntryHandle<T>, interval: Duration) -> Self {
        Self::with_compare_and_clock(downstream, interval, ByEq, SystemClock)
    }
}

impl<T: Default, Cmp, C: Clock> RateLimit<T, Cmp, C> {
    pub fn with_compare_and_clock(
        downstream: EntryHandle<T>,
        interval: Duration,
        compare: Cmp,
        clock: C,
    ) -> Self {
        Self {
            value: T::default(),
            pending: None,
            changed: false,
            deadline: None,
            last_seen: None,
            interval,
            downstream,
            compare,
            clock,
        }
    }

    fn past_deadline(&self, now: C::Instant) -> bool {
        self.deadline.is_none_or(|d| now >= d)
    }
}

impl<T: Default + Clone, Cmp: Compare<T>, C: Clock> Segment for RateLimit<T, Cmp, C> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;
    const HAS_EXTRACT: bool = true;
    const HAS_TRIGGER: bool = true;

    fn inject(&mut self, input: T) -> T {
        if self.compare.same(&input, &self.value) {
            return self.value.clone();
        }
        let now = self.clock.now();
        let non_monotonic = self.last_seen.is_some_and(|last| now < last);
        self.last_seen = Some(now);

        if !non_monotonic && self.past_deadline(now) {
            self.value = input.clone();
            self.deadline = Some(C::advance(now, self.interval));
            self.changed = false;
            self.pending = None;
            self.downstream.borrow_mut().inject(input.clone());
        } else {
            self.pending = Some(input.clone());
            self.changed = true;
        }
        input
    }

    fn extract(&self) -> T {
        self.value.clone()
    }

    fn trigger(&mut self, triggered: &mut bool) -> T {
        if !self.changed {
            *triggered = false;
            return self.value.clone();
        }
        let now = self.clock.now();
        if self.past_deadline(now) {
            if let Some(pending) = self.pending.take() {
                self.value = pending.clone();
                self.deadline = Some(C::advance(now, self.interval));
                self.changed = false;
                *triggered = true;
                self.downstream.borrow_mut().inject(pending.clone());
                return pending;
            }
        }
        *triggered = false;
        self.value.clone()
    }

    impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Copy, Default)]
    struct FakeClock(std::rc::Rc<Cell<Duration>>);
    impl Clock for FakeClock {
        type Instant = Duration;
        fn now(&self) -> Duration {
            self.0.get()
        }
        fn advance(instant: Duration, by: Duration) -> Duration {
            instant + by
        }
    }

    struct Sink(Vec<i32>);
    impl PipeEntry<i32> for Sink {
        fn inject(&mut self, value: i32) {
            self.0.push(value);
        }
    }

    #[test]
    fn defers_until_interval_elapses() {
        let clock_time = Rc::new(Cell::new(Duration::ZERO));
        let clock = FakeClock(clock_time.clone());
        let sink = Rc::new(RefCell::new(Sink(Vec::new())));
        let handle: EntryHandle<i32> = sink.clone();

        let mut rl = RateLimit::with_compare_and_clock(
            handle,
            Duration::from_millis(100),
            ByEq,
            clock,
        );

        rl.inject(10); // t=0, first value, forwards immediately
        assert_eq!(sink.borrow().0, vec![10]);

        clock_time.set(Duration::from_millis(10));
        rl.inject(20); // still within the 100ms window, deferred
        assert_eq!(sink.borrow().0, vec![10]);

        clock_time.set(Duration::from_millis(50));
        let mut fired = false;
        rl.trigger(&mut fired);
        assert!(!fired);
        assert_eq!(sink.borrow().0, vec![10]);

        clock_time.set(Duration::from_millis(110));
        let mut fired = false;
        rl.trigger(&mut fired);
        assert!(fired);
        assert_eq!(sink.borrow().0, vec![10, 20]);
    }
}
