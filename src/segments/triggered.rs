use smallvec::SmallVec;

use super::{ByEq, Compare};
use crate::error::EmptyFanError;
use crate::impl_default_casts;
use crate::pipe::EntryHandle;
use crate::segment::Segment;

/// A [`super::Buffer`] plus a [`super::Tee`]: remembers the last injected value, and on
/// `trigger` flushes it to every target if it changed since the last flush.
pub struct Triggered<T, Cmp = ByEq> {
    value: T,
    changed: bool,
    targets: SmallVec<[EntryHandle<T>; 2]>,
    compare: Cmp,
}

impl<T: Default> Triggered<T, ByEq> {
    pub fn new(targets: impl IntoIterator<Item = EntryHandle<T>>) -> Self {
        Self::with_compare(targets, ByEq)
    }
}

impl<T: Default, Cmp> Triggered<T, Cmp> {
    pub fn with_compare(targets: impl IntoIterator<Item = EntryHandle<T>>, compare: Cmp) -> Self {
        let targets: SmallVec<[EntryHandle<T>; 2]> = targets.into_iter().collect();
        assert!(!targets.is_empty(), "{}", EmptyFanError("Triggered"));
        Self {
            value: T::default(),
            changed: false,
            targets,
            compare,
        }
    }
}

impl<T: Default + Clone, Cmp: Compare<T>> Segment for Triggered<T, Cmp> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;
    const HAS_EXTRACT: bool = true;
    const HAS_TRIGGER: bool = true;

    fn inject(&mut self, input: T) -> T {
        if !self.compare.same(&input, &self.value) {
            self.changed = true;
        }
        self.value = input.clone();
        input
    }

    fn extract(&self) -> T {
        self.value.clone()
    }

    fn extract_ref(&self) -> Option<&T> {
        Some(&self.value)
    }

    fn trigger(&mut self, triggered: &mut bool) -> T {
        *triggered = self.changed;
        if self.changed {
            for target in &self.targets {
                target.borrow_mut().inject(self.value.clone());
            }
            self.changed = false;
        }
        self.value.clone()
    }

    impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::PipeEntry;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Sink(i32, usize);
    impl PipeEntry<i32> for Sink {
        fn inject(&mut self, value: i32) {
            self.0 = value;
            self.1 += 1;
        }
    }

    #[test]
    fn flushes_only_on_change_and_clears_flag() {
        let sink = Rc::new(RefCell::new(Sink(0, 0)));
        let handle: EntryHandle<i32> = sink.clone();
        let mut t = Triggered::<i32>::new([handle]);

        t.inject(1);
        t.inject(1);
        t.inject(2);

        let (fired, value) = {
            let mut fired = false;
            let v = t.trigger(&mut fired);
            (fired, v)
        };
        assert!(fired);
        assert_eq!(value, 2);
        assert_eq!(sink.borrow().0, 2);
        assert_eq!(sink.borrow().1, 1);

        let mut fired_again = false;
        t.trigger(&mut fired_again);
        assert!(!fired_again);
        assert_eq!(sink.borrow().1, 1);
    }
}
