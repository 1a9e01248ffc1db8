use super::{ByEq, Compare};
use crate::impl_default_casts;
use crate::pipe::{EntryHandle, PipeEntry};
use crate::segment::Segment;

/// Forwards an injected value to a downstream entry only when it differs from the
/// previous value under `Compare`; updates the remembered value whenever it does.
pub struct Changes<T, Cmp = ByEq> {
    value: T,
    downstream: EntryHandle<T>,
    compare: Cmp,
}

impl<T: Default> Changes<T, ByEq> {
    pub fn new(downstream: EntryHandle<T>) -> Self {
        Self::with_compare(downstream, ByEq)
    }
}

impl<T: Default, Cmp> Changes<T, Cmp> {
    pub fn with_compare(downstream: EntryHandle<T>, compare: Cmp) -> Self {
        Self {
            value: T::default(),
            downstream,
            compare,
        }
    }
}

impl<T: Default + Clone, Cmp: Compare<T>> Segment for Changes<T, Cmp> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        if !self.compare.same(&input, &self.value) {
            self.value = input.clone();
            self.downstream.borrow_mut().inject(input.clone());
        }
        input
    }

    impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Counter(usize);
    impl PipeEntry<i32> for Counter {
        fn inject(&mut self, _value: i32) {
            self.0 += 1;
        }
    }

    #[test]
    fn forwards_only_on_change() {
        let counter = Rc::new(RefCell::new(Counter(0)));
        let handle: EntryHandle<i32> = counter.clone();
        let mut changes = Changes::<i32>::new(handle);
        for v in [1, 1, 2, 2, 3] {
            changes.inject(v);
        }
        assert_eq!(counter.borrow().0, 3);
    }
}
