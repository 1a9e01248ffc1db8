use smallvec::SmallVec;

use crate::error::EmptyFanError;
use crate::impl_default_casts;
use crate::pipe::{EntryHandle, PipeEntry};
use crate::segment::Segment;

/// Forwards each injected value into every connected downstream entry, in insertion
/// order, then passes the value through unchanged.
pub struct Tee<T> {
    targets: SmallVec<[EntryHandle<T>; 2]>,
}

impl<T> Tee<T> {
    /// # Panics
    /// Panics if `targets` is empty -- a `Tee` with nothing to fan out to has no
    /// well-defined behavior, and the source spec rejects it at build time; here, where
    /// the target list's length isn't known to the type system, that check happens at
    /// construction instead.
    pub fn new(targets: impl IntoIterator<Item = EntryHandle<T>>) -> Self {
        let targets: SmallVec<[EntryHandle<T>; 2]> = targets.into_iter().collect();
        assert!(!targets.is_empty(), "{}", EmptyFanError("Tee"));
        Self { targets }
    }
}

impl<T: Default + Clone> Segment for Tee<T> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        for target in &self.targets {
            target.borrow_mut().inject(input.clone());
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

    struct Sink(i32);
    impl PipeEntry<i32> for Sink {
        fn inject(&mut self, value: i32) {
            self.0 = value;
        }
    }

    #[test]
    fn fans_out_to_every_target() {
        let sink_a = Rc::new(RefCell::new(Sink(0)));
        let sink_b = Rc::new(RefCell::new(Sink(0)));
        let handle_a: EntryHandle<i32> = sink_a.clone();
        let handle_b: EntryHandle<i32> = sink_b.clone();
        let mut tee = Tee::new([handle_a, handle_b]);
        let out = tee.inject(9);
        assert_eq!(out, 9);
        assert_eq!(sink_a.borrow().0, 9);
        assert_eq!(sink_b.borrow().0, 9);
    }

    #[test]
    #[should_panic]
    fn empty_tee_panics() {
        let _ = Tee::<i32>::new(std::iter::empty());
    }
}
