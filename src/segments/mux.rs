use smallvec::SmallVec;

use crate::error::EmptyFanError;
use crate::pipe::ExitHandle;
use crate::segment::Segment;

/// Selects one of N external pipe exits by index: `inject` takes an index and stores
/// it (out-of-range indices are logged and produce `T::default()` without disturbing
/// the current selection); `extract`/`trigger` act on the currently selected exit.
pub struct Mux<T> {
    exits: SmallVec<[ExitHandle<T>; 2]>,
    selected: usize,
}

impl<T> Mux<T> {
    pub fn new(exits: impl IntoIterator<Item = ExitHandle<T>>) -> Self {
        let exits: SmallVec<[ExitHandle<T>; 2]> = exits.into_iter().collect();
        assert!(!exits.is_empty(), "{}", EmptyFanError("Mux"));
        Self { exits, selected: 0 }
    }
}

impl<T: Default + Clone> Segment for Mux<T> {
    type In = usize;
    type Out = T;

    const HAS_INJECT: bool = true;
    const HAS_EXTRACT: bool = true;
    const HAS_TRIGGER: bool = true;

    fn inject(&mut self, input: usize) -> T {
        if input >= self.exits.len() {
            tracing::warn!(index = input, len = self.exits.len(), "Mux index out of range");
            return T::default();
        }
        self.selected = input;
        self.extract()
    }

    fn extract(&self) -> T {
        self.exits[self.selected].borrow().extract().into_owned()
    }

    fn entry_cast(&self, _out: T) -> usize {
        self.selected
    }

    fn exit_cast(&self, input: usize) -> T {
        self.exits[input.min(self.exits.len() - 1)]
            .borrow()
            .extract()
            .into_owned()
    }

    fn trigger(&mut self, triggered: &mut bool) -> T {
        let (fired, _) = self.exits[self.selected].borrow_mut().trigger();
        *triggered = fired;
        self.extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_value::ExitValue;
    use crate::pipe::PipeExit;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Fixed(i32);
    impl PipeExit<i32> for Fixed {
        fn extract(&self) -> ExitValue<'_, i32> {
            ExitValue::owned(self.0)
        }
        fn trigger(&mut self) -> (bool, i32) {
            (false, self.0)
        }
    }

    #[test]
    fn selects_and_reads_the_chosen_exit() {
        let a: ExitHandle<i32> = Rc::new(RefCell::new(Fixed(10)));
        let b: ExitHandle<i32> = Rc::new(RefCell::new(Fixed(20)));
        let mut mux = Mux::new([a, b]);
        assert_eq!(mux.inject(1), 20);
        assert_eq!(mux.extract(), 20);
    }

    #[test]
    fn out_of_range_index_returns_default() {
        let a: ExitHandle<i32> = Rc::new(RefCell::new(Fixed(10)));
        let mut mux = Mux::new([a]);
        assert_eq!(mux.inject(5), 0);
        // selection is unchanged
        assert_eq!(mux.extract(), 10);
    }
}
