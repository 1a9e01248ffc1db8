use std::marker::PhantomData;

use crate::impl_default_casts;
use crate::pipe::ExitHandle;
use crate::segment::Segment;

/// Whether a gate value should be read as "open".
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

/// Gates each injected value on an external pipe's current output: passes the value
/// through while the gate reads truthy (or falsy, if `INVERT`), otherwise produces
/// `T::default()`.
pub struct Transistor<T, const INVERT: bool = false, Gate = bool> {
    gate: ExitHandle<Gate>,
    _marker: PhantomData<T>,
}

impl<T, const INVERT: bool, Gate> Transistor<T, INVERT, Gate> {
    pub fn new(gate: ExitHandle<Gate>) -> Self {
        Self {
            gate,
            _marker: PhantomData,
        }
    }
}

impl<T: Default, const INVERT: bool, Gate: Truthy> Segment for Transistor<T, INVERT, Gate> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        let open = self.gate.borrow().extract().is_truthy();
        let open = if INVERT { !open } else { open };
        if open { input } else { T::default() }
    }

    impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_value::ExitValue;
    use crate::pipe::PipeExit;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Flag(bool);
    impl PipeExit<bool> for Flag {
        fn extract(&self) -> ExitValue<'_, bool> {
            ExitValue::owned(self.0)
        }
        fn trigger(&mut self) -> (bool, bool) {
            (false, self.0)
        }
    }

    #[test]
    fn passes_through_when_gate_open() {
        let gate: ExitHandle<bool> = Rc::new(RefCell::new(Flag(true)));
        let mut t = Transistor::<i32>::new(gate);
        assert_eq!(t.inject(5), 5);
    }

    #[test]
    fn suppresses_when_gate_closed() {
        let gate: ExitHandle<bool> = Rc::new(RefCell::new(Flag(false)));
        let mut t = Transistor::<i32>::new(gate);
        assert_eq!(t.inject(5), 0);
    }

    #[test]
    fn invert_flips_the_gate() {
        let gate: ExitHandle<bool> = Rc::new(RefCell::new(Flag(false)));
        let mut t = Transistor::<i32, true>::new(gate);
        assert_eq!(t.inject(5), 5);
    }
}
