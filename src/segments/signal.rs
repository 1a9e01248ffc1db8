use std::cell::RefCell;
use std::marker::PhantomData;

use smol_str::SmolStr;

use crate::external::SignalBus;
use crate::segment::Segment;

/// Publishes every value it sees -- on `inject` and on `exit_cast` -- to an external
/// [`SignalBus`] under an optional key, then passes the value through unchanged.
///
/// The bus is wrapped in a [`RefCell`] because `exit_cast` only ever gets `&self`, but
/// publishing is inherently a mutation of the bus.
pub struct Signal<T, B> {
    bus: RefCell<B>,
    key: Option<SmolStr>,
    _marker: PhantomData<T>,
}

impl<T, B: SignalBus<T>> Signal<T, B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus: RefCell::new(bus),
            key: None,
            _marker: PhantomData,
        }
    }

    pub fn keyed(bus: B, key: impl Into<SmolStr>) -> Self {
        Self {
            bus: RefCell::new(bus),
            key: Some(key.into()),
            _marker: PhantomData,
        }
    }

    fn publish(&self, value: T) {
        let mut bus = self.bus.borrow_mut();
        match &self.key {
            Some(key) => bus.call_keyed(key, value),
            None => bus.call(value),
        }
    }
}

impl<T: Default + Clone, B: SignalBus<T>> Segment for Signal<T, B> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        self.publish(input.clone());
        input
    }
    fn entry_cast(&self, out: T) -> T {
        out
    }
    fn exit_cast(&self, input: T) -> T {
        self.publish(input.clone());
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingBus(Vec<(Option<SmolStr>, i32)>);
    impl SignalBus<i32> for RecordingBus {
        fn call(&mut self, value: i32) {
            self.0.push((None, value));
        }
        fn call_keyed(&mut self, key: &str, value: i32) {
            self.0.push((Some(key.into()), value));
        }
    }

    #[test]
    fn publishes_on_inject() {
        let mut sig = Signal::new(RecordingBus(Vec::new()));
        assert_eq!(sig.inject(5), 5);
        assert_eq!(sig.bus.borrow().0, vec![(None, 5)]);
    }

    #[test]
    fn publishes_under_key() {
        let mut sig = Signal::keyed(RecordingBus(Vec::new()), "ch1");
        sig.inject(7);
        assert_eq!(sig.bus.borrow().0, vec![(Some("ch1".into()), 7)]);
    }

    #[test]
    fn exit_cast_also_publishes() {
        let sig = Signal::new(RecordingBus(Vec::new()));
        assert_eq!(sig.exit_cast(9), 9);
        assert_eq!(sig.bus.borrow().0, vec![(None, 9)]);
    }
}
