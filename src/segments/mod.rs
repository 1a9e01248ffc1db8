//! Concrete, reusable [`crate::segment::Segment`] implementations.

mod bounded;
mod buffer;
mod call;
mod cast_segment;
mod changes;
mod constrained;
mod convert;
mod get_set;
pub mod identity;
mod log;
mod maps;
mod mux;
mod rate_limit;
mod scale;
mod signal;
mod tee;
mod transistor;
mod triggered;

pub use bounded::Bounded;
pub use buffer::Buffer;
pub use call::Call;
pub use cast_segment::Cast;
pub use changes::Changes;
pub use constrained::Constrained;
pub use convert::Convert;
pub use get_set::{Get, Set};
pub use identity::Identity;
pub use log::Log;
pub use maps::{IndexMap, Mapped, OrderedMap, RandomMap};
pub use mux::Mux;
pub use rate_limit::{Clock, RateLimit, SystemClock};
pub use signal::Signal;
pub use tee::Tee;
pub use transistor::Transistor;
pub use triggered::Triggered;

/// An equality-like predicate used by segments that need to detect "did the value
/// change" (`Triggered`, `Changes`, `RateLimit`). Returns `true` when the two values
/// should be treated as the same.
pub trait Compare<T> {
    fn same(&self, a: &T, b: &T) -> bool;
}

/// The default [`Compare`]: plain [`PartialEq`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ByEq;

impl<T: PartialEq> Compare<T> for ByEq {
    fn same(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T, F: Fn(&T, &T) -> bool> Compare<T> for F {
    fn same(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
