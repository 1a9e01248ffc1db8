use std::marker::PhantomData;

use crate::cast::DefaultCast;
use crate::segment::Segment;

/// Converts `In` to `Out` via [`DefaultCast`] on every path. Equal to [`super::Identity`]
/// when `In == Out`; a saturating numeric cast when both sides are primitive numerics.
pub struct Cast<In, Out> {
    _marker: PhantomData<fn(In) -> Out>,
}

impl<In, Out> Cast<In, Out> {
    pub fn new() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<In, Out> Default for Cast<In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In, Out> Segment for Cast<In, Out>
where
    In: DefaultCast<Out>,
    Out: DefaultCast<In> + Default,
{
    type In = In;
    type Out = Out;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: In) -> Out {
        input.default_cast()
    }

    crate::impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_cast_between_numeric_types() {
        let mut cast = Cast::<i32, u8>::new();
        assert_eq!(cast.inject(-5), 0);
        assert_eq!(cast.inject(1000), 255);
        assert_eq!(cast.entry_cast(10), 10);
    }

    #[test]
    fn identity_when_types_match() {
        let mut cast = Cast::<i32, i32>::new();
        assert_eq!(cast.inject(42), 42);
    }
}
