use crate::impl_default_casts;
use crate::segment::Segment;

/// Passes its input straight through. Used to seed a chain whose first real segment
/// needs a typed predecessor, and implicitly inserted when a chain is capped/opened
/// directly off an `Entry<T>` with no segments in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity<T>(std::marker::PhantomData<fn(T) -> T>);

impl<T> Identity<T> {
    pub fn new() -> Self {
        Self(std::marker::PhantomData)
    }
}

impl<T: Default> Segment for Identity<T> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        input
    }

    impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_value_through() {
        let mut id = Identity::<i32>::new();
        assert_eq!(id.inject(7), 7);
    }
}
