use crate::impl_default_casts;
use crate::segment::Segment;

/// Stores the most recently injected value and hands it back on `extract`.
#[derive(Debug, Clone)]
pub struct Buffer<T> {
    value: T,
}

impl<T: Default> Buffer<T> {
    pub fn new() -> Self {
        Self { value: T::default() }
    }
}

impl<T> Buffer<T> {
    pub fn with_initial(value: T) -> Self {
        Self { value }
    }
}

impl<T: Default> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Clone> Segment for Buffer<T> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;
    const HAS_EXTRACT: bool = true;

    fn inject(&mut self, input: T) -> T {
        self.value = input.clone();
        input
    }

    fn extract(&self) -> T {
        self.value.clone()
    }

    fn extract_ref(&self) -> Option<&T> {
        Some(&self.value)
    }

    impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_then_extract_roundtrips() {
        let mut buf = Buffer::<i32>::new();
        buf.inject(42);
        assert_eq!(buf.extract(), 42);
        assert_eq!(buf.extract_ref(), Some(&42));
    }

    #[test]
    fn initial_value_is_available_before_any_inject() {
        let buf = Buffer::with_initial(7i32);
        assert_eq!(buf.extract(), 7);
    }
}
