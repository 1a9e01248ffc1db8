use crate::segment::Segment;

/// Types `Scale` is defined over: floating point, where the ratio multiply/divide
/// below is always total.
pub trait Float: Copy + Default + std::ops::Mul<Output = Self> + std::ops::Div<Output = Self> {}
impl Float for f32 {}
impl Float for f64 {}

/// Multiplies by `num/den` on the way downstream (`exit_cast`), and by its reciprocal
/// `den/num` on the way back upstream (`entry_cast`). Floating-point only.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Scale<T> {
    num: T,
    den: T,
}

impl<T: Float> Scale<T> {
    pub fn new(num: T, den: T) -> Self {
        Self { num, den }
    }
}

impl<T: Float> Segment for Scale<T> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        self.exit_cast(input)
    }
    fn entry_cast(&self, out: T) -> T {
        out * self.den / self.num
    }
    fn exit_cast(&self, input: T) -> T {
        input * self.num / self.den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_down_and_back_up() {
        let scale = Scale::new(1.0, 1000.0);
        assert_eq!(scale.exit_cast(2500.0), 2.5);
        assert_eq!(scale.entry_cast(2.5), 2500.0);
    }
}
