use crate::impl_default_casts;
use crate::segment::Segment;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Invokes a user function on each injected value. Four shapes are supported, each its
/// own constructor: observe by value, observe by reference, mutate in place, or
/// transform into a new value. On failure, the callback's error is logged; `transform`
/// additionally falls back to `T::default()` for that call, since it has no other value
/// to offer ("produced default for this invocation").
pub struct Call<T> {
    f: Box<dyn FnMut(T) -> T>,
}

impl<T: 'static> Call<T> {
    pub fn observe(mut f: impl FnMut(T) -> Result<(), BoxError> + 'static) -> Self
    where
        T: Clone,
    {
        Self {
            f: Box::new(move |v: T| {
                if let Err(err) = f(v.clone()) {
                    tracing::warn!(error = %err, "Call (observe) failed");
                }
                v
            }),
        }
    }

    pub fn observe_ref(mut f: impl FnMut(&T) -> Result<(), BoxError> + 'static) -> Self {
        Self {
            f: Box::new(move |v: T| {
                if let Err(err) = f(&v) {
                    tracing::warn!(error = %err, "Call (observe_ref) failed");
                }
                v
            }),
        }
    }

    pub fn mutate(mut f: impl FnMut(&mut T) -> Result<(), BoxError> + 'static) -> Self {
        Self {
            f: Box::new(move |mut v: T| {
                if let Err(err) = f(&mut v) {
                    tracing::warn!(error = %err, "Call (mutate) failed");
                }
                v
            }),
        }
    }

    pub fn transform(mut f: impl FnMut(T) -> Result<T, BoxError> + 'static) -> Self
    where
        T: Default,
    {
        Self {
            f: Box::new(move |v: T| match f(v) {
                Ok(out) => out,
                Err(err) => {
                    tracing::warn!(error = %err, "Call (transform) failed");
                    T::default()
                }
            }),
        }
    }
}

impl<T: Default> Segment for Call<T> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        (self.f)(input)
    }

    impl_default_casts!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_falls_back_to_default_on_failure() {
        let mut call = Call::<i32>::transform(|v| {
            if v < 0 {
                Err("negative".into())
            } else {
                Ok(v * 2)
            }
        });
        assert_eq!(call.inject(3), 6);
        assert_eq!(call.inject(-1), 0);
    }

    #[test]
    fn mutate_applies_in_place() {
        let mut call = Call::<i32>::mutate(|v| {
            *v += 1;
            Ok(())
        });
        assert_eq!(call.inject(4), 5);
    }
}
