use smol_str::SmolStr;

use crate::impl_default_casts;
use crate::segment::Segment;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Invokes a callback with `(name, value)` for each injected value, then passes the
/// value through unchanged. A callback failure is logged and otherwise ignored -- `Log`
/// never corrupts the value flowing through it.
pub struct Log<T> {
    name: SmolStr,
    callback: Box<dyn FnMut(&str, &T) -> Result<(), BoxError>>,
}

impl<T> Log<T> {
    pub fn new(
        name: impl Into<SmolStr>,
        callback: impl FnMut(&str, &T) -> Result<(), BoxError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callback: Box::new(callback),
        }
    }
}

impl<T: Default> Segment for Log<T> {
    type In = T;
    type Out = T;

    const HAS_INJECT: bool = true;

    fn inject(&mut self, input: T) -> T {
        if let Err(err) = (self.callback)(&self.name, &input) {
            tracing::warn!(segment = %self.name, error = %err, "Log callback failed");
        }
        input
    }

    impl_default_casts!();
}
