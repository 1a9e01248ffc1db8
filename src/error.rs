//! Error types raised while a [`crate::group::Group`] or a standalone pipe runs.
//!
//! Everything that can be caught by the type checker (mismatched segment types, missing
//! casts) *is* caught by the type checker -- see [`crate::cast`] and [`crate::composition`].
//! What's left here covers the handful of checks that can only be made against a concrete
//! runtime value or a concrete graph of pipes, mirroring how the teacher's own
//! `TypeMismatch` worked for its one genuinely dynamic type check.

use crate::utils::LogErr;

/// A value wasn't the dynamic type a variant-like external reference expected.
#[derive(Debug, thiserror::Error)]
#[error("expected a value of type {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: String,
    pub found: String,
}

impl TypeMismatch {
    pub fn new<E: 'static, F: 'static>() -> Self {
        Self {
            expected: disqualified::ShortName::of::<E>().to_string(),
            found: disqualified::ShortName::of::<F>().to_string(),
        }
    }
}

/// Attempted to call `connect`/`disconnect`/`extend` on a capped pipe.
#[derive(Debug, thiserror::Error)]
#[error("cannot connect a capped pipe ({0}); cap() was called on this chain")]
pub struct CappedPipeError(pub &'static str);

/// A [`crate::segments::Tee`] was built with zero outputs, or a [`crate::segments::Mux`]
/// was built with zero inputs.
#[derive(Debug, thiserror::Error)]
#[error("{0} requires at least one connected endpoint")]
pub struct EmptyFanError(pub &'static str);

/// Returned by [`crate::pipe::OpenPipe::connect_checked`] when a connection already
/// exists -- the non-panicking alternative to `connect`'s silent replace.
#[derive(Debug, thiserror::Error)]
#[error("pipe already has a downstream connection")]
pub struct AlreadyConnectedError;

impl LogErr for TypeMismatch {
    fn log_err(&self) {
        tracing::error!("{self}");
    }
}
impl LogErr for CappedPipeError {
    fn log_err(&self) {
        tracing::error!("{self}");
    }
}
impl LogErr for EmptyFanError {
    fn log_err(&self) {
        tracing::error!("{self}");
    }
}
impl LogErr for AlreadyConnectedError {
    fn log_err(&self) {
        tracing::error!("{self}");
    }
}
