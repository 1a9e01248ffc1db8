//! The [`Segment`] trait: the unit of work in a chain.
//!
//! A segment is deliberately small. Most of its methods are optional, because most
//! concrete segments only care about one or two of them -- a `Buffer` cares about
//! `extract`, a `RateLimit` cares about `inject`, a `Transistor` cares about `trigger`.
//! Rather than forcing every segment to stub out the methods it doesn't use, the trait
//! gives each a default, and a segment advertises which ones it actually implements
//! through the `HAS_*` associated constants so a [`crate::composition::Composition`]
//! can pick the right segment out of a chain at compile time.
//!
//! `entry_cast`/`exit_cast` are the odd ones out: they can't have a default *method body*
//! at the trait level without forcing every implementor (even ones with unrelated `In`/
//! `Out` types) to satisfy a [`crate::cast::DefaultCast`] bound they have no use for. So
//! they're required methods, and [`crate::impl_default_casts`] is provided as a one-line
//! macro to fill them in wherever the default behavior (identity, or saturating numeric
//! conversion) is what's wanted.

/// One stateful step in a chain.
///
/// `In` is what flows into the segment on `inject`; `Out` is what flows out on `extract`.
/// A segment that doesn't care about one direction (e.g. a pure sink, or a pure source)
/// still declares both types, and leans on the defaults below for the side it doesn't use.
pub trait Segment {
    type In;
    type Out: Default;

    /// Set to `true` by segments that override [`Segment::inject`] with real logic,
    /// rather than deferring to `extract`.
    const HAS_INJECT: bool = false;
    /// Set to `true` by segments that override [`Segment::extract`] or
    /// [`Segment::extract_ref`].
    const HAS_EXTRACT: bool = false;
    /// Set to `true` by segments that override [`Segment::trigger`].
    const HAS_TRIGGER: bool = false;

    /// Feed a value in, get a value out.
    ///
    /// The default defers entirely to [`Segment::extract`], ignoring the input -- this is
    /// correct for segments like `Get` that always produce their value the same way
    /// regardless of what's pushed into them.
    fn inject(&mut self, input: Self::In) -> Self::Out {
        let _ = input;
        self.extract()
    }

    /// Read the segment's current output without pushing anything in.
    ///
    /// Default produces `Out::default()`; segments with real internal state (`Buffer`,
    /// `Mapped`, ...) override this.
    fn extract(&self) -> Self::Out {
        Self::Out::default()
    }

    /// Like [`Segment::extract`], but hands back a borrow into the segment's own storage
    /// when that's possible without copying. Returning `None` (the default) falls back to
    /// `extract` at the call site.
    fn extract_ref(&self) -> Option<&Self::Out> {
        None
    }

    /// Convert an `Out` backward into an `In`, used when a later segment's `extract`
    /// needs to be threaded back through an earlier stage that a chain skipped.
    fn entry_cast(&self, out: Self::Out) -> Self::In;

    /// Convert an `In` forward into an `Out`, used to run a value through a stage that
    /// wasn't itself the source of an `inject`/`trigger`/`extract` (e.g. to carry an
    /// upstream `extract` result past a stage that doesn't need to act on it).
    fn exit_cast(&self, input: Self::In) -> Self::Out;

    /// Attempt to fire the segment's own internal trigger condition (a timer, a
    /// threshold, ...), independent of any `inject`.
    ///
    /// Returns the segment's output either way; `*triggered` reports whether the
    /// condition actually fired. The default never fires.
    fn trigger(&mut self, triggered: &mut bool) -> Self::Out {
        *triggered = false;
        Self::Out::default()
    }
}
