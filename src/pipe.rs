//! The object-safe half of the pipe design: [`PipeEntry`]/[`PipeExit`] let pipes built
//! from unrelated concrete [`Composition`] types be stored and wired together at runtime,
//! the same way the underlying chain lets them be built and run with full static typing.
//!
//! This mirrors how the teacher's `Component` trait stayed `dyn`-safe even though each
//! concrete component's internal state was arbitrary: the generic/static side
//! ([`Composition`]) does the type-checked work, and a thin object-safe face is what gets
//! handed around and stored.

use std::cell::RefCell;
use std::rc::Rc;

use crate::composition::Composition;
use crate::error::CappedPipeError;
use crate::exit_value::ExitValue;
use crate::utils::LogErr;

/// The write side of a pipe: something that accepts a `T` and does something with it.
pub trait PipeEntry<T> {
    fn inject(&mut self, value: T);
}

/// The read side of a pipe: something that can be asked for its current value, or asked
/// to fire its own trigger condition.
pub trait PipeExit<T> {
    fn extract(&self) -> ExitValue<'_, T>;
    /// Attempt to fire the pipe's internal trigger; returns whether it fired and the
    /// resulting value either way.
    fn trigger(&mut self) -> (bool, T);
}

/// A shared handle to a pipe's entry side, used to wire an [`OpenPipe`]'s output forward
/// into whatever consumes it.
pub type EntryHandle<T> = Rc<RefCell<dyn PipeEntry<T>>>;

/// A shared handle to a pipe's exit side, used by fan-in segments like
/// [`crate::segments::Mux`].
pub type ExitHandle<T> = Rc<RefCell<dyn PipeExit<T>>>;

/// An open pipe's connect/disconnect surface, exposed as an object-safe trait so
/// [`OpenPipe::extend`] can splice one open pipe into another's downstream link without
/// either side knowing the other's concrete `Composition` type.
pub trait SplicePoint<T>: PipeEntry<T> {
    fn connect(&mut self, entry: EntryHandle<T>);
    fn disconnect(&mut self);
}

impl<C: Composition> SplicePoint<C::Out> for OpenPipe<C>
where
    C::Out: Clone,
{
    fn connect(&mut self, entry: EntryHandle<C::Out>) {
        OpenPipe::connect(self, entry);
    }
    fn disconnect(&mut self) {
        OpenPipe::disconnect(self);
    }
}

/// A shared handle to a splice-able open pipe, used as the argument to
/// [`OpenPipe::extend`].
pub type SpliceHandle<T> = Rc<RefCell<dyn SplicePoint<T>>>;

/// Adapts a [`SpliceHandle`] into a plain [`EntryHandle`], so a pipe spliced in via
/// `extend` can be stored in `OpenPipe::downstream` the same way any other downstream
/// target is.
struct AsEntry<T>(SpliceHandle<T>);

impl<T> PipeEntry<T> for AsEntry<T> {
    fn inject(&mut self, value: T) {
        self.0.borrow_mut().inject(value);
    }
}

/// A pipe whose output end is sealed: nothing can be connected onto it.
///
/// Produced by calling `.cap()` on a chain built through [`crate::builder::Entry`]. A
/// capped pipe is still fully usable through `inject`/`extract`/`trigger` and through the
/// object-safe [`PipeEntry`]/[`PipeExit`] traits -- "capped" only means its tail can't
/// grow any further.
pub struct CappedPipe<C> {
    composition: C,
}

impl<C: Composition> CappedPipe<C> {
    pub(crate) fn new(composition: C) -> Self {
        Self { composition }
    }

    pub fn inject(&mut self, input: C::In) -> ExitValue<'_, C::Out> {
        ExitValue::owned(self.composition.inject(input))
    }

    pub fn extract(&self) -> ExitValue<'_, C::Out> {
        match self.composition.extract_ref() {
            Some(r) => ExitValue::borrowed(r),
            None => ExitValue::owned(self.composition.extract()),
        }
    }

    /// Fire the chain's trigger condition. Returns whether it fired, and the resulting
    /// value either way.
    pub fn trigger(&mut self) -> (bool, C::Out) {
        let mut fired = false;
        let value = self.composition.trigger(&mut fired);
        (fired, value)
    }
}

impl<C: Composition> PipeEntry<C::In> for CappedPipe<C> {
    fn inject(&mut self, value: C::In) {
        let _ = CappedPipe::inject(self, value);
    }
}

impl<C: Composition> PipeExit<C::Out> for CappedPipe<C> {
    fn extract(&self) -> ExitValue<'_, C::Out> {
        CappedPipe::extract(self)
    }
    fn trigger(&mut self) -> (bool, C::Out) {
        CappedPipe::trigger(self)
    }
}

/// A pipe whose output end is open: its output can be connected onto another pipe's
/// entry, so that every `inject`/`extract`/`trigger` also forwards the result downstream.
pub struct OpenPipe<C>
where
    C: Composition,
{
    composition: C,
    downstream: Option<EntryHandle<C::Out>>,
}

impl<C: Composition> OpenPipe<C>
where
    C::Out: Clone,
{
    pub(crate) fn new(composition: C) -> Self {
        Self {
            composition,
            downstream: None,
        }
    }

    /// Connect this pipe's output onto `entry`, replacing any existing connection. If
    /// any segment in the chain supports `extract`, the current value is immediately
    /// re-extracted and pushed into `entry` -- so a segment already holding a value (a
    /// `Buffer`, a `Changes`) doesn't have to wait for the next `inject`/`trigger`
    /// before the new downstream sees it.
    pub fn connect(&mut self, entry: EntryHandle<C::Out>) {
        if C::HAS_EXTRACT {
            let current = self.extract().into_owned();
            entry.borrow_mut().inject(current);
        }
        self.downstream = Some(entry);
    }

    /// Like [`OpenPipe::connect`], but refuses to silently replace an existing
    /// connection: returns `Err` (without disturbing the current connection) if one is
    /// already present.
    pub fn connect_checked(
        &mut self,
        entry: EntryHandle<C::Out>,
    ) -> Result<(), crate::error::AlreadyConnectedError> {
        if self.downstream.is_some() {
            return Err(crate::error::AlreadyConnectedError.and_log_err());
        }
        self.connect(entry);
        Ok(())
    }

    /// Remove this pipe's downstream connection, if any.
    pub fn disconnect(&mut self) {
        self.downstream = None;
    }

    /// The current downstream connection, if any.
    pub fn connection(&self) -> Option<&EntryHandle<C::Out>> {
        self.downstream.as_ref()
    }

    fn forward(&self, value: &C::Out) {
        if let Some(entry) = &self.downstream {
            entry.borrow_mut().inject(value.clone());
        }
    }

    pub fn inject(&mut self, input: C::In) -> C::Out {
        let out = self.composition.inject(input);
        self.forward(&out);
        out
    }

    pub fn extract(&self) -> ExitValue<'_, C::Out> {
        match self.composition.extract_ref() {
            Some(r) => ExitValue::borrowed(r),
            None => ExitValue::owned(self.composition.extract()),
        }
    }

    pub fn trigger(&mut self) -> (bool, C::Out) {
        let mut fired = false;
        let value = self.composition.trigger(&mut fired);
        if fired {
            self.forward(&value);
        }
        (fired, value)
    }

    /// Splice `p` in between this pipe and whatever it's currently connected to: `p`
    /// inherits this pipe's existing downstream connection (or is disconnected, if
    /// there wasn't one), and this pipe connects to `p` in its place.
    pub fn extend(&mut self, p: SpliceHandle<C::Out>) {
        match self.downstream.take() {
            Some(prev) => p.borrow_mut().connect(prev),
            None => p.borrow_mut().disconnect(),
        }
        self.connect(Rc::new(RefCell::new(AsEntry(p))));
    }

    /// Connect `other` onto this pipe's output and return a shared handle to it, so
    /// further pipes can be chained onto that handle in turn. The source's `op|`
    /// operator chaining, expressed as a method rather than `std::ops::BitOr`: `OpenPipe`
    /// has no `Clone`, so overloading a by-value operator would force awkward ownership
    /// transfer that doesn't fit how a pipe is otherwise kept alive (by a binding or a
    /// `Group`) while it's connected.
    pub fn pipe_into<D>(&mut self, other: D) -> Rc<RefCell<D>>
    where
        D: PipeEntry<C::Out> + 'static,
    {
        let handle = Rc::new(RefCell::new(other));
        self.connect(handle.clone());
        handle
    }
}

impl<C: Composition> PipeEntry<C::In> for OpenPipe<C>
where
    C::Out: Clone,
{
    fn inject(&mut self, value: C::In) {
        let _ = OpenPipe::inject(self, value);
    }
}

impl<C: Composition> PipeExit<C::Out> for OpenPipe<C>
where
    C::Out: Clone,
{
    fn extract(&self) -> ExitValue<'_, C::Out> {
        OpenPipe::extract(self)
    }
    fn trigger(&mut self) -> (bool, C::Out) {
        OpenPipe::trigger(self)
    }
}

/// Attempting to connect a capped pipe is a programmer error: the type system normally
/// prevents it (capped pipes don't expose `connect`), but stock segments like `Tee` store
/// their downstream endpoints behind `PipeEntry<T>` and have to report the mistake at run
/// time if handed a handle to something that turned out to be capped upstream of them.
pub fn capped_connect_error(context: &'static str) -> CappedPipeError {
    CappedPipeError(context).and_log_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::End;
    use crate::impl_default_casts;
    use crate::segment::Segment;

    struct Double;
    impl Segment for Double {
        type In = i32;
        type Out = i32;
        const HAS_INJECT: bool = true;
        fn inject(&mut self, input: i32) -> i32 {
            input * 2
        }
        impl_default_casts!();
    }

    #[test]
    fn capped_pipe_injects_and_extracts() {
        let mut pipe = CappedPipe::new(End(Double));
        let out = pipe.inject(21);
        assert_eq!(*out, 42);
    }

    #[test]
    fn open_pipe_forwards_downstream() {
        struct Sink(i32);
        impl PipeEntry<i32> for Sink {
            fn inject(&mut self, value: i32) {
                self.0 = value;
            }
        }
        let sink = Rc::new(RefCell::new(Sink(0)));
        let mut pipe = OpenPipe::new(End(Double));
        pipe.connect(sink.clone());
        pipe.inject(10);
        assert_eq!(sink.borrow().0, 20);
    }

    #[test]
    fn connect_immediately_pushes_the_current_value() {
        use crate::segments::Buffer;

        struct Sink(i32);
        impl PipeEntry<i32> for Sink {
            fn inject(&mut self, value: i32) {
                self.0 = value;
            }
        }
        let mut upstream = OpenPipe::new(End(Buffer::with_initial(7)));
        let sink = Rc::new(RefCell::new(Sink(0)));
        assert_eq!(sink.borrow().0, 0);
        upstream.connect(sink.clone());
        assert_eq!(sink.borrow().0, 7);
    }

    #[test]
    fn connect_without_extract_does_not_push_a_default() {
        struct Sink(Vec<i32>);
        impl PipeEntry<i32> for Sink {
            fn inject(&mut self, value: i32) {
                self.0.push(value);
            }
        }
        let sink = Rc::new(RefCell::new(Sink(Vec::new())));
        let mut pipe = OpenPipe::new(End(Double));
        pipe.connect(sink.clone());
        assert!(sink.borrow().0.is_empty());
    }

    #[test]
    fn connect_checked_refuses_a_second_connection() {
        struct Sink(i32);
        impl PipeEntry<i32> for Sink {
            fn inject(&mut self, value: i32) {
                self.0 = value;
            }
        }
        let first = Rc::new(RefCell::new(Sink(0)));
        let second = Rc::new(RefCell::new(Sink(0)));
        let mut pipe = OpenPipe::new(End(Double));
        pipe.connect_checked(first.clone()).unwrap();
        let err = pipe.connect_checked(second.clone());
        assert!(err.is_err());
        pipe.inject(4);
        assert_eq!(first.borrow().0, 8);
        assert_eq!(second.borrow().0, 0);
    }

    #[test]
    fn extend_splices_in_between_a_pipe_and_its_downstream() {
        struct Sink(i32);
        impl PipeEntry<i32> for Sink {
            fn inject(&mut self, value: i32) {
                self.0 = value;
            }
        }
        let sink = Rc::new(RefCell::new(Sink(0)));
        let mut head = OpenPipe::new(End(Double));
        head.connect(sink.clone());

        let middle: SpliceHandle<i32> = Rc::new(RefCell::new(OpenPipe::new(End(Double))));
        head.extend(middle);

        head.inject(5);
        // 5 -> Double (head) -> 10 -> Double (middle) -> 20 -> sink
        assert_eq!(sink.borrow().0, 20);
    }

    #[test]
    fn pipe_into_returns_a_handle_for_further_chaining() {
        struct Sink(i32);
        impl PipeEntry<i32> for Sink {
            fn inject(&mut self, value: i32) {
                self.0 = value;
            }
        }
        let mut pipe = OpenPipe::new(End(Double));
        let sink = pipe.pipe_into(Sink(0));
        pipe.inject(3);
        assert_eq!(sink.borrow().0, 6);
    }
}
