//! Interfaces a host application implements to let segments reach outside the pipe --
//! an object holding a single typed value (`ObjectRef`), a dynamically-typed slot
//! (`VariantRef`), and a multi-subscriber dispatcher (`SignalBus`). None of these are
//! implemented by this crate; `Get`/`Set`/`Signal` only borrow them by reference.

use crate::error::TypeMismatch;

/// A single, statically-typed external value: a field on some host object, a hardware
/// register, a config entry. Used by [`crate::segments::Get`]/[`crate::segments::Set`].
pub trait ObjectRef<T> {
    fn get(&self) -> T;
    fn set(&mut self, value: T);
}

/// An external value whose concrete type isn't known until runtime -- a dynamically
/// typed property table entry, say. `get`/`set` are generic so a single `VariantRef` can
/// back `Get<T>`/`Set<T>` segments for more than one `T`.
pub trait VariantRef {
    /// Whether the currently-held value is of type `T`.
    fn valid<T: 'static>(&self) -> bool;

    /// Read the current value as `T`.
    ///
    /// # Errors
    /// Returns [`TypeMismatch`] if the held value isn't actually a `T`.
    fn get<T: Clone + 'static>(&self) -> Result<T, TypeMismatch>;

    /// Overwrite the current value with a `T`.
    fn set<T: 'static>(&mut self, value: T);
}

/// A multi-subscriber dispatcher external to the pipe, invoked by
/// [`crate::segments::Signal`]. `key` distinguishes between named channels on the same
/// bus; a bus with no notion of channels can ignore it.
pub trait SignalBus<T> {
    fn call(&mut self, value: T);
    fn call_keyed(&mut self, key: &str, value: T);
}
