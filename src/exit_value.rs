//! [`ExitValue`]: what comes back out of a pipe's `extract`.
//!
//! A chain's `extract` sometimes can hand back a direct reference into a segment's own
//! storage (a `Buffer` holding the value already) and sometimes has to manufacture a new
//! value on the spot (when a later segment's `exit_cast` has to run first). `ExitValue`
//! carries either without forcing the caller to pay for a clone in the borrowed case, or
//! to juggle two different return types depending on which one happened.

use std::fmt;
use std::ops::Deref;

/// Either a borrow into a pipe's internal state, or a value computed just for this call.
///
/// Comparisons and `Deref` only ever look at the contained `T` -- callers that don't care
/// which variant they got can mostly ignore this type exists.
pub enum ExitValue<'a, T> {
    Borrowed(&'a T),
    Owned(T),
}

impl<'a, T> ExitValue<'a, T> {
    pub fn borrowed(value: &'a T) -> Self {
        ExitValue::Borrowed(value)
    }

    pub fn owned(value: T) -> Self {
        ExitValue::Owned(value)
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, ExitValue::Borrowed(_))
    }

    pub fn as_ref(&self) -> &T {
        match self {
            ExitValue::Borrowed(v) => v,
            ExitValue::Owned(v) => v,
        }
    }

    /// Consume self, producing an owned `T` (cloning only in the borrowed case).
    pub fn into_owned(self) -> T
    where
        T: Clone,
    {
        match self {
            ExitValue::Borrowed(v) => v.clone(),
            ExitValue::Owned(v) => v,
        }
    }

    /// Move the contained value into `dst`, cloning only if this is a borrow.
    pub fn move_into(self, dst: &mut T)
    where
        T: Clone,
    {
        match self {
            ExitValue::Borrowed(v) => dst.clone_from(v),
            ExitValue::Owned(v) => *dst = v,
        }
    }
}

impl<'a, T> Deref for ExitValue<'a, T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.as_ref()
    }
}

impl<'a, T: PartialEq> PartialEq for ExitValue<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for ExitValue<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitValue::Borrowed(v) => f.debug_tuple("Borrowed").field(v).finish(),
            ExitValue::Owned(v) => f.debug_tuple("Owned").field(v).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExitValue;

    #[test]
    fn borrowed_and_owned_compare_equal() {
        let x = 5i32;
        let a = ExitValue::borrowed(&x);
        let b = ExitValue::<i32>::owned(5);
        assert_eq!(a, b);
        assert!(a.is_borrowed());
        assert!(!b.is_borrowed());
    }

    #[test]
    fn move_into_clones_only_when_borrowed() {
        let x = String::from("hi");
        let mut dst = String::new();
        ExitValue::borrowed(&x).move_into(&mut dst);
        assert_eq!(dst, "hi");
        assert_eq!(x, "hi");
    }
}
