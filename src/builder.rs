//! The chain-construction DSL: `Entry::<T>::new() >> seg0 >> seg1 >> ... >> segN`,
//! terminated by `.cap()`, `.exit()`, or `.ref_into(&mut group)`.
//!
//! Rust has no `|>` operator, so `std::ops::Shr` (`>>`) stands in for it here, the same
//! way it's widely reused for builder chaining elsewhere in the ecosystem (`iterator >>
//! stage` reads the same left-to-right as the pipe syntax it replaces).

use std::ops::Shr;

use crate::composition::{Composition, End, Link};
use crate::group::Group;
use crate::pipe::{CappedPipe, OpenPipe};
use crate::segment::Segment;
use crate::segments::identity::Identity;

/// The empty root of a chain, carrying only the entry type `T`.
pub struct Entry<T>(std::marker::PhantomData<fn() -> T>);

impl<T> Entry<T> {
    pub fn new() -> Self {
        Entry(std::marker::PhantomData)
    }
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A chain under construction, wrapping a concrete [`Composition`].
pub struct Chain<C>(pub(crate) C);

impl<T, S> Shr<S> for Entry<T>
where
    S: Segment<In = T>,
{
    type Output = Chain<End<S>>;
    fn shr(self, seg: S) -> Self::Output {
        Chain(End(seg))
    }
}

impl<C, S> Shr<S> for Chain<C>
where
    C: Composition,
    S: Segment<In = C::Out>,
{
    type Output = Chain<Link<C, S>>;
    fn shr(self, seg: S) -> Self::Output {
        Chain(Link {
            prefix: self.0,
            last: seg,
        })
    }
}

impl<C: Composition> Chain<C> {
    /// Seal the chain's output: no further segments or connections can be added.
    pub fn cap(self) -> CappedPipe<C> {
        const fn assert_has_inject<C: Composition>() {
            assert!(
                C::HAS_INJECT,
                "composition has no segment implementing inject; the head can never accept a value"
            );
        }
        assert_has_inject::<C>();
        CappedPipe::new(self.0)
    }

    /// Leave the chain's output open for connection to downstream pipes.
    pub fn exit(self) -> OpenPipe<C>
    where
        C::Out: Clone,
    {
        const fn assert_has_inject<C: Composition>() {
            assert!(
                C::HAS_INJECT,
                "composition has no segment implementing inject; the head can never accept a value"
            );
        }
        assert_has_inject::<C>();
        OpenPipe::new(self.0)
    }

    /// Seal the chain and register it in `group`, returning the group-relative handle.
    pub fn ref_into(self, group: &mut Group) -> crate::group::PipeHandle<C>
    where
        C: 'static,
    {
        group.insert(self.cap())
    }
}

impl<T: Default + 'static> Entry<T> {
    /// Shorthand for `Entry::new() >> Identity::new()).cap()`: capping an `Entry`
    /// directly inserts an implicit [`Identity`] stage.
    pub fn cap(self) -> CappedPipe<End<Identity<T>>> {
        Chain(End(Identity::new())).cap()
    }

    /// Shorthand for `(Entry::new() >> Identity::new()).exit()`.
    pub fn exit(self) -> OpenPipe<End<Identity<T>>>
    where
        T: Clone,
    {
        Chain(End(Identity::new())).exit()
    }
}
