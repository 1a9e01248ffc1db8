//! [`Composition`]: a statically-typed, heterogeneous chain of [`Segment`]s.
//!
//! There's no single concrete "chain" type -- a chain of three segments is a different
//! Rust type than a chain of four. `End<S>` is a chain of exactly one segment; `Link<P,
//! S>` appends one more segment `S` onto the end of an existing chain `P`, with the
//! adjacency between them (`S::In == P::Out`) enforced by the `where` clause on the impl,
//! not by a runtime check. A chain that doesn't type-check doesn't compile.
//!
//! This is the generic/static half of the two-layer design described in
//! [`crate::pipe`]; the object-safe half (`PipeEntry`/`PipeExit`) is what lets pipes built
//! from different concrete chains be stored and connected together at runtime.

use crate::segment::Segment;

/// A statically-typed chain of segments, built up one [`Segment`] at a time.
///
/// Implemented by [`End`] (a chain of one) and [`Link`] (an existing chain with one more
/// segment appended). Building a chain through [`crate::builder::Entry`] and the `>>`
/// operator produces nested `Link<Link<End<S0>, S1>, S2>`-shaped types; application code
/// is never expected to name them.
pub trait Composition {
    type In;
    type Out: Default;

    /// Whether any segment in the chain has a genuine `inject`.
    const HAS_INJECT: bool;
    /// Whether any segment in the chain has a genuine `extract`.
    const HAS_EXTRACT: bool;
    /// Whether any segment in the chain has a genuine `trigger`.
    const HAS_TRIGGER: bool;

    fn inject(&mut self, input: Self::In) -> Self::Out;
    fn extract(&self) -> Self::Out;
    fn extract_ref(&self) -> Option<&Self::Out>;
    fn entry_cast(&self, out: Self::Out) -> Self::In;
    fn exit_cast(&self, input: Self::In) -> Self::Out;
    fn trigger(&mut self, triggered: &mut bool) -> Self::Out;
}

/// A chain consisting of exactly one segment.
pub struct End<S>(pub S);

impl<S: Segment> Composition for End<S> {
    type In = S::In;
    type Out = S::Out;

    const HAS_INJECT: bool = S::HAS_INJECT;
    const HAS_EXTRACT: bool = S::HAS_EXTRACT;
    const HAS_TRIGGER: bool = S::HAS_TRIGGER;

    fn inject(&mut self, input: Self::In) -> Self::Out {
        self.0.inject(input)
    }
    fn extract(&self) -> Self::Out {
        self.0.extract()
    }
    fn extract_ref(&self) -> Option<&Self::Out> {
        self.0.extract_ref()
    }
    fn entry_cast(&self, out: Self::Out) -> Self::In {
        self.0.entry_cast(out)
    }
    fn exit_cast(&self, input: Self::In) -> Self::Out {
        self.0.exit_cast(input)
    }
    fn trigger(&mut self, triggered: &mut bool) -> Self::Out {
        self.0.trigger(triggered)
    }
}

/// An existing chain `P` with one more segment `S` appended at the tail.
pub struct Link<P, S> {
    pub(crate) prefix: P,
    pub(crate) last: S,
}

impl<P, S> Composition for Link<P, S>
where
    P: Composition,
    S: Segment<In = P::Out>,
{
    type In = P::In;
    type Out = S::Out;

    const HAS_INJECT: bool = P::HAS_INJECT || S::HAS_INJECT;
    const HAS_EXTRACT: bool = P::HAS_EXTRACT || S::HAS_EXTRACT;
    const HAS_TRIGGER: bool = P::HAS_TRIGGER || S::HAS_TRIGGER;

    fn inject(&mut self, input: Self::In) -> Self::Out {
        let mid = self.prefix.inject(input);
        self.last.inject(mid)
    }

    fn extract(&self) -> Self::Out {
        if S::HAS_EXTRACT {
            self.last.extract()
        } else if P::HAS_EXTRACT {
            self.last.exit_cast(self.prefix.extract())
        } else {
            Self::Out::default()
        }
    }

    fn extract_ref(&self) -> Option<&Self::Out> {
        // Borrowing is only sound when the extract source is the tail of the whole
        // chain -- as soon as a later stage's exit_cast has to run, the value must be
        // materialized, so we fall back to the owned path in `extract`.
        if S::HAS_EXTRACT {
            self.last.extract_ref()
        } else {
            None
        }
    }

    fn entry_cast(&self, out: Self::Out) -> Self::In {
        let mid = self.last.entry_cast(out);
        self.prefix.entry_cast(mid)
    }

    fn exit_cast(&self, input: Self::In) -> Self::Out {
        let mid = self.prefix.exit_cast(input);
        self.last.exit_cast(mid)
    }

    fn trigger(&mut self, triggered: &mut bool) -> Self::Out {
        if P::HAS_TRIGGER {
            let mid = self.prefix.trigger(triggered);
            if *triggered {
                self.last.inject(mid)
            } else {
                self.last.exit_cast(mid)
            }
        } else if S::HAS_TRIGGER {
            self.last.trigger(triggered)
        } else {
            *triggered = false;
            Self::Out::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_default_casts;

    struct AddOne(i32);
    impl Segment for AddOne {
        type In = i32;
        type Out = i32;
        const HAS_INJECT: bool = true;
        fn inject(&mut self, input: i32) -> i32 {
            self.0 = input + 1;
            self.0
        }
        impl_default_casts!();
    }

    struct LastSeen(i32);
    impl Segment for LastSeen {
        type In = i32;
        type Out = i32;
        const HAS_INJECT: bool = true;
        const HAS_EXTRACT: bool = true;
        fn inject(&mut self, input: i32) -> i32 {
            self.0 = input;
            input
        }
        fn extract(&self) -> i32 {
            self.0
        }
        impl_default_casts!();
    }

    #[test]
    fn link_chains_inject_in_order() {
        let mut chain = Link {
            prefix: End(AddOne(0)),
            last: LastSeen(0),
        };
        assert_eq!(chain.inject(4), 5);
        assert_eq!(chain.extract(), 5);
    }

    #[test]
    fn extract_uses_last_capable_segment() {
        // prefix has extract, last does not -> must flow through last's exit_cast.
        let chain = Link {
            prefix: End(LastSeen(9)),
            last: AddOne(0),
        };
        assert_eq!(chain.extract(), 9);
    }
}
