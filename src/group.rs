//! [`Group`]: a collection of capped pipes that can be triggered together.
//!
//! Membership is by shared ownership, the same way the teacher reached for
//! `triomphe::Arc` wherever a graph node's lifetime wasn't tied to a single owner: a pipe
//! registered into a group stays alive as long as either the group or the caller's own
//! [`PipeHandle`] holds it, and `add`/`remove` dedupe by pointer identity
//! (`Arc::ptr_eq`-style) rather than by any notion of equality on the pipe's contents.
//!
//! Iteration order is insertion order, kept in a plain `Vec` rather than anything that
//! would reorder members behind the caller's back.
//!
//! Membership is deliberately *not* exclusive across groups: a `PipeHandle` is a shared
//! `Arc`, and nothing stops the same handle from being `add`ed to two different groups.
//! Enforcing exclusive ownership would mean a global handle->group registry, which this
//! crate's otherwise-local, no-shared-mutable-statics design has no other use for.

use std::cell::RefCell;

use triomphe::Arc;

use crate::composition::Composition;
use crate::pipe::CappedPipe;

/// A shared, interior-mutable handle to a pipe registered in a [`Group`].
pub type PipeHandle<C> = Arc<RefCell<CappedPipe<C>>>;

struct Member {
    ptr: *const (),
    trigger: Box<dyn FnMut() -> bool>,
}

/// A collection of capped pipes, triggered together in insertion order.
#[derive(Default)]
pub struct Group {
    members: Vec<Member>,
}

impl Group {
    pub fn new() -> Self {
        Self { members: Vec::new() }
    }

    /// Wrap `pipe` in a shared handle and register it. The returned handle is the only
    /// way to reach the pipe for direct `inject`/`extract` calls.
    pub fn insert<C: Composition + 'static>(&mut self, pipe: CappedPipe<C>) -> PipeHandle<C> {
        let handle: PipeHandle<C> = Arc::new(RefCell::new(pipe));
        self.add(handle.clone());
        handle
    }

    /// Register an existing handle. A no-op if this exact pipe (by pointer identity) is
    /// already a member.
    pub fn add<C: Composition + 'static>(&mut self, handle: PipeHandle<C>) {
        let ptr = Arc::as_ptr(&handle) as *const ();
        if self.members.iter().any(|m| m.ptr == ptr) {
            return;
        }
        self.members.push(Member {
            ptr,
            trigger: Box::new(move || handle.borrow_mut().trigger().0),
        });
    }

    /// Drop this group's reference to `handle`. The pipe itself survives if another
    /// handle (e.g. the one returned by `insert`) is still held elsewhere.
    pub fn remove<C: Composition + 'static>(&mut self, handle: &PipeHandle<C>) {
        let ptr = Arc::as_ptr(handle) as *const ();
        self.members.retain(|m| m.ptr != ptr);
    }

    /// Alias for [`Group::remove`], matching the vocabulary of destroying a member
    /// rather than merely forgetting about it -- the effect is the same either way,
    /// since the group never owns a pipe exclusively.
    pub fn destroy<C: Composition + 'static>(&mut self, handle: &PipeHandle<C>) {
        self.remove(handle);
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn destroy_all(&mut self) {
        self.clear();
    }

    /// Fire every member's trigger, in insertion order, each running to completion
    /// before the next starts. Returns whether *any* member actually fired.
    pub fn trigger(&mut self) -> bool {
        let mut any = false;
        for member in &mut self.members {
            any |= (member.trigger)();
        }
        any
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `handle` (by pointer identity) is currently a member.
    pub fn contains<C: Composition + 'static>(&self, handle: &PipeHandle<C>) -> bool {
        let ptr = Arc::as_ptr(handle) as *const ();
        self.members.iter().any(|m| m.ptr == ptr)
    }

    /// Iterate over the member identities, in insertion order. A `Group` erases each
    /// member's concrete `Composition` type down to its trigger closure, so all that's
    /// left to hand back is the opaque [`MemberId`] -- enough to drive [`Group::contains`]
    /// or to count members by hand, the Rust analogue of the source's `begin`/`end` pair.
    pub fn iter(&self) -> GroupIter<'_> {
        GroupIter {
            inner: self.members.iter(),
        }
    }
}

/// An opaque, `Copy`-able identity for a member of a [`Group`], comparable by
/// pointer identity but carrying no access to the underlying pipe.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MemberId(*const ());

pub struct GroupIter<'g> {
    inner: std::slice::Iter<'g, Member>,
}

impl Iterator for GroupIter<'_> {
    type Item = MemberId;

    fn next(&mut self) -> Option<MemberId> {
        self.inner.next().map(|m| MemberId(m.ptr))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'g> IntoIterator for &'g Group {
    type Item = MemberId;
    type IntoIter = GroupIter<'g>;

    fn into_iter(self) -> GroupIter<'g> {
        self.iter()
    }
}

thread_local! {
    static DEFAULT_GROUP: RefCell<Group> = RefCell::new(Group::new());
}

impl Group {
    /// Run `f` against the process's default group.
    ///
    /// The original design called for this to live behind a single process-wide
    /// `OnceLock`; it's thread-local instead, because a `Group`'s members hold
    /// `RefCell`s internally and there's no sound way to share one across threads
    /// without a lock this crate's single-threaded design has no use for. Callers that
    /// want an explicit, scoped group should just build their own with `Group::new()`.
    pub fn global<R>(f: impl FnOnce(&mut Group) -> R) -> R {
        DEFAULT_GROUP.with(|g| f(&mut g.borrow_mut()))
    }
}
