//! `flowchain` -- composable, statically-typed chains of stateful processing segments.
//!
//! A [`segment::Segment`] is the unit of work: something that consumes a value on
//! `inject`, can be asked for its current value on `extract`, and can fire its own
//! trigger condition independent of either. [`composition::Composition`] chains
//! segments together at compile time via [`builder::Entry`] and the `>>` operator;
//! [`pipe::CappedPipe`]/[`pipe::OpenPipe`] erase that static chain type behind an
//! object-safe interface so pipes built from unrelated chains can be wired together and
//! grouped at runtime through [`group::Group`].
//!
//! The [`segments`] module collects the stock, ready-to-use segments; [`external`]
//! defines the traits a host application implements to plug its own state (objects,
//! variants, signal buses) into a chain.

pub mod builder;
pub mod cast;
pub mod composition;
pub mod error;
pub mod exit_value;
pub mod external;
pub mod group;
pub mod pipe;
pub mod segment;
pub mod segments;
pub mod utils;

pub use builder::Entry;
pub use composition::Composition;
pub use error::{AlreadyConnectedError, CappedPipeError, EmptyFanError, TypeMismatch};
pub use exit_value::ExitValue;
pub use group::{Group, GroupIter, MemberId};
pub use pipe::{CappedPipe, EntryHandle, ExitHandle, OpenPipe, PipeEntry, PipeExit, SpliceHandle, SplicePoint};
pub use segment::Segment;
