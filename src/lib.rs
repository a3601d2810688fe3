//! Generic sequence traversal and lazy views.
//!
//! A [`Sequence`] hands out a [`Cursor`] and a [`Sentinel`] marking where traversal stops. Cursor
//! traits form a refinement chain described by [`Capability`], and every adaptor in [`views`]
//! computes its own capability from the capabilities of the sequences it wraps.
//!
//! The free functions re-exported from [`dispatch`] are the uniform access layer: they answer
//! `count`, `is_empty`, `storage` and the endpoint queries for any sequence, preferring the
//! sequence's own hooks and deriving the answer from its cursors otherwise.

pub mod constant;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod pipe;
pub mod reverse;
pub mod sequence;
pub mod slot;
pub mod subrange;
pub mod views;

#[cfg(test)]
mod testing;

pub use constant::{
    AsConstView, ConstCommonSequence, ConstCursor, ConstSentinel, ConstSequence, Demote,
    IntoConst, as_const,
};
pub use cursor::{
    BidiCursor, Capability, CommonSentinel, ContiguousCursor, Cursor, End, Exhaust, Finishing,
    ForwardCursor, RandomCursor, Seek, Sentinel, Unreachable,
};
pub use dispatch::{
    Strategy, count_of, end_of, is_empty, move_element, rend_of, rstart_of, signed_count_of,
    start_of, storage_of, swap_elements,
};
pub use error::ViewError;
pub use host::{Cells, Input, Iota, IotaFrom, Nul, SliceCursor, StrCursor, UntilNul};
pub use pipe::{Adaptor, Chain};
pub use reverse::{ReverseView, Reversed, reverse};
pub use sequence::{
    Borrowed, CommonSequence, Count, Sequence, SequenceExt, Walk, start_or_dangling,
};
pub use slot::{Movable, Slot, SlotRef, Writable};
pub use subrange::Subrange;
