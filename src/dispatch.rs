//! Uniform access operations over any [`Sequence`].
//!
//! Each operation tries its strategies in a fixed order and stops at the first one the sequence
//! type supports: the type's own member hook, the built-in rule for raw arrays, the reversing
//! adapter (reverse operations only), then a fallback derived from the cursors. The `*_strategy`
//! functions report which of these served a given call.

use crate::{
    constant::{ConstCommonSequence, ConstSequence},
    cursor::{BidiCursor, Capability, ContiguousCursor, Cursor, Sentinel, distance},
    reverse::Reversed,
    sequence::{CommonSequence, Count, Sequence},
    slot::{Movable, Writable},
};

/// Which strategy served a dispatched operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The sequence's own hook (or its host trait impl)
    Member,
    /// The built-in rule for raw fixed-length arrays
    Builtin,
    /// A forward pair wrapped in [`Reversed`]
    Reversed,
    /// Computed from the start cursor and sentinel
    Derived,
    /// Mutable path demoted through [`ConstCursor`](crate::ConstCursor)
    Wrapped,
}

fn endpoint_strategy<S: Sequence>() -> Strategy {
    if S::HOST_ARRAY {
        Strategy::Builtin
    } else {
        Strategy::Member
    }
}

pub fn start_of<S: Sequence>(seq: &S) -> S::Cursor {
    seq.start()
}

pub fn end_of<S: Sequence>(seq: &S) -> S::Sentinel {
    seq.end()
}

pub fn start_strategy<S: Sequence>(_: &S) -> Strategy {
    endpoint_strategy::<S>()
}

pub fn end_strategy<S: Sequence>(_: &S) -> Strategy {
    endpoint_strategy::<S>()
}

/// Start of the backward traversal of `seq`
pub fn rstart_of<S>(seq: &S) -> Reversed<S::Cursor>
where
    S: CommonSequence,
    S::Cursor: BidiCursor,
{
    Reversed::new(seq.finish())
}

/// End of the backward traversal of `seq`
pub fn rend_of<S>(seq: &S) -> Reversed<S::Cursor>
where
    S: CommonSequence,
    S::Cursor: BidiCursor,
{
    Reversed::new(seq.start())
}

pub fn reverse_strategy<S>(_: &S) -> Strategy
where
    S: CommonSequence,
    S::Cursor: BidiCursor,
{
    Strategy::Reversed
}

fn select_count<S: Sequence>(seq: &S) -> Option<(S::Count, Strategy)> {
    if let Some(n) = seq.count() {
        return Some((n, Strategy::Member));
    }

    if S::HOST_ARRAY {
        let n = distance(seq.start(), &seq.end());
        return Some((S::Count::from_usize(n), Strategy::Builtin));
    }

    if S::DISABLE_COUNT || !S::Cursor::CAPABILITY.at_least(Capability::Bidirectional) {
        return None;
    }

    let n = seq.end().remaining(&seq.start())?;
    log::trace!("count derived from cursor distance: {n}");
    Some((S::Count::from_usize(n.max(0) as usize), Strategy::Derived))
}

/// Number of elements in `seq`, if it can be known without walking the sequence.
///
/// A type's own [`Sequence::count`] always wins. Otherwise the count is measured between start
/// and sentinel, but only for bidirectional or better cursors whose sentinel can measure in O(1)
/// and only when [`Sequence::DISABLE_COUNT`] is not set.
pub fn count_of<S: Sequence>(seq: &S) -> Option<S::Count> {
    select_count(seq).map(|(n, _)| n)
}

pub fn count_strategy<S: Sequence>(seq: &S) -> Option<Strategy> {
    select_count(seq).map(|(_, strategy)| strategy)
}

/// [`count_of`] converted to the signed counterpart of its own width
pub fn signed_count_of<S: Sequence>(seq: &S) -> Option<<S::Count as Count>::Signed> {
    count_of(seq).map(Count::to_signed)
}

fn select_empty<S: Sequence>(seq: &S) -> (bool, Strategy) {
    if let Some(empty) = seq.is_empty_hint() {
        return (empty, Strategy::Member);
    }

    if let Some(n) = seq.count() {
        return (n.is_zero(), Strategy::Member);
    }

    log::trace!("emptiness derived from start and sentinel");
    (seq.end().reached(&seq.start()), Strategy::Derived)
}

/// Whether `seq` has no elements.
///
/// Calling this on a single-pass sequence may consume it, as for any other use of
/// [`Sequence::start`].
pub fn is_empty<S: Sequence>(seq: &S) -> bool {
    select_empty(seq).0
}

pub fn empty_strategy<S: Sequence>(seq: &S) -> Strategy {
    select_empty(seq).1
}

fn select_storage<S>(seq: &S) -> (*const <S::Cursor as ContiguousCursor>::Element, Strategy)
where
    S: Sequence,
    S::Cursor: ContiguousCursor,
{
    if let Some(ptr) = seq.storage() {
        return (ptr, Strategy::Member);
    }

    log::trace!("storage derived from the address of the first element");
    (seq.start().address(), Strategy::Derived)
}

/// Address of the first element of a contiguous sequence
pub fn storage_of<S>(seq: &S) -> *const <S::Cursor as ContiguousCursor>::Element
where
    S: Sequence,
    S::Cursor: ContiguousCursor,
{
    select_storage(seq).0
}

pub fn storage_strategy<S>(seq: &S) -> Strategy
where
    S: Sequence,
    S::Cursor: ContiguousCursor,
{
    select_storage(seq).1
}

/// Move the element at `cursor` out, leaving whatever the element's proxy leaves behind
pub fn move_element<C>(cursor: &C) -> <C::Item as Movable>::Value
where
    C: Cursor,
    C::Item: Movable,
{
    cursor.move_out()
}

/// Exchange the elements at `a` and `b`
pub fn swap_elements<C>(a: &C, b: &C)
where
    C: Cursor,
    C::Item: Writable,
{
    a.swap_with(b);
}

pub fn const_start_of<S: ConstSequence>(seq: &S) -> S::ConstCursor {
    seq.const_start()
}

pub fn const_end_of<S: ConstSequence>(seq: &S) -> S::ConstSentinel {
    seq.const_end()
}

/// Start of the read-only backward traversal of `seq`
pub fn const_rstart_of<S>(seq: &S) -> Reversed<S::ConstCursor>
where
    S: ConstCommonSequence,
    S::ConstCursor: BidiCursor,
{
    Reversed::new(seq.const_finish())
}

pub fn const_rend_of<S>(seq: &S) -> Reversed<S::ConstCursor>
where
    S: ConstCommonSequence,
    S::ConstCursor: BidiCursor,
{
    Reversed::new(seq.const_start())
}

/// How the read-only path of `S` is obtained. A native read-only path is reported as
/// [`Strategy::Member`] and is always preferred over [`Strategy::Wrapped`].
pub fn const_strategy<S: ConstSequence>(_: &S) -> Strategy {
    S::CONST_STRATEGY
}
