use crate::slot::{Movable, Writable};

/// Traversal guarantees a cursor type makes, weakest first.
///
/// Every level implies all of the levels before it, so the derived [`Ord`] is the refinement
/// order: `Contiguous > RandomAccess > Bidirectional > Forward > SinglePass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Each position can be visited once, copies of a cursor are not independent
    SinglePass,
    /// Positions may be revisited and compared for equality
    Forward,
    /// Cursors can also step backward
    Bidirectional,
    /// Cursors can jump by an offset and measure distances in O(1)
    RandomAccess,
    /// Consecutive positions are consecutive addresses in memory
    Contiguous,
}

impl Capability {
    /// The weaker of two capabilities, usable in `const` position.
    pub const fn min(self, other: Capability) -> Capability {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }

    /// Whether `self` licenses every operation `other` does.
    pub const fn at_least(self, other: Capability) -> bool {
        self as u8 >= other as u8
    }
}

/// A traversal position over some sequence.
///
/// [`Cursor::read`] and [`Cursor::advance`] must only be called on a cursor that has not reached
/// the sentinel of its sequence. Doing otherwise is a precondition violation, not a reported error.
pub trait Cursor: Sized {
    type Item;

    /// The strongest [`Capability`] this cursor type guarantees. Must agree with the cursor traits
    /// the type actually implements.
    const CAPABILITY: Capability;

    /// Get the element this cursor refers to
    fn read(&self) -> Self::Item;

    /// Step to the following position
    fn advance(&mut self);

    /// Move the element out of the referenced position.
    ///
    /// Cursors whose elements live behind a proxy may override this, otherwise the move is
    /// synthesized from [`Cursor::read`].
    fn move_out(&self) -> <Self::Item as Movable>::Value
    where
        Self::Item: Movable,
    {
        self.read().move_value()
    }

    /// Exchange the elements referenced by `self` and `other`.
    ///
    /// The default is three moves through a temporary, which works for plain and proxy
    /// elements alike.
    fn swap_with(&self, other: &Self)
    where
        Self::Item: Writable,
    {
        let tmp = self.move_out();
        let theirs = other.move_out();
        self.read().write(theirs);
        other.read().write(tmp);
    }
}

/// A cursor which may be copied and revisited.
///
/// Two cursors obtained from the same sequence state are comparable with [`PartialEq`], and
/// reading the same position twice yields the same element.
pub trait ForwardCursor: Cursor + Clone + PartialEq {
    /// Number of steps from `self` to `other`, when that can be computed without walking.
    fn measure(&self, _other: &Self) -> Option<isize> {
        None
    }
}

pub trait BidiCursor: ForwardCursor {
    /// Step to the preceding position
    fn retreat(&mut self);
}

pub trait RandomCursor: BidiCursor {
    /// Move by `n` positions in O(1), backward when `n` is negative
    fn jump(&mut self, n: isize);

    /// Signed number of steps from `self` to `other`
    fn offset_to(&self, other: &Self) -> isize;

    /// Subscript access relative to this cursor
    fn at(&self, n: isize) -> Self::Item {
        let mut c = self.clone();
        c.jump(n);
        c.read()
    }
}

/// A random access cursor whose positions map to consecutive addresses.
pub trait ContiguousCursor: RandomCursor {
    type Element;

    /// Address of the element at this position
    fn address(&self) -> *const Self::Element;
}

/// A cursor that knows on its own whether it has run off the end of its sequence.
///
/// Adaptor cursors carry their base's sentinel around, so they can all answer this, which lets
/// adaptors share the [`End`] sentinel.
pub trait Exhaust: Cursor {
    /// Set when this cursor type implements [`Finishing`] for every value it can hold
    const FINISHING: bool = false;

    fn exhausted(&self) -> bool;

    /// Number of positions left before exhaustion, when known in O(1)
    fn remaining(&self) -> Option<isize> {
        None
    }
}

/// Boundary marker for a sequence.
pub trait Sentinel<C>: Clone {
    /// Set when this sentinel is itself a cursor of the sequence, i.e. the sequence is common
    const COMMON: bool = false;

    /// Has `cursor` reached this boundary?
    fn reached(&self, cursor: &C) -> bool;

    /// Steps from `cursor` to this boundary, for sized sentinels
    fn remaining(&self, _cursor: &C) -> Option<isize> {
        None
    }
}

// every re-traversable cursor can act as the end of a common sequence
impl<C: ForwardCursor> Sentinel<C> for C {
    const COMMON: bool = true;

    fn reached(&self, cursor: &C) -> bool {
        cursor == self
    }

    fn remaining(&self, cursor: &C) -> Option<isize> {
        cursor.measure(self)
    }
}

/// Sentinel delegating to [`Exhaust::exhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct End;

impl<C: Exhaust> Sentinel<C> for End {
    const COMMON: bool = C::FINISHING;

    fn reached(&self, cursor: &C) -> bool {
        cursor.exhausted()
    }

    fn remaining(&self, cursor: &C) -> Option<isize> {
        cursor.remaining()
    }
}

/// An adaptor cursor that can construct the end position of its own sequence.
///
/// This is what lets a view over a common base stay common even though its sentinel is
/// [`End`]: the finish cursor is built from the base's end.
pub trait Finishing: Exhaust + ForwardCursor {
    /// The exhausted cursor of the sequence `self` belongs to
    fn to_finish(&self) -> Self;
}

/// A sentinel that can be turned into an equivalent cursor.
pub trait CommonSentinel<C>: Sentinel<C> {
    /// The cursor at this boundary, for the sequence `cursor` belongs to
    fn finish_from(&self, cursor: &C) -> C;
}

impl<C: ForwardCursor> CommonSentinel<C> for C {
    fn finish_from(&self, _cursor: &C) -> C {
        self.clone()
    }
}

impl<C: Finishing> CommonSentinel<C> for End {
    fn finish_from(&self, cursor: &C) -> C {
        cursor.to_finish()
    }
}

/// Sentinel of a sequence that never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Unreachable;

impl<C: Cursor> Sentinel<C> for Unreachable {
    fn reached(&self, _cursor: &C) -> bool {
        false
    }
}

/// represents a seek operation for moving a cursor within a [`Subrange`](crate::Subrange)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Seek {
    /// Seek left-ward towards the start of the sequence
    Left(usize),
    /// Seek right-ward towards the end of the sequence
    Right(usize),
}

impl Seek {
    /// Signed offset equivalent of this seek, or `None` if it does not fit in an `isize`
    pub fn offset(self) -> Option<isize> {
        match self {
            Seek::Left(x) => isize::try_from(x).ok().map(|x| -x),
            Seek::Right(x) => isize::try_from(x).ok(),
        }
    }
}

/// Advances `cursor` by up to `n` steps, stopping at `end`. Returns the steps that could not be
/// taken.
pub fn advance_bounded<C: Cursor, S: Sentinel<C>>(cursor: &mut C, n: usize, end: &S) -> usize {
    let mut left = n;
    while left > 0 && !end.reached(cursor) {
        cursor.advance();
        left -= 1;
    }
    left
}

/// [`advance_bounded`] in O(1) when `end` can measure the distance.
pub fn advance_bounded_random<C: RandomCursor, S: Sentinel<C>>(
    cursor: &mut C,
    n: usize,
    end: &S,
) -> usize {
    match end.remaining(cursor) {
        Some(rem) => {
            let step = n.min(rem.max(0) as usize);
            cursor.jump(step as isize);
            n - step
        }
        None => advance_bounded(cursor, n, end),
    }
}

/// Step `cursor` backward `n` times.
pub fn retreat_by<C: BidiCursor>(cursor: &mut C, n: usize) {
    for _ in 0..n {
        cursor.retreat();
    }
}

/// Number of positions between `start` and `end`, walking only when the sentinel cannot measure.
pub fn distance<C: Cursor, S: Sentinel<C>>(mut start: C, end: &S) -> usize {
    if let Some(n) = end.remaining(&start) {
        return n.max(0) as usize;
    }

    let mut n = 0usize;
    while !end.reached(&start) {
        start.advance();
        n += 1;
    }
    n
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        host::SliceCursor,
        sequence::{CommonSequence, Sequence},
        views::{EnumerateCursor, enumerate},
    };

    type Slice = SliceCursor<'static, i32>;

    #[test]
    fn capability_order_is_refinement() {
        assert!(Capability::Contiguous > Capability::RandomAccess);
        assert!(Capability::RandomAccess > Capability::Bidirectional);
        assert!(Capability::Bidirectional > Capability::Forward);
        assert!(Capability::Forward > Capability::SinglePass);

        assert_eq!(
            Capability::Contiguous.min(Capability::Forward),
            Capability::Forward
        );
        assert!(Capability::Contiguous.at_least(Capability::SinglePass));
        assert!(!Capability::Forward.at_least(Capability::Bidirectional));
    }

    #[test]
    fn bounded_advance_stops_at_end() {
        let v = [1, 2, 3];
        let mut c = SliceCursor::new(&v, 0);
        let end = SliceCursor::new(&v, 3);

        assert_eq!(advance_bounded(&mut c, 2, &end), 0);
        assert_eq!(*c.read(), 3);
        assert_eq!(advance_bounded(&mut c, 5, &end), 4);
        assert!(end.reached(&c));

        let mut c = SliceCursor::new(&v, 0);
        assert_eq!(advance_bounded_random(&mut c, 7, &end), 4);
        assert!(end.reached(&c));
    }

    #[test]
    fn distance_measures_or_walks() {
        let v = [1, 2, 3, 4];
        assert_eq!(distance(SliceCursor::new(&v, 1), &SliceCursor::new(&v, 4)), 3);
        assert_eq!(distance(SliceCursor::new(&v, 0), &End), 4);
    }

    #[test]
    fn end_is_common_when_the_cursor_can_finish() {
        assert!(<Slice as Sentinel<Slice>>::COMMON);
        assert!(!<End as Sentinel<Slice>>::COMMON);
        assert!(<End as Sentinel<EnumerateCursor<Slice, Slice>>>::COMMON);
        assert!(!<Unreachable as Sentinel<Slice>>::COMMON);

        let v = [1, 2, 3];
        let (start, end) = (SliceCursor::new(&v, 0), SliceCursor::new(&v, 3));
        assert!(end.finish_from(&start) == end);

        let view = enumerate(&v[..]);
        let finish = End.finish_from(&view.start());
        assert!(finish == view.finish());
        assert_eq!(finish.index(), 3);
    }

    #[test]
    fn seek_offsets() {
        assert_eq!(Seek::Left(3).offset(), Some(-3));
        assert_eq!(Seek::Right(3).offset(), Some(3));
        assert_eq!(Seek::Right(usize::MAX).offset(), None);
    }
}
