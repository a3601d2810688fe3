use std::{cmp::Ordering, fmt::Debug};

use crate::{
    cursor::{Cursor, ForwardCursor, RandomCursor, Seek, Sentinel},
    error::ViewError,
    sequence::{CommonSequence, Sequence},
};

/// A cursor and sentinel pair viewed as a sequence.
///
/// Subranges never own what they refer to, so their cursors outlive the subrange value itself.
#[derive(Clone)]
pub struct Subrange<C, S> {
    start: C,
    end: S,
}

impl<C: PartialEq, S: PartialEq> PartialEq for Subrange<C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<C: Debug, S: Debug> Debug for Subrange<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subrange")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl<C, S> Subrange<C, S> {
    pub fn new(start: C, end: S) -> Self {
        Self { start, end }
    }

    pub fn into_parts(self) -> (C, S) {
        (self.start, self.end)
    }
}

impl<C: Cursor, S: Sentinel<C>> Subrange<C, S> {
    /// Read the element at `cursor`, or fail if it has reached the end of this subrange
    pub fn try_read(&self, cursor: &C) -> Result<C::Item, ViewError> {
        if self.end.reached(cursor) {
            Err(ViewError::Exhausted)
        } else {
            Ok(cursor.read())
        }
    }
}

impl<C: ForwardCursor + PartialOrd> Subrange<C, C> {
    /// Create a subrange between `start` (inclusive) and `end` (non-inclusive)
    ///
    /// Returns an error if the cursors cannot be compared with [`PartialOrd`] or if `end` occurs
    /// before `start`
    pub fn between(start: C, end: C) -> Result<Self, ViewError> {
        match start.partial_cmp(&end) {
            Some(Ordering::Less | Ordering::Equal) => Ok(Self { start, end }),
            Some(Ordering::Greater) => Err(ViewError::NegativeSpan),
            None => Err(ViewError::ForeignCursor),
        }
    }
}

impl<C: RandomCursor> Subrange<C, C> {
    fn len(&self) -> usize {
        self.start.offset_to(&self.end).max(0) as usize
    }

    /// Get a cursor at a position relative to `cursor`.
    ///
    /// Seeking to the end position itself is allowed, anything beyond either edge of the subrange
    /// is [`ViewError::OutOfBounds`].
    pub fn seek(&self, cursor: &C, op: Seek) -> Result<C, ViewError> {
        let offset = op.offset().ok_or(ViewError::SeekOverflow)?;
        let index = self
            .start
            .offset_to(cursor)
            .checked_add(offset)
            .ok_or(ViewError::SeekOverflow)?;

        let len = self.len();
        if index < 0 || index as usize > len {
            return Err(ViewError::OutOfBounds { index, len });
        }

        let mut c = cursor.clone();
        c.jump(offset);
        Ok(c)
    }

    /// Subscript access with a bounds check
    pub fn checked_at(&self, index: usize) -> Result<C::Item, ViewError> {
        let len = self.len();
        if index >= len {
            return Err(ViewError::OutOfBounds {
                index: index as isize,
                len,
            });
        }

        Ok(self.start.at(index as isize))
    }
}

impl<C: Cursor + Clone, S: Sentinel<C>> Sequence for Subrange<C, S> {
    type Cursor = C;
    type Sentinel = S;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> C {
        self.start.clone()
    }

    fn end(&self) -> S {
        self.end.clone()
    }

    fn count(&self) -> Option<usize> {
        self.end
            .remaining(&self.start)
            .map(|n| n.max(0) as usize)
    }
}

impl<C: ForwardCursor> CommonSequence for Subrange<C, C> {
    fn finish(&self) -> C {
        self.end.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{host::SliceCursor, sequence::SequenceExt};

    #[test]
    fn between_orders_cursors() {
        let v = [0, 1, 2, 3, 4, 5];
        let a = SliceCursor::new(&v, 1);
        let b = SliceCursor::new(&v, 4);

        let span = Subrange::between(a, b).expect("ordered cursors form a subrange");
        assert_eq!(span.walk().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(span.count(), Some(3));

        assert_eq!(Subrange::between(b, a), Err(ViewError::NegativeSpan));

        let w = [0, 1];
        assert_eq!(
            Subrange::between(a, SliceCursor::new(&w, 1)),
            Err(ViewError::ForeignCursor)
        );
    }

    #[test]
    fn seek_is_bounds_checked() {
        let v = [0, 1, 2, 3];
        let s = &v[..];
        let span = Subrange::new(s.start(), s.finish());
        let c = span.start();

        let c2 = span.seek(&c, Seek::Right(2)).expect("in range seek");
        assert_eq!(*c2.read(), 2);
        assert!(span.seek(&c2, Seek::Right(2)).is_ok());
        assert_eq!(
            span.seek(&c2, Seek::Right(3)),
            Err(ViewError::OutOfBounds { index: 5, len: 4 })
        );
        assert_eq!(
            span.seek(&c, Seek::Left(1)),
            Err(ViewError::OutOfBounds { index: -1, len: 4 })
        );
        assert_eq!(span.seek(&c, Seek::Right(usize::MAX)), Err(ViewError::SeekOverflow));
    }

    #[test]
    fn checked_access() {
        let v = [7, 8];
        let s = &v[..];
        let span = Subrange::new(s.start(), s.finish());

        assert_eq!(span.checked_at(1).copied(), Ok(8));
        assert_eq!(
            span.checked_at(2),
            Err(ViewError::OutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(span.try_read(&span.finish()), Err(ViewError::Exhausted));
    }
}
