use std::rc::Rc;

use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        Sentinel,
    },
    sequence::{CommonSequence, Sequence},
    subrange::Subrange,
};

/// Cursor over the maximal runs of a base sequence whose neighbours satisfy a predicate.
///
/// `next` caches where the current run ends. `first` is kept so that a backward boundary search
/// never scans past the start of the base. Each step backward scans linearly from the current run's
/// start to the previous boundary.
pub struct ChunkByCursor<C, S, P> {
    first: C,
    current: C,
    next: C,
    end: S,
    pred: Rc<P>,
}

impl<C: Clone, S: Clone, P> Clone for ChunkByCursor<C, S, P> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            current: self.current.clone(),
            next: self.next.clone(),
            end: self.end.clone(),
            pred: Rc::clone(&self.pred),
        }
    }
}

impl<C: PartialEq, S, P> PartialEq for ChunkByCursor<C, S, P> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<C: std::fmt::Debug, S, P> std::fmt::Debug for ChunkByCursor<C, S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkByCursor")
            .field("current", &self.current)
            .field("next", &self.next)
            .finish()
    }
}

impl<C, S, P> ChunkByCursor<C, S, P>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    P: Fn(&C::Item, &C::Item) -> bool,
{
    /// Start of the run following the one starting at `from`
    fn find_next(&self, from: &C) -> C {
        let mut cursor = from.clone();
        if self.end.reached(&cursor) {
            return cursor;
        }

        let mut prev = cursor.read();
        cursor.advance();
        while !self.end.reached(&cursor) {
            let item = cursor.read();
            if !(self.pred)(&prev, &item) {
                break;
            }
            prev = item;
            cursor.advance();
        }
        cursor
    }
}

impl<C, S, P> ChunkByCursor<C, S, P>
where
    C: BidiCursor,
    P: Fn(&C::Item, &C::Item) -> bool,
{
    /// Start of the run ending just before `to`, found by scanning backward one position at a
    /// time. This is linear in the length of that run.
    fn find_prev(&self, to: &C) -> C {
        let mut cursor = to.clone();
        cursor.retreat();
        let mut scanned = 1usize;

        while cursor != self.first {
            let mut before = cursor.clone();
            before.retreat();
            if !(self.pred)(&before.read(), &cursor.read()) {
                break;
            }
            cursor = before;
            scanned += 1;
        }

        log::trace!("chunk_by boundary found after scanning {scanned} positions backward");
        cursor
    }
}

impl<C, S, P> Cursor for ChunkByCursor<C, S, P>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    P: Fn(&C::Item, &C::Item) -> bool,
{
    type Item = Subrange<C, C>;

    const CAPABILITY: Capability = if S::COMMON {
        C::CAPABILITY.min(Capability::Bidirectional)
    } else {
        Capability::Forward
    };

    fn read(&self) -> Subrange<C, C> {
        Subrange::new(self.current.clone(), self.next.clone())
    }

    fn advance(&mut self) {
        self.current = self.next.clone();
        self.next = self.find_next(&self.current);
    }
}

impl<C, S, P> ForwardCursor for ChunkByCursor<C, S, P>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    P: Fn(&C::Item, &C::Item) -> bool,
{
}

impl<C, S, P> BidiCursor for ChunkByCursor<C, S, P>
where
    C: BidiCursor,
    S: CommonSentinel<C>,
    P: Fn(&C::Item, &C::Item) -> bool,
{
    fn retreat(&mut self) {
        self.next = self.current.clone();
        self.current = self.find_prev(&self.next);
    }
}

impl<C, S, P> Exhaust for ChunkByCursor<C, S, P>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    P: Fn(&C::Item, &C::Item) -> bool,
{
    const FINISHING: bool = S::COMMON;

    fn exhausted(&self) -> bool {
        self.end.reached(&self.current)
    }
}

impl<C, S, P> Finishing for ChunkByCursor<C, S, P>
where
    C: ForwardCursor,
    S: CommonSentinel<C>,
    P: Fn(&C::Item, &C::Item) -> bool,
{
    fn to_finish(&self) -> Self {
        let end = self.end.finish_from(&self.current);
        Self {
            current: end.clone(),
            next: end,
            ..self.clone()
        }
    }
}

/// Splits the base into maximal runs where `pred(a, b)` holds for every adjacent pair `(a, b)`.
///
/// Stepping backward is available when the base is bidirectional and common.
pub struct ChunkByView<V, P> {
    base: V,
    pred: Rc<P>,
}

impl<V: Clone, P> Clone for ChunkByView<V, P> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            pred: Rc::clone(&self.pred),
        }
    }
}

impl<V, P> ChunkByView<V, P>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
    P: Fn(&<V::Cursor as Cursor>::Item, &<V::Cursor as Cursor>::Item) -> bool,
{
    pub fn new(base: V, pred: P) -> Self {
        Self {
            base,
            pred: Rc::new(pred),
        }
    }

    fn at(&self, current: V::Cursor) -> ChunkByCursor<V::Cursor, V::Sentinel, P> {
        let mut cursor = ChunkByCursor {
            first: self.base.start(),
            next: current.clone(),
            current,
            end: self.base.end(),
            pred: Rc::clone(&self.pred),
        };
        cursor.next = cursor.find_next(&cursor.current);
        cursor
    }
}

impl<V, P> Sequence for ChunkByView<V, P>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
    P: Fn(&<V::Cursor as Cursor>::Item, &<V::Cursor as Cursor>::Item) -> bool,
{
    type Cursor = ChunkByCursor<V::Cursor, V::Sentinel, P>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;

    fn start(&self) -> Self::Cursor {
        self.at(self.base.start())
    }

    fn end(&self) -> End {
        End
    }

    fn is_empty_hint(&self) -> Option<bool> {
        self.base.is_empty_hint()
    }
}

impl<V, P> CommonSequence for ChunkByView<V, P>
where
    V: CommonSequence,
    V::Cursor: ForwardCursor,
    P: Fn(&<V::Cursor as Cursor>::Item, &<V::Cursor as Cursor>::Item) -> bool,
{
    fn finish(&self) -> Self::Cursor {
        self.at(self.base.finish())
    }
}

crate::views::view_algebra!({V, P} ChunkByView<V, P>);

pub fn chunk_by<V, P>(base: V, pred: P) -> ChunkByView<V, P>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
    P: Fn(&<V::Cursor as Cursor>::Item, &<V::Cursor as Cursor>::Item) -> bool,
{
    ChunkByView::new(base, pred)
}
