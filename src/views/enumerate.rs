use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel, distance,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Sequence},
};

/// Cursor pairing each element with its position. The position is a plain value, so only the
/// element half of an item can be written through.
pub struct EnumerateCursor<C, S> {
    inner: C,
    end: S,
    index: usize,
}

impl<C: Clone, S: Clone> Clone for EnumerateCursor<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            end: self.end.clone(),
            index: self.index,
        }
    }
}

impl<C: PartialEq, S> PartialEq for EnumerateCursor<C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<C: std::fmt::Debug, S> std::fmt::Debug for EnumerateCursor<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumerateCursor")
            .field("inner", &self.inner)
            .field("index", &self.index)
            .finish()
    }
}

impl<C, S> EnumerateCursor<C, S> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn base(&self) -> &C {
        &self.inner
    }
}

impl<C: Cursor, S: Sentinel<C>> Cursor for EnumerateCursor<C, S> {
    type Item = (usize, C::Item);

    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::RandomAccess);

    fn read(&self) -> (usize, C::Item) {
        (self.index, self.inner.read())
    }

    fn advance(&mut self) {
        self.inner.advance();
        self.index += 1;
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> ForwardCursor for EnumerateCursor<C, S> {
    fn measure(&self, other: &Self) -> Option<isize> {
        Some(other.index as isize - self.index as isize)
    }
}

impl<C: BidiCursor, S: Sentinel<C>> BidiCursor for EnumerateCursor<C, S> {
    fn retreat(&mut self) {
        self.inner.retreat();
        self.index -= 1;
    }
}

impl<C: RandomCursor, S: Sentinel<C>> RandomCursor for EnumerateCursor<C, S> {
    fn jump(&mut self, n: isize) {
        self.inner.jump(n);
        self.index = self.index.wrapping_add_signed(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        other.index as isize - self.index as isize
    }
}

impl<C: Cursor, S: Sentinel<C>> Exhaust for EnumerateCursor<C, S> {
    const FINISHING: bool = S::COMMON;

    fn exhausted(&self) -> bool {
        self.end.reached(&self.inner)
    }

    fn remaining(&self) -> Option<isize> {
        self.end.remaining(&self.inner)
    }
}

impl<C: ForwardCursor, S: CommonSentinel<C>> Finishing for EnumerateCursor<C, S> {
    fn to_finish(&self) -> Self {
        let finish = self.end.finish_from(&self.inner);
        Self {
            index: self.index + distance(self.inner.clone(), &finish),
            inner: finish,
            end: self.end.clone(),
        }
    }
}

/// The base's elements paired with their zero-based positions
#[derive(Debug, Clone)]
pub struct EnumerateView<V> {
    base: V,
}

impl<V: Sequence> EnumerateView<V> {
    pub fn new(base: V) -> Self {
        Self { base }
    }
}

impl<V: Sequence> Sequence for EnumerateView<V> {
    type Cursor = EnumerateCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;
    const DISABLE_COUNT: bool = V::DISABLE_COUNT;

    fn start(&self) -> Self::Cursor {
        EnumerateCursor {
            inner: self.base.start(),
            end: self.base.end(),
            index: 0,
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        count_of(&self.base)
    }

    fn is_empty_hint(&self) -> Option<bool> {
        self.base.is_empty_hint()
    }
}

impl<V> CommonSequence for EnumerateView<V>
where
    V: CommonSequence,
    V::Cursor: ForwardCursor,
{
    fn finish(&self) -> Self::Cursor {
        let finish = self.base.finish();
        EnumerateCursor {
            index: distance(self.base.start(), &finish),
            inner: finish,
            end: self.base.end(),
        }
    }
}

crate::views::view_algebra!({V} EnumerateView<V>);

pub fn enumerate<V: Sequence>(base: V) -> EnumerateView<V> {
    EnumerateView::new(base)
}
