use crate::{
    cursor::{BidiCursor, Capability, Cursor, ForwardCursor, RandomCursor},
    sequence::{CommonSequence, Sequence},
    slot::{Movable, Writable},
};

/// Traverses a bidirectional cursor's sequence backward.
///
/// The wrapped cursor sits one past the element this cursor refers to, so reading steps a copy
/// back first. Advancing retreats the wrapped cursor and retreating advances it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reversed<C> {
    inner: C,
}

impl<C: BidiCursor> Reversed<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn base(&self) -> &C {
        &self.inner
    }

    fn target(&self) -> C {
        let mut c = self.inner.clone();
        c.retreat();
        c
    }
}

impl<C: BidiCursor> Cursor for Reversed<C> {
    type Item = C::Item;

    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::RandomAccess);

    fn read(&self) -> C::Item {
        self.target().read()
    }

    fn advance(&mut self) {
        self.inner.retreat();
    }

    fn move_out(&self) -> <C::Item as Movable>::Value
    where
        C::Item: Movable,
    {
        self.target().move_out()
    }

    fn swap_with(&self, other: &Self)
    where
        C::Item: Writable,
    {
        self.target().swap_with(&other.target());
    }
}

impl<C: BidiCursor> ForwardCursor for Reversed<C> {
    fn measure(&self, other: &Self) -> Option<isize> {
        other.inner.measure(&self.inner)
    }
}

impl<C: BidiCursor> BidiCursor for Reversed<C> {
    fn retreat(&mut self) {
        self.inner.advance();
    }
}

impl<C: RandomCursor> RandomCursor for Reversed<C> {
    fn jump(&mut self, n: isize) {
        self.inner.jump(-n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        -self.inner.offset_to(&other.inner)
    }
}

/// A common bidirectional sequence traversed from its end to its start
#[derive(Debug, Clone)]
pub struct ReverseView<V> {
    base: V,
}

impl<V> ReverseView<V>
where
    V: CommonSequence,
    V::Cursor: BidiCursor,
{
    pub fn new(base: V) -> Self {
        Self { base }
    }

    pub fn into_base(self) -> V {
        self.base
    }
}

impl<V> Sequence for ReverseView<V>
where
    V: CommonSequence,
    V::Cursor: BidiCursor,
{
    type Cursor = Reversed<V::Cursor>;
    type Sentinel = Reversed<V::Cursor>;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;
    const DISABLE_COUNT: bool = V::DISABLE_COUNT;

    fn start(&self) -> Self::Cursor {
        Reversed::new(self.base.finish())
    }

    fn end(&self) -> Self::Sentinel {
        Reversed::new(self.base.start())
    }

    fn count(&self) -> Option<V::Count> {
        self.base.count()
    }

    fn is_empty_hint(&self) -> Option<bool> {
        self.base.is_empty_hint()
    }
}

impl<V> CommonSequence for ReverseView<V>
where
    V: CommonSequence,
    V::Cursor: BidiCursor,
{
    fn finish(&self) -> Self::Cursor {
        Reversed::new(self.base.start())
    }
}

crate::views::view_algebra!({V: CommonSequence} ReverseView<V>);

/// Backward view of `seq`
pub fn reverse<V>(seq: V) -> ReverseView<V>
where
    V: CommonSequence,
    V::Cursor: BidiCursor,
{
    ReverseView::new(seq)
}
