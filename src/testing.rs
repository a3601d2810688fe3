//! Worst-case sequence wrappers for unit tests: each hides every capability above a fixed level.

use std::marker::PhantomData;

use crate::{
    cursor::{BidiCursor, Capability, Cursor, End, Exhaust, ForwardCursor, Sentinel},
    sequence::{CommonSequence, Count, Sequence},
};

/// Capability of the cursors `seq` hands out
pub fn capability_of<S: Sequence>(_: &S) -> Capability {
    <S::Cursor as Cursor>::CAPABILITY
}

/// Forward cursor which cannot measure distances
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardOnlyCursor<C> {
    inner: C,
}

impl<C: ForwardCursor> Cursor for ForwardOnlyCursor<C> {
    type Item = C::Item;

    const CAPABILITY: Capability = Capability::Forward;

    fn read(&self) -> C::Item {
        self.inner.read()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<C: ForwardCursor> ForwardCursor for ForwardOnlyCursor<C> {}

#[derive(Debug, Clone)]
pub struct ForwardOnly<S> {
    base: S,
}

impl<S> ForwardOnly<S> {
    pub fn new(base: S) -> Self {
        Self { base }
    }
}

impl<S> Sequence for ForwardOnly<S>
where
    S: CommonSequence,
    S::Cursor: ForwardCursor,
{
    type Cursor = ForwardOnlyCursor<S::Cursor>;
    type Sentinel = ForwardOnlyCursor<S::Cursor>;
    type Count = S::Count;

    fn start(&self) -> Self::Cursor {
        ForwardOnlyCursor {
            inner: self.base.start(),
        }
    }

    fn end(&self) -> Self::Sentinel {
        self.finish()
    }
}

impl<S> CommonSequence for ForwardOnly<S>
where
    S: CommonSequence,
    S::Cursor: ForwardCursor,
{
    fn finish(&self) -> Self::Cursor {
        ForwardOnlyCursor {
            inner: self.base.finish(),
        }
    }
}

crate::views::view_slicing!({S} ForwardOnly<S>);

/// Bidirectional cursor which still measures distances in O(1), so its sequence is sized
#[derive(Debug, Clone, PartialEq)]
pub struct BidiOnlyCursor<C> {
    inner: C,
}

impl<C: BidiCursor> Cursor for BidiOnlyCursor<C> {
    type Item = C::Item;

    const CAPABILITY: Capability = Capability::Bidirectional;

    fn read(&self) -> C::Item {
        self.inner.read()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<C: BidiCursor> ForwardCursor for BidiOnlyCursor<C> {
    fn measure(&self, other: &Self) -> Option<isize> {
        self.inner.measure(&other.inner)
    }
}

impl<C: BidiCursor> BidiCursor for BidiOnlyCursor<C> {
    fn retreat(&mut self) {
        self.inner.retreat();
    }
}

/// Common bidirectional sequence without a member count. `W` is the count width and
/// `NO_COUNT` sets [`Sequence::DISABLE_COUNT`].
#[derive(Debug, Clone)]
pub struct BidiOnly<S, W = usize, const NO_COUNT: bool = false> {
    base: S,
    width: PhantomData<W>,
}

impl<S> BidiOnly<S> {
    pub fn new(base: S) -> Self {
        Self {
            base,
            width: PhantomData,
        }
    }
}

impl<S, W, const NO_COUNT: bool> BidiOnly<S, W, NO_COUNT> {
    pub fn without_count(self) -> BidiOnly<S, W, true> {
        BidiOnly {
            base: self.base,
            width: PhantomData,
        }
    }

    pub fn with_count_width<X: Count>(self) -> BidiOnly<S, X, NO_COUNT> {
        BidiOnly {
            base: self.base,
            width: PhantomData,
        }
    }
}

impl<S, W, const NO_COUNT: bool> Sequence for BidiOnly<S, W, NO_COUNT>
where
    S: CommonSequence,
    S::Cursor: BidiCursor,
    W: Count,
{
    type Cursor = BidiOnlyCursor<S::Cursor>;
    type Sentinel = BidiOnlyCursor<S::Cursor>;
    type Count = W;

    const DISABLE_COUNT: bool = NO_COUNT;

    fn start(&self) -> Self::Cursor {
        BidiOnlyCursor {
            inner: self.base.start(),
        }
    }

    fn end(&self) -> Self::Sentinel {
        self.finish()
    }
}

impl<S, W, const NO_COUNT: bool> CommonSequence for BidiOnly<S, W, NO_COUNT>
where
    S: CommonSequence,
    S::Cursor: BidiCursor,
    W: Count,
{
    fn finish(&self) -> Self::Cursor {
        BidiOnlyCursor {
            inner: self.base.finish(),
        }
    }
}

/// Cursor that cannot be copied, carrying its own end
pub struct SinglePassCursor<C, S> {
    inner: C,
    end: S,
}

impl<C: Cursor, S: Sentinel<C>> Cursor for SinglePassCursor<C, S> {
    type Item = C::Item;

    const CAPABILITY: Capability = Capability::SinglePass;

    fn read(&self) -> C::Item {
        self.inner.read()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<C: Cursor, S: Sentinel<C>> Exhaust for SinglePassCursor<C, S> {
    fn exhausted(&self) -> bool {
        self.end.reached(&self.inner)
    }
}

#[derive(Debug, Clone)]
pub struct SinglePass<S> {
    base: S,
}

impl<S> SinglePass<S> {
    pub fn new(base: S) -> Self {
        Self { base }
    }
}

impl<S: Sequence> Sequence for SinglePass<S> {
    type Cursor = SinglePassCursor<S::Cursor, S::Sentinel>;
    type Sentinel = End;
    type Count = S::Count;

    fn start(&self) -> Self::Cursor {
        SinglePassCursor {
            inner: self.base.start(),
            end: self.base.end(),
        }
    }

    fn end(&self) -> End {
        End
    }
}
