//! Views that keep the base's traversal and change only what a cursor promises.

use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel,
    },
    host::Input,
    sequence::{CommonSequence, Sequence},
    slot::Movable,
    views::ChunkInputView,
};

/// Cursor reading elements as owned values moved out of the base
pub struct AsRvalueCursor<C, S> {
    inner: C,
    end: S,
}

impl<C: Clone, S: Clone> Clone for AsRvalueCursor<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            end: self.end.clone(),
        }
    }
}

impl<C: PartialEq, S> PartialEq for AsRvalueCursor<C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<C: std::fmt::Debug, S> std::fmt::Debug for AsRvalueCursor<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AsRvalueCursor").field(&self.inner).finish()
    }
}

impl<C, S> Cursor for AsRvalueCursor<C, S>
where
    C: Cursor,
    C::Item: Movable,
    S: Sentinel<C>,
{
    type Item = <C::Item as Movable>::Value;

    // the elements handed out are no longer the stored ones
    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::RandomAccess);

    fn read(&self) -> Self::Item {
        self.inner.move_out()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<C, S> ForwardCursor for AsRvalueCursor<C, S>
where
    C: ForwardCursor,
    C::Item: Movable,
    S: Sentinel<C>,
{
    fn measure(&self, other: &Self) -> Option<isize> {
        self.inner.measure(&other.inner)
    }
}

impl<C, S> BidiCursor for AsRvalueCursor<C, S>
where
    C: BidiCursor,
    C::Item: Movable,
    S: Sentinel<C>,
{
    fn retreat(&mut self) {
        self.inner.retreat();
    }
}

impl<C, S> RandomCursor for AsRvalueCursor<C, S>
where
    C: RandomCursor,
    C::Item: Movable,
    S: Sentinel<C>,
{
    fn jump(&mut self, n: isize) {
        self.inner.jump(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        self.inner.offset_to(&other.inner)
    }
}

impl<C, S> Exhaust for AsRvalueCursor<C, S>
where
    C: Cursor,
    C::Item: Movable,
    S: Sentinel<C>,
{
    const FINISHING: bool = S::COMMON;

    fn exhausted(&self) -> bool {
        self.end.reached(&self.inner)
    }

    fn remaining(&self) -> Option<isize> {
        self.end.remaining(&self.inner)
    }
}

impl<C, S> Finishing for AsRvalueCursor<C, S>
where
    C: ForwardCursor,
    C::Item: Movable,
    S: CommonSentinel<C>,
{
    fn to_finish(&self) -> Self {
        Self {
            inner: self.end.finish_from(&self.inner),
            end: self.end.clone(),
        }
    }
}

/// The base with every element moved out as it is read.
///
/// Proxy elements are left at their default, shared references are cloned.
#[derive(Debug, Clone)]
pub struct AsRvalueView<V> {
    base: V,
}

impl<V> AsRvalueView<V>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Movable,
{
    pub fn new(base: V) -> Self {
        Self { base }
    }
}

impl<V> Sequence for AsRvalueView<V>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Movable,
{
    type Cursor = AsRvalueCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;
    const DISABLE_COUNT: bool = V::DISABLE_COUNT;

    fn start(&self) -> Self::Cursor {
        AsRvalueCursor {
            inner: self.base.start(),
            end: self.base.end(),
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        self.base.count()
    }

    fn is_empty_hint(&self) -> Option<bool> {
        self.base.is_empty_hint()
    }
}

impl<V> CommonSequence for AsRvalueView<V>
where
    V: CommonSequence,
    <V::Cursor as Cursor>::Item: Movable,
{
    fn finish(&self) -> Self::Cursor {
        AsRvalueCursor {
            inner: self.base.finish(),
            end: self.base.end(),
        }
    }
}

crate::views::view_algebra!({V} AsRvalueView<V>);

pub fn as_rvalue<V>(base: V) -> AsRvalueView<V>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Movable,
{
    AsRvalueView::new(base)
}

/// Cursor demoted to single pass: it can be neither copied nor compared
pub struct ToInputCursor<C, S> {
    inner: C,
    end: S,
}

impl<C: Cursor, S: Sentinel<C>> Cursor for ToInputCursor<C, S> {
    type Item = C::Item;

    const CAPABILITY: Capability = Capability::SinglePass;

    fn read(&self) -> C::Item {
        self.inner.read()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<C: Cursor, S: Sentinel<C>> Exhaust for ToInputCursor<C, S> {
    fn exhausted(&self) -> bool {
        self.end.reached(&self.inner)
    }

    fn remaining(&self) -> Option<isize> {
        self.end.remaining(&self.inner)
    }
}

/// The base traversed as a single-pass sequence
#[derive(Debug, Clone)]
pub struct ToInputView<V> {
    base: V,
}

impl<V: Sequence> ToInputView<V> {
    pub fn new(base: V) -> Self {
        Self { base }
    }
}

impl<V: Sequence> Sequence for ToInputView<V> {
    type Cursor = ToInputCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;

    fn start(&self) -> Self::Cursor {
        ToInputCursor {
            inner: self.base.start(),
            end: self.base.end(),
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        self.base.count()
    }

    fn is_empty_hint(&self) -> Option<bool> {
        self.base.is_empty_hint()
    }
}

crate::views::view_pipe!({V} ToInputView<V>);
crate::views::view_slicing!({V} ToInputView<V>);
crate::views::view_const!({V} ToInputView<V>);

/// Conversion to a single-pass sequence. Sequences that already are single pass convert to
/// themselves.
pub trait IntoInput: Sequence + Sized {
    type Output: Sequence;

    fn into_input(self) -> Self::Output;
}

impl<V: Sequence> IntoInput for ToInputView<V> {
    type Output = ToInputView<V>;

    fn into_input(self) -> Self {
        self
    }
}

impl<I: Iterator> IntoInput for Input<I>
where
    I::Item: Clone,
{
    type Output = Input<I>;

    fn into_input(self) -> Self {
        self
    }
}

impl<V: Sequence> IntoInput for ChunkInputView<V> {
    type Output = ChunkInputView<V>;

    fn into_input(self) -> Self {
        self
    }
}

pub fn to_input<V: IntoInput>(seq: V) -> V::Output {
    seq.into_input()
}
