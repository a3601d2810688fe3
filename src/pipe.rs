//! Partially applied adaptors.
//!
//! Each function here captures an adaptor's arguments without a sequence. The result is applied
//! with [`SequenceExt::pipe`](crate::SequenceExt::pipe) or with `|` on any view type, and two of
//! them compose with [`Chain::then`] or `|` before a sequence is supplied:
//!
//! ```ignore
//! let pairs = Iota::new(0, 10) | pipe::stride(2).then(pipe::chunk(2));
//! ```

use std::ops::BitOr;

use crate::{
    constant::IntoConst,
    cursor::{BidiCursor, Cursor, ForwardCursor},
    reverse::ReverseView,
    sequence::{CommonSequence, Sequence},
    slot::Movable,
    views::{
        self, AdjacentView, AsRvalueView, ChunkByView, ChunkInputView, ChunkView, ConcatView,
        Droppable, EnumerateView, IntoInput, JoinView, JoinWithView, LazySplitView, SlideView,
        StrideView, Takeable,
    },
};

/// An adaptor waiting for the sequence it applies to
pub trait Adaptor<S> {
    type Output;

    fn apply(self, seq: S) -> Self::Output;
}

/// Two adaptors applied one after the other
#[derive(Debug, Clone, Copy)]
pub struct Compose<A, B> {
    first: A,
    second: B,
}

impl<S, A, B> Adaptor<S> for Compose<A, B>
where
    A: Adaptor<S>,
    B: Adaptor<A::Output>,
{
    type Output = B::Output;

    fn apply(self, seq: S) -> B::Output {
        self.second.apply(self.first.apply(seq))
    }
}

/// Adaptor values that compose before a sequence is known
pub trait Chain: Sized {
    /// `self` followed by `next`
    fn then<B>(self, next: B) -> Compose<Self, B> {
        Compose {
            first: self,
            second: next,
        }
    }
}

macro_rules! partial {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> Chain for $ty {}

            impl<$($gen)* Next> BitOr<Next> for $ty {
                type Output = Compose<$ty, Next>;

                fn bitor(self, next: Next) -> Self::Output {
                    self.then(next)
                }
            }
        )*
    };
}

#[derive(Debug, Clone, Copy)]
pub struct Chunk {
    size: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ChunkInput {
    size: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Slide {
    width: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Adjacent<const N: usize>;

#[derive(Debug, Clone, Copy)]
pub struct Stride {
    step: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TakeFirst {
    n: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct DropFirst {
    n: usize,
}

#[derive(Debug, Clone)]
pub struct ChunkBy<P> {
    pred: P,
}

#[derive(Debug, Clone)]
pub struct LazySplit<P> {
    pattern: P,
}

#[derive(Debug, Clone)]
pub struct JoinWith<P> {
    pattern: P,
}

#[derive(Debug, Clone)]
pub struct Concat<B> {
    right: B,
}

#[derive(Debug, Clone, Copy)]
pub struct Join;

#[derive(Debug, Clone, Copy)]
pub struct Enumerate;

#[derive(Debug, Clone, Copy)]
pub struct Reverse;

#[derive(Debug, Clone, Copy)]
pub struct AsConst;

#[derive(Debug, Clone, Copy)]
pub struct AsRvalue;

#[derive(Debug, Clone, Copy)]
pub struct ToInput;

partial!(
    {} Chunk,
    {} ChunkInput,
    {} Slide,
    {const N: usize,} Adjacent<N>,
    {} Stride,
    {} TakeFirst,
    {} DropFirst,
    {P,} ChunkBy<P>,
    {P,} LazySplit<P>,
    {P,} JoinWith<P>,
    {B,} Concat<B>,
    {} Join,
    {} Enumerate,
    {} Reverse,
    {} AsConst,
    {} AsRvalue,
    {} ToInput,
    {A, B,} Compose<A, B>,
);

impl<S> Adaptor<S> for Chunk
where
    S: Sequence,
    S::Cursor: ForwardCursor,
{
    type Output = ChunkView<S>;

    fn apply(self, seq: S) -> ChunkView<S> {
        views::chunk(seq, self.size)
    }
}

impl<S: Sequence> Adaptor<S> for ChunkInput {
    type Output = ChunkInputView<S>;

    fn apply(self, seq: S) -> ChunkInputView<S> {
        views::chunk_input(seq, self.size)
    }
}

impl<S> Adaptor<S> for Slide
where
    S: Sequence,
    S::Cursor: ForwardCursor,
{
    type Output = SlideView<S>;

    fn apply(self, seq: S) -> SlideView<S> {
        views::slide(seq, self.width)
    }
}

impl<S, const N: usize> Adaptor<S> for Adjacent<N>
where
    S: Sequence,
    S::Cursor: ForwardCursor,
{
    type Output = AdjacentView<S, N>;

    fn apply(self, seq: S) -> AdjacentView<S, N> {
        views::adjacent::<N, S>(seq)
    }
}

impl<S: Sequence> Adaptor<S> for Stride {
    type Output = StrideView<S>;

    fn apply(self, seq: S) -> StrideView<S> {
        views::stride(seq, self.step)
    }
}

impl<S: Takeable> Adaptor<S> for TakeFirst {
    type Output = S::Output;

    fn apply(self, seq: S) -> S::Output {
        views::take(seq, self.n)
    }
}

impl<S: Droppable> Adaptor<S> for DropFirst {
    type Output = S::Output;

    fn apply(self, seq: S) -> S::Output {
        views::drop(seq, self.n)
    }
}

impl<S, P> Adaptor<S> for ChunkBy<P>
where
    S: Sequence,
    S::Cursor: ForwardCursor,
    P: Fn(&<S::Cursor as Cursor>::Item, &<S::Cursor as Cursor>::Item) -> bool,
{
    type Output = ChunkByView<S, P>;

    fn apply(self, seq: S) -> ChunkByView<S, P> {
        views::chunk_by(seq, self.pred)
    }
}

impl<S, P> Adaptor<S> for LazySplit<P>
where
    S: Sequence,
    S::Cursor: ForwardCursor,
    P: Sequence,
    P::Cursor: ForwardCursor,
    <S::Cursor as Cursor>::Item: PartialEq<<P::Cursor as Cursor>::Item>,
{
    type Output = LazySplitView<S, P>;

    fn apply(self, seq: S) -> LazySplitView<S, P> {
        views::lazy_split(seq, self.pattern)
    }
}

impl<S> Adaptor<S> for Join
where
    S: Sequence,
    <S::Cursor as Cursor>::Item: Sequence,
{
    type Output = JoinView<S>;

    fn apply(self, seq: S) -> JoinView<S> {
        views::join(seq)
    }
}

type InnerItem<S> =
    <<<<S as Sequence>::Cursor as Cursor>::Item as Sequence>::Cursor as Cursor>::Item;

impl<S, P> Adaptor<S> for JoinWith<P>
where
    S: Sequence,
    <S::Cursor as Cursor>::Item: Sequence,
    P: Sequence + Clone,
    P::Cursor: Cursor<Item = InnerItem<S>>,
{
    type Output = JoinWithView<S, P>;

    fn apply(self, seq: S) -> JoinWithView<S, P> {
        views::join_with(seq, self.pattern)
    }
}

impl<S, B> Adaptor<S> for Concat<B>
where
    S: Sequence,
    S::Cursor: Clone,
    B: Sequence,
    B::Cursor: Cursor<Item = <S::Cursor as Cursor>::Item> + Clone,
{
    type Output = ConcatView<S, B>;

    fn apply(self, seq: S) -> ConcatView<S, B> {
        views::concat(seq, self.right)
    }
}

impl<S: Sequence> Adaptor<S> for Enumerate {
    type Output = EnumerateView<S>;

    fn apply(self, seq: S) -> EnumerateView<S> {
        views::enumerate(seq)
    }
}

impl<S> Adaptor<S> for Reverse
where
    S: CommonSequence,
    S::Cursor: BidiCursor,
{
    type Output = ReverseView<S>;

    fn apply(self, seq: S) -> ReverseView<S> {
        crate::reverse::reverse(seq)
    }
}

impl<S: IntoConst> Adaptor<S> for AsConst {
    type Output = S::Output;

    fn apply(self, seq: S) -> S::Output {
        seq.into_const()
    }
}

impl<S> Adaptor<S> for AsRvalue
where
    S: Sequence,
    <S::Cursor as Cursor>::Item: Movable,
{
    type Output = AsRvalueView<S>;

    fn apply(self, seq: S) -> AsRvalueView<S> {
        views::as_rvalue(seq)
    }
}

impl<S: IntoInput> Adaptor<S> for ToInput {
    type Output = S::Output;

    fn apply(self, seq: S) -> S::Output {
        seq.into_input()
    }
}

pub fn chunk(size: usize) -> Chunk {
    Chunk { size }
}

pub fn chunk_input(size: usize) -> ChunkInput {
    ChunkInput { size }
}

pub fn slide(width: usize) -> Slide {
    Slide { width }
}

pub fn adjacent<const N: usize>() -> Adjacent<N> {
    Adjacent
}

pub fn stride(step: usize) -> Stride {
    Stride { step }
}

pub fn take(n: usize) -> TakeFirst {
    TakeFirst { n }
}

pub fn drop(n: usize) -> DropFirst {
    DropFirst { n }
}

pub fn chunk_by<P>(pred: P) -> ChunkBy<P> {
    ChunkBy { pred }
}

pub fn lazy_split<P: Sequence>(pattern: P) -> LazySplit<P> {
    LazySplit { pattern }
}

pub fn join() -> Join {
    Join
}

pub fn join_with<P: Sequence + Clone>(pattern: P) -> JoinWith<P> {
    JoinWith { pattern }
}

/// Append `right` to whatever sequence this is applied to
pub fn concat<B: Sequence>(right: B) -> Concat<B> {
    Concat { right }
}

pub fn enumerate() -> Enumerate {
    Enumerate
}

pub fn reverse() -> Reverse {
    Reverse
}

pub fn as_const() -> AsConst {
    AsConst
}

pub fn as_rvalue() -> AsRvalue {
    AsRvalue
}

pub fn to_input() -> ToInput {
    ToInput
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        host::{Iota, IotaFrom},
        sequence::SequenceExt,
        views::{repeat, single},
    };

    #[test]
    fn pipe_applies_an_adaptor() {
        let v = [1, 2, 3, 4, 5];
        let view = (&v[..]).pipe(stride(2));

        assert_eq!(view.walk().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn bar_on_views_chains_left_to_right() {
        let view = Iota::new(0, 10) | stride(3) | take(2);

        assert_eq!(view.walk().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn adaptors_compose_before_a_sequence() {
        let evens_reversed = stride(2).then(reverse());
        let also = stride(2) | reverse();

        assert_eq!(
            Iota::new(0, 7).pipe(evens_reversed).walk().collect::<Vec<_>>(),
            vec![6, 4, 2, 0]
        );
        assert_eq!(Iota::new(0, 4).pipe(also).walk().collect::<Vec<_>>(), vec![2, 0]);
    }

    #[test]
    fn take_through_the_pipe_collapses_repeat() {
        let view = repeat('-') | take(3);

        assert_eq!(view.walk().collect::<String>(), "---");
        assert!(std::any::type_name_of_val(&view).contains("Repeat<"));
    }

    #[test]
    fn split_and_join_through_the_pipe() {
        let text = "a-b--c";
        let rebuilt = text
            .pipe(lazy_split(single('-')) | join_with(single('+')))
            .walk()
            .collect::<String>();

        assert_eq!(rebuilt, "a+b++c");
    }

    #[test]
    fn enumerate_after_drop() {
        let view = IotaFrom::new(0) | drop(5) | enumerate() | take(2);

        assert_eq!(view.walk().collect::<Vec<_>>(), vec![(0, 5), (1, 6)]);
    }

    #[test]
    fn concat_and_chunk() {
        let view = Iota::new(0, 3) | concat(Iota::new(10, 12)) | chunk(2);
        let sums: Vec<i64> = view.walk().map(|c| c.walk().sum()).collect();

        assert_eq!(sums, vec![1, 12, 11]);
    }
}
