//! Lazy adaptors over one or more sequences.
//!
//! Every view owns its bases, is cheap to clone, and hands out cursors that carry everything they
//! need (base cursors, base sentinels, shared predicates), so a view's cursors stay valid for as
//! long as its bases' cursors do.

/// `view | adaptor` for a view type.
macro_rules! view_pipe {
    (@one {} $ty:ty) => {
        impl<Ad: $crate::pipe::Adaptor<$ty>> ::std::ops::BitOr<Ad> for $ty {
            type Output = <Ad as $crate::pipe::Adaptor<$ty>>::Output;

            fn bitor(self, adaptor: Ad) -> Self::Output {
                adaptor.apply(self)
            }
        }
    };
    (@one {$($gen:tt)+} $ty:ty) => {
        impl<$($gen)+, Ad: $crate::pipe::Adaptor<$ty>> ::std::ops::BitOr<Ad> for $ty {
            type Output = <Ad as $crate::pipe::Adaptor<$ty>>::Output;

            fn bitor(self, adaptor: Ad) -> Self::Output {
                adaptor.apply(self)
            }
        }
    };
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            $crate::views::view_pipe!(@one {$($gen)*} $ty);
        )*
    };
}

/// Generic `take` and `drop` for a sequence type.
macro_rules! view_slicing {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> $crate::views::Takeable for $ty
            where
                $ty: $crate::sequence::Sequence,
            {
                type Output = $crate::views::TakeView<$ty>;

                fn take_first(self, n: usize) -> Self::Output {
                    $crate::views::TakeView::new(self, n)
                }
            }

            impl<$($gen)*> $crate::views::Droppable for $ty
            where
                $ty: $crate::sequence::Sequence,
            {
                type Output = $crate::views::DropView<$ty>;

                fn drop_first(self, n: usize) -> Self::Output {
                    $crate::views::DropView::new(self, n)
                }
            }
        )*
    };
}

/// Single-pass demotion through [`ToInputView`].
macro_rules! view_input {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> $crate::views::IntoInput for $ty
            where
                $ty: $crate::sequence::Sequence,
            {
                type Output = $crate::views::ToInputView<$ty>;

                fn into_input(self) -> Self::Output {
                    $crate::views::ToInputView::new(self)
                }
            }
        )*
    };
}

/// Read-only path through the generic const cursor, and `as_const` through [`AsConstView`].
///
/// [`AsConstView`]: crate::AsConstView
macro_rules! view_const {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> $crate::constant::IntoConst for $ty
            where
                $ty: $crate::constant::ConstSequence,
            {
                type Output = $crate::constant::AsConstView<$ty>;

                fn into_const(self) -> Self::Output {
                    $crate::constant::AsConstView::new(self)
                }
            }
        )*
        $crate::constant::const_wrapped!($({$($gen)*} $ty),*);
    };
}

/// Everything a view type takes part in.
macro_rules! view_algebra {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $crate::views::view_pipe!($({$($gen)*} $ty),*);
        $crate::views::view_slicing!($({$($gen)*} $ty),*);
        $crate::views::view_input!($({$($gen)*} $ty),*);
        $crate::views::view_const!($({$($gen)*} $ty),*);
    };
}

pub(crate) use {view_algebra, view_const, view_input, view_pipe, view_slicing};

mod adjacent;
mod cartesian;
mod chunk;
mod chunk_by;
mod concat;
mod enumerate;
mod join;
mod repeat;
mod simple;
mod single;
mod split;
mod stride;
mod take_drop;
mod zip;

pub use adjacent::{AdjacentCursor, AdjacentView, SlideCursor, SlideView, adjacent, slide};
pub use cartesian::{CartesianCursor, CartesianView, cartesian_product};
pub use chunk::{
    ChunkCursor, ChunkInputCursor, ChunkInputView, ChunkView, InputChunk, InputChunkCursor, chunk,
    chunk_input,
};
pub use chunk_by::{ChunkByCursor, ChunkByView, chunk_by};
pub use concat::{ConcatCursor, ConcatView, Side, concat, concat3};
pub use enumerate::{EnumerateCursor, EnumerateView, enumerate};
pub use join::{JoinCursor, JoinView, JoinWithCursor, JoinWithView, join, join_with};
pub use repeat::{Repeat, RepeatCursor, RepeatForever, repeat, repeat_n};
pub use simple::{
    AsRvalueCursor, AsRvalueView, IntoInput, ToInputCursor, ToInputView, as_rvalue, to_input,
};
pub use single::{SingleCursor, SingleView, single};
pub use split::{LazySplitView, SplitCursor, lazy_split};
pub use stride::{StrideCursor, StrideView, stride};
pub use take_drop::{DropView, Droppable, TakeCursor, TakeView, Takeable, drop, take};
pub use zip::{
    ZipCursor, ZipFn, ZipTransformCursor, ZipTransformView, ZipView, zip, zip_transform,
};

use crate::{
    constant::AsConstView,
    host::{Cells, Input, Iota, IotaFrom, UntilNul},
    subrange::Subrange,
};

// host sequences join the pipeline
view_slicing!(
    {'a, T} &'a [T],
    {'a, T} &'a Vec<T>,
    {'a, T, const N: usize} &'a [T; N],
    {'a} &'a str,
    {} Iota,
    {} IotaFrom,
    {'a, T} Cells<'a, T>,
    {'a, T: Default + PartialEq} UntilNul<'a, T>,
    {I: Iterator} Input<I>,
    {C, S} Subrange<C, S>,
    {V} AsConstView<V>,
);

view_input!(
    {'a, T} &'a [T],
    {'a, T} &'a Vec<T>,
    {'a, T, const N: usize} &'a [T; N],
    {'a} &'a str,
    {} Iota,
    {} IotaFrom,
    {'a, T} Cells<'a, T>,
    {'a, T: Default + PartialEq} UntilNul<'a, T>,
    {C, S} Subrange<C, S>,
    {V} AsConstView<V>,
);

view_pipe!(
    {} Iota,
    {} IotaFrom,
    {'a, T} Cells<'a, T>,
    {'a, T: Default + PartialEq} UntilNul<'a, T>,
    {I: Iterator} Input<I>,
    {C, S} Subrange<C, S>,
    {V} AsConstView<V>,
);

view_const!({C, S} Subrange<C, S>);
