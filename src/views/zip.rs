use std::rc::Rc;

use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Count, Sequence},
};

/// Cursor moving a tuple of base cursors in lockstep.
///
/// All components always sit at the same logical index, so positions are compared and measured
/// by that index alone.
pub struct ZipCursor<Cs, Ss> {
    cursors: Cs,
    ends: Ss,
    index: usize,
}

impl<Cs: Clone, Ss: Clone> Clone for ZipCursor<Cs, Ss> {
    fn clone(&self) -> Self {
        Self {
            cursors: self.cursors.clone(),
            ends: self.ends.clone(),
            index: self.index,
        }
    }
}

impl<Cs, Ss> PartialEq for ZipCursor<Cs, Ss> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<Cs: std::fmt::Debug, Ss> std::fmt::Debug for ZipCursor<Cs, Ss> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipCursor")
            .field("cursors", &self.cursors)
            .field("index", &self.index)
            .finish()
    }
}

impl<Cs, Ss> ZipCursor<Cs, Ss> {
    pub fn cursors(&self) -> &Cs {
        &self.cursors
    }
}

/// Element-wise sequences: a tuple of them zipped together
#[derive(Debug, Clone)]
pub struct ZipView<Vs> {
    bases: Vs,
}

impl<Vs> ZipView<Vs>
where
    ZipView<Vs>: Sequence,
{
    pub fn new(bases: Vs) -> Self {
        Self { bases }
    }
}

macro_rules! zip_cursor {
    (@finishing) => { false };
    (@finishing $($C:ident $S:ident),+) => {
        true $(&& $S::COMMON && $C::CAPABILITY.at_least(Capability::RandomAccess))+
    };
    ($($C:ident $S:ident $idx:tt),*) => {
        impl<$($C: Cursor, $S: Sentinel<$C>),*> Cursor for ZipCursor<($($C,)*), ($($S,)*)> {
            type Item = ($($C::Item,)*);

            const CAPABILITY: Capability = Capability::RandomAccess $(.min($C::CAPABILITY))*;

            fn read(&self) -> Self::Item {
                ($(self.cursors.$idx.read(),)*)
            }

            fn advance(&mut self) {
                $(self.cursors.$idx.advance();)*
                self.index += 1;
            }
        }

        impl<$($C: ForwardCursor, $S: Sentinel<$C>),*> ForwardCursor
            for ZipCursor<($($C,)*), ($($S,)*)>
        {
            fn measure(&self, other: &Self) -> Option<isize> {
                Some(other.index as isize - self.index as isize)
            }
        }

        impl<$($C: BidiCursor, $S: Sentinel<$C>),*> BidiCursor
            for ZipCursor<($($C,)*), ($($S,)*)>
        {
            fn retreat(&mut self) {
                $(self.cursors.$idx.retreat();)*
                self.index -= 1;
            }
        }

        impl<$($C: RandomCursor, $S: Sentinel<$C>),*> RandomCursor
            for ZipCursor<($($C,)*), ($($S,)*)>
        {
            fn jump(&mut self, n: isize) {
                $(self.cursors.$idx.jump(n);)*
                self.index = self.index.wrapping_add_signed(n);
            }

            fn offset_to(&self, other: &Self) -> isize {
                other.index as isize - self.index as isize
            }
        }

        impl<$($C: Cursor, $S: Sentinel<$C>),*> Exhaust for ZipCursor<($($C,)*), ($($S,)*)> {
            const FINISHING: bool = zip_cursor!(@finishing $($C $S),*);

            fn exhausted(&self) -> bool {
                false $(|| self.ends.$idx.reached(&self.cursors.$idx))*
            }

            #[allow(unused_mut)]
            fn remaining(&self) -> Option<isize> {
                let mut shortest: Option<isize> = None;
                $(
                    let left = self.ends.$idx.remaining(&self.cursors.$idx)?;
                    shortest = Some(shortest.map_or(left, |n| n.min(left)));
                )*
                shortest
            }
        }
    };
}

// the shortest base decides where the zip ends
macro_rules! zip_finish {
    ($($C:ident $S:ident $idx:tt),+) => {
        impl<$($C: RandomCursor, $S: CommonSentinel<$C>),+> Finishing
            for ZipCursor<($($C,)+), ($($S,)+)>
        {
            fn to_finish(&self) -> Self {
                let len = [$(
                    self.cursors.$idx.offset_to(&self.ends.$idx.finish_from(&self.cursors.$idx))
                ),+]
                    .into_iter()
                    .min()
                    .unwrap_or(0)
                    .max(0);
                let mut cursor = self.clone();
                cursor.jump(len);
                cursor
            }
        }
    };
}

macro_rules! zip_view {
    ($($V:ident $idx:tt),*) => {
        impl<$($V: Sequence),*> Sequence for ZipView<($($V,)*)> {
            type Cursor = ZipCursor<($($V::Cursor,)*), ($($V::Sentinel,)*)>;
            type Sentinel = End;
            type Count = usize;

            const BORROWED: bool = true $(&& $V::BORROWED)*;

            fn start(&self) -> Self::Cursor {
                ZipCursor {
                    cursors: ($(self.bases.$idx.start(),)*),
                    ends: ($(self.bases.$idx.end(),)*),
                    index: 0,
                }
            }

            fn end(&self) -> End {
                End
            }

            /// The shortest base's count, known only when every base's count is
            #[allow(unused_mut)]
            fn count(&self) -> Option<usize> {
                let mut shortest: Option<usize> = None;
                $(
                    let n = count_of(&self.bases.$idx)?.to_usize();
                    shortest = Some(shortest.map_or(n, |m| m.min(n)));
                )*
                shortest
            }
        }
    };
}

// the end of a zip is only known without walking when every base can jump to its own end
macro_rules! zip_common {
    ($($V:ident $idx:tt),+) => {
        impl<$($V),+> CommonSequence for ZipView<($($V,)+)>
        where
            $($V: CommonSequence, $V::Cursor: RandomCursor,)+
        {
            fn finish(&self) -> Self::Cursor {
                let len = [$(self.bases.$idx.start().offset_to(&self.bases.$idx.finish())),+]
                    .into_iter()
                    .min()
                    .unwrap_or(0)
                    .max(0);
                let mut cursor = self.start();
                cursor.jump(len);
                cursor
            }
        }
    };
}

zip_cursor!();
zip_cursor!(CA SA 0);
zip_cursor!(CA SA 0, CB SB 1);
zip_cursor!(CA SA 0, CB SB 1, CC SC 2);
zip_cursor!(CA SA 0, CB SB 1, CC SC 2, CD SD 3);

zip_finish!(CA SA 0);
zip_finish!(CA SA 0, CB SB 1);
zip_finish!(CA SA 0, CB SB 1, CC SC 2);
zip_finish!(CA SA 0, CB SB 1, CC SC 2, CD SD 3);

zip_view!();
zip_view!(VA 0);
zip_view!(VA 0, VB 1);
zip_view!(VA 0, VB 1, VC 2);
zip_view!(VA 0, VB 1, VC 2, VD 3);

zip_common!(VA 0);
zip_common!(VA 0, VB 1);
zip_common!(VA 0, VB 1, VC 2);
zip_common!(VA 0, VB 1, VC 2, VD 3);

crate::views::view_algebra!({Vs} ZipView<Vs>);

/// Zip a tuple of up to four sequences. The result is as long as the shortest of them.
pub fn zip<Vs>(bases: Vs) -> ZipView<Vs>
where
    ZipView<Vs>: Sequence,
{
    ZipView::new(bases)
}

/// A function taking one argument per zipped sequence
pub trait ZipFn<Args> {
    type Output;

    fn call_with(&self, args: Args) -> Self::Output;
}

macro_rules! zip_fn {
    ($($T:ident $arg:ident),*) => {
        impl<F, R, $($T),*> ZipFn<($($T,)*)> for F
        where
            F: Fn($($T),*) -> R,
        {
            type Output = R;

            fn call_with(&self, ($($arg,)*): ($($T,)*)) -> R {
                self($($arg),*)
            }
        }
    };
}

zip_fn!();
zip_fn!(A a);
zip_fn!(A a, B b);
zip_fn!(A a, B b, C c);
zip_fn!(A a, B b, C c, D d);

/// Cursor applying a function to the elements of a [`ZipCursor`]
pub struct ZipTransformCursor<F, Z> {
    f: Rc<F>,
    inner: Z,
}

impl<F, Z: Clone> Clone for ZipTransformCursor<F, Z> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
            inner: self.inner.clone(),
        }
    }
}

impl<F, Z: PartialEq> PartialEq for ZipTransformCursor<F, Z> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<F, Z> Cursor for ZipTransformCursor<F, Z>
where
    Z: Cursor,
    F: ZipFn<Z::Item>,
{
    type Item = F::Output;

    const CAPABILITY: Capability = Z::CAPABILITY;

    fn read(&self) -> F::Output {
        self.f.call_with(self.inner.read())
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<F, Z> ForwardCursor for ZipTransformCursor<F, Z>
where
    Z: ForwardCursor,
    F: ZipFn<Z::Item>,
{
    fn measure(&self, other: &Self) -> Option<isize> {
        self.inner.measure(&other.inner)
    }
}

impl<F, Z> BidiCursor for ZipTransformCursor<F, Z>
where
    Z: BidiCursor,
    F: ZipFn<Z::Item>,
{
    fn retreat(&mut self) {
        self.inner.retreat();
    }
}

impl<F, Z> RandomCursor for ZipTransformCursor<F, Z>
where
    Z: RandomCursor,
    F: ZipFn<Z::Item>,
{
    fn jump(&mut self, n: isize) {
        self.inner.jump(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        self.inner.offset_to(&other.inner)
    }
}

impl<F, Z> Exhaust for ZipTransformCursor<F, Z>
where
    Z: Exhaust,
    F: ZipFn<Z::Item>,
{
    const FINISHING: bool = Z::FINISHING;

    fn exhausted(&self) -> bool {
        self.inner.exhausted()
    }

    fn remaining(&self) -> Option<isize> {
        self.inner.remaining()
    }
}

impl<F, Z> Finishing for ZipTransformCursor<F, Z>
where
    Z: Finishing,
    F: ZipFn<Z::Item>,
{
    fn to_finish(&self) -> Self {
        ZipTransformCursor {
            f: Rc::clone(&self.f),
            inner: self.inner.to_finish(),
        }
    }
}

/// `f` applied element-wise across a tuple of sequences.
///
/// With no sequences at all, this is `f()` repeated without end.
pub struct ZipTransformView<F, Vs> {
    f: Rc<F>,
    inner: ZipView<Vs>,
}

impl<F, Vs: Clone> Clone for ZipTransformView<F, Vs> {
    fn clone(&self) -> Self {
        Self {
            f: Rc::clone(&self.f),
            inner: self.inner.clone(),
        }
    }
}

impl<F, Vs> ZipTransformView<F, Vs>
where
    ZipView<Vs>: Sequence,
    F: ZipFn<<<ZipView<Vs> as Sequence>::Cursor as Cursor>::Item>,
{
    pub fn new(f: F, bases: Vs) -> Self {
        Self {
            f: Rc::new(f),
            inner: ZipView::new(bases),
        }
    }
}

impl<F, Vs> Sequence for ZipTransformView<F, Vs>
where
    ZipView<Vs>: Sequence<Sentinel = End>,
    <ZipView<Vs> as Sequence>::Cursor: Exhaust,
    F: ZipFn<<<ZipView<Vs> as Sequence>::Cursor as Cursor>::Item>,
{
    type Cursor = ZipTransformCursor<F, <ZipView<Vs> as Sequence>::Cursor>;
    type Sentinel = End;
    type Count = <ZipView<Vs> as Sequence>::Count;

    const BORROWED: bool = <ZipView<Vs> as Sequence>::BORROWED;

    fn start(&self) -> Self::Cursor {
        ZipTransformCursor {
            f: Rc::clone(&self.f),
            inner: self.inner.start(),
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<Self::Count> {
        self.inner.count()
    }
}

impl<F, Vs> CommonSequence for ZipTransformView<F, Vs>
where
    ZipView<Vs>: CommonSequence<Sentinel = End>,
    <ZipView<Vs> as Sequence>::Cursor: Exhaust,
    F: ZipFn<<<ZipView<Vs> as Sequence>::Cursor as Cursor>::Item>,
{
    fn finish(&self) -> Self::Cursor {
        ZipTransformCursor {
            f: Rc::clone(&self.f),
            inner: self.inner.finish(),
        }
    }
}

crate::views::view_algebra!({F, Vs} ZipTransformView<F, Vs>);

/// Apply `f` across a tuple of up to four sequences
pub fn zip_transform<F, Vs>(f: F, bases: Vs) -> ZipTransformView<F, Vs>
where
    ZipView<Vs>: Sequence,
    F: ZipFn<<<ZipView<Vs> as Sequence>::Cursor as Cursor>::Item>,
{
    ZipTransformView::new(f, bases)
}
