//! Read-only traversal: demotion of element access results, the generic const cursor wrapper, and
//! the `as_const` view.

use crate::{
    cursor::{
        BidiCursor, Capability, ContiguousCursor, Cursor, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel,
    },
    dispatch::Strategy,
    host::{Cells, Iota, IotaFrom, SlotRefCursor, UntilNul},
    sequence::{CommonSequence, Sequence},
    slot::{Slot, SlotRef},
    subrange::Subrange,
};

/// Conversion of an element access result into its read-only form.
///
/// Results that are read-only by construction (shared references, plain values, [`SlotRef`])
/// demote to themselves, so demoting twice never nests.
pub trait Demote {
    type Output;

    fn demote(self) -> Self::Output;
}

impl<'a, T: ?Sized> Demote for &'a T {
    type Output = &'a T;

    fn demote(self) -> &'a T {
        self
    }
}

impl<'a, T> Demote for Slot<'a, T> {
    type Output = SlotRef<'a, T>;

    fn demote(self) -> SlotRef<'a, T> {
        self.read_only()
    }
}

impl<'a, T> Demote for SlotRef<'a, T> {
    type Output = SlotRef<'a, T>;

    fn demote(self) -> SlotRef<'a, T> {
        self
    }
}

impl<A: Demote, const N: usize> Demote for [A; N] {
    type Output = [A::Output; N];

    fn demote(self) -> Self::Output {
        self.map(Demote::demote)
    }
}

impl<C, S> Demote for Subrange<C, S>
where
    C: Cursor,
    C::Item: Demote,
    S: Sentinel<C>,
{
    type Output = Subrange<ConstCursor<C>, ConstSentinel<S>>;

    fn demote(self) -> Self::Output {
        let (start, end) = self.into_parts();
        Subrange::new(ConstCursor::new(start), ConstSentinel::new(end))
    }
}

macro_rules! demote_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Demote for $ty {
                type Output = $ty;

                fn demote(self) -> $ty {
                    self
                }
            }
        )*
    };
}

demote_by_value!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String,
);

macro_rules! demote_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Demote),+> Demote for ($($name,)+) {
            type Output = ($($name::Output,)+);

            fn demote(self) -> Self::Output {
                ($(self.$idx.demote(),)+)
            }
        }
    };
}

demote_tuple!(A 0);
demote_tuple!(A 0, B 1);
demote_tuple!(A 0, B 1, C 2);
demote_tuple!(A 0, B 1, C 2, D 3);

/// Generic read-only cursor: forwards every traversal operation and demotes what
/// [`Cursor::read`] returns.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstCursor<C> {
    inner: C,
}

impl<C> ConstCursor<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn base(&self) -> &C {
        &self.inner
    }

    pub fn into_base(self) -> C {
        self.inner
    }
}

impl<C: Cursor> Cursor for ConstCursor<C>
where
    C::Item: Demote,
{
    type Item = <C::Item as Demote>::Output;

    const CAPABILITY: Capability = C::CAPABILITY;

    fn read(&self) -> Self::Item {
        self.inner.read().demote()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<C: ForwardCursor> ForwardCursor for ConstCursor<C>
where
    C::Item: Demote,
{
    fn measure(&self, other: &Self) -> Option<isize> {
        self.inner.measure(&other.inner)
    }
}

impl<C: BidiCursor> BidiCursor for ConstCursor<C>
where
    C::Item: Demote,
{
    fn retreat(&mut self) {
        self.inner.retreat();
    }
}

impl<C: RandomCursor> RandomCursor for ConstCursor<C>
where
    C::Item: Demote,
{
    fn jump(&mut self, n: isize) {
        self.inner.jump(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        self.inner.offset_to(&other.inner)
    }
}

impl<C: ContiguousCursor> ContiguousCursor for ConstCursor<C>
where
    C::Item: Demote,
{
    type Element = C::Element;

    fn address(&self) -> *const C::Element {
        self.inner.address()
    }
}

impl<C: Exhaust> Exhaust for ConstCursor<C>
where
    C::Item: Demote,
{
    const FINISHING: bool = C::FINISHING;

    fn exhausted(&self) -> bool {
        self.inner.exhausted()
    }

    fn remaining(&self) -> Option<isize> {
        self.inner.remaining()
    }
}

impl<C: Finishing> Finishing for ConstCursor<C>
where
    C::Item: Demote,
{
    fn to_finish(&self) -> Self {
        ConstCursor::new(self.inner.to_finish())
    }
}

/// Sentinel of a mutable sequence, made to answer for the matching [`ConstCursor`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConstSentinel<S> {
    inner: S,
}

impl<S> ConstSentinel<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<C: Cursor, S: Sentinel<C>> Sentinel<ConstCursor<C>> for ConstSentinel<S> {
    fn reached(&self, cursor: &ConstCursor<C>) -> bool {
        self.inner.reached(&cursor.inner)
    }

    fn remaining(&self, cursor: &ConstCursor<C>) -> Option<isize> {
        self.inner.remaining(&cursor.inner)
    }
}

/// The read-only traversal path of a sequence.
///
/// Sequences that already hand out read-only elements implement this as the identity. Sequences
/// with a cheaper native read-only form (see [`Cells`]) name it here. Everything else is wrapped
/// in [`ConstCursor`].
pub trait ConstSequence: Sequence {
    type ConstCursor: Cursor;
    type ConstSentinel: Sentinel<Self::ConstCursor>;

    /// How the read-only path was obtained
    const CONST_STRATEGY: Strategy;

    fn const_start(&self) -> Self::ConstCursor;

    fn const_end(&self) -> Self::ConstSentinel;
}

/// A [`ConstSequence`] whose read-only end can be produced as a cursor
pub trait ConstCommonSequence: ConstSequence {
    fn const_finish(&self) -> Self::ConstCursor;
}

macro_rules! const_identity {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> ConstSequence for $ty {
                type ConstCursor = <$ty as Sequence>::Cursor;
                type ConstSentinel = <$ty as Sequence>::Sentinel;

                const CONST_STRATEGY: Strategy = Strategy::Member;

                fn const_start(&self) -> Self::ConstCursor {
                    self.start()
                }

                fn const_end(&self) -> Self::ConstSentinel {
                    self.end()
                }
            }
        )*
    };
}

const_identity!(
    {'a, T} &'a [T],
    {'a, T} &'a Vec<T>,
    {'a, T, const N: usize} &'a [T; N],
    {'a} &'a str,
    {} Iota,
    {} IotaFrom,
    {'a, T: Default + PartialEq} UntilNul<'a, T>,
);

macro_rules! const_common_identity {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> ConstCommonSequence for $ty {
                fn const_finish(&self) -> Self::ConstCursor {
                    self.finish()
                }
            }
        )*
    };
}

const_common_identity!(
    {'a, T} &'a [T],
    {'a, T} &'a Vec<T>,
    {'a, T, const N: usize} &'a [T; N],
    {'a} &'a str,
    {} Iota,
);

impl<'a, T> ConstSequence for Cells<'a, T> {
    type ConstCursor = SlotRefCursor<'a, T>;
    type ConstSentinel = SlotRefCursor<'a, T>;

    const CONST_STRATEGY: Strategy = Strategy::Member;

    fn const_start(&self) -> SlotRefCursor<'a, T> {
        SlotRefCursor::new(self.start())
    }

    fn const_end(&self) -> SlotRefCursor<'a, T> {
        SlotRefCursor::new(self.end())
    }
}

impl<'a, T> ConstCommonSequence for Cells<'a, T> {
    fn const_finish(&self) -> SlotRefCursor<'a, T> {
        SlotRefCursor::new(self.finish())
    }
}

/// Implement [`ConstSequence`] by wrapping the mutable path in [`ConstCursor`].
macro_rules! const_wrapped {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> $crate::constant::ConstSequence for $ty
            where
                $ty: $crate::sequence::Sequence,
                <<$ty as $crate::sequence::Sequence>::Cursor as $crate::cursor::Cursor>::Item:
                    $crate::constant::Demote,
            {
                type ConstCursor =
                    $crate::constant::ConstCursor<<$ty as $crate::sequence::Sequence>::Cursor>;
                type ConstSentinel =
                    $crate::constant::ConstSentinel<<$ty as $crate::sequence::Sequence>::Sentinel>;

                const CONST_STRATEGY: $crate::dispatch::Strategy =
                    $crate::dispatch::Strategy::Wrapped;

                fn const_start(&self) -> Self::ConstCursor {
                    $crate::constant::ConstCursor::new($crate::sequence::Sequence::start(self))
                }

                fn const_end(&self) -> Self::ConstSentinel {
                    $crate::constant::ConstSentinel::new($crate::sequence::Sequence::end(self))
                }
            }

            impl<$($gen)*> $crate::constant::ConstCommonSequence for $ty
            where
                $ty: $crate::sequence::CommonSequence,
                <<$ty as $crate::sequence::Sequence>::Cursor as $crate::cursor::Cursor>::Item:
                    $crate::constant::Demote,
            {
                fn const_finish(&self) -> Self::ConstCursor {
                    $crate::constant::ConstCursor::new(
                        $crate::sequence::CommonSequence::finish(self),
                    )
                }
            }
        )*
    };
}

pub(crate) use const_wrapped;

/// View over the read-only path of `V`
#[derive(Debug, Clone)]
pub struct AsConstView<V> {
    base: V,
}

impl<V: ConstSequence> AsConstView<V> {
    pub fn new(base: V) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &V {
        &self.base
    }
}

impl<V: ConstSequence> Sequence for AsConstView<V> {
    type Cursor = V::ConstCursor;
    type Sentinel = V::ConstSentinel;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;
    const DISABLE_COUNT: bool = V::DISABLE_COUNT;

    fn start(&self) -> V::ConstCursor {
        self.base.const_start()
    }

    fn end(&self) -> V::ConstSentinel {
        self.base.const_end()
    }

    fn count(&self) -> Option<V::Count> {
        self.base.count()
    }

    fn is_empty_hint(&self) -> Option<bool> {
        self.base.is_empty_hint()
    }
}

impl<V: ConstCommonSequence> CommonSequence for AsConstView<V> {
    fn finish(&self) -> V::ConstCursor {
        self.base.const_finish()
    }
}

impl<V: ConstSequence> ConstSequence for AsConstView<V> {
    type ConstCursor = V::ConstCursor;
    type ConstSentinel = V::ConstSentinel;

    const CONST_STRATEGY: Strategy = Strategy::Member;

    fn const_start(&self) -> V::ConstCursor {
        self.base.const_start()
    }

    fn const_end(&self) -> V::ConstSentinel {
        self.base.const_end()
    }
}

impl<V: ConstCommonSequence> ConstCommonSequence for AsConstView<V> {
    fn const_finish(&self) -> V::ConstCursor {
        self.base.const_finish()
    }
}

/// Conversion to a read-only view, without stacking wrappers on views that are already
/// read-only.
pub trait IntoConst: Sequence + Sized {
    type Output: Sequence;

    fn into_const(self) -> Self::Output;
}

macro_rules! into_const_identity {
    ($({$($gen:tt)*} $ty:ty),* $(,)?) => {
        $(
            impl<$($gen)*> IntoConst for $ty {
                type Output = $ty;

                fn into_const(self) -> $ty {
                    self
                }
            }
        )*
    };
}

into_const_identity!(
    {'a, T} &'a [T],
    {'a, T} &'a Vec<T>,
    {'a, T, const N: usize} &'a [T; N],
    {'a} &'a str,
    {} Iota,
    {} IotaFrom,
    {'a, T: Default + PartialEq} UntilNul<'a, T>,
);

impl<V: ConstSequence> IntoConst for AsConstView<V> {
    type Output = AsConstView<V>;

    fn into_const(self) -> Self {
        self
    }
}

impl<'a, T> IntoConst for Cells<'a, T> {
    type Output = AsConstView<Cells<'a, T>>;

    fn into_const(self) -> Self::Output {
        AsConstView::new(self)
    }
}

/// Read-only view of `seq`
pub fn as_const<V: IntoConst>(seq: V) -> V::Output {
    seq.into_const()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{host::SliceCursor, sequence::SequenceExt};

    fn type_of<T>(_: &T) -> &'static str {
        std::any::type_name::<T>()
    }

    #[test]
    fn const_path_matches_mutable_path() {
        let mut data = [3, 1, 4, 1, 5];
        let cells = Cells::new(&mut data);

        let mutable: Vec<i32> = cells.walk().map(|s| s.get()).collect();
        let read_only: Vec<i32> = as_const(cells).walk().map(|s| s.get()).collect();

        assert_eq!(mutable, read_only);
    }

    #[test]
    fn native_const_path_is_preferred() {
        let mut data = [1, 2];
        let cells = Cells::new(&mut data);

        assert_eq!(<Cells<'_, i32> as ConstSequence>::CONST_STRATEGY, Strategy::Member);
        let c: SlotRefCursor<'_, i32> = cells.const_start();
        assert_eq!(c.read().get(), 1);
    }

    #[test]
    fn read_only_sequences_are_their_own_const_view() {
        let v = vec![1, 2, 3];
        let s: &[i32] = &v;

        assert_eq!(type_of(&as_const(s)), type_of(&s));
        let mut data = [1, 2];
        let once = as_const(Cells::new(&mut data).into_const());
        let twice = as_const(once.clone());
        assert_eq!(once.walk().count(), twice.walk().count());
    }

    #[test]
    fn const_cursor_forwards_traversal() {
        let v = [1, 2, 3, 4];
        let mut c = ConstCursor::new(SliceCursor::new(&v, 0));

        assert_eq!(
            <ConstCursor<SliceCursor<'_, i32>> as Cursor>::CAPABILITY,
            Capability::Contiguous
        );
        c.jump(3);
        assert_eq!(*c.read(), 4);
        c.retreat();
        assert_eq!(*c.read(), 3);
        assert_eq!(c.address(), &v[2] as *const i32);
    }

    #[test]
    fn demoting_twice_does_not_nest() {
        let cell = std::cell::Cell::new(9);
        let once = Slot::new(&cell).demote();
        let twice = once.demote();

        assert_eq!(type_of(&once), type_of(&twice));
        assert_eq!(twice.get(), 9);
    }
}
