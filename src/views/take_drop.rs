use crate::{
    cursor::{
        BidiCursor, Capability, ContiguousCursor, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel, advance_bounded, advance_bounded_random,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Count, Sequence},
    slot::{Movable, Writable},
};

/// Sequences that can be cut down to their first `n` elements.
///
/// Most types answer with a [`TakeView`]; types with a cheaper closed form (a bounded repetition)
/// return that instead.
pub trait Takeable: Sequence + Sized {
    type Output: Sequence;

    fn take_first(self, n: usize) -> Self::Output;
}

/// Sequences that can skip their first `n` elements
pub trait Droppable: Sequence + Sized {
    type Output: Sequence;

    fn drop_first(self, n: usize) -> Self::Output;
}

/// Cursor over at most `left` more elements of its base.
pub struct TakeCursor<C, S> {
    inner: C,
    end: S,
    left: usize,
}

impl<C: Clone, S: Clone> Clone for TakeCursor<C, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            end: self.end.clone(),
            left: self.left,
        }
    }
}

impl<C: PartialEq, S> PartialEq for TakeCursor<C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<C: std::fmt::Debug, S> std::fmt::Debug for TakeCursor<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TakeCursor")
            .field("inner", &self.inner)
            .field("left", &self.left)
            .finish()
    }
}

impl<C, S> TakeCursor<C, S> {
    pub fn base(&self) -> &C {
        &self.inner
    }
}

impl<C: Cursor, S: Sentinel<C>> Cursor for TakeCursor<C, S> {
    type Item = C::Item;

    const CAPABILITY: Capability = C::CAPABILITY;

    fn read(&self) -> C::Item {
        self.inner.read()
    }

    fn advance(&mut self) {
        self.inner.advance();
        self.left = self.left.saturating_sub(1);
    }

    fn move_out(&self) -> <C::Item as Movable>::Value
    where
        C::Item: Movable,
    {
        self.inner.move_out()
    }

    fn swap_with(&self, other: &Self)
    where
        C::Item: Writable,
    {
        self.inner.swap_with(&other.inner);
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> ForwardCursor for TakeCursor<C, S> {
    fn measure(&self, other: &Self) -> Option<isize> {
        self.inner.measure(&other.inner)
    }
}

impl<C: BidiCursor, S: Sentinel<C>> BidiCursor for TakeCursor<C, S> {
    fn retreat(&mut self) {
        self.inner.retreat();
        self.left += 1;
    }
}

impl<C: RandomCursor, S: Sentinel<C>> RandomCursor for TakeCursor<C, S> {
    fn jump(&mut self, n: isize) {
        self.inner.jump(n);
        self.left = self.left.wrapping_add_signed(-n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        self.inner.offset_to(&other.inner)
    }
}

impl<C: ContiguousCursor, S: Sentinel<C>> ContiguousCursor for TakeCursor<C, S> {
    type Element = C::Element;

    fn address(&self) -> *const C::Element {
        self.inner.address()
    }
}

impl<C: Cursor, S: Sentinel<C>> Exhaust for TakeCursor<C, S> {
    const FINISHING: bool = C::CAPABILITY.at_least(Capability::RandomAccess);

    fn exhausted(&self) -> bool {
        self.left == 0 || self.end.reached(&self.inner)
    }

    fn remaining(&self) -> Option<isize> {
        let rem = self.end.remaining(&self.inner)?;
        Some(rem.min(self.left as isize))
    }
}

impl<C: RandomCursor, S: Sentinel<C>> Finishing for TakeCursor<C, S> {
    fn to_finish(&self) -> Self {
        let mut inner = self.inner.clone();
        let left = advance_bounded_random(&mut inner, self.left, &self.end);
        Self {
            inner,
            end: self.end.clone(),
            left,
        }
    }
}

/// The first `n` elements of the base, or all of them if there are fewer
#[derive(Debug, Clone)]
pub struct TakeView<V> {
    base: V,
    n: usize,
}

impl<V: Sequence> TakeView<V> {
    pub fn new(base: V, n: usize) -> Self {
        Self { base, n }
    }
}

impl<V: Sequence> Sequence for TakeView<V> {
    type Cursor = TakeCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;
    const DISABLE_COUNT: bool = V::DISABLE_COUNT;

    fn start(&self) -> Self::Cursor {
        TakeCursor {
            inner: self.base.start(),
            end: self.base.end(),
            left: self.n,
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        let n = count_of(&self.base)?.to_usize();
        Some(V::Count::from_usize(n.min(self.n)))
    }

    fn is_empty_hint(&self) -> Option<bool> {
        if self.n == 0 {
            Some(true)
        } else {
            self.base.is_empty_hint()
        }
    }
}

// only random access bases can find their cut-off point without walking to it
impl<V> CommonSequence for TakeView<V>
where
    V: Sequence,
    V::Cursor: RandomCursor,
{
    fn finish(&self) -> Self::Cursor {
        let mut inner = self.base.start();
        let end = self.base.end();
        let left = advance_bounded_random(&mut inner, self.n, &end);
        TakeCursor { inner, end, left }
    }
}

crate::views::view_algebra!({V} TakeView<V>);

/// The base without its first `n` elements
#[derive(Debug, Clone)]
pub struct DropView<V> {
    base: V,
    n: usize,
}

impl<V: Sequence> DropView<V> {
    pub fn new(base: V, n: usize) -> Self {
        Self { base, n }
    }
}

impl<V: Sequence> Sequence for DropView<V> {
    type Cursor = V::Cursor;
    type Sentinel = V::Sentinel;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;
    const DISABLE_COUNT: bool = V::DISABLE_COUNT;

    fn start(&self) -> V::Cursor {
        let mut cursor = self.base.start();
        let end = self.base.end();
        advance_bounded(&mut cursor, self.n, &end);
        cursor
    }

    fn end(&self) -> V::Sentinel {
        self.base.end()
    }

    fn count(&self) -> Option<V::Count> {
        let n = count_of(&self.base)?.to_usize();
        Some(V::Count::from_usize(n.saturating_sub(self.n)))
    }
}

impl<V: CommonSequence> CommonSequence for DropView<V> {
    fn finish(&self) -> V::Cursor {
        self.base.finish()
    }
}

crate::views::view_algebra!({V} DropView<V>);

/// The first `n` elements of `seq`
pub fn take<V: Takeable>(seq: V, n: usize) -> V::Output {
    seq.take_first(n)
}

/// `seq` without its first `n` elements
pub fn drop<V: Droppable>(seq: V, n: usize) -> V::Output {
    seq.drop_first(n)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dispatch::storage_of,
        host::{Input, Iota, IotaFrom},
        reverse::reverse,
        sequence::SequenceExt,
        testing::{ForwardOnly, capability_of},
        views::repeat,
    };

    #[test]
    fn take_stops_at_n_or_the_end() {
        assert_eq!(take(Iota::new(0, 10), 3).walk().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(take(Iota::new(0, 2), 5).walk().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(take(Iota::new(0, 2), 5).count(), Some(2));
        assert_eq!(take(IotaFrom::new(4), 2).walk().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn take_keeps_contiguity() {
        let v = [1, 2, 3, 4];
        let view = take(&v[..], 2);

        assert_eq!(capability_of(&view), Capability::Contiguous);
        assert_eq!(storage_of(&view), v.as_ptr());
        assert_eq!(view.finish().offset_to(&view.start()), -2);
    }

    #[test]
    fn take_of_random_access_reverses() {
        let view = take(Iota::new(0, 10), 4);

        assert_eq!(reverse(view).walk().collect::<Vec<_>>(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn take_of_single_pass_input() {
        let view = take(Input::new(0..), 3);

        assert_eq!(capability_of(&view), Capability::SinglePass);
        assert_eq!(view.walk().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn drop_skips_and_saturates() {
        let v = [1, 2, 3, 4];

        assert_eq!(drop(&v[..], 1).walk().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(drop(&v[..], 9).walk().count(), 0);
        assert_eq!(drop(&v[..], 9).count(), Some(0));
        assert_eq!(drop(&v[..], 2).finish(), (&v[..]).finish());
    }

    #[test]
    fn drop_walks_forward_bases() {
        let v = [1, 2, 3, 4];
        let view = drop(ForwardOnly::new(&v[..]), 3);

        assert_eq!(view.walk().copied().collect::<Vec<_>>(), vec![4]);
        assert_eq!(drop(ForwardOnly::new(&v[..]), 9).walk().count(), 0);
        assert_eq!(
            take(ForwardOnly::new(&v[..]), 2).walk().copied().collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn take_of_unbounded_repeat_is_not_wrapped() {
        let view = take(drop(repeat(1), 5), 3);

        assert!(std::any::type_name_of_val(&view).contains("Repeat<"));
        assert!(!std::any::type_name_of_val(&view).contains("TakeView"));
        assert_eq!(view.count(), Some(3));
    }

    #[test]
    fn take_of_drop_is_a_window() {
        let view = take(drop(Iota::new(0, 100), 10), 3);

        assert_eq!(view.walk().collect::<Vec<_>>(), vec![10, 11, 12]);
        assert_eq!(view.count(), Some(3));
    }
}
