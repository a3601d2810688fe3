use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel, advance_bounded, distance,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Count, Sequence},
    subrange::Subrange,
};

/// Window count for a base of `len` elements and windows of `width`
fn windows(len: usize, width: usize) -> usize {
    if width == 0 {
        0
    } else {
        (len + 1).saturating_sub(width)
    }
}

/// Cursor over the windows of width `N`, holding one base cursor per window slot.
pub struct AdjacentCursor<C, S, const N: usize> {
    cursors: [C; N],
    end: S,
}

impl<C: Clone, S: Clone, const N: usize> Clone for AdjacentCursor<C, S, N> {
    fn clone(&self) -> Self {
        Self {
            cursors: self.cursors.clone(),
            end: self.end.clone(),
        }
    }
}

// windows are equal when their last slots are
impl<C: PartialEq, S, const N: usize> PartialEq for AdjacentCursor<C, S, N> {
    fn eq(&self, other: &Self) -> bool {
        self.cursors.last() == other.cursors.last()
    }
}

impl<C: std::fmt::Debug, S, const N: usize> std::fmt::Debug for AdjacentCursor<C, S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdjacentCursor")
            .field("cursors", &self.cursors)
            .finish()
    }
}

impl<C: ForwardCursor, S: Sentinel<C>, const N: usize> AdjacentCursor<C, S, N> {
    fn new(start: C, end: S) -> Self {
        let mut next = start;
        let cursors = std::array::from_fn(|k| {
            if k > 0 {
                advance_bounded(&mut next, 1, &end);
            }
            next.clone()
        });
        Self { cursors, end }
    }
}

impl<C: ForwardCursor, S: Sentinel<C>, const N: usize> Cursor for AdjacentCursor<C, S, N> {
    type Item = [C::Item; N];

    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::RandomAccess);

    fn read(&self) -> [C::Item; N] {
        std::array::from_fn(|k| self.cursors[k].read())
    }

    fn advance(&mut self) {
        for c in &mut self.cursors {
            c.advance();
        }
    }
}

impl<C: ForwardCursor, S: Sentinel<C>, const N: usize> ForwardCursor for AdjacentCursor<C, S, N> {
    fn measure(&self, other: &Self) -> Option<isize> {
        match (self.cursors.first(), other.cursors.first()) {
            (Some(a), Some(b)) => a.measure(b),
            _ => Some(0),
        }
    }
}

impl<C: BidiCursor, S: Sentinel<C>, const N: usize> BidiCursor for AdjacentCursor<C, S, N> {
    fn retreat(&mut self) {
        for c in &mut self.cursors {
            c.retreat();
        }
    }
}

impl<C: RandomCursor, S: Sentinel<C>, const N: usize> RandomCursor for AdjacentCursor<C, S, N> {
    fn jump(&mut self, n: isize) {
        for c in &mut self.cursors {
            c.jump(n);
        }
    }

    fn offset_to(&self, other: &Self) -> isize {
        match (self.cursors.first(), other.cursors.first()) {
            (Some(a), Some(b)) => a.offset_to(b),
            _ => 0,
        }
    }
}

impl<C: ForwardCursor, S: Sentinel<C>, const N: usize> Exhaust for AdjacentCursor<C, S, N> {
    const FINISHING: bool = S::COMMON;

    fn exhausted(&self) -> bool {
        match self.cursors.last() {
            Some(last) => self.end.reached(last),
            None => true,
        }
    }

    fn remaining(&self) -> Option<isize> {
        match self.cursors.last() {
            Some(last) => self.end.remaining(last),
            None => Some(0),
        }
    }
}

impl<C: ForwardCursor, S: CommonSentinel<C>, const N: usize> Finishing
    for AdjacentCursor<C, S, N>
{
    fn to_finish(&self) -> Self {
        let (Some(first), Some(last)) = (self.cursors.first(), self.cursors.last()) else {
            return self.clone();
        };
        if self.end.reached(last) {
            return self.clone();
        }

        let steps = distance(last.clone(), &self.end.finish_from(last));
        let mut first = first.clone();
        advance_bounded(&mut first, steps, &self.end);
        Self::new(first, self.end.clone())
    }
}

/// Overlapping windows of the compile-time width `N`, read as arrays.
///
/// A base of length `L` yields `max(L - N + 1, 0)` windows and `N == 0` yields none.
#[derive(Debug, Clone)]
pub struct AdjacentView<V, const N: usize> {
    base: V,
}

impl<V, const N: usize> AdjacentView<V, N>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    pub fn new(base: V) -> Self {
        Self { base }
    }
}

impl<V, const N: usize> Sequence for AdjacentView<V, N>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    type Cursor = AdjacentCursor<V::Cursor, V::Sentinel, N>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;

    fn start(&self) -> Self::Cursor {
        AdjacentCursor::new(self.base.start(), self.base.end())
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        count_of(&self.base).map(|n| V::Count::from_usize(windows(n.to_usize(), N)))
    }

    fn is_empty_hint(&self) -> Option<bool> {
        (N == 0).then_some(true)
    }
}

// the last window ends where the base does
impl<V, const N: usize> CommonSequence for AdjacentView<V, N>
where
    V: CommonSequence,
    V::Cursor: ForwardCursor,
{
    fn finish(&self) -> Self::Cursor {
        let (end, len) = (self.base.end(), distance(self.base.start(), &self.base.finish()));
        let mut first = self.base.start();
        advance_bounded(&mut first, windows(len, N), &end);
        AdjacentCursor::new(first, end)
    }
}

crate::views::view_algebra!({V, const N: usize} AdjacentView<V, N>);

pub fn adjacent<const N: usize, V>(base: V) -> AdjacentView<V, N>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    AdjacentView::new(base)
}

/// Cursor over windows of a width chosen at run time
pub struct SlideCursor<C, S> {
    first: C,
    last: C,
    end: S,
    width: usize,
}

impl<C: Clone, S: Clone> Clone for SlideCursor<C, S> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            last: self.last.clone(),
            end: self.end.clone(),
            width: self.width,
        }
    }
}

impl<C: PartialEq, S> PartialEq for SlideCursor<C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.last == other.last
    }
}

impl<C: std::fmt::Debug, S> std::fmt::Debug for SlideCursor<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideCursor")
            .field("first", &self.first)
            .field("last", &self.last)
            .field("width", &self.width)
            .finish()
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> Cursor for SlideCursor<C, S> {
    type Item = Subrange<C, C>;

    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::RandomAccess);

    fn read(&self) -> Subrange<C, C> {
        let mut past = self.last.clone();
        past.advance();
        Subrange::new(self.first.clone(), past)
    }

    fn advance(&mut self) {
        self.first.advance();
        self.last.advance();
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> ForwardCursor for SlideCursor<C, S> {
    fn measure(&self, other: &Self) -> Option<isize> {
        self.last.measure(&other.last)
    }
}

impl<C: BidiCursor, S: Sentinel<C>> BidiCursor for SlideCursor<C, S> {
    fn retreat(&mut self) {
        self.first.retreat();
        self.last.retreat();
    }
}

impl<C: RandomCursor, S: Sentinel<C>> RandomCursor for SlideCursor<C, S> {
    fn jump(&mut self, n: isize) {
        self.first.jump(n);
        self.last.jump(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        self.last.offset_to(&other.last)
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> Exhaust for SlideCursor<C, S> {
    const FINISHING: bool = S::COMMON;

    fn exhausted(&self) -> bool {
        self.width == 0 || self.end.reached(&self.last)
    }

    fn remaining(&self) -> Option<isize> {
        if self.width == 0 {
            return Some(0);
        }
        self.end.remaining(&self.last)
    }
}

impl<C: ForwardCursor, S: CommonSentinel<C>> Finishing for SlideCursor<C, S> {
    fn to_finish(&self) -> Self {
        if self.exhausted() {
            return self.clone();
        }

        let steps = distance(self.last.clone(), &self.end.finish_from(&self.last));
        let mut cursor = self.clone();
        advance_bounded(&mut cursor.first, steps, &self.end);
        advance_bounded(&mut cursor.last, steps, &self.end);
        cursor
    }
}

/// Overlapping windows of `width` elements, each read as a [`Subrange`] of the base
#[derive(Debug, Clone)]
pub struct SlideView<V> {
    base: V,
    width: usize,
}

impl<V> SlideView<V>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    pub fn new(base: V, width: usize) -> Self {
        Self { base, width }
    }
}

impl<V> Sequence for SlideView<V>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    type Cursor = SlideCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;

    fn start(&self) -> Self::Cursor {
        let end = self.base.end();
        let first = self.base.start();
        let mut last = first.clone();
        advance_bounded(&mut last, self.width.saturating_sub(1), &end);

        SlideCursor {
            first,
            last,
            end,
            width: self.width,
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        count_of(&self.base).map(|n| V::Count::from_usize(windows(n.to_usize(), self.width)))
    }

    fn is_empty_hint(&self) -> Option<bool> {
        (self.width == 0).then_some(true)
    }
}

impl<V> CommonSequence for SlideView<V>
where
    V: CommonSequence,
    V::Cursor: ForwardCursor,
{
    fn finish(&self) -> Self::Cursor {
        let len = distance(self.base.start(), &self.base.finish());
        let mut cursor = self.start();
        let steps = windows(len, self.width);
        advance_bounded(&mut cursor.first, steps, &cursor.end);
        advance_bounded(&mut cursor.last, steps, &cursor.end);
        cursor
    }
}

crate::views::view_algebra!({V} SlideView<V>);

pub fn slide<V>(base: V, width: usize) -> SlideView<V>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    SlideView::new(base, width)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        host::Iota,
        reverse::reverse,
        sequence::SequenceExt,
        testing::{ForwardOnly, capability_of},
        views::enumerate,
    };

    #[test]
    fn adjacent_windows_overlap() {
        let v = [1, 2, 3, 4];
        let pairs: Vec<[i32; 2]> = adjacent::<2, _>(&v[..])
            .walk()
            .map(|[a, b]| [*a, *b])
            .collect();

        assert_eq!(pairs, vec![[1, 2], [2, 3], [3, 4]]);
        assert_eq!(adjacent::<2, _>(&v[..]).count(), Some(3));
    }

    #[test]
    fn adjacent_of_width_zero_or_too_wide_is_empty() {
        let v = [1, 2, 3];

        assert_eq!(adjacent::<0, _>(&v[..]).walk().count(), 0);
        assert_eq!(adjacent::<0, _>(&v[..]).count(), Some(0));
        assert_eq!(adjacent::<4, _>(&v[..]).walk().count(), 0);
        assert_eq!(adjacent::<4, _>(&v[..]).count(), Some(0));
        assert_eq!(adjacent::<3, _>(&v[..]).walk().count(), 1);
    }

    #[test]
    fn adjacent_jumps_like_its_base() {
        let view = adjacent::<3, _>(Iota::new(0, 10));
        let mut c = view.start();

        assert_eq!(capability_of(&view), Capability::RandomAccess);
        c.jump(4);
        assert_eq!(c.read(), [4, 5, 6]);
        c.retreat();
        assert_eq!(c.read(), [3, 4, 5]);
        assert_eq!(view.start().offset_to(&c), 3);
    }

    #[test]
    fn adjacent_over_forward_base() {
        let v = [1, 2, 3];
        let view = adjacent::<2, _>(ForwardOnly::new(&v[..]));

        assert_eq!(capability_of(&view), Capability::Forward);
        assert_eq!(view.walk().count(), 2);
        assert_eq!(view.count(), None);
    }

    #[test]
    fn adjacent_windows_reverse() {
        let v = [1, 2, 3, 4];
        let back: Vec<[i32; 2]> = reverse(adjacent::<2, _>(&v[..]))
            .walk()
            .map(|[a, b]| [*a, *b])
            .collect();
        assert_eq!(back, vec![[3, 4], [2, 3], [1, 2]]);

        assert_eq!(reverse(adjacent::<5, _>(&v[..])).walk().count(), 0);
        assert_eq!(reverse(adjacent::<0, _>(&v[..])).walk().count(), 0);

        let view = adjacent::<3, _>(enumerate(&v[..]));
        let mut last = view.finish();
        assert!(view.start().to_finish() == last);
        last.retreat();
        assert_eq!(last.read().map(|(i, _)| i), [1, 2, 3]);
    }

    #[test]
    fn slide_windows_reverse() {
        let v = [1, 2, 3, 4, 5];
        let back: Vec<Vec<i32>> = reverse(slide(&v[..], 3))
            .walk()
            .map(|w| w.walk().copied().collect())
            .collect();
        assert_eq!(back, vec![vec![3, 4, 5], vec![2, 3, 4], vec![1, 2, 3]]);

        assert_eq!(reverse(slide(&v[..], 6)).walk().count(), 0);
        assert_eq!(reverse(slide(&v[..], 0)).walk().count(), 0);

        let view = slide(enumerate(&v[..]), 4);
        assert!(view.start().to_finish() == view.finish());
        assert_eq!(view.start().offset_to(&view.finish()), 2);
    }

    #[test]
    fn slide_yields_subranges() {
        let v = [1, 2, 3, 4, 5];
        let windows: Vec<Vec<i32>> = slide(&v[..], 3)
            .walk()
            .map(|w| w.walk().copied().collect())
            .collect();

        assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
        assert_eq!(slide(&v[..], 3).count(), Some(3));
        assert_eq!(slide(&v[..], 0).walk().count(), 0);
        assert_eq!(slide(&v[..], 6).walk().count(), 0);
        assert_eq!(slide(&v[..], 5).walk().count(), 1);
    }
}
