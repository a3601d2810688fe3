use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel, advance_bounded, advance_bounded_random, distance, retreat_by,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Count, Sequence},
    slot::{Movable, Writable},
};

/// Cursor visiting every `step`-th element of its base.
///
/// Like [`ChunkCursor`](crate::views::ChunkCursor) it remembers how far the last advance fell
/// short of a full step, so that stepping back from the end lands on the last visited element.
pub struct StrideCursor<C, S> {
    current: C,
    end: S,
    step: usize,
    missing: usize,
}

impl<C: Clone, S: Clone> Clone for StrideCursor<C, S> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            end: self.end.clone(),
            step: self.step,
            missing: self.missing,
        }
    }
}

impl<C: PartialEq, S> PartialEq for StrideCursor<C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<C: std::fmt::Debug, S> std::fmt::Debug for StrideCursor<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrideCursor")
            .field("current", &self.current)
            .field("step", &self.step)
            .field("missing", &self.missing)
            .finish()
    }
}

impl<C: Cursor, S: Sentinel<C>> Cursor for StrideCursor<C, S> {
    type Item = C::Item;

    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::RandomAccess);

    fn read(&self) -> C::Item {
        self.current.read()
    }

    fn advance(&mut self) {
        self.missing = advance_bounded(&mut self.current, self.step, &self.end);
    }

    fn move_out(&self) -> <C::Item as Movable>::Value
    where
        C::Item: Movable,
    {
        self.current.move_out()
    }

    fn swap_with(&self, other: &Self)
    where
        C::Item: Writable,
    {
        self.current.swap_with(&other.current);
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> ForwardCursor for StrideCursor<C, S> {
    fn measure(&self, other: &Self) -> Option<isize> {
        let steps = self.current.measure(&other.current)?;
        Some((steps + other.missing as isize - self.missing as isize) / self.step.max(1) as isize)
    }
}

impl<C: BidiCursor, S: Sentinel<C>> BidiCursor for StrideCursor<C, S> {
    fn retreat(&mut self) {
        retreat_by(&mut self.current, self.step - self.missing);
        self.missing = 0;
    }
}

impl<C: RandomCursor, S: Sentinel<C>> RandomCursor for StrideCursor<C, S> {
    fn jump(&mut self, n: isize) {
        if n > 0 {
            let steps = self.step.saturating_mul(n as usize);
            self.missing = advance_bounded_random(&mut self.current, steps, &self.end);
        } else if n < 0 {
            self.current
                .jump(n * self.step as isize + self.missing as isize);
            self.missing = 0;
        }
    }

    fn offset_to(&self, other: &Self) -> isize {
        let steps = self.current.offset_to(&other.current);
        (steps + other.missing as isize - self.missing as isize) / self.step.max(1) as isize
    }
}

impl<C: Cursor, S: Sentinel<C>> Exhaust for StrideCursor<C, S> {
    const FINISHING: bool = S::COMMON;

    fn exhausted(&self) -> bool {
        self.step == 0 || self.end.reached(&self.current)
    }

    fn remaining(&self) -> Option<isize> {
        if self.step == 0 {
            return Some(0);
        }
        let left = self.end.remaining(&self.current)?.max(0) as usize;
        Some(left.div_ceil(self.step) as isize)
    }
}

// `current` sits on a multiple of `step` from the start until it is exhausted
impl<C: ForwardCursor, S: CommonSentinel<C>> Finishing for StrideCursor<C, S> {
    fn to_finish(&self) -> Self {
        if self.exhausted() {
            return self.clone();
        }

        let finish = self.end.finish_from(&self.current);
        let len = distance(self.current.clone(), &finish);
        Self {
            current: finish,
            end: self.end.clone(),
            step: self.step,
            missing: (self.step - len % self.step) % self.step,
        }
    }
}

/// Every `step`-th element of the base, starting with the first. A step of zero yields nothing.
#[derive(Debug, Clone)]
pub struct StrideView<V> {
    base: V,
    step: usize,
}

impl<V: Sequence> StrideView<V> {
    pub fn new(base: V, step: usize) -> Self {
        Self { base, step }
    }
}

impl<V: Sequence> Sequence for StrideView<V> {
    type Cursor = StrideCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;

    fn start(&self) -> Self::Cursor {
        StrideCursor {
            current: self.base.start(),
            end: self.base.end(),
            step: self.step,
            missing: 0,
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        if self.step == 0 {
            return Some(V::Count::from_usize(0));
        }
        count_of(&self.base).map(|n| V::Count::from_usize(n.to_usize().div_ceil(self.step)))
    }

    fn is_empty_hint(&self) -> Option<bool> {
        if self.step == 0 {
            Some(true)
        } else {
            self.base.is_empty_hint()
        }
    }
}

impl<V> CommonSequence for StrideView<V>
where
    V: CommonSequence,
    V::Cursor: ForwardCursor,
{
    fn finish(&self) -> Self::Cursor {
        if self.step == 0 {
            return self.start();
        }

        let len = distance(self.base.start(), &self.base.finish());
        StrideCursor {
            current: self.base.finish(),
            end: self.base.end(),
            step: self.step,
            missing: (self.step - len % self.step) % self.step,
        }
    }
}

crate::views::view_algebra!({V} StrideView<V>);

pub fn stride<V: Sequence>(base: V, step: usize) -> StrideView<V> {
    StrideView::new(base, step)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        host::{Cells, Input, Iota},
        reverse::reverse,
        sequence::SequenceExt,
        testing::capability_of,
    };

    #[test]
    fn stride_skips_elements() {
        let view = stride(Iota::new(1, 8), 2);

        assert_eq!(view.walk().collect::<Vec<_>>(), vec![1, 3, 5, 7]);
        assert_eq!(view.count(), Some(4));
        assert_eq!(stride(Iota::new(1, 7), 3).walk().collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn stride_reverses_from_the_last_visited_element() {
        let view = stride(Iota::new(1, 8), 2);
        assert_eq!(reverse(view).walk().collect::<Vec<_>>(), vec![7, 5, 3, 1]);

        let view = stride(Iota::new(1, 9), 3);
        assert_eq!(reverse(view).walk().collect::<Vec<_>>(), vec![7, 4, 1]);
    }

    #[test]
    fn stride_cursor_finds_the_view_end() {
        let view = stride(Iota::new(1, 9), 3);
        let mut c = view.start();
        c.advance();

        let mut end = c.to_finish();
        assert!(end == view.finish());
        end.retreat();
        assert_eq!(end.read(), 7);
    }

    #[test]
    fn stride_of_one_is_the_base() {
        let v = [4, 8, 15, 16];
        let view = stride(&v[..], 1);

        assert_eq!(view.walk().copied().collect::<Vec<_>>(), v.to_vec());
        assert_eq!(capability_of(&view), Capability::RandomAccess);
    }

    #[test]
    fn stride_of_zero_is_empty() {
        assert_eq!(stride(Iota::new(0, 5), 0).walk().count(), 0);
        assert_eq!(stride(Iota::new(0, 5), 0).count(), Some(0));
    }

    #[test]
    fn stride_jumps_by_whole_steps() {
        let view = stride(Iota::new(0, 10), 3);
        let mut c = view.start();

        c.jump(2);
        assert_eq!(c.read(), 6);
        assert_eq!(c.offset_to(&view.finish()), 2);
        c.jump(-1);
        assert_eq!(c.read(), 3);
    }

    #[test]
    fn stride_over_single_pass_input() {
        let view = stride(Input::new(0..10), 4);

        assert_eq!(capability_of(&view), Capability::SinglePass);
        assert_eq!(view.walk().collect::<Vec<_>>(), vec![0, 4, 8]);
    }

    #[test]
    fn stride_writes_through() {
        let mut data = [0; 5];
        {
            let view = stride(Cells::new(&mut data), 2);
            let mut c = view.start();
            while !c.exhausted() {
                c.read().set(1);
                c.advance();
            }
        }

        assert_eq!(data, [1, 0, 1, 0, 1]);
    }
}
