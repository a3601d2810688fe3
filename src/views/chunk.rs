use std::{cell::RefCell, rc::Rc};

use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel, advance_bounded, advance_bounded_random, distance,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Count, Sequence},
    subrange::Subrange,
};

/// Cursor over fixed-size chunks.
///
/// `missing` records how many steps the last advance fell short of a full chunk, which is only
/// ever non-zero at the end. Stepping back from the end uses it to land on the short last chunk.
pub struct ChunkCursor<C, S> {
    current: C,
    end: S,
    size: usize,
    missing: usize,
}

impl<C: Clone, S: Clone> Clone for ChunkCursor<C, S> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            end: self.end.clone(),
            size: self.size,
            missing: self.missing,
        }
    }
}

impl<C: PartialEq, S> PartialEq for ChunkCursor<C, S> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<C: std::fmt::Debug, S> std::fmt::Debug for ChunkCursor<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkCursor")
            .field("current", &self.current)
            .field("size", &self.size)
            .field("missing", &self.missing)
            .finish()
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> Cursor for ChunkCursor<C, S> {
    type Item = Subrange<C, C>;

    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::RandomAccess);

    fn read(&self) -> Subrange<C, C> {
        let mut next = self.current.clone();
        advance_bounded(&mut next, self.size, &self.end);
        Subrange::new(self.current.clone(), next)
    }

    fn advance(&mut self) {
        self.missing = advance_bounded(&mut self.current, self.size, &self.end);
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> ForwardCursor for ChunkCursor<C, S> {
    fn measure(&self, other: &Self) -> Option<isize> {
        let steps = self.current.measure(&other.current)?;
        Some((steps + other.missing as isize - self.missing as isize) / self.size.max(1) as isize)
    }
}

impl<C: BidiCursor, S: Sentinel<C>> BidiCursor for ChunkCursor<C, S> {
    fn retreat(&mut self) {
        for _ in 0..self.size - self.missing {
            self.current.retreat();
        }
        self.missing = 0;
    }
}

impl<C: RandomCursor, S: Sentinel<C>> RandomCursor for ChunkCursor<C, S> {
    fn jump(&mut self, n: isize) {
        if n > 0 {
            let steps = self.size.saturating_mul(n as usize);
            self.missing = advance_bounded_random(&mut self.current, steps, &self.end);
        } else if n < 0 {
            self.current
                .jump(n * self.size as isize + self.missing as isize);
            self.missing = 0;
        }
    }

    fn offset_to(&self, other: &Self) -> isize {
        let steps = self.current.offset_to(&other.current);
        (steps + other.missing as isize - self.missing as isize) / self.size.max(1) as isize
    }
}

impl<C: ForwardCursor, S: Sentinel<C>> Exhaust for ChunkCursor<C, S> {
    const FINISHING: bool = S::COMMON;

    fn exhausted(&self) -> bool {
        self.size == 0 || self.end.reached(&self.current)
    }

    fn remaining(&self) -> Option<isize> {
        if self.size == 0 {
            return Some(0);
        }
        let left = self.end.remaining(&self.current)?.max(0) as usize;
        Some(left.div_ceil(self.size) as isize)
    }
}

// `current` sits on a multiple of `size` from the start until it is exhausted
impl<C: ForwardCursor, S: CommonSentinel<C>> Finishing for ChunkCursor<C, S> {
    fn to_finish(&self) -> Self {
        if self.exhausted() {
            return self.clone();
        }

        let finish = self.end.finish_from(&self.current);
        let len = distance(self.current.clone(), &finish);
        Self {
            current: finish,
            end: self.end.clone(),
            size: self.size,
            missing: (self.size - len % self.size) % self.size,
        }
    }
}

/// Non-overlapping chunks of `size` elements, the last one possibly shorter.
///
/// Chunks are [`Subrange`]s of the base, so the base must be re-traversable. Use
/// [`ChunkInputView`] for single-pass bases.
#[derive(Debug, Clone)]
pub struct ChunkView<V> {
    base: V,
    size: usize,
}

impl<V> ChunkView<V>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    pub fn new(base: V, size: usize) -> Self {
        Self { base, size }
    }
}

impl<V> Sequence for ChunkView<V>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    type Cursor = ChunkCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED;

    fn start(&self) -> Self::Cursor {
        ChunkCursor {
            current: self.base.start(),
            end: self.base.end(),
            size: self.size,
            missing: 0,
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        if self.size == 0 {
            return Some(V::Count::from_usize(0));
        }
        count_of(&self.base).map(|n| V::Count::from_usize(n.to_usize().div_ceil(self.size)))
    }

    fn is_empty_hint(&self) -> Option<bool> {
        if self.size == 0 {
            Some(true)
        } else {
            self.base.is_empty_hint()
        }
    }
}

impl<V> CommonSequence for ChunkView<V>
where
    V: CommonSequence,
    V::Cursor: ForwardCursor,
{
    fn finish(&self) -> Self::Cursor {
        if self.size == 0 {
            return self.start();
        }

        let len = distance(self.base.start(), &self.base.finish());
        ChunkCursor {
            current: self.base.finish(),
            end: self.base.end(),
            size: self.size,
            missing: (self.size - len % self.size) % self.size,
        }
    }
}

crate::views::view_algebra!({V} ChunkView<V>);

/// `base` cut into chunks of `size` elements.
///
/// The base must be re-traversable, chunk single-pass bases with [`chunk_input`] instead.
pub fn chunk<V>(base: V, size: usize) -> ChunkView<V>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
{
    ChunkView::new(base, size)
}

/// Traversal state shared by a single-pass chunk view's outer cursor and the chunk being read
struct ChunkInputState<C, S> {
    current: C,
    end: S,
    size: usize,
    /// elements of the current chunk not yet consumed
    left: usize,
}

/// Outer cursor of [`ChunkInputView`]
pub struct ChunkInputCursor<C, S> {
    state: Rc<RefCell<ChunkInputState<C, S>>>,
}

impl<C: Cursor, S: Sentinel<C>> Cursor for ChunkInputCursor<C, S> {
    type Item = InputChunk<C, S>;

    const CAPABILITY: Capability = Capability::SinglePass;

    fn read(&self) -> InputChunk<C, S> {
        InputChunk {
            state: Rc::clone(&self.state),
        }
    }

    fn advance(&mut self) {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        while state.left > 0 && !state.end.reached(&state.current) {
            state.current.advance();
            state.left -= 1;
        }
        state.left = state.size;
    }
}

impl<C: Cursor, S: Sentinel<C>> Exhaust for ChunkInputCursor<C, S> {
    fn exhausted(&self) -> bool {
        let state = self.state.borrow();
        state.size == 0 || (state.end.reached(&state.current) && state.left != 0)
    }
}

/// The chunk an outer [`ChunkInputCursor`] currently refers to.
///
/// Reading it consumes the base, and it is invalidated once the outer cursor advances.
pub struct InputChunk<C, S> {
    state: Rc<RefCell<ChunkInputState<C, S>>>,
}

/// Cursor inside an [`InputChunk`]
pub struct InputChunkCursor<C, S> {
    state: Rc<RefCell<ChunkInputState<C, S>>>,
}

impl<C, S> Clone for InputChunk<C, S> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<C: Cursor, S: Sentinel<C>> Cursor for InputChunkCursor<C, S> {
    type Item = C::Item;

    const CAPABILITY: Capability = Capability::SinglePass;

    fn read(&self) -> C::Item {
        self.state.borrow().current.read()
    }

    fn advance(&mut self) {
        let mut state = self.state.borrow_mut();
        state.current.advance();
        state.left -= 1;
    }
}

impl<C: Cursor, S: Sentinel<C>> Exhaust for InputChunkCursor<C, S> {
    fn exhausted(&self) -> bool {
        let state = self.state.borrow();
        state.left == 0 || state.end.reached(&state.current)
    }
}

impl<C: Cursor, S: Sentinel<C>> Sequence for InputChunk<C, S> {
    type Cursor = InputChunkCursor<C, S>;
    type Sentinel = End;
    type Count = usize;

    fn start(&self) -> Self::Cursor {
        InputChunkCursor {
            state: Rc::clone(&self.state),
        }
    }

    fn end(&self) -> End {
        End
    }
}

/// Chunks of a single-pass base. Each chunk is consumed in order straight from the base, its
/// length discovered by advancing `size` steps or until the base runs out.
pub struct ChunkInputView<V> {
    base: V,
    size: usize,
}

impl<V: Sequence> ChunkInputView<V> {
    pub fn new(base: V, size: usize) -> Self {
        Self { base, size }
    }
}

impl<V: Sequence> Sequence for ChunkInputView<V> {
    type Cursor = ChunkInputCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    fn start(&self) -> Self::Cursor {
        ChunkInputCursor {
            state: Rc::new(RefCell::new(ChunkInputState {
                current: self.base.start(),
                end: self.base.end(),
                size: self.size,
                left: self.size,
            })),
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<V::Count> {
        if self.size == 0 {
            return Some(V::Count::from_usize(0));
        }
        self.base
            .count()
            .map(|n| V::Count::from_usize(n.to_usize().div_ceil(self.size)))
    }
}

crate::views::view_pipe!({V} ChunkInputView<V>);
crate::views::view_slicing!({V} ChunkInputView<V>);

pub fn chunk_input<V: Sequence>(base: V, size: usize) -> ChunkInputView<V> {
    ChunkInputView::new(base, size)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        host::{Input, Iota},
        reverse::reverse,
        sequence::SequenceExt,
        testing::{ForwardOnly, capability_of},
    };

    fn collect<V>(view: &V) -> Vec<Vec<i64>>
    where
        V: Sequence,
        V::Cursor: Cursor<Item = Subrange<crate::host::IotaCursor, crate::host::IotaCursor>>,
    {
        view.walk().map(|c| c.walk().collect()).collect()
    }

    #[test]
    fn chunks_partition_with_short_tail() {
        let view = chunk(Iota::new(1, 8), 3);

        assert_eq!(collect(&view), vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
        assert_eq!(view.count(), Some(3));
        assert_eq!(capability_of(&view), Capability::RandomAccess);
    }

    #[test]
    fn chunk_of_zero_is_empty() {
        let view = chunk(Iota::new(1, 8), 0);

        assert_eq!(view.walk().count(), 0);
        assert_eq!(view.count(), Some(0));
        assert_eq!(chunk(Iota::new(0, 0), 2).walk().count(), 0);
    }

    #[test]
    fn chunks_step_back_from_the_end() {
        let view = chunk(Iota::new(1, 8), 3);
        let backward: Vec<Vec<i64>> = reverse(view)
            .walk()
            .map(|c| c.walk().collect())
            .collect();

        assert_eq!(backward, vec![vec![7], vec![4, 5, 6], vec![1, 2, 3]]);
    }

    #[test]
    fn chunk_cursor_finds_the_view_end() {
        let view = chunk(Iota::new(1, 8), 3);
        let mut c = view.start();
        c.advance();

        let mut end = c.to_finish();
        assert!(end == view.finish());
        end.retreat();
        assert_eq!(end.read().walk().collect::<Vec<_>>(), vec![7]);
    }

    #[test]
    fn chunks_jump_and_measure() {
        let view = chunk(Iota::new(0, 10), 4);
        let mut c = view.start();

        c.jump(2);
        assert_eq!(c.read().walk().collect::<Vec<_>>(), vec![8, 9]);
        assert_eq!(view.start().offset_to(&view.finish()), 3);
        assert_eq!(c.offset_to(&view.finish()), 1);

        let mut end = view.start();
        end.jump(3);
        assert_eq!(end, view.finish());
        end.jump(-1);
        assert_eq!(end.read().walk().collect::<Vec<_>>(), vec![8, 9]);
    }

    #[test]
    fn chunks_over_forward_base() {
        let v = [1, 2, 3, 4, 5];
        let view = chunk(ForwardOnly::new(&v[..]), 2);
        let chunks: Vec<Vec<i32>> = view
            .walk()
            .map(|c| c.walk().copied().collect())
            .collect();

        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
        assert_eq!(capability_of(&view), Capability::Forward);
    }

    #[test]
    fn input_chunks_are_consumed_in_order() {
        let view = chunk_input(Input::new(1..=7), 3);
        let mut chunks = Vec::new();
        let mut outer = view.start();
        while !outer.exhausted() {
            chunks.push(outer.read().walk().collect::<Vec<_>>());
            outer.advance();
        }

        assert_eq!(chunks, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[test]
    fn unread_input_chunks_are_skipped() {
        let view = chunk_input(Input::new(1..=7), 2);
        let mut outer = view.start();
        outer.advance();

        let mut second = outer.read().start();
        assert_eq!(second.read(), 3);
        second.advance();
        outer.advance();
        assert_eq!(outer.read().walk().collect::<Vec<_>>(), vec![5, 6]);
    }
}
