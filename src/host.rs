//! [`Sequence`] implementations for the standard library's own sequence types.

use std::{
    cell::Cell,
    cmp::Ordering,
    fmt,
};

use crate::{
    cursor::{
        BidiCursor, Capability, ContiguousCursor, Cursor, End, Exhaust, ForwardCursor,
        RandomCursor, Sentinel, Unreachable,
    },
    sequence::{CommonSequence, Sequence},
    slot::{Slot, SlotRef},
};

/// Cursor over a borrowed slice, yielding `&'a T`
pub struct SliceCursor<'a, T> {
    slice: &'a [T],
    pos: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    pub fn new(slice: &'a [T], pos: usize) -> Self {
        Self { slice, pos }
    }

    /// get the position of this cursor
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn slice(&self) -> &'a [T] {
        self.slice
    }
}

impl<'a, T> Clone for SliceCursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SliceCursor<'a, T> {}

impl<'a, T> PartialEq for SliceCursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.slice, other.slice) && self.pos == other.pos
    }
}

impl<'a, T> Eq for SliceCursor<'a, T> {}

impl<'a, T> PartialOrd for SliceCursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if std::ptr::eq(self.slice, other.slice) {
            self.pos.partial_cmp(&other.pos)
        } else {
            None
        }
    }
}

impl<'a, T> fmt::Debug for SliceCursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("len", &self.slice.len())
            .field("pos", &self.pos)
            .finish()
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;

    const CAPABILITY: Capability = Capability::Contiguous;

    fn read(&self) -> &'a T {
        &self.slice[self.pos]
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl<'a, T> ForwardCursor for SliceCursor<'a, T> {
    fn measure(&self, other: &Self) -> Option<isize> {
        Some(self.offset_to(other))
    }
}

impl<'a, T> BidiCursor for SliceCursor<'a, T> {
    fn retreat(&mut self) {
        self.pos -= 1;
    }
}

impl<'a, T> RandomCursor for SliceCursor<'a, T> {
    fn jump(&mut self, n: isize) {
        self.pos = self.pos.wrapping_add_signed(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        other.pos as isize - self.pos as isize
    }
}

impl<'a, T> ContiguousCursor for SliceCursor<'a, T> {
    type Element = T;

    fn address(&self) -> *const T {
        self.slice.as_ptr().wrapping_add(self.pos)
    }
}

impl<'a, T> Exhaust for SliceCursor<'a, T> {
    fn exhausted(&self) -> bool {
        self.pos >= self.slice.len()
    }

    fn remaining(&self) -> Option<isize> {
        Some(self.slice.len() as isize - self.pos as isize)
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Cursor = SliceCursor<'a, T>;
    type Sentinel = SliceCursor<'a, T>;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> Self::Cursor {
        SliceCursor::new(self, 0)
    }

    fn end(&self) -> Self::Sentinel {
        SliceCursor::new(self, self.len())
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn is_empty_hint(&self) -> Option<bool> {
        Some(self.is_empty())
    }

    fn storage(&self) -> Option<*const <Self::Cursor as ContiguousCursor>::Element>
    where
        Self::Cursor: ContiguousCursor,
    {
        Some(self.start().address())
    }
}

impl<'a, T> CommonSequence for &'a [T] {
    fn finish(&self) -> Self::Cursor {
        SliceCursor::new(self, self.len())
    }
}

impl<'a, T> Sequence for &'a Vec<T> {
    type Cursor = SliceCursor<'a, T>;
    type Sentinel = SliceCursor<'a, T>;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> Self::Cursor {
        SliceCursor::new(self.as_slice(), 0)
    }

    fn end(&self) -> Self::Sentinel {
        SliceCursor::new(self.as_slice(), self.len())
    }

    fn count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn is_empty_hint(&self) -> Option<bool> {
        Some(self.is_empty())
    }

    fn storage(&self) -> Option<*const <Self::Cursor as ContiguousCursor>::Element>
    where
        Self::Cursor: ContiguousCursor,
    {
        Some(self.start().address())
    }
}

impl<'a, T> CommonSequence for &'a Vec<T> {
    fn finish(&self) -> Self::Cursor {
        SliceCursor::new(self.as_slice(), self.len())
    }
}

/// Raw fixed-length arrays offer no member operations, the dispatcher serves them with its
/// built-in rule (start at the first element, end `N` past it).
impl<'a, T, const N: usize> Sequence for &'a [T; N] {
    type Cursor = SliceCursor<'a, T>;
    type Sentinel = SliceCursor<'a, T>;
    type Count = usize;

    const BORROWED: bool = true;
    const HOST_ARRAY: bool = true;

    fn start(&self) -> Self::Cursor {
        SliceCursor::new(self.as_slice(), 0)
    }

    fn end(&self) -> Self::Sentinel {
        SliceCursor::new(self.as_slice(), N)
    }
}

impl<'a, T, const N: usize> CommonSequence for &'a [T; N] {
    fn finish(&self) -> Self::Cursor {
        SliceCursor::new(self.as_slice(), N)
    }
}

/// Bidirectional cursor over the `char`s of a string slice
#[derive(Clone, Copy)]
pub struct StrCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrCursor<'a> {
    /// byte offset of this cursor
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The rest of the text from this cursor on
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

impl<'a> PartialEq for StrCursor<'a> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.text, other.text) && self.pos == other.pos
    }
}

impl<'a> Eq for StrCursor<'a> {}

impl<'a> fmt::Debug for StrCursor<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrCursor").field("pos", &self.pos).finish()
    }
}

impl<'a> Cursor for StrCursor<'a> {
    type Item = char;

    const CAPABILITY: Capability = Capability::Bidirectional;

    fn read(&self) -> char {
        match self.rest().chars().next() {
            Some(c) => c,
            None => panic!("read past the end of a string at byte {}", self.pos),
        }
    }

    fn advance(&mut self) {
        self.pos += self.read().len_utf8();
    }
}

impl<'a> ForwardCursor for StrCursor<'a> {}

impl<'a> BidiCursor for StrCursor<'a> {
    fn retreat(&mut self) {
        match self.text[..self.pos].chars().next_back() {
            Some(c) => self.pos -= c.len_utf8(),
            None => panic!("retreated before the start of a string"),
        }
    }
}

impl<'a> Exhaust for StrCursor<'a> {
    fn exhausted(&self) -> bool {
        self.pos >= self.text.len()
    }
}

impl<'a> Sequence for &'a str {
    type Cursor = StrCursor<'a>;
    type Sentinel = StrCursor<'a>;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> StrCursor<'a> {
        StrCursor { text: self, pos: 0 }
    }

    fn end(&self) -> StrCursor<'a> {
        StrCursor {
            text: self,
            pos: self.len(),
        }
    }

    fn is_empty_hint(&self) -> Option<bool> {
        Some(self.is_empty())
    }
}

impl<'a> CommonSequence for &'a str {
    fn finish(&self) -> StrCursor<'a> {
        self.end()
    }
}

/// Random access cursor over consecutive integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IotaCursor {
    value: i64,
}

impl Cursor for IotaCursor {
    type Item = i64;

    const CAPABILITY: Capability = Capability::RandomAccess;

    fn read(&self) -> i64 {
        self.value
    }

    fn advance(&mut self) {
        self.value += 1;
    }
}

impl ForwardCursor for IotaCursor {
    fn measure(&self, other: &Self) -> Option<isize> {
        Some(self.offset_to(other))
    }
}

impl BidiCursor for IotaCursor {
    fn retreat(&mut self) {
        self.value -= 1;
    }
}

impl RandomCursor for IotaCursor {
    fn jump(&mut self, n: isize) {
        self.value += n as i64;
    }

    fn offset_to(&self, other: &Self) -> isize {
        (other.value - self.value) as isize
    }
}

/// The half-open integer range `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iota {
    from: i64,
    to: i64,
}

impl Iota {
    /// an empty range results if `to < from`
    pub fn new(from: i64, to: i64) -> Self {
        Self {
            from,
            to: to.max(from),
        }
    }
}

impl Sequence for Iota {
    type Cursor = IotaCursor;
    type Sentinel = IotaCursor;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> IotaCursor {
        IotaCursor { value: self.from }
    }

    fn end(&self) -> IotaCursor {
        IotaCursor { value: self.to }
    }

    fn count(&self) -> Option<usize> {
        Some(self.to.abs_diff(self.from) as usize)
    }
}

impl CommonSequence for Iota {
    fn finish(&self) -> IotaCursor {
        self.end()
    }
}

/// Integers counting up from `from` without end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IotaFrom {
    from: i64,
}

impl IotaFrom {
    pub fn new(from: i64) -> Self {
        Self { from }
    }
}

impl Sequence for IotaFrom {
    type Cursor = IotaCursor;
    type Sentinel = Unreachable;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> IotaCursor {
        IotaCursor { value: self.from }
    }

    fn end(&self) -> Unreachable {
        Unreachable
    }

    fn is_empty_hint(&self) -> Option<bool> {
        Some(false)
    }
}

/// Mutable storage exposed through [`Slot`] proxies, so that several cursors may refer to it at
/// once.
pub struct Cells<'a, T> {
    cells: &'a [Cell<T>],
}

impl<'a, T> Cells<'a, T> {
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            cells: Cell::from_mut(data).as_slice_of_cells(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<'a, T> Clone for Cells<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cells<'a, T> {}

/// Cursor over [`Cells`], yielding [`Slot`] proxies
pub struct SlotCursor<'a, T> {
    cells: &'a [Cell<T>],
    pos: usize,
}

impl<'a, T> Clone for SlotCursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SlotCursor<'a, T> {}

impl<'a, T> PartialEq for SlotCursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.cells, other.cells) && self.pos == other.pos
    }
}

impl<'a, T> Eq for SlotCursor<'a, T> {}

impl<'a, T> fmt::Debug for SlotCursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotCursor")
            .field("len", &self.cells.len())
            .field("pos", &self.pos)
            .finish()
    }
}

impl<'a, T> Cursor for SlotCursor<'a, T> {
    type Item = Slot<'a, T>;

    const CAPABILITY: Capability = Capability::Contiguous;

    fn read(&self) -> Slot<'a, T> {
        Slot::new(&self.cells[self.pos])
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn swap_with(&self, other: &Self) {
        self.cells[self.pos].swap(&other.cells[other.pos])
    }
}

impl<'a, T> ForwardCursor for SlotCursor<'a, T> {
    fn measure(&self, other: &Self) -> Option<isize> {
        Some(self.offset_to(other))
    }
}

impl<'a, T> BidiCursor for SlotCursor<'a, T> {
    fn retreat(&mut self) {
        self.pos -= 1;
    }
}

impl<'a, T> RandomCursor for SlotCursor<'a, T> {
    fn jump(&mut self, n: isize) {
        self.pos = self.pos.wrapping_add_signed(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        other.pos as isize - self.pos as isize
    }
}

impl<'a, T> ContiguousCursor for SlotCursor<'a, T> {
    type Element = T;

    fn address(&self) -> *const T {
        self.cells.as_ptr().wrapping_add(self.pos) as *const T
    }
}

impl<'a, T> Sequence for Cells<'a, T> {
    type Cursor = SlotCursor<'a, T>;
    type Sentinel = SlotCursor<'a, T>;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> Self::Cursor {
        SlotCursor {
            cells: self.cells,
            pos: 0,
        }
    }

    fn end(&self) -> Self::Sentinel {
        SlotCursor {
            cells: self.cells,
            pos: self.cells.len(),
        }
    }

    fn count(&self) -> Option<usize> {
        Some(self.cells.len())
    }
}

impl<'a, T> CommonSequence for Cells<'a, T> {
    fn finish(&self) -> Self::Cursor {
        self.end()
    }
}

/// Read-only cursor over [`Cells`], handing out [`SlotRef`]s. This is the native const path of
/// [`Cells`].
pub struct SlotRefCursor<'a, T> {
    inner: SlotCursor<'a, T>,
}

impl<'a, T> SlotRefCursor<'a, T> {
    pub(crate) fn new(inner: SlotCursor<'a, T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Clone for SlotRefCursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SlotRefCursor<'a, T> {}

impl<'a, T> PartialEq for SlotRefCursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<'a, T> fmt::Debug for SlotRefCursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotRefCursor").field(&self.inner).finish()
    }
}

impl<'a, T> Cursor for SlotRefCursor<'a, T> {
    type Item = SlotRef<'a, T>;

    const CAPABILITY: Capability = Capability::Contiguous;

    fn read(&self) -> SlotRef<'a, T> {
        self.inner.read().read_only()
    }

    fn advance(&mut self) {
        self.inner.advance();
    }
}

impl<'a, T> ForwardCursor for SlotRefCursor<'a, T> {
    fn measure(&self, other: &Self) -> Option<isize> {
        self.inner.measure(&other.inner)
    }
}

impl<'a, T> BidiCursor for SlotRefCursor<'a, T> {
    fn retreat(&mut self) {
        self.inner.retreat();
    }
}

impl<'a, T> RandomCursor for SlotRefCursor<'a, T> {
    fn jump(&mut self, n: isize) {
        self.inner.jump(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        self.inner.offset_to(&other.inner)
    }
}

impl<'a, T> ContiguousCursor for SlotRefCursor<'a, T> {
    type Element = T;

    fn address(&self) -> *const T {
        self.inner.address()
    }
}

/// Single-pass sequence over any std [`Iterator`].
///
/// The iterator is handed to the first cursor created. Any later call to
/// [`Sequence::start`] observes an already exhausted input.
pub struct Input<I> {
    source: Cell<Option<I>>,
}

impl<I: Iterator> Input<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(source: T) -> Self {
        Self {
            source: Cell::new(Some(source.into_iter())),
        }
    }
}

pub struct InputCursor<I: Iterator> {
    iter: Option<I>,
    current: Option<I::Item>,
}

impl<I: Iterator> InputCursor<I> {
    fn new(mut iter: Option<I>) -> Self {
        let current = iter.as_mut().and_then(Iterator::next);
        Self { iter, current }
    }
}

impl<I: Iterator> Cursor for InputCursor<I>
where
    I::Item: Clone,
{
    type Item = I::Item;

    const CAPABILITY: Capability = Capability::SinglePass;

    fn read(&self) -> I::Item {
        match &self.current {
            Some(x) => x.clone(),
            None => panic!("read past the end of an input sequence"),
        }
    }

    fn advance(&mut self) {
        self.current = self.iter.as_mut().and_then(Iterator::next);
    }
}

impl<I: Iterator> Exhaust for InputCursor<I>
where
    I::Item: Clone,
{
    fn exhausted(&self) -> bool {
        self.current.is_none()
    }
}

impl<I: Iterator> Sequence for Input<I>
where
    I::Item: Clone,
{
    type Cursor = InputCursor<I>;
    type Sentinel = End;
    type Count = usize;

    fn start(&self) -> InputCursor<I> {
        InputCursor::new(self.source.take())
    }

    fn end(&self) -> End {
        End
    }
}

/// Sentinel stopping at the first default-valued element, or at the end of the slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nul;

impl<'a, T: Default + PartialEq> Sentinel<SliceCursor<'a, T>> for Nul {
    fn reached(&self, cursor: &SliceCursor<'a, T>) -> bool {
        cursor.exhausted() || *cursor.read() == T::default()
    }
}

/// A slice read up to its first default-valued element, e.g. a nul terminated byte string.
///
/// The cursor and sentinel have different types, so this sequence is not common.
#[derive(Debug, Clone, Copy)]
pub struct UntilNul<'a, T> {
    data: &'a [T],
}

impl<'a, T> UntilNul<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }
}

impl<'a, T: Default + PartialEq> Sequence for UntilNul<'a, T> {
    type Cursor = SliceCursor<'a, T>;
    type Sentinel = Nul;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> Self::Cursor {
        SliceCursor::new(self.data, 0)
    }

    fn end(&self) -> Nul {
        Nul
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sequence::SequenceExt;

    #[test]
    fn slice_cursor_is_contiguous() {
        let v = [10, 20, 30];
        let s = &v[..];
        let mut c = s.start();

        assert_eq!(c.address(), s.as_ptr());
        c.jump(2);
        assert_eq!(*c.read(), 30);
        assert_eq!(c.address(), &v[2] as *const i32);
        assert_eq!(c.offset_to(&s.start()), -2);
        assert_eq!(*s.start().at(1), 20);
    }

    #[test]
    fn slices_and_vecs_report_their_storage() {
        let v = vec![4, 5, 6];
        let s = &v[..];
        let empty: &[u8] = &[];

        assert_eq!((&v).storage(), Some(v.as_ptr()));
        assert_eq!(s.storage(), Some(v.as_ptr()));
        assert_eq!(empty.storage(), Some(empty.as_ptr()));
    }

    #[test]
    fn iota_count_spans_the_whole_domain() {
        assert_eq!(Iota::new(i64::MIN, i64::MAX).count(), Some(u64::MAX as usize));
        assert_eq!(Iota::new(-3, 4).count(), Some(7));
        assert_eq!(Iota::new(i64::MAX, i64::MIN).count(), Some(0));
    }

    #[test]
    fn cursors_of_different_slices_are_unordered() {
        let a = [1, 2];
        let b = [1, 2];
        let (ca, cb) = (SliceCursor::new(&a, 0), SliceCursor::new(&b, 0));

        assert!(ca != cb);
        assert_eq!(ca.partial_cmp(&cb), None);
        assert!(ca < SliceCursor::new(&a, 1));
    }

    #[test]
    fn str_walks_chars_both_ways() {
        let text = "añb";
        let mut c = text.finish();
        let mut back = Vec::new();
        while c != text.start() {
            c.retreat();
            back.push(c.read());
        }

        assert_eq!(back, vec!['b', 'ñ', 'a']);
        assert_eq!(text.walk().collect::<String>(), "añb");
    }

    #[test]
    fn iota_counts_and_clamps() {
        assert_eq!(Iota::new(1, 5).walk().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(Iota::new(5, 1).count(), Some(0));
        assert_eq!(
            IotaFrom::new(7).walk().take(3).collect::<Vec<_>>(),
            vec![7, 8, 9]
        );
    }

    #[test]
    fn cells_write_through_slots() {
        let mut data = [1, 2, 3];
        {
            let cells = Cells::new(&mut data);
            let mut c = cells.start();
            c.read().set(5);
            c.advance();
            c.swap_with(&cells.start());
        }

        assert_eq!(data, [2, 5, 3]);
    }

    #[test]
    fn input_is_single_pass() {
        let input = Input::new(vec![1, 2, 3]);
        assert_eq!(input.walk().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(input.walk().count(), 0);
    }

    #[test]
    fn until_nul_stops_at_terminator() {
        let bytes = b"abc\0def";
        let s = UntilNul::new(&bytes[..]);

        assert_eq!(s.walk().copied().collect::<Vec<_>>(), b"abc".to_vec());
        assert_eq!(UntilNul::new(&b"xy"[..]).walk().count(), 2);
    }
}
