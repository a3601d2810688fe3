use crate::{
    cursor::{Capability, Cursor, End, Exhaust, ForwardCursor, Sentinel},
    sequence::Sequence,
};

type Inner<O> = <<O as Cursor>::Item as Sequence>::Cursor;
type InnerEnd<O> = <<O as Cursor>::Item as Sequence>::Sentinel;

/// Cursor flattening a sequence of sequences.
///
/// Holds the outer position and, unless the outer sequence is exhausted, a cursor into the inner
/// sequence read there. Empty inner sequences are skipped.
pub struct JoinCursor<O, OS>
where
    O: Cursor,
    O::Item: Sequence,
{
    outer: O,
    outer_end: OS,
    inner: Option<(Inner<O>, InnerEnd<O>)>,
}

impl<O, OS> Clone for JoinCursor<O, OS>
where
    O: Cursor + Clone,
    O::Item: Sequence,
    Inner<O>: Clone,
    OS: Clone,
{
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            outer_end: self.outer_end.clone(),
            inner: self.inner.clone(),
        }
    }
}

impl<O, OS> PartialEq for JoinCursor<O, OS>
where
    O: Cursor + PartialEq,
    O::Item: Sequence,
    Inner<O>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.outer == other.outer
            && self.inner.as_ref().map(|(c, _)| c) == other.inner.as_ref().map(|(c, _)| c)
    }
}

impl<O, OS> JoinCursor<O, OS>
where
    O: Cursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
{
    fn new(outer: O, outer_end: OS) -> Self {
        let mut cursor = Self {
            outer,
            outer_end,
            inner: None,
        };
        cursor.satisfy();
        cursor
    }

    /// Move to the first element at or after the current position, skipping empty inner sequences
    fn satisfy(&mut self) {
        self.inner = None;
        while !self.outer_end.reached(&self.outer) {
            let seq = self.outer.read();
            let (start, end) = (seq.start(), seq.end());
            if !end.reached(&start) {
                self.inner = Some((start, end));
                return;
            }
            self.outer.advance();
        }
    }
}

impl<O, OS> Cursor for JoinCursor<O, OS>
where
    O: Cursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
{
    type Item = <Inner<O> as Cursor>::Item;

    const CAPABILITY: Capability = O::CAPABILITY
        .min(<Inner<O> as Cursor>::CAPABILITY)
        .min(Capability::Forward);

    fn read(&self) -> Self::Item {
        match &self.inner {
            Some((cursor, _)) => cursor.read(),
            None => panic!("read past the end of a joined sequence"),
        }
    }

    fn advance(&mut self) {
        let Some((cursor, end)) = &mut self.inner else {
            return;
        };
        cursor.advance();
        if end.reached(cursor) {
            self.outer.advance();
            self.satisfy();
        }
    }
}

impl<O, OS> ForwardCursor for JoinCursor<O, OS>
where
    O: ForwardCursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
    Inner<O>: ForwardCursor,
{
}

impl<O, OS> Exhaust for JoinCursor<O, OS>
where
    O: Cursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
{
    fn exhausted(&self) -> bool {
        self.inner.is_none()
    }
}

/// The elements of every inner sequence, in order
#[derive(Debug, Clone)]
pub struct JoinView<V> {
    base: V,
}

impl<V> JoinView<V>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Sequence,
{
    pub fn new(base: V) -> Self {
        Self { base }
    }
}

impl<V> Sequence for JoinView<V>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Sequence,
{
    type Cursor = JoinCursor<V::Cursor, V::Sentinel>;
    type Sentinel = End;
    type Count = usize;

    const BORROWED: bool = V::BORROWED && <<V::Cursor as Cursor>::Item as Sequence>::BORROWED;

    fn start(&self) -> Self::Cursor {
        JoinCursor::new(self.base.start(), self.base.end())
    }

    fn end(&self) -> End {
        End
    }
}

crate::views::view_algebra!({V} JoinView<V>);

pub fn join<V>(base: V) -> JoinView<V>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Sequence,
{
    JoinView::new(base)
}

enum Segment<E, ES, PC, PS> {
    Element(E, ES),
    Pattern(PC, PS),
}

impl<E: Clone, ES: Clone, PC: Clone, PS: Clone> Clone for Segment<E, ES, PC, PS> {
    fn clone(&self) -> Self {
        match self {
            Segment::Element(c, e) => Segment::Element(c.clone(), e.clone()),
            Segment::Pattern(c, e) => Segment::Pattern(c.clone(), e.clone()),
        }
    }
}

impl<E: PartialEq, ES, PC: PartialEq, PS> PartialEq for Segment<E, ES, PC, PS> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Segment::Element(a, _), Segment::Element(b, _)) => a == b,
            (Segment::Pattern(a, _), Segment::Pattern(b, _)) => a == b,
            _ => false,
        }
    }
}

/// Cursor flattening a sequence of sequences with a pattern between adjacent ones.
pub struct JoinWithCursor<O, OS, P>
where
    O: Cursor,
    O::Item: Sequence,
    P: Sequence,
{
    outer: O,
    outer_end: OS,
    pattern: P,
    segment: Option<Segment<Inner<O>, InnerEnd<O>, P::Cursor, P::Sentinel>>,
}

impl<O, OS, P> Clone for JoinWithCursor<O, OS, P>
where
    O: Cursor + Clone,
    O::Item: Sequence,
    Inner<O>: Clone,
    OS: Clone,
    P: Sequence + Clone,
    P::Cursor: Clone,
{
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            outer_end: self.outer_end.clone(),
            pattern: self.pattern.clone(),
            segment: self.segment.clone(),
        }
    }
}

impl<O, OS, P> PartialEq for JoinWithCursor<O, OS, P>
where
    O: Cursor + PartialEq,
    O::Item: Sequence,
    Inner<O>: PartialEq,
    P: Sequence,
    P::Cursor: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.outer == other.outer && self.segment == other.segment
    }
}

impl<O, OS, P> JoinWithCursor<O, OS, P>
where
    O: Cursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
    P: Sequence,
    P::Cursor: Cursor<Item = <Inner<O> as Cursor>::Item>,
{
    fn new(outer: O, outer_end: OS, pattern: P) -> Self {
        let segment = if outer_end.reached(&outer) {
            None
        } else {
            let seq = outer.read();
            Some(Segment::Element(seq.start(), seq.end()))
        };

        let mut cursor = Self {
            outer,
            outer_end,
            pattern,
            segment,
        };
        cursor.satisfy();
        cursor
    }

    /// Move past exhausted segments: a finished element is followed by the pattern unless it was
    /// the last one, a finished pattern by the next element.
    fn satisfy(&mut self) {
        loop {
            match &self.segment {
                None => return,
                Some(Segment::Pattern(c, end)) => {
                    if !end.reached(c) {
                        return;
                    }
                    let seq = self.outer.read();
                    self.segment = Some(Segment::Element(seq.start(), seq.end()));
                }
                Some(Segment::Element(c, end)) => {
                    if !end.reached(c) {
                        return;
                    }
                    self.outer.advance();
                    if self.outer_end.reached(&self.outer) {
                        self.segment = None;
                        return;
                    }
                    self.segment = Some(Segment::Pattern(self.pattern.start(), self.pattern.end()));
                }
            }
        }
    }
}

impl<O, OS, P> Cursor for JoinWithCursor<O, OS, P>
where
    O: Cursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
    P: Sequence,
    P::Cursor: Cursor<Item = <Inner<O> as Cursor>::Item>,
{
    type Item = <Inner<O> as Cursor>::Item;

    const CAPABILITY: Capability = O::CAPABILITY
        .min(<Inner<O> as Cursor>::CAPABILITY)
        .min(<P::Cursor as Cursor>::CAPABILITY)
        .min(Capability::Forward);

    fn read(&self) -> Self::Item {
        match &self.segment {
            Some(Segment::Element(c, _)) => c.read(),
            Some(Segment::Pattern(c, _)) => c.read(),
            None => panic!("read past the end of a joined sequence"),
        }
    }

    fn advance(&mut self) {
        match &mut self.segment {
            Some(Segment::Element(c, _)) => c.advance(),
            Some(Segment::Pattern(c, _)) => c.advance(),
            None => return,
        }
        self.satisfy();
    }
}

impl<O, OS, P> ForwardCursor for JoinWithCursor<O, OS, P>
where
    O: ForwardCursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
    Inner<O>: ForwardCursor,
    P: Sequence + Clone,
    P::Cursor: ForwardCursor<Item = <Inner<O> as Cursor>::Item>,
{
}

impl<O, OS, P> Exhaust for JoinWithCursor<O, OS, P>
where
    O: Cursor,
    O::Item: Sequence,
    OS: Sentinel<O>,
    P: Sequence,
    P::Cursor: Cursor<Item = <Inner<O> as Cursor>::Item>,
{
    fn exhausted(&self) -> bool {
        self.segment.is_none()
    }
}

/// The elements of every inner sequence with `pattern` inserted between adjacent ones, including
/// around empty inner sequences.
#[derive(Debug, Clone)]
pub struct JoinWithView<V, P> {
    base: V,
    pattern: P,
}

impl<V, P> JoinWithView<V, P>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Sequence,
    P: Sequence + Clone,
    P::Cursor: Cursor<Item = <Inner<V::Cursor> as Cursor>::Item>,
{
    pub fn new(base: V, pattern: P) -> Self {
        Self { base, pattern }
    }
}

impl<V, P> Sequence for JoinWithView<V, P>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Sequence,
    P: Sequence + Clone,
    P::Cursor: Cursor<Item = <Inner<V::Cursor> as Cursor>::Item>,
{
    type Cursor = JoinWithCursor<V::Cursor, V::Sentinel, P>;
    type Sentinel = End;
    type Count = usize;

    const BORROWED: bool = V::BORROWED && P::BORROWED;

    fn start(&self) -> Self::Cursor {
        JoinWithCursor::new(self.base.start(), self.base.end(), self.pattern.clone())
    }

    fn end(&self) -> End {
        End
    }
}

crate::views::view_algebra!({V, P} JoinWithView<V, P>);

pub fn join_with<V, P>(base: V, pattern: P) -> JoinWithView<V, P>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Sequence,
    P: Sequence + Clone,
    P::Cursor: Cursor<Item = <Inner<V::Cursor> as Cursor>::Item>,
{
    JoinWithView::new(base, pattern)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        host::{Input, Iota},
        sequence::SequenceExt,
        testing::capability_of,
        views::{as_rvalue, chunk, chunk_input, lazy_split, single},
    };

    #[test]
    fn join_flattens_and_skips_empty_pieces() {
        let a = [1, 2];
        let b: [i32; 0] = [];
        let c = [3];
        let outer = [&a[..], &b[..], &c[..]];
        let view = join(as_rvalue(&outer[..]));

        assert_eq!(view.walk().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn join_of_chunks_restores_the_base() {
        let view = join(chunk(Iota::new(0, 10), 3));

        assert_eq!(view.walk().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
        assert_eq!(capability_of(&view), Capability::Forward);
    }

    #[test]
    fn join_of_input_chunks_is_single_pass() {
        let view = join(chunk_input(Input::new(0..5), 2));

        assert_eq!(capability_of(&view), Capability::SinglePass);
        assert_eq!(view.walk().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn join_with_inverts_split() {
        let text = "the quick  fox";
        let view = join_with(lazy_split(text, single(' ')), single(' '));

        assert_eq!(view.walk().collect::<String>(), text);
    }

    #[test]
    fn join_with_separates_empty_pieces() {
        let empty: [&[i32]; 3] = [&[], &[], &[]];
        let sep = [0];
        let view = join_with(as_rvalue(&empty[..]), &sep[..]);

        assert_eq!(view.walk().copied().collect::<Vec<_>>(), vec![0, 0]);

        let none: [&[i32]; 0] = [];
        assert_eq!(join_with(as_rvalue(&none[..]), &sep[..]).walk().count(), 0);
    }

    #[test]
    fn join_with_multi_element_pattern() {
        let words = ["ab", "c"];
        let view = join_with(as_rvalue(&words[..]), ", ");

        assert_eq!(view.walk().collect::<String>(), "ab, c");
    }
}
