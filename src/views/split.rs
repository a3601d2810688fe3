use crate::{
    cursor::{Capability, Cursor, End, Exhaust, ForwardCursor, Sentinel},
    sequence::Sequence,
    subrange::Subrange,
};

/// Cursor over the pieces of a base split on a pattern.
///
/// `piece_end` is where the current piece stops and `resume` is where the next piece starts when
/// the current one was ended by a pattern match. `trailing_empty` is set after a match that ends
/// exactly at the end of the base, so that the empty piece after it is still produced.
pub struct SplitCursor<C, S, PC, PS> {
    current: C,
    piece_end: C,
    resume: Option<C>,
    end: S,
    pattern: PC,
    pattern_end: PS,
    trailing_empty: bool,
}

impl<C: Clone, S: Clone, PC: Clone, PS: Clone> Clone for SplitCursor<C, S, PC, PS> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            piece_end: self.piece_end.clone(),
            resume: self.resume.clone(),
            end: self.end.clone(),
            pattern: self.pattern.clone(),
            pattern_end: self.pattern_end.clone(),
            trailing_empty: self.trailing_empty,
        }
    }
}

impl<C: PartialEq, S, PC, PS> PartialEq for SplitCursor<C, S, PC, PS> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && self.trailing_empty == other.trailing_empty
    }
}

impl<C: std::fmt::Debug, S, PC, PS> std::fmt::Debug for SplitCursor<C, S, PC, PS> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitCursor")
            .field("current", &self.current)
            .field("piece_end", &self.piece_end)
            .field("trailing_empty", &self.trailing_empty)
            .finish()
    }
}

impl<C, S, PC, PS> SplitCursor<C, S, PC, PS>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    PC: ForwardCursor,
    PS: Sentinel<PC>,
    C::Item: PartialEq<PC::Item>,
{
    fn new(current: C, end: S, pattern: PC, pattern_end: PS) -> Self {
        let mut cursor = Self {
            piece_end: current.clone(),
            current,
            resume: None,
            end,
            pattern,
            pattern_end,
            trailing_empty: false,
        };
        cursor.find_piece();
        cursor
    }

    fn pattern_is_empty(&self) -> bool {
        self.pattern_end.reached(&self.pattern)
    }

    /// Position just past the pattern if it occurs starting at `at`
    fn match_at(&self, at: &C) -> Option<C> {
        let mut cursor = at.clone();
        let mut pattern = self.pattern.clone();
        while !self.pattern_end.reached(&pattern) {
            if self.end.reached(&cursor) || cursor.read() != pattern.read() {
                return None;
            }
            cursor.advance();
            pattern.advance();
        }
        Some(cursor)
    }

    fn find_piece(&mut self) {
        self.resume = None;
        let mut cursor = self.current.clone();

        if self.pattern_is_empty() {
            if !self.end.reached(&cursor) {
                cursor.advance();
            }
            self.piece_end = cursor;
            return;
        }

        while !self.end.reached(&cursor) {
            if let Some(after) = self.match_at(&cursor) {
                self.resume = Some(after);
                break;
            }
            cursor.advance();
        }
        self.piece_end = cursor;
    }
}

impl<C, S, PC, PS> Cursor for SplitCursor<C, S, PC, PS>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    PC: ForwardCursor,
    PS: Sentinel<PC>,
    C::Item: PartialEq<PC::Item>,
{
    type Item = Subrange<C, C>;

    const CAPABILITY: Capability = C::CAPABILITY.min(Capability::Forward);

    fn read(&self) -> Subrange<C, C> {
        Subrange::new(self.current.clone(), self.piece_end.clone())
    }

    fn advance(&mut self) {
        if self.end.reached(&self.current) {
            self.trailing_empty = false;
            return;
        }

        match self.resume.take() {
            Some(after) => {
                self.current = after;
                if self.end.reached(&self.current) {
                    self.trailing_empty = true;
                }
            }
            None => self.current = self.piece_end.clone(),
        }
        self.find_piece();
    }
}

impl<C, S, PC, PS> ForwardCursor for SplitCursor<C, S, PC, PS>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    PC: ForwardCursor,
    PS: Sentinel<PC>,
    C::Item: PartialEq<PC::Item>,
{
}

impl<C, S, PC, PS> Exhaust for SplitCursor<C, S, PC, PS>
where
    C: ForwardCursor,
    S: Sentinel<C>,
    PC: ForwardCursor,
    PS: Sentinel<PC>,
    C::Item: PartialEq<PC::Item>,
{
    fn exhausted(&self) -> bool {
        self.end.reached(&self.current) && !self.trailing_empty
    }
}

/// Pieces of the base delimited by occurrences of a pattern sequence.
///
/// Separators at either edge produce empty pieces at that edge. An empty pattern splits between
/// every pair of elements. An empty base has no pieces at all.
#[derive(Debug, Clone)]
pub struct LazySplitView<V, P> {
    base: V,
    pattern: P,
}

impl<V, P> LazySplitView<V, P>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
    P: Sequence,
    P::Cursor: ForwardCursor,
    <V::Cursor as Cursor>::Item: PartialEq<<P::Cursor as Cursor>::Item>,
{
    pub fn new(base: V, pattern: P) -> Self {
        Self { base, pattern }
    }
}

impl<V, P> Sequence for LazySplitView<V, P>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
    P: Sequence,
    P::Cursor: ForwardCursor,
    <V::Cursor as Cursor>::Item: PartialEq<<P::Cursor as Cursor>::Item>,
{
    type Cursor = SplitCursor<V::Cursor, V::Sentinel, P::Cursor, P::Sentinel>;
    type Sentinel = End;
    type Count = V::Count;

    const BORROWED: bool = V::BORROWED && P::BORROWED;

    fn start(&self) -> Self::Cursor {
        SplitCursor::new(
            self.base.start(),
            self.base.end(),
            self.pattern.start(),
            self.pattern.end(),
        )
    }

    fn end(&self) -> End {
        End
    }
}

crate::views::view_algebra!({V, P} LazySplitView<V, P>);

/// Split `base` on every occurrence of `pattern`. Use [`single`](crate::views::single) to split on
/// one element.
pub fn lazy_split<V, P>(base: V, pattern: P) -> LazySplitView<V, P>
where
    V: Sequence,
    V::Cursor: ForwardCursor,
    P: Sequence,
    P::Cursor: ForwardCursor,
    <V::Cursor as Cursor>::Item: PartialEq<<P::Cursor as Cursor>::Item>,
{
    LazySplitView::new(base, pattern)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{sequence::SequenceExt, views::single};

    fn pieces<V>(view: &V) -> Vec<String>
    where
        V: Sequence,
        V::Cursor: Cursor,
        <V::Cursor as Cursor>::Item: Sequence,
        <<V::Cursor as Cursor>::Item as Sequence>::Cursor: Cursor<Item = char>,
    {
        view.walk().map(|piece| piece.walk().collect()).collect()
    }

    #[test]
    fn split_on_a_multi_element_pattern() {
        let view = lazy_split("the  quick  brown  fox", "  ");

        assert_eq!(pieces(&view), vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn separators_at_the_edges_give_empty_pieces() {
        let view = lazy_split(" text ", single(' '));

        assert_eq!(pieces(&view), vec!["", "text", ""]);
        assert_eq!(pieces(&lazy_split("a,,b", single(','))), vec!["a", "", "b"]);
    }

    #[test]
    fn empty_pattern_splits_every_element() {
        let view = lazy_split("text", "");

        assert_eq!(pieces(&view), vec!["t", "e", "x", "t"]);
    }

    #[test]
    fn empty_base_has_no_pieces() {
        assert!(pieces(&lazy_split("", " ")).is_empty());
        assert!(pieces(&lazy_split("", "")).is_empty());
        assert_eq!(pieces(&lazy_split(" ", " ")), vec!["", ""]);
    }

    #[test]
    fn split_slices_on_a_reference() {
        let v = [1, 0, 2, 3, 0];
        let zero = 0;
        let view = lazy_split(&v[..], single(&zero));
        let parts: Vec<Vec<i32>> = view
            .walk()
            .map(|p| p.walk().copied().collect())
            .collect();

        assert_eq!(parts, vec![vec![1], vec![2, 3], vec![]]);
    }
}
