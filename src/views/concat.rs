use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Count, Sequence},
    slot::{Movable, Writable},
};

/// Which of the two concatenated sequences a [`ConcatCursor`] is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side<L, R> {
    Left(L),
    Right(R),
}

/// Cursor over the left sequence followed by the right one.
///
/// The cursor never rests at the end of the left sequence: reaching it moves straight to the
/// start of the right one, so an empty left sequence is skipped without ever being visited.
pub struct ConcatCursor<LC, LS, RC, RS> {
    side: Side<LC, RC>,
    left_start: LC,
    left_end: LS,
    right_start: RC,
    right_end: RS,
}

impl<LC: Clone, LS: Clone, RC: Clone, RS: Clone> Clone for ConcatCursor<LC, LS, RC, RS> {
    fn clone(&self) -> Self {
        Self {
            side: self.side.clone(),
            left_start: self.left_start.clone(),
            left_end: self.left_end.clone(),
            right_start: self.right_start.clone(),
            right_end: self.right_end.clone(),
        }
    }
}

impl<LC: PartialEq, LS, RC: PartialEq, RS> PartialEq for ConcatCursor<LC, LS, RC, RS> {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side
    }
}

impl<LC: std::fmt::Debug, LS, RC: std::fmt::Debug, RS> std::fmt::Debug
    for ConcatCursor<LC, LS, RC, RS>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ConcatCursor").field(&self.side).finish()
    }
}

impl<LC, LS, RC, RS> ConcatCursor<LC, LS, RC, RS> {
    pub fn side(&self) -> &Side<LC, RC> {
        &self.side
    }

    fn left_finish(&self) -> LC
    where
        LS: CommonSentinel<LC>,
    {
        self.left_end.finish_from(&self.left_start)
    }
}

impl<LC, LS, RC, RS> ConcatCursor<LC, LS, RC, RS>
where
    LC: RandomCursor,
    LS: CommonSentinel<LC>,
    RC: RandomCursor<Item = LC::Item>,
{
    /// Offset from the start of the concatenation
    fn position(&self) -> isize {
        match &self.side {
            Side::Left(c) => self.left_start.offset_to(c),
            Side::Right(c) => {
                self.left_start.offset_to(&self.left_finish()) + self.right_start.offset_to(c)
            }
        }
    }

    fn seek(&mut self, pos: isize) {
        let left_len = self.left_start.offset_to(&self.left_finish());
        self.side = if pos < left_len {
            let mut c = self.left_start.clone();
            c.jump(pos);
            Side::Left(c)
        } else {
            let mut c = self.right_start.clone();
            c.jump(pos - left_len);
            Side::Right(c)
        };
    }
}

impl<LC, LS, RC, RS> Cursor for ConcatCursor<LC, LS, RC, RS>
where
    LC: Cursor + Clone,
    LS: Sentinel<LC>,
    RC: Cursor<Item = LC::Item> + Clone,
    RS: Sentinel<RC>,
{
    type Item = LC::Item;

    // crossing back into the left sequence needs its end as a cursor
    const CAPABILITY: Capability = if LS::COMMON {
        LC::CAPABILITY
            .min(RC::CAPABILITY)
            .min(Capability::RandomAccess)
    } else {
        LC::CAPABILITY.min(RC::CAPABILITY).min(Capability::Forward)
    };

    fn read(&self) -> LC::Item {
        match &self.side {
            Side::Left(c) => c.read(),
            Side::Right(c) => c.read(),
        }
    }

    fn advance(&mut self) {
        match &mut self.side {
            Side::Left(c) => {
                c.advance();
                if self.left_end.reached(c) {
                    self.side = Side::Right(self.right_start.clone());
                }
            }
            Side::Right(c) => c.advance(),
        }
    }

    fn move_out(&self) -> <LC::Item as Movable>::Value
    where
        LC::Item: Movable,
    {
        match &self.side {
            Side::Left(c) => c.move_out(),
            Side::Right(c) => c.move_out(),
        }
    }

    fn swap_with(&self, other: &Self)
    where
        LC::Item: Writable,
    {
        match (&self.side, &other.side) {
            (Side::Left(a), Side::Left(b)) => a.swap_with(b),
            (Side::Right(a), Side::Right(b)) => a.swap_with(b),
            _ => {
                let tmp = self.move_out();
                let theirs = other.move_out();
                self.read().write(theirs);
                other.read().write(tmp);
            }
        }
    }
}

impl<LC, LS, RC, RS> ForwardCursor for ConcatCursor<LC, LS, RC, RS>
where
    LC: ForwardCursor,
    LS: Sentinel<LC>,
    RC: ForwardCursor<Item = LC::Item>,
    RS: Sentinel<RC>,
{
}

impl<LC, LS, RC, RS> BidiCursor for ConcatCursor<LC, LS, RC, RS>
where
    LC: BidiCursor,
    LS: CommonSentinel<LC>,
    RC: BidiCursor<Item = LC::Item>,
    RS: Sentinel<RC>,
{
    fn retreat(&mut self) {
        if matches!(&self.side, Side::Right(c) if *c == self.right_start) {
            let mut c = self.left_finish();
            c.retreat();
            self.side = Side::Left(c);
            return;
        }

        match &mut self.side {
            Side::Left(c) => c.retreat(),
            Side::Right(c) => c.retreat(),
        }
    }
}

impl<LC, LS, RC, RS> RandomCursor for ConcatCursor<LC, LS, RC, RS>
where
    LC: RandomCursor,
    LS: CommonSentinel<LC>,
    RC: RandomCursor<Item = LC::Item>,
    RS: Sentinel<RC>,
{
    fn jump(&mut self, n: isize) {
        // moving away from the boundary never changes sides
        let same_side = match &self.side {
            Side::Left(_) => n < 0,
            Side::Right(_) => n >= 0,
        };
        if !same_side {
            let pos = self.position() + n;
            self.seek(pos);
            return;
        }

        match &mut self.side {
            Side::Left(c) => c.jump(n),
            Side::Right(c) => c.jump(n),
        }
    }

    fn offset_to(&self, other: &Self) -> isize {
        other.position() - self.position()
    }
}

impl<LC, LS, RC, RS> Exhaust for ConcatCursor<LC, LS, RC, RS>
where
    LC: Cursor + Clone,
    LS: Sentinel<LC>,
    RC: Cursor<Item = LC::Item> + Clone,
    RS: Sentinel<RC>,
{
    const FINISHING: bool = RS::COMMON && LC::CAPABILITY.at_least(Capability::Forward);

    fn exhausted(&self) -> bool {
        match &self.side {
            Side::Left(_) => false,
            Side::Right(c) => self.right_end.reached(c),
        }
    }

    fn remaining(&self) -> Option<isize> {
        match &self.side {
            Side::Left(c) => {
                let left = self.left_end.remaining(c)?;
                Some(left + self.right_end.remaining(&self.right_start)?)
            }
            Side::Right(c) => self.right_end.remaining(c),
        }
    }
}

impl<LC, LS, RC, RS> Finishing for ConcatCursor<LC, LS, RC, RS>
where
    LC: ForwardCursor,
    LS: Sentinel<LC>,
    RC: ForwardCursor<Item = LC::Item>,
    RS: CommonSentinel<RC>,
{
    fn to_finish(&self) -> Self {
        Self {
            side: Side::Right(self.right_end.finish_from(&self.right_start)),
            ..self.clone()
        }
    }
}

/// The elements of `left` followed by those of `right`
#[derive(Debug, Clone)]
pub struct ConcatView<A, B> {
    left: A,
    right: B,
}

impl<A, B> ConcatView<A, B>
where
    A: Sequence,
    A::Cursor: Clone,
    B: Sequence,
    B::Cursor: Cursor<Item = <A::Cursor as Cursor>::Item> + Clone,
{
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A, B> Sequence for ConcatView<A, B>
where
    A: Sequence,
    A::Cursor: Clone,
    B: Sequence,
    B::Cursor: Cursor<Item = <A::Cursor as Cursor>::Item> + Clone,
{
    type Cursor = ConcatCursor<A::Cursor, A::Sentinel, B::Cursor, B::Sentinel>;
    type Sentinel = End;
    type Count = usize;

    const BORROWED: bool = A::BORROWED && B::BORROWED;

    fn start(&self) -> Self::Cursor {
        let (left, left_end) = (self.left.start(), self.left.end());
        let right_start = self.right.start();
        let side = if left_end.reached(&left) {
            Side::Right(right_start.clone())
        } else {
            Side::Left(left)
        };

        ConcatCursor {
            side,
            left_start: self.left.start(),
            left_end,
            right_start,
            right_end: self.right.end(),
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<usize> {
        let left = count_of(&self.left)?.to_usize();
        let right = count_of(&self.right)?.to_usize();
        Some(left.saturating_add(right))
    }

    fn is_empty_hint(&self) -> Option<bool> {
        match (self.left.is_empty_hint()?, self.right.is_empty_hint()?) {
            (true, true) => Some(true),
            _ => Some(false),
        }
    }
}

impl<A, B> CommonSequence for ConcatView<A, B>
where
    A: Sequence,
    A::Cursor: Clone,
    B: CommonSequence,
    B::Cursor: Cursor<Item = <A::Cursor as Cursor>::Item> + Clone,
{
    fn finish(&self) -> Self::Cursor {
        ConcatCursor {
            side: Side::Right(self.right.finish()),
            left_start: self.left.start(),
            left_end: self.left.end(),
            right_start: self.right.start(),
            right_end: self.right.end(),
        }
    }
}

crate::views::view_algebra!({A, B} ConcatView<A, B>);

pub fn concat<A, B>(left: A, right: B) -> ConcatView<A, B>
where
    A: Sequence,
    A::Cursor: Clone,
    B: Sequence,
    B::Cursor: Cursor<Item = <A::Cursor as Cursor>::Item> + Clone,
{
    ConcatView::new(left, right)
}

/// Three sequences end to end, nested as `concat(concat(a, b), c)`
pub fn concat3<A, B, C>(a: A, b: B, c: C) -> ConcatView<ConcatView<A, B>, C>
where
    A: Sequence,
    A::Cursor: Clone,
    B: Sequence,
    B::Cursor: Cursor<Item = <A::Cursor as Cursor>::Item> + Clone,
    C: Sequence,
    C::Cursor: Cursor<Item = <A::Cursor as Cursor>::Item> + Clone,
{
    concat(concat(a, b), c)
}
