use std::fmt::Debug;

use crate::{
    cursor::{ContiguousCursor, Cursor, Sentinel},
    pipe::Adaptor,
};

/// Integer width reported by [`count_of`](crate::count_of).
///
/// [`signed_count_of`](crate::signed_count_of) converts to [`Count::Signed`], the signed
/// counterpart of this same width.
pub trait Count: Copy + Eq + Debug {
    type Signed: Copy + Eq + Debug;

    fn to_signed(self) -> Self::Signed;

    fn to_usize(self) -> usize;

    /// Convert a walked distance into this width, saturating at its maximum
    fn from_usize(n: usize) -> Self;

    fn is_zero(self) -> bool {
        self.to_usize() == 0
    }
}

macro_rules! count_width {
    ($($unsigned:ty => $signed:ty),* $(,)?) => {
        $(
            impl Count for $unsigned {
                type Signed = $signed;

                fn to_signed(self) -> $signed {
                    self as $signed
                }

                fn to_usize(self) -> usize {
                    self as usize
                }

                fn from_usize(n: usize) -> Self {
                    <$unsigned>::try_from(n).unwrap_or(<$unsigned>::MAX)
                }
            }

            impl Count for $signed {
                type Signed = $signed;

                fn to_signed(self) -> $signed {
                    self
                }

                fn to_usize(self) -> usize {
                    self.max(0) as usize
                }

                fn from_usize(n: usize) -> Self {
                    <$signed>::try_from(n).unwrap_or(<$signed>::MAX)
                }
            }
        )*
    };
}

count_width!(u8 => i8, u16 => i16, u32 => i32, u64 => i64, u128 => i128, usize => isize);

/// Anything offering a start cursor and a way to detect the end of traversal.
///
/// The provided methods are the member strategies of the dispatcher: leave them at their
/// defaults and the dispatcher derives the answer from the cursors instead.
pub trait Sequence {
    type Cursor: Cursor;
    type Sentinel: Sentinel<Self::Cursor>;
    type Count: Count;

    /// Cursors of a temporary of this type stay valid after the temporary is gone
    const BORROWED: bool = false;

    /// Never derive the element count from cursor distance, even when it would be cheap
    const DISABLE_COUNT: bool = false;

    /// Served by the built-in rule for raw fixed-length arrays rather than by member hooks
    const HOST_ARRAY: bool = false;

    fn start(&self) -> Self::Cursor;

    fn end(&self) -> Self::Sentinel;

    fn count(&self) -> Option<Self::Count> {
        None
    }

    fn is_empty_hint(&self) -> Option<bool> {
        None
    }

    fn storage(&self) -> Option<*const <Self::Cursor as ContiguousCursor>::Element>
    where
        Self::Cursor: ContiguousCursor,
    {
        None
    }
}

/// A sequence whose end position can be produced as a cursor.
pub trait CommonSequence: Sequence {
    fn finish(&self) -> Self::Cursor;
}

/// std [`Iterator`] walking a cursor up to its sentinel.
#[derive(Debug, Clone)]
pub struct Walk<C, S> {
    cursor: C,
    end: S,
}

impl<C: Cursor, S: Sentinel<C>> Walk<C, S> {
    pub fn new(cursor: C, end: S) -> Self {
        Self { cursor, end }
    }
}

impl<C: Cursor, S: Sentinel<C>> Iterator for Walk<C, S> {
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if self.end.reached(&self.cursor) {
            return None;
        }

        let item = self.cursor.read();
        self.cursor.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.end.remaining(&self.cursor) {
            Some(n) => (n.max(0) as usize, Some(n.max(0) as usize)),
            None => (0, None),
        }
    }
}

pub trait SequenceExt: Sequence + Sized {
    /// Walk the sequence with a std [`Iterator`]
    fn walk(&self) -> Walk<Self::Cursor, Self::Sentinel> {
        Walk::new(self.start(), self.end())
    }

    /// Apply a partially applied adaptor to this sequence
    fn pipe<A: Adaptor<Self>>(self, adaptor: A) -> A::Output {
        adaptor.apply(self)
    }
}

impl<S: Sequence> SequenceExt for S {}

/// A cursor obtained from a temporary, or the marker that it would have dangled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Borrowed<C> {
    Cursor(C),
    Dangling,
}

impl<C> Borrowed<C> {
    pub fn into_cursor(self) -> Option<C> {
        match self {
            Borrowed::Cursor(c) => Some(c),
            Borrowed::Dangling => None,
        }
    }
}

/// Start cursor of a sequence that is about to be dropped.
///
/// Only types whose [`Sequence::BORROWED`] marker is set hand out their cursor, all others answer
/// [`Borrowed::Dangling`].
pub fn start_or_dangling<S: Sequence>(seq: S) -> Borrowed<S::Cursor> {
    if S::BORROWED {
        Borrowed::Cursor(seq.start())
    } else {
        Borrowed::Dangling
    }
}
