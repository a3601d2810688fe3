use std::rc::Rc;

use crate::{
    cursor::{
        BidiCursor, Capability, ContiguousCursor, Cursor, Exhaust, ForwardCursor, RandomCursor,
    },
    sequence::{CommonSequence, Sequence},
};

/// Cursor over the one element of a [`SingleView`], at position 0 or 1.
pub struct SingleCursor<T> {
    value: Rc<T>,
    pos: usize,
}

impl<T> Clone for SingleCursor<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            pos: self.pos,
        }
    }
}

impl<T> PartialEq for SingleCursor<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value) && self.pos == other.pos
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SingleCursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleCursor")
            .field("value", &self.value)
            .field("pos", &self.pos)
            .finish()
    }
}

impl<T: Clone> Cursor for SingleCursor<T> {
    type Item = T;

    const CAPABILITY: Capability = Capability::Contiguous;

    fn read(&self) -> T {
        (*self.value).clone()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl<T: Clone> ForwardCursor for SingleCursor<T> {
    fn measure(&self, other: &Self) -> Option<isize> {
        Some(self.offset_to(other))
    }
}

impl<T: Clone> BidiCursor for SingleCursor<T> {
    fn retreat(&mut self) {
        self.pos -= 1;
    }
}

impl<T: Clone> RandomCursor for SingleCursor<T> {
    fn jump(&mut self, n: isize) {
        self.pos = self.pos.wrapping_add_signed(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        other.pos as isize - self.pos as isize
    }
}

impl<T: Clone> ContiguousCursor for SingleCursor<T> {
    type Element = T;

    fn address(&self) -> *const T {
        Rc::as_ptr(&self.value).wrapping_add(self.pos)
    }
}

impl<T: Clone> Exhaust for SingleCursor<T> {
    fn exhausted(&self) -> bool {
        self.pos >= 1
    }

    fn remaining(&self) -> Option<isize> {
        Some(1 - self.pos as isize)
    }
}

/// A sequence of exactly one element, owned by the view and shared by its cursors
#[derive(Debug)]
pub struct SingleView<T> {
    value: Rc<T>,
}

impl<T> Clone for SingleView<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: Clone> SingleView<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(value),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Sequence for SingleView<T> {
    type Cursor = SingleCursor<T>;
    type Sentinel = SingleCursor<T>;
    type Count = usize;

    fn start(&self) -> SingleCursor<T> {
        SingleCursor {
            value: Rc::clone(&self.value),
            pos: 0,
        }
    }

    fn end(&self) -> SingleCursor<T> {
        SingleCursor {
            value: Rc::clone(&self.value),
            pos: 1,
        }
    }

    fn count(&self) -> Option<usize> {
        Some(1)
    }

    fn is_empty_hint(&self) -> Option<bool> {
        Some(false)
    }

    fn storage(&self) -> Option<*const <Self::Cursor as ContiguousCursor>::Element>
    where
        Self::Cursor: ContiguousCursor,
    {
        Some(self.start().address())
    }
}

impl<T: Clone> CommonSequence for SingleView<T> {
    fn finish(&self) -> SingleCursor<T> {
        self.end()
    }
}

crate::views::view_algebra!({T} SingleView<T>);

pub fn single<T: Clone>(value: T) -> SingleView<T> {
    SingleView::new(value)
}
