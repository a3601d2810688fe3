use std::rc::Rc;

use crate::{
    cursor::{BidiCursor, Capability, Cursor, ForwardCursor, RandomCursor, Unreachable},
    sequence::{CommonSequence, Sequence},
    views::{Droppable, Takeable},
};

/// Cursor over a repeated value. Positions are indices, so every cursor of the same view is
/// comparable and random access is exact.
pub struct RepeatCursor<T> {
    value: Rc<T>,
    index: usize,
}

impl<T> Clone for RepeatCursor<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            index: self.index,
        }
    }
}

impl<T> PartialEq for RepeatCursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RepeatCursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatCursor")
            .field("value", &self.value)
            .field("index", &self.index)
            .finish()
    }
}

impl<T> RepeatCursor<T> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T: Clone> Cursor for RepeatCursor<T> {
    type Item = T;

    const CAPABILITY: Capability = Capability::RandomAccess;

    fn read(&self) -> T {
        (*self.value).clone()
    }

    fn advance(&mut self) {
        self.index += 1;
    }
}

impl<T: Clone> ForwardCursor for RepeatCursor<T> {
    fn measure(&self, other: &Self) -> Option<isize> {
        Some(self.offset_to(other))
    }
}

impl<T: Clone> BidiCursor for RepeatCursor<T> {
    fn retreat(&mut self) {
        self.index -= 1;
    }
}

impl<T: Clone> RandomCursor for RepeatCursor<T> {
    fn jump(&mut self, n: isize) {
        self.index = self.index.wrapping_add_signed(n);
    }

    fn offset_to(&self, other: &Self) -> isize {
        other.index as isize - self.index as isize
    }
}

/// `value` repeated a fixed number of times
#[derive(Debug)]
pub struct Repeat<T> {
    value: Rc<T>,
    bound: usize,
}

impl<T> Clone for Repeat<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            bound: self.bound,
        }
    }
}

impl<T: Clone> Repeat<T> {
    pub fn new(value: T, bound: usize) -> Self {
        Self {
            value: Rc::new(value),
            bound,
        }
    }

    fn at(&self, index: usize) -> RepeatCursor<T> {
        RepeatCursor {
            value: Rc::clone(&self.value),
            index,
        }
    }
}

impl<T: Clone> Sequence for Repeat<T> {
    type Cursor = RepeatCursor<T>;
    type Sentinel = RepeatCursor<T>;
    type Count = usize;

    // cursors share ownership of the value
    const BORROWED: bool = true;

    fn start(&self) -> RepeatCursor<T> {
        self.at(0)
    }

    fn end(&self) -> RepeatCursor<T> {
        self.at(self.bound)
    }

    fn count(&self) -> Option<usize> {
        Some(self.bound)
    }
}

impl<T: Clone> CommonSequence for Repeat<T> {
    fn finish(&self) -> RepeatCursor<T> {
        self.end()
    }
}

/// `value` repeated without end
#[derive(Debug)]
pub struct RepeatForever<T> {
    value: Rc<T>,
}

impl<T> Clone for RepeatForever<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: Clone> RepeatForever<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(value),
        }
    }
}

impl<T: Clone> Sequence for RepeatForever<T> {
    type Cursor = RepeatCursor<T>;
    type Sentinel = Unreachable;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> RepeatCursor<T> {
        RepeatCursor {
            value: Rc::clone(&self.value),
            index: 0,
        }
    }

    fn end(&self) -> Unreachable {
        Unreachable
    }

    fn is_empty_hint(&self) -> Option<bool> {
        Some(false)
    }
}

// slicing a repetition is another repetition
impl<T: Clone> Takeable for Repeat<T> {
    type Output = Repeat<T>;

    fn take_first(self, n: usize) -> Repeat<T> {
        Repeat {
            value: self.value,
            bound: self.bound.min(n),
        }
    }
}

impl<T: Clone> Droppable for Repeat<T> {
    type Output = Repeat<T>;

    fn drop_first(self, n: usize) -> Repeat<T> {
        Repeat {
            value: self.value,
            bound: self.bound.saturating_sub(n),
        }
    }
}

impl<T: Clone> Takeable for RepeatForever<T> {
    type Output = Repeat<T>;

    fn take_first(self, n: usize) -> Repeat<T> {
        log::trace!("take({n}) of an unbounded repetition becomes a bounded one");
        Repeat {
            value: self.value,
            bound: n,
        }
    }
}

impl<T: Clone> Droppable for RepeatForever<T> {
    type Output = RepeatForever<T>;

    fn drop_first(self, _n: usize) -> RepeatForever<T> {
        self
    }
}

crate::views::view_pipe!({T} Repeat<T>, {T} RepeatForever<T>);
crate::views::view_input!({T} Repeat<T>, {T} RepeatForever<T>);
crate::views::view_const!({T} Repeat<T>, {T} RepeatForever<T>);

/// `value` repeated forever
pub fn repeat<T: Clone>(value: T) -> RepeatForever<T> {
    RepeatForever::new(value)
}

/// `value` repeated `n` times
pub fn repeat_n<T: Clone>(value: T, n: usize) -> Repeat<T> {
    Repeat::new(value, n)
}
