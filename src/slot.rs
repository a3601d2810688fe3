use std::{cell::Cell, fmt};

/// Proxy reference to a mutable element.
///
/// Cursors over [`Cells`](crate::Cells) hand these out instead of `&mut T`, so that any number of
/// cursors may refer to the same storage while still supporting writes, moves and swaps.
pub struct Slot<'a, T> {
    cell: &'a Cell<T>,
}

/// Read-only demotion of a [`Slot`]
pub struct SlotRef<'a, T> {
    cell: &'a Cell<T>,
}

impl<'a, T> Slot<'a, T> {
    pub fn new(cell: &'a Cell<T>) -> Self {
        Self { cell }
    }

    pub fn set(&self, value: T) {
        self.cell.set(value)
    }

    pub fn replace(&self, value: T) -> T {
        self.cell.replace(value)
    }

    /// Exchange the referenced element with the one behind `other`
    pub fn swap(&self, other: &Slot<'a, T>) {
        self.cell.swap(other.cell)
    }

    pub fn as_ptr(&self) -> *const T {
        self.cell.as_ptr()
    }

    /// Demote to a proxy that can no longer write
    pub fn read_only(&self) -> SlotRef<'a, T> {
        SlotRef { cell: self.cell }
    }
}

impl<'a, T: Copy> Slot<'a, T> {
    pub fn get(&self) -> T {
        self.cell.get()
    }
}

impl<'a, T: Default> Slot<'a, T> {
    pub fn take(&self) -> T {
        self.cell.take()
    }
}

impl<'a, T: Copy> SlotRef<'a, T> {
    pub fn get(&self) -> T {
        self.cell.get()
    }
}

impl<'a, T> SlotRef<'a, T> {
    pub fn as_ptr(&self) -> *const T {
        self.cell.as_ptr()
    }
}

impl<'a, T> Clone for Slot<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Slot<'a, T> {}

impl<'a, T> Clone for SlotRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SlotRef<'a, T> {}

impl<'a, T: Copy + PartialEq> PartialEq<T> for Slot<'a, T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<'a, T: Copy + PartialEq> PartialEq for Slot<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<'a, T: Copy + PartialEq> PartialEq<T> for SlotRef<'a, T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<'a, T: Copy + PartialEq> PartialEq for SlotRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<'a, T: Copy + fmt::Debug> fmt::Debug for Slot<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.get()).finish()
    }
}

impl<'a, T: Copy + fmt::Debug> fmt::Debug for SlotRef<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotRef").field(&self.get()).finish()
    }
}

/// An element access result that can be turned into an owned value.
///
/// For proxies this moves the element out, leaving a default behind. For shared references it
/// copies, as a read-only location cannot be moved from.
pub trait Movable {
    type Value;

    fn move_value(self) -> Self::Value;
}

/// An element access result that can be written through.
pub trait Writable: Movable {
    fn write(self, value: Self::Value);
}

impl<'a, T: Clone> Movable for &'a T {
    type Value = T;

    fn move_value(self) -> T {
        self.clone()
    }
}

impl<'a, T: Default> Movable for Slot<'a, T> {
    type Value = T;

    fn move_value(self) -> T {
        self.take()
    }
}

impl<'a, T: Default> Writable for Slot<'a, T> {
    fn write(self, value: T) {
        self.set(value)
    }
}

impl<'a, T: Copy> Movable for SlotRef<'a, T> {
    type Value = T;

    fn move_value(self) -> T {
        self.get()
    }
}

impl<A: Movable, const N: usize> Movable for [A; N] {
    type Value = [A::Value; N];

    fn move_value(self) -> Self::Value {
        self.map(Movable::move_value)
    }
}

macro_rules! movable_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Movable for $ty {
                type Value = $ty;

                fn move_value(self) -> $ty {
                    self
                }
            }
        )*
    };
}

movable_by_value!(
    (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
    String,
);

macro_rules! movable_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Movable),+> Movable for ($($name,)+) {
            type Value = ($($name::Value,)+);

            fn move_value(self) -> Self::Value {
                ($(self.$idx.move_value(),)+)
            }
        }

        impl<$($name: Writable),+> Writable for ($($name,)+) {
            fn write(self, value: Self::Value) {
                $(self.$idx.write(value.$idx);)+
            }
        }
    };
}

movable_tuple!(A 0);
movable_tuple!(A 0, B 1);
movable_tuple!(A 0, B 1, C 2);
movable_tuple!(A 0, B 1, C 2, D 3);

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn slot_writes_through() {
        let cells = [Cell::new(1), Cell::new(2)];
        let a = Slot::new(&cells[0]);
        let b = Slot::new(&cells[1]);

        a.set(10);
        assert_eq!(cells[0].get(), 10);

        a.swap(&b);
        assert_eq!((a.get(), b.get()), (2, 10));
        assert_eq!(b.replace(7), 10);
        assert!(b == 7);
    }

    #[test]
    fn moving_a_slot_leaves_default() {
        let cell = Cell::new(String::from("moved"));
        let s = Slot::new(&cell);

        assert_eq!(s.move_value(), "moved");
        assert_eq!(cell.take(), "");
    }

    #[test]
    fn moving_a_reference_copies() {
        let v = String::from("kept");
        let r = &v;

        assert_eq!(r.move_value(), "kept");
        assert_eq!(v, "kept");
    }

    #[test]
    fn tuples_write_elementwise() {
        let cells = [Cell::new(1), Cell::new(2)];
        let pair = (Slot::new(&cells[0]), Slot::new(&cells[1]));

        pair.write((5, 6));
        assert_eq!((cells[0].get(), cells[1].get()), (5, 6));
        assert_eq!(pair.move_value(), (5, 6));
        assert_eq!((cells[0].get(), cells[1].get()), (0, 0));
    }
}
