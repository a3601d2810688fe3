use crate::{
    cursor::{
        BidiCursor, Capability, CommonSentinel, Cursor, End, Exhaust, Finishing, ForwardCursor,
        RandomCursor, Sentinel,
    },
    dispatch::count_of,
    sequence::{CommonSequence, Count, Sequence},
};

/// Odometer over a tuple of factor cursors. The rightmost factor varies fastest.
///
/// `starts` are kept to rewind a factor when it wraps. `past` marks a position beyond the end
/// that no factor cursor can express: the product of an empty factor, or the advanced cursor of
/// the empty product.
pub struct CartesianCursor<Cs, Ss> {
    cursors: Cs,
    starts: Cs,
    ends: Ss,
    past: bool,
}

impl<Cs: Clone, Ss: Clone> Clone for CartesianCursor<Cs, Ss> {
    fn clone(&self) -> Self {
        Self {
            cursors: self.cursors.clone(),
            starts: self.starts.clone(),
            ends: self.ends.clone(),
            past: self.past,
        }
    }
}

impl<Cs: PartialEq, Ss> PartialEq for CartesianCursor<Cs, Ss> {
    fn eq(&self, other: &Self) -> bool {
        self.past == other.past && self.cursors == other.cursors
    }
}

impl<Cs: std::fmt::Debug, Ss> std::fmt::Debug for CartesianCursor<Cs, Ss> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartesianCursor")
            .field("cursors", &self.cursors)
            .field("past", &self.past)
            .finish()
    }
}

/// Every combination of one element from each of a tuple of sequences, in lexicographic order
#[derive(Debug, Clone)]
pub struct CartesianView<Vs> {
    bases: Vs,
}

impl<Vs> CartesianView<Vs>
where
    CartesianView<Vs>: Sequence,
{
    pub fn new(bases: Vs) -> Self {
        Self { bases }
    }
}

// the empty product has exactly one element, the empty tuple
impl Cursor for CartesianCursor<(), ()> {
    type Item = ();

    const CAPABILITY: Capability = Capability::RandomAccess;

    fn read(&self) {}

    fn advance(&mut self) {
        self.past = true;
    }
}

impl ForwardCursor for CartesianCursor<(), ()> {
    fn measure(&self, other: &Self) -> Option<isize> {
        Some(self.offset_to(other))
    }
}

impl BidiCursor for CartesianCursor<(), ()> {
    fn retreat(&mut self) {
        self.past = false;
    }
}

impl RandomCursor for CartesianCursor<(), ()> {
    fn jump(&mut self, n: isize) {
        self.past = self.past as isize + n != 0;
    }

    fn offset_to(&self, other: &Self) -> isize {
        other.past as isize - self.past as isize
    }
}

impl Exhaust for CartesianCursor<(), ()> {
    const FINISHING: bool = true;

    fn exhausted(&self) -> bool {
        self.past
    }

    fn remaining(&self) -> Option<isize> {
        Some(1 - self.past as isize)
    }
}

impl Finishing for CartesianCursor<(), ()> {
    fn to_finish(&self) -> Self {
        Self {
            past: true,
            ..self.clone()
        }
    }
}

impl Sequence for CartesianView<()> {
    type Cursor = CartesianCursor<(), ()>;
    type Sentinel = End;
    type Count = usize;

    const BORROWED: bool = true;

    fn start(&self) -> Self::Cursor {
        CartesianCursor {
            cursors: (),
            starts: (),
            ends: (),
            past: false,
        }
    }

    fn end(&self) -> End {
        End
    }

    fn count(&self) -> Option<usize> {
        Some(1)
    }
}

impl CommonSequence for CartesianView<()> {
    fn finish(&self) -> Self::Cursor {
        let mut cursor = self.start();
        cursor.past = true;
        cursor
    }
}

macro_rules! cartesian {
    ($n:literal, [$($C:ident $S:ident $V:ident $idx:tt),+], [$($rev:tt),*]) => {
        impl<$($C: ForwardCursor, $S: Sentinel<$C>),+> Cursor
            for CartesianCursor<($($C,)+), ($($S,)+)>
        {
            type Item = ($($C::Item,)+);

            // stepping back across a wrap needs every factor's end as a cursor
            const CAPABILITY: Capability = {
                let weakest = Capability::RandomAccess $(.min($C::CAPABILITY))+;
                if true $(&& $S::COMMON)+ {
                    weakest
                } else {
                    weakest.min(Capability::Forward)
                }
            };

            fn read(&self) -> Self::Item {
                ($(self.cursors.$idx.read(),)+)
            }

            fn advance(&mut self) {
                $(
                    self.cursors.$rev.advance();
                    if !self.ends.$rev.reached(&self.cursors.$rev) {
                        return;
                    }
                    self.cursors.$rev = self.starts.$rev.clone();
                )*
                self.cursors.0.advance();
            }
        }

        impl<$($C: ForwardCursor, $S: Sentinel<$C>),+> ForwardCursor
            for CartesianCursor<($($C,)+), ($($S,)+)>
        {
        }

        impl<$($C: BidiCursor, $S: CommonSentinel<$C>),+> BidiCursor
            for CartesianCursor<($($C,)+), ($($S,)+)>
        {
            fn retreat(&mut self) {
                $(
                    if self.cursors.$rev != self.starts.$rev {
                        self.cursors.$rev.retreat();
                        return;
                    }
                    self.cursors.$rev = self.ends.$rev.finish_from(&self.starts.$rev);
                    self.cursors.$rev.retreat();
                )*
                self.cursors.0.retreat();
            }
        }

        impl<$($C: RandomCursor, $S: CommonSentinel<$C>),+> CartesianCursor<($($C,)+), ($($S,)+)> {
            fn lens(&self) -> [isize; $n] {
                [$(self.starts.$idx.offset_to(&self.ends.$idx.finish_from(&self.starts.$idx))),+]
            }

            /// Row-major index of this position. The end position has the leftmost factor at its
            /// own end and every other factor rewound, which this maps to the product's length.
            fn linear(&self) -> isize {
                let lens = self.lens();
                let idxs = [$(self.starts.$idx.offset_to(&self.cursors.$idx)),+];
                lens.iter().zip(idxs).fold(0, |acc, (len, i)| acc * len + i)
            }
        }

        impl<$($C: RandomCursor, $S: CommonSentinel<$C>),+> RandomCursor
            for CartesianCursor<($($C,)+), ($($S,)+)>
        {
            fn jump(&mut self, n: isize) {
                if self.past || n == 0 {
                    return;
                }

                let lens = self.lens();
                let mut target = self.linear() + n;
                let mut idxs = [0isize; $n];
                for i in (1..$n).rev() {
                    idxs[i] = target.rem_euclid(lens[i]);
                    target = target.div_euclid(lens[i]);
                }
                idxs[0] = target;

                $(
                    let mut c = self.starts.$idx.clone();
                    c.jump(idxs[$idx]);
                    self.cursors.$idx = c;
                )+
            }

            fn offset_to(&self, other: &Self) -> isize {
                if self.past || other.past {
                    return 0;
                }
                other.linear() - self.linear()
            }
        }

        impl<$($C: ForwardCursor, $S: Sentinel<$C>),+> Exhaust
            for CartesianCursor<($($C,)+), ($($S,)+)>
        {
            const FINISHING: bool = true $(&& $S::COMMON)+;

            fn exhausted(&self) -> bool {
                self.past || self.ends.0.reached(&self.cursors.0)
            }
        }

        impl<$($C: ForwardCursor, $S: CommonSentinel<$C>),+> Finishing
            for CartesianCursor<($($C,)+), ($($S,)+)>
        {
            fn to_finish(&self) -> Self {
                let mut cursor = self.clone();
                if !cursor.past {
                    cursor.cursors = self.starts.clone();
                    cursor.cursors.0 = self.ends.0.finish_from(&self.starts.0);
                }
                cursor
            }
        }

        impl<$($V),+> Sequence for CartesianView<($($V,)+)>
        where
            $($V: Sequence, $V::Cursor: ForwardCursor,)+
        {
            type Cursor = CartesianCursor<($($V::Cursor,)+), ($($V::Sentinel,)+)>;
            type Sentinel = End;
            type Count = usize;

            const BORROWED: bool = true $(&& $V::BORROWED)+;

            fn start(&self) -> Self::Cursor {
                let starts = ($(self.bases.$idx.start(),)+);
                let ends = ($(self.bases.$idx.end(),)+);
                let empty = false $(|| ends.$idx.reached(&starts.$idx))+;
                CartesianCursor {
                    cursors: starts.clone(),
                    starts,
                    ends,
                    past: empty,
                }
            }

            fn end(&self) -> End {
                End
            }

            fn count(&self) -> Option<usize> {
                let counts = [$(count_of(&self.bases.$idx)?.to_usize()),+];
                Some(counts.into_iter().fold(1usize, usize::saturating_mul))
            }
        }

        impl<$($V),+> CommonSequence for CartesianView<($($V,)+)>
        where
            $($V: CommonSequence, $V::Cursor: ForwardCursor,)+
        {
            fn finish(&self) -> Self::Cursor {
                let mut cursor = self.start();
                if !cursor.past {
                    cursor.cursors.0 = self.bases.0.finish();
                }
                cursor
            }
        }
    };
}

cartesian!(1, [CA SA VA 0], []);
cartesian!(2, [CA SA VA 0, CB SB VB 1], [1]);
cartesian!(3, [CA SA VA 0, CB SB VB 1, CC SC VC 2], [2, 1]);

crate::views::view_algebra!({Vs} CartesianView<Vs>);

/// All combinations of elements from a tuple of up to three forward sequences. The product of no
/// sequences is a single empty tuple.
pub fn cartesian_product<Vs>(bases: Vs) -> CartesianView<Vs>
where
    CartesianView<Vs>: Sequence,
{
    CartesianView::new(bases)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        host::Iota,
        reverse::reverse,
        sequence::SequenceExt,
        testing::{ForwardOnly, capability_of},
        views::enumerate,
    };

    #[test]
    fn product_is_lexicographic() {
        let letters = ['a', 'b'];
        let view = cartesian_product((&letters[..], Iota::new(0, 3)));
        let pairs: Vec<(char, i64)> = view.walk().map(|(c, i)| (*c, i)).collect();

        assert_eq!(
            pairs,
            vec![('a', 0), ('a', 1), ('a', 2), ('b', 0), ('b', 1), ('b', 2)]
        );
        assert_eq!(view.count(), Some(6));
    }

    #[test]
    fn empty_product_has_one_element() {
        let view = cartesian_product(());

        assert_eq!(view.walk().count(), 1);
        assert_eq!(view.count(), Some(1));
    }

    #[test]
    fn any_empty_factor_empties_the_product() {
        let none: [i32; 0] = [];
        let view = cartesian_product((Iota::new(0, 3), &none[..], Iota::new(0, 2)));

        assert_eq!(view.walk().count(), 0);
        assert_eq!(view.count(), Some(0));
        assert!(view.start() == view.finish());
    }

    #[test]
    fn jump_decomposes_the_offset() {
        let view = cartesian_product((Iota::new(0, 2), Iota::new(0, 3), Iota::new(0, 4)));
        let mut c = view.start();

        assert_eq!(capability_of(&view), Capability::RandomAccess);
        c.jump(17);
        assert_eq!(c.read(), (1, 1, 1));
        c.jump(-6);
        assert_eq!(c.read(), (0, 2, 3));
        assert_eq!(view.start().offset_to(&view.finish()), 24);

        let mut end = view.start();
        end.jump(24);
        assert!(end == view.finish());
    }

    #[test]
    fn product_reverses_across_wraps() {
        let view = cartesian_product((Iota::new(0, 2), Iota::new(5, 7)));
        let back: Vec<_> = reverse(view).walk().collect();

        assert_eq!(back, vec![(1, 6), (1, 5), (0, 6), (0, 5)]);
    }

    #[test]
    fn view_factors_keep_random_access() {
        let (a, b) = ([10, 20], [1, 2, 3]);
        let view = cartesian_product((enumerate(&a[..]), &b[..]));
        assert_eq!(capability_of(&view), Capability::RandomAccess);

        let back: Vec<(usize, i32)> = reverse(view.clone())
            .walk()
            .map(|((i, _), y)| (i, *y))
            .collect();
        assert_eq!(back, vec![(1, 3), (1, 2), (1, 1), (0, 3), (0, 2), (0, 1)]);

        let mut c = view.start();
        c.jump(4);
        assert_eq!(c.read(), ((1, &20), &2));
        c.jump(-3);
        assert_eq!(c.read(), ((0, &10), &2));
        assert_eq!(c.offset_to(&view.finish()), 5);
    }

    #[test]
    fn forward_factors_make_a_forward_product() {
        let v = [1, 2];
        let view = cartesian_product((ForwardOnly::new(&v[..]), &v[..]));

        assert_eq!(capability_of(&view), Capability::Forward);
        assert_eq!(view.walk().count(), 4);
    }
}
