use proptest::prelude::*;
use seqview::{
    Cells, CommonSequence, Cursor, Sequence, SequenceExt, as_const, count_of, reverse,
    cursor::distance,
    views::{
        adjacent, cartesian_product, chunk, drop, join, stride, take, to_input, zip,
    },
};

fn type_of<T>(_: &T) -> &'static str {
    std::any::type_name::<T>()
}

fn counted_by_walking<S: Sequence>(seq: &S) -> usize {
    distance(seq.start(), &seq.end())
}

proptest! {
    #[test]
    fn count_matches_distance(v in prop::collection::vec(any::<i32>(), 0..40), n in 1usize..6) {
        let s = &v[..];

        prop_assert_eq!(count_of(&s), Some(counted_by_walking(&s)));

        let chunks = chunk(s, n);
        prop_assert_eq!(count_of(&chunks), Some(counted_by_walking(&chunks)));

        let strided = stride(s, n);
        prop_assert_eq!(count_of(&strided), Some(counted_by_walking(&strided)));

        let front = take(s, n);
        prop_assert_eq!(count_of(&front), Some(counted_by_walking(&front)));

        let back = drop(s, n);
        prop_assert_eq!(count_of(&back), Some(counted_by_walking(&back)));
    }

    #[test]
    fn const_path_reads_like_the_mutable_path(mut v in prop::collection::vec(any::<i64>(), 0..20)) {
        let expected = v.clone();
        let cells = Cells::new(&mut v);

        let mutable: Vec<i64> = cells.walk().map(|s| s.get()).collect();
        let read_only: Vec<i64> = as_const(cells).walk().map(|s| s.get()).collect();

        prop_assert_eq!(&mutable, &read_only);
        prop_assert_eq!(mutable, expected);
    }

    #[test]
    fn demoting_twice_is_a_no_op(mut v in prop::collection::vec(any::<u8>(), 0..8)) {
        let once = as_const(Cells::new(&mut v));
        let twice = as_const(once.clone());
        prop_assert_eq!(type_of(&once), type_of(&twice));

        let s = &[1, 2, 3][..];
        let input = to_input(s);
        prop_assert_eq!(type_of(&to_input(to_input(s))), type_of(&input));
    }

    #[test]
    fn chunks_joined_restore_the_order(v in prop::collection::vec(any::<i16>(), 0..50), n in 1usize..8) {
        let rebuilt: Vec<i16> = join(chunk(&v[..], n)).walk().copied().collect();

        prop_assert_eq!(rebuilt, v);
    }

    #[test]
    fn unit_windows_and_unit_strides_are_the_base(v in prop::collection::vec(any::<u32>(), 0..30)) {
        let windows: Vec<u32> = adjacent::<1, _>(&v[..]).walk().map(|[x]| *x).collect();
        let strided: Vec<u32> = stride(&v[..], 1).walk().copied().collect();

        prop_assert_eq!(&windows, &v);
        prop_assert_eq!(&strided, &v);
    }

    #[test]
    fn product_length_is_the_product_of_lengths(
        a in prop::collection::vec(any::<u8>(), 0..6),
        b in prop::collection::vec(any::<u8>(), 0..6),
        c in prop::collection::vec(any::<u8>(), 0..6),
    ) {
        let view = cartesian_product((&a[..], &b[..], &c[..]));
        let expected = a.len() * b.len() * c.len();

        prop_assert_eq!(view.walk().count(), expected);
        prop_assert_eq!(view.count(), Some(expected));
        prop_assert_eq!(cartesian_product(()).walk().count(), 1);
    }

    #[test]
    fn reversing_visits_the_same_elements_backward(v in prop::collection::vec(any::<i32>(), 0..30)) {
        let mut expected = v.clone();
        expected.reverse();

        let back: Vec<i32> = reverse(&v[..]).walk().copied().collect();
        prop_assert_eq!(back, expected);

        let there_and_back: Vec<i32> = reverse(reverse(&v[..])).walk().copied().collect();
        prop_assert_eq!(there_and_back, v);
    }

    #[test]
    fn zip_is_as_long_as_its_shortest_base(
        a in prop::collection::vec(any::<i8>(), 0..20),
        b in prop::collection::vec(any::<i8>(), 0..20),
    ) {
        let view = zip((&a[..], &b[..]));
        let shortest = a.len().min(b.len());

        prop_assert_eq!(view.count(), Some(shortest));
        prop_assert_eq!(view.walk().count(), shortest);

        let end = view.finish();
        let mut c = view.start();
        let mut steps = 0;
        while c != end {
            c.advance();
            steps += 1;
        }
        prop_assert_eq!(steps, shortest);
    }
}
