use anyhow::{Context, Result, ensure};
use seqview::{
    Capability, Cells, CommonSequence, Cursor, Input, Iota, Seek, Sequence, SequenceExt, Subrange,
    ViewError, as_const, count_of, is_empty, reverse, signed_count_of,
    pipe::{self, Chain},
    views::{
        cartesian_product, chunk, chunk_by, concat, enumerate, join, join_with, lazy_split,
        repeat, repeat_n, single, stride, take, zip, zip_transform,
    },
};

fn capability<V: Sequence>(_: &V) -> Capability {
    <V::Cursor as Cursor>::CAPABILITY
}

fn nested<'a, V>(view: &V) -> Vec<Vec<i32>>
where
    V: Sequence,
    <V::Cursor as Cursor>::Item: Sequence,
    <<V::Cursor as Cursor>::Item as Sequence>::Cursor: Cursor<Item = &'a i32>,
{
    view.walk()
        .map(|piece| piece.walk().copied().collect())
        .collect()
}

#[test]
fn chunk_by_groups_non_decreasing_runs() {
    let v = [1, 2, 2, 3, 0, 4, 5, 2];
    let view = chunk_by(&v[..], |a: &&i32, b: &&i32| a <= b);

    assert_eq!(
        nested(&view),
        vec![vec![1, 2, 2, 3], vec![0, 4, 5], vec![2]]
    );
    assert_eq!(
        nested(&reverse(view)),
        vec![vec![2], vec![0, 4, 5], vec![1, 2, 2, 3]]
    );
}

#[test]
fn lazy_split_on_a_double_space() {
    let view = lazy_split("the  quick  brown  fox", "  ");
    let pieces: Vec<String> = view.walk().map(|p| p.walk().collect()).collect();

    assert_eq!(pieces, vec!["the", "quick", "brown", "fox"]);
}

#[test]
fn cartesian_keys_repeat_per_row() {
    let (a, b) = ([1, 2, 3], [4, 5, 6]);
    let view = cartesian_product((&a[..], &b[..]));
    let keys: Vec<i32> = view.walk().map(|(k, _)| *k).collect();

    assert_eq!(view.count(), Some(9));
    assert_eq!(keys, vec![1, 1, 1, 2, 2, 2, 3, 3, 3]);
}

#[test]
fn stride_forward_and_backward() {
    let v = [1, 2, 3, 4, 5, 6, 7];

    let view = stride(&v[..], 2);
    assert_eq!(view.walk().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7]);
    assert_eq!(
        reverse(view).walk().copied().collect::<Vec<_>>(),
        vec![7, 5, 3, 1]
    );
}

#[test]
fn enumerate_writes_the_value_component() {
    let mut data = [1, 2, 3];
    {
        let view = enumerate(Cells::new(&mut data));
        let (indices, values): (Vec<usize>, Vec<i32>) =
            view.walk().map(|(i, slot)| (i, slot.get())).unzip();

        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(values, vec![1, 2, 3]);

        for (i, slot) in view.walk() {
            slot.set(slot.get() * 10 + i as i32);
        }
    }

    assert_eq!(data, [10, 21, 32]);
}

#[test]
fn counts_agree_with_walking() {
    let v = vec![5, 6, 7, 8];

    assert_eq!(count_of(&&v[..]), Some(4));
    assert_eq!(signed_count_of(&&v[..]), Some(4isize));
    assert_eq!(count_of(&chunk(&v[..], 3)), Some(2));
    assert!(is_empty(&take(&v[..], 0)));
    assert!(!is_empty(&Iota::new(0, 1)));
}

#[test]
fn infinite_repeat_is_tamed_by_take() {
    let view = take(repeat('x'), 3);

    assert_eq!(view.walk().collect::<String>(), "xxx");
    assert_eq!(view.count(), Some(3));
    assert_eq!(capability(&view), Capability::RandomAccess);
}

#[test]
fn pipelines_compose_before_a_sequence_exists() {
    let evens_in_pairs = pipe::stride(2).then(pipe::chunk(2));
    let view = Iota::new(0, 10) | evens_in_pairs;
    let pairs: Vec<Vec<i64>> = view.walk().map(|c| c.walk().collect()).collect();

    assert_eq!(pairs, vec![vec![0, 2], vec![4, 6], vec![8]]);

    let v = [3, 1, 4, 1, 5, 9];
    let tail: Vec<i32> = (&v[..])
        .pipe(pipe::drop(2) | pipe::reverse() | pipe::take(2))
        .walk()
        .copied()
        .collect();
    assert_eq!(tail, vec![9, 5]);
}

#[test]
fn words_round_trip_through_split_and_join() {
    let text = "one two  three";
    let rebuilt: String = join_with(lazy_split(text, single(' ')), single(' '))
        .walk()
        .collect();

    assert_eq!(rebuilt, text);
}

#[test]
fn zip_stops_at_the_shortest_base() {
    let names = ["a", "b", "c"];
    let view = zip((&names[..], Iota::new(1, 100)));
    let pairs: Vec<(&str, i64)> = view.walk().map(|(n, i)| (*n, i)).collect();

    assert_eq!(pairs, vec![("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(view.count(), Some(3));

    let sums = zip_transform(|a: i64, b: i64| a + b, (Iota::new(0, 3), Iota::new(10, 20)));
    assert_eq!(sums.walk().collect::<Vec<_>>(), vec![10, 12, 14]);
}

#[test]
fn concat_then_reverse() {
    let view = concat(Iota::new(0, 2), repeat_n(7, 2));

    assert_eq!(reverse(view).walk().collect::<Vec<_>>(), vec![7, 7, 1, 0]);
}

#[test]
fn single_pass_input_stays_single_pass() {
    let view = join(chunk(Iota::new(0, 4), 3));
    assert_eq!(capability(&view), Capability::Forward);

    let input = Input::new(vec![1, 2, 3]) | pipe::enumerate();
    assert_eq!(capability(&input), Capability::SinglePass);
    assert_eq!(input.walk().map(|(i, _)| i).sum::<usize>(), 3);
}

#[test]
fn const_view_reads_what_cells_hold() {
    let mut data = [2, 7, 1, 8];
    let cells = Cells::new(&mut data);
    let read_only = as_const(cells);

    let seen: Vec<i32> = read_only.walk().map(|s| s.get()).collect();
    assert_eq!(seen, vec![2, 7, 1, 8]);
    assert_eq!(cells.walk().map(|s| s.get()).collect::<Vec<_>>(), seen);
}

#[test]
fn checked_access_reports_errors() -> Result<()> {
    let v = [10, 20, 30, 40];
    let whole = &v[..];
    let sub = Subrange::between(whole.start(), whole.finish()).context("whole slice")?;

    let third = sub.seek(&sub.start(), Seek::Right(2)).context("seek inside")?;
    ensure!(*sub.try_read(&third)? == 30, "seek landed on the wrong element");
    assert_eq!(*sub.checked_at(3)?, 40);

    assert_eq!(
        sub.checked_at(4),
        Err(ViewError::OutOfBounds { index: 4, len: 4 })
    );
    assert_eq!(
        sub.seek(&third, Seek::Left(3)),
        Err(ViewError::OutOfBounds { index: -1, len: 4 })
    );
    assert_eq!(
        Subrange::between(whole.finish(), whole.start()).map(|_| ()),
        Err(ViewError::NegativeSpan)
    );
    assert_eq!(sub.try_read(&sub.finish()), Err(ViewError::Exhausted));

    Ok(())
}

#[test]
fn error_messages_read_well() {
    let err = ViewError::OutOfBounds { index: 9, len: 2 };

    assert_eq!(
        err.to_string(),
        "Invalid position 9 for a sequence of length 2"
    );
}
