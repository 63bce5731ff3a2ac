use bst_set::OrderedSet;

use quickcheck_macros::quickcheck;
use std::collections::BTreeSet;

#[quickcheck]
fn iterates_in_ascending_order(xs: Vec<i16>) -> bool {
    let bst: OrderedSet<_> = xs.iter().copied().collect();
    let expected: BTreeSet<_> = xs.into_iter().collect();

    bst.iter().eq(expected.iter()) && bst.len() == expected.len()
}

#[quickcheck]
fn iterates_backwards_in_descending_order(xs: Vec<i16>) -> bool {
    let bst: OrderedSet<_> = xs.iter().copied().collect();
    let expected: BTreeSet<_> = xs.into_iter().collect();

    bst.iter().rev().eq(expected.iter().rev())
}

#[quickcheck]
fn duplicate_insert_is_a_no_op(xs: Vec<i8>, x: i8) -> bool {
    let mut bst: OrderedSet<_> = xs.into_iter().collect();

    let (cursor, _) = bst.insert(x);
    let first = cursor.node_id();
    let len = bst.len();

    let (cursor, inserted) = bst.insert(x);
    let second = cursor.node_id();

    !inserted && first == second && bst.len() == len && bst.find(&x).node_id() == first
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let bst: OrderedSet<_> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();

    nots.iter()
        .filter(|x| !added.contains(*x))
        .all(|x| bst.find(x) == bst.end() && bst.count(x) == 0)
}

#[quickcheck]
fn erasing_everything_empties_the_set(xs: Vec<i8>) -> bool {
    let mut bst: OrderedSet<_> = xs.iter().copied().collect();
    let distinct: BTreeSet<_> = xs.iter().copied().collect();

    let erased: usize = xs.iter().map(|x| bst.erase(x)).sum();

    erased == distinct.len() && bst.is_empty() && bst.len() == 0 && bst.begin() == bst.end()
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut bst: OrderedSet<_> = xs.iter().copied().collect();
    for delete in &deletes {
        bst.erase(delete);
    }

    let mut still_present: BTreeSet<_> = xs.into_iter().collect();
    for delete in &deletes {
        still_present.remove(delete);
    }

    deletes.iter().all(|x| !bst.contains(x)) && bst.iter().eq(still_present.iter())
}

#[quickcheck]
fn erase_range_matches_retain(xs: Vec<i8>, start: i8, end: i8) -> bool {
    let mut bst: OrderedSet<_> = xs.iter().copied().collect();
    let mut expected: BTreeSet<_> = xs.into_iter().collect();

    let before = expected.len();
    expected.retain(|x| !(start <= *x && *x < end));

    bst.erase_range(start..end) == before - expected.len() && bst.iter().eq(expected.iter())
}

#[quickcheck]
fn bounds_agree_with_a_linear_scan(xs: Vec<i8>, probes: Vec<i8>) -> bool {
    let bst: OrderedSet<_> = xs.iter().copied().collect();
    let sorted: Vec<_> = xs.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    // Probe below the minimum, above the maximum and at every stored key as well.
    let edges = [i8::MIN, i8::MAX];
    probes
        .iter()
        .chain(&edges)
        .chain(&sorted)
        .all(|probe| {
            let lower = sorted.iter().find(|x| *x >= probe);
            let upper = sorted.iter().find(|x| *x > probe);
            let (first, last) = bst.equal_range(probe);

            bst.lower_bound(probe).get() == lower
                && bst.upper_bound(probe).get() == upper
                && first.get() == lower
                && last.get() == upper
        })
}

#[quickcheck]
fn ordering_matches_sorted_sequences(xs: Vec<i8>, ys: Vec<i8>) -> bool {
    let a: OrderedSet<_> = xs.iter().copied().collect();
    let b: OrderedSet<_> = ys.iter().copied().collect();
    let sorted_a: Vec<_> = xs.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    let sorted_b: Vec<_> = ys.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    a.cmp(&b) == sorted_a.cmp(&sorted_b) && (a == b) == (sorted_a == sorted_b)
}

#[quickcheck]
fn equal_regardless_of_insertion_order(xs: Vec<i8>) -> bool {
    let forwards: OrderedSet<_> = xs.iter().copied().collect();
    let backwards: OrderedSet<_> = xs.iter().rev().copied().collect();

    forwards == backwards && forwards.clone() == backwards
}

#[quickcheck]
fn owned_iteration_drains_in_order(xs: Vec<i8>) -> bool {
    let bst: OrderedSet<_> = xs.iter().copied().collect();
    let expected: BTreeSet<_> = xs.into_iter().collect();

    bst.into_iter().eq(expected.into_iter())
}
