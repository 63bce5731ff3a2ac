use bst_set::OrderedSet;

use quickcheck_macros::quickcheck;
use std::collections::BTreeSet;

/// Inserting through a cursor gives the same membership as inserting from the root, wherever the
/// cursor happens to be.
#[quickcheck]
fn hinted_insert_matches_plain_insert(xs: Vec<i8>, key: i8) -> bool {
    let distinct: BTreeSet<_> = xs.iter().copied().collect();

    let mut plain: OrderedSet<_> = xs.iter().copied().collect();
    let (_, plain_inserted) = plain.insert(key);

    // Every key in the set as a hint, plus the end position.
    let all_agree = distinct.iter().map(Some).chain([None]).all(|hint| {
        let mut hinted: OrderedSet<_> = xs.iter().copied().collect();
        let mut cursor = match hint {
            Some(hint) => hinted.find_mut(hint),
            None => hinted.end_mut(),
        };
        let inserted = cursor.insert(key);
        let lands_on_key = cursor.get() == Some(&key);

        inserted == plain_inserted && lands_on_key && hinted == plain
    });
    all_agree
}

#[quickcheck]
fn hinted_insert_lands_on_the_found_node(xs: Vec<i8>, hint: i8, key: i8) -> bool {
    let mut bst: OrderedSet<_> = xs.into_iter().collect();

    let mut cursor = bst.lower_bound_mut(&hint);
    cursor.insert(key);
    let id = cursor.node_id();

    bst.find(&key).node_id() == id
}

#[quickcheck]
fn appending_through_the_end_keeps_order(xs: Vec<i16>) -> bool {
    let mut bst = OrderedSet::new();
    let mut cursor = bst.end_mut();
    for x in &xs {
        cursor.insert(*x);
    }

    let expected: BTreeSet<_> = xs.into_iter().collect();
    bst.iter().eq(expected.iter())
}
