//! Property tests for `OrderedSet`, checked against the standard library's `BTreeSet`.

mod hint;
mod set;
