//! Order-stable collection helpers.
//!
//! Proposals are consumed by search workers on several machines; two
//! replicas given the same samples must produce the same action order, so
//! nothing here iterates a hash-ordered container.

use std::hash::Hash;

use indexmap::IndexSet;

/// Drop repeated items, keeping the first occurrence of each in input order.
pub fn dedup_stable<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    items.into_iter().collect::<IndexSet<T>>().into_iter().collect()
}
