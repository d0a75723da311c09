//! Merging mappings. Both functions here **mutate** `dest` and return it, so
//! callers can use either the mutation or the return value.
use indexmap::IndexMap;
use std::hash::{BuildHasher, Hash};

use crate::collection::Collection;
use crate::truthy::Defined;

/// Copies every entry of each source into `dest`, in order: later sources
/// override earlier ones, and all of them override what `dest` already had.
/// A key new to `dest` is appended; an existing key keeps its position.
pub fn extend<'d, K, V, S, S2>(
    dest: &'d mut IndexMap<K, V, S>,
    sources: &[&IndexMap<K, V, S2>],
) -> &'d mut IndexMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    sources.each(|source, _, _| {
        source.each(|value, key, _| {
            dest.insert(key.clone(), value.clone());
        });
    });
    dest
}

/// Copies into `dest` the entries it lacks: a key is filled only if it's
/// absent from `dest` or holds an undefined value (see `Defined`). The first
/// source to supply a defined value for a key wins.
pub fn defaults<'d, K, V, S, S2>(
    dest: &'d mut IndexMap<K, V, S>,
    sources: &[&IndexMap<K, V, S2>],
) -> &'d mut IndexMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone + Defined,
    S: BuildHasher,
{
    sources.each(|source, _, _| {
        source.each(|value, key, _| {
            if !dest.get(key).is_some_and(Defined::is_defined) {
                dest.insert(key.clone(), value.clone());
            }
        });
    });
    dest
}
