//! Deduplication and set algebra over sequences, using only `PartialEq`.
//! Elements are compared by linear scan, so nothing needs to be hashable or
//! ordered; the `distinct` module has hashed versions for `Hash + Eq` elements.
//!
//! Every operation returns references to the input's own elements, in the
//! order they appear in the input they were taken from.
use anyhow::Result;

use crate::collection::Collection;
use crate::error::Error;
use crate::predicate::{every, some};
use crate::select::{contains, filter, reject};

/// Returns the elements of `seq` with duplicates removed, keeping the first
/// occurrence of each.
pub fn uniq<T: PartialEq>(seq: &[T]) -> Vec<&T> {
    let mut unique: Vec<&T> = Vec::new();
    seq.each(|item, _, _| {
        if !contains(&unique, &item) {
            unique.push(item);
        }
    });
    unique
}

/// Returns the elements of `seq` whose `key_fn` value hasn't been seen
/// earlier in `seq`. The elements themselves are returned, not the keys.
pub fn uniq_by_key<T, K: PartialEq>(seq: &[T], mut key_fn: impl FnMut(&T) -> K) -> Vec<&T> {
    let mut seen: Vec<K> = Vec::new();
    let mut unique = Vec::new();
    seq.each(|item, _, _| {
        let key = key_fn(item);
        if !contains(&seen, &key) {
            seen.push(key);
            unique.push(item);
        }
    });
    unique
}

/// The three-argument form of `uniq`. If `is_sorted` is false, `key_fn` is
/// ignored and duplicates are found by equality. If `is_sorted` is true,
/// duplicates are found by `key_fn`, which must then be present.
pub fn uniq_with<T, K, F>(seq: &[T], is_sorted: bool, key_fn: Option<F>) -> Result<Vec<&T>>
where
    T: PartialEq,
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    match (is_sorted, key_fn) {
        (false, _) => Ok(uniq(seq)),
        (true, Some(key_fn)) => Ok(uniq_by_key(seq, key_fn)),
        (true, None) => Err(Error::MissingKeyFn.into()),
    }
}

/// Returns the first of `arrays` with the greatest length, or `None` if
/// `arrays` is empty.
pub(crate) fn first_longest<'a, T>(arrays: &[&'a [T]]) -> Option<&'a [T]> {
    let mut longest: Option<&'a [T]> = None;
    for &array in arrays {
        match longest {
            Some(best) if best.len() >= array.len() => {}
            _ => longest = Some(array),
        }
    }
    longest
}

/// Returns the elements of the longest array that are present in every one
/// of `arrays`. When several arrays tie for longest, the first of them (by
/// position in `arrays`) is used. Duplicates in that array are kept.
pub fn intersection<'a, T: PartialEq>(arrays: &[&'a [T]]) -> Vec<&'a T> {
    let Some(longest) = first_longest(arrays) else { return Vec::new() };
    filter(longest, |item| every(arrays, |array| contains(*array, item)))
}

/// Returns the elements of `seq` that aren't present in any of `others`,
/// duplicates included.
pub fn difference<'a, T: PartialEq, S: AsRef<[T]>>(seq: &'a [T], others: &[S]) -> Vec<&'a T> {
    reject(seq, |item| some(others, |other| contains(other.as_ref(), item)))
}
