//! Shape operations: zipping, flattening, sorting and shuffling sequences.
use std::cmp::Ordering;

use crate::collection::Collection;
use crate::random::{unit_to_index, RandomSource};
use crate::record::Record;
use crate::setops::first_longest;
use crate::transform::map;

/// Returns one row per index of the longest of `arrays`. Row `i` holds
/// element `i` of each array, or `None` where that array is too short.
pub fn zip<'a, T>(arrays: &[&'a [T]]) -> Vec<Vec<Option<&'a T>>> {
    let Some(longest) = first_longest(arrays) else { return Vec::new() };
    let mut zipped = Vec::with_capacity(longest.len());
    longest.each(|_, index, _| zipped.push(column(arrays, index)));
    zipped
}

fn column<'a, T>(arrays: &[&'a [T]], index: usize) -> Vec<Option<&'a T>> {
    map(arrays, |&array| array.get(index))
}

/// A `Nested<T>` is either a single item or a list of further `Nested<T>`s,
/// to any depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nested<T> {
    /// A leaf
    Item(T),
    /// A sequence of nested values
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Wraps `item` as a leaf
    pub fn item(item: T) -> Self {
        Nested::Item(item)
    }

    /// Builds a list out of `parts`
    pub fn list(parts: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::List(parts.into_iter().collect())
    }
}

impl<T> FromIterator<Nested<T>> for Nested<T> {
    fn from_iter<I: IntoIterator<Item = Nested<T>>>(iter: I) -> Self {
        Nested::list(iter)
    }
}

/// Returns the items of `nested` in depth-first, left-to-right order.
///
/// The walk keeps its own stack of partly visited lists instead of
/// recursing, so the depth of nesting is limited only by memory.
pub fn flatten<T>(nested: &[Nested<T>]) -> Vec<&T> {
    let mut flat = Vec::new();
    let mut stack = vec![nested.iter()];
    while let Some(top) = stack.last_mut() {
        match top.next() {
            None => {
                stack.pop();
            }
            Some(Nested::Item(item)) => flat.push(item),
            Some(Nested::List(list)) => stack.push(list.iter()),
        }
    }
    flat
}

/// Sorts `seq` in place by the key `key_fn` computes for each element, and
/// returns the same slice.
///
/// **This mutates its argument.** The sort is stable: elements with equal
/// keys keep their relative order. Keys that can't be compared even with
/// themselves, like `NaN`, sort last. `key_fn` is called exactly once per
/// element.
pub fn sort_by<T, K: PartialOrd>(seq: &mut [T], key_fn: impl FnMut(&T) -> K) -> &mut [T] {
    let keys = map(&*seq, key_fn);
    sort_by_keys(seq, &keys, unordered_last);
    seq
}

/// How `sort_by_criterion` derives a sort key from a record.
pub enum Criterion<'a, T: Record> {
    /// Use whatever the function returns
    By(Box<dyn FnMut(&T) -> T::Field + 'a>),
    /// Use the value of the named field
    Field(&'a str),
}

impl<'a, T: Record> Criterion<'a, T> {
    /// Boxes `key_fn` as a `Criterion::By`
    pub fn by(key_fn: impl FnMut(&T) -> T::Field + 'a) -> Self {
        Criterion::By(Box::new(key_fn))
    }
}

/// Sorts `records` in place by `criterion`, and returns the same slice.
///
/// **This mutates its argument.** The sort is stable. Records that lack the
/// field named by `Criterion::Field` sort after all records that have it.
pub fn sort_by_criterion<'s, T>(records: &'s mut [T], criterion: Criterion<'_, T>) -> &'s mut [T]
where
    T: Record,
    T::Field: PartialOrd + Clone,
{
    let keys: Vec<Option<T::Field>> = match criterion {
        Criterion::By(mut key_fn) => map(&*records, |record| Some(key_fn(record))),
        Criterion::Field(name) => map(&*records, |record| record.field(name).cloned()),
    };
    sort_by_keys(records, &keys, missing_last);
    records
}

/// Orders keys by `partial_cmp`, putting keys that aren't comparable with
/// themselves after all the others.
pub(crate) fn unordered_last<K: PartialOrd>(a: &K, b: &K) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| {
        let comparable = |k: &K| k.partial_cmp(k).is_some();
        comparable(b).cmp(&comparable(a))
    })
}

/// Orders present keys by `unordered_last` and puts missing keys after them.
pub(crate) fn missing_last<K: PartialOrd>(a: &Option<K>, b: &Option<K>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => unordered_last(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stably reorders `seq` so that `keys` (one per element) are ascending
/// according to `compare`.
pub(crate) fn sort_by_keys<T, K>(seq: &mut [T], keys: &[K], compare: impl Fn(&K, &K) -> Ordering) {
    let mut order: Vec<usize> = (0..seq.len()).collect();
    order.sort_by(|&a, &b| compare(&keys[a], &keys[b]));
    // `order[i]` is the old index of the element that belongs at `i`. Follow
    // each cycle of the permutation, marking positions done as we go.
    for start in 0..order.len() {
        let mut current = start;
        loop {
            let source = order[current];
            order[current] = current;
            if source == start {
                break;
            }
            seq.swap(current, source);
            current = source;
        }
    }
}

/// Returns the elements of `seq` in uniformly random order, using the
/// thread-local generator. `seq` itself is untouched.
pub fn shuffle<T>(seq: &[T]) -> Vec<&T> {
    shuffle_with(seq, &mut rand::rng())
}

/// Returns the elements of `seq` in random order drawn from `random`:
/// repeatedly pick one of the remaining elements uniformly and append it.
pub fn shuffle_with<'a, T>(seq: &'a [T], random: &mut (impl RandomSource + ?Sized)) -> Vec<&'a T> {
    let mut remaining = map(seq, |item| item);
    let mut shuffled = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let pick = unit_to_index(random.next_unit(), remaining.len());
        shuffled.push(remaining.remove(pick));
    }
    shuffled
}
