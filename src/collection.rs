//! Provides the `Collection` trait, the one iteration primitive every other
//! operation in the crate is written against.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::ops::ControlFlow;

/// A `Mapping` is an insertion-ordered map from names to values.
pub type Mapping<V> = IndexMap<String, V, FxBuildHasher>;

/// A `Collection` is either a sequence (visited in index order, keyed by
/// `usize`) or a mapping (visited in insertion order, keyed by a reference to
/// the entry's key).
///
/// Implementors only need `try_each`; `each` and the rest are derived from it.
pub trait Collection {
    /// The type of the values held by the collection
    type Item;
    /// The index (for sequences) or key (for mappings) of each value
    type Key<'a>: Copy
    where
        Self: 'a;

    /// Calls `visitor(value, key, self)` for each element in natural order,
    /// stopping early if the visitor returns `ControlFlow::Break`.
    fn try_each<'a, B>(
        &'a self,
        visitor: impl FnMut(&'a Self::Item, Self::Key<'a>, &'a Self) -> ControlFlow<B>,
    ) -> ControlFlow<B>;

    /// Calls `visitor(value, key, self)` once for every element, in natural order.
    fn each<'a>(&'a self, mut visitor: impl FnMut(&'a Self::Item, Self::Key<'a>, &'a Self)) {
        let _ = self.try_each(|value, key, all| -> ControlFlow<()> {
            visitor(value, key, all);
            ControlFlow::Continue(())
        });
    }

    /// The number of elements in the collection
    fn size(&self) -> usize;

    /// Does the collection have no elements?
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<T> Collection for [T] {
    type Item = T;
    type Key<'a> = usize where Self: 'a;

    fn try_each<'a, B>(
        &'a self,
        mut visitor: impl FnMut(&'a T, usize, &'a Self) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (index, value) in self.iter().enumerate() {
            visitor(value, index, self)?;
        }
        ControlFlow::Continue(())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T> Collection for Vec<T> {
    type Item = T;
    type Key<'a> = usize where Self: 'a;

    fn try_each<'a, B>(
        &'a self,
        mut visitor: impl FnMut(&'a T, usize, &'a Self) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (index, value) in self.iter().enumerate() {
            visitor(value, index, self)?;
        }
        ControlFlow::Continue(())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> Collection for [T; N] {
    type Item = T;
    type Key<'a> = usize where Self: 'a;

    fn try_each<'a, B>(
        &'a self,
        mut visitor: impl FnMut(&'a T, usize, &'a Self) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (index, value) in self.iter().enumerate() {
            visitor(value, index, self)?;
        }
        ControlFlow::Continue(())
    }

    fn size(&self) -> usize {
        N
    }
}

impl<K, V, S> Collection for IndexMap<K, V, S> {
    type Item = V;
    type Key<'a> = &'a K where Self: 'a;

    fn try_each<'a, B>(
        &'a self,
        mut visitor: impl FnMut(&'a V, &'a K, &'a Self) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (key, value) in self {
            visitor(value, key, self)?;
        }
        ControlFlow::Continue(())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl Collection for serde_json::Map<String, serde_json::Value> {
    type Item = serde_json::Value;
    type Key<'a> = &'a String;

    fn try_each<'a, B>(
        &'a self,
        mut visitor: impl FnMut(&'a serde_json::Value, &'a String, &'a Self) -> ControlFlow<B>,
    ) -> ControlFlow<B> {
        for (key, value) in self {
            visitor(value, key, self)?;
        }
        ControlFlow::Continue(())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// Calls `visitor(value, key, collection)` for every element of `collection`.
/// Sequences are visited in index order, mappings in insertion order.
pub fn each<'a, C: Collection + ?Sized>(
    collection: &'a C,
    visitor: impl FnMut(&'a C::Item, C::Key<'a>, &'a C),
) {
    collection.each(visitor);
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn each_visits_sequences_in_index_order_with_their_indexes() {
        let letters = vec!['a', 'b', 'c'];
        let mut seen = Vec::new();
        each(&letters, |value, index, all| {
            assert_eq!(all.len(), 3);
            seen.push((*value, index));
        });
        assert_eq!(seen, [('a', 0), ('b', 1), ('c', 2)]);
    }

    #[test]
    fn each_visits_mappings_in_insertion_order_with_their_keys() {
        let mut ages = Mapping::default();
        ages.insert("zed".to_string(), 30);
        ages.insert("amy".to_string(), 25);
        let mut seen = Vec::new();
        each(&ages, |value, key, _| seen.push((key.clone(), *value)));
        assert_eq!(seen, [("zed".to_string(), 30), ("amy".to_string(), 25)]);
    }

    #[test]
    fn try_each_stops_at_the_first_break() {
        let numbers = [1, 2, 3, 4];
        let mut visited = 0;
        let found = numbers.try_each(|n, index, _| {
            visited += 1;
            if *n == 2 {
                ControlFlow::Break(index)
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(found, ControlFlow::Break(1));
        assert_eq!(visited, 2);
    }

    #[test]
    fn each_on_empty_collections_never_calls_the_visitor() {
        let empty: &[i32] = &[];
        each(empty, |_, _, _| panic!("visited an empty slice"));
        assert!(empty.is_empty());
        assert!(Collection::is_empty(&Mapping::<i32>::default()));
    }
}
