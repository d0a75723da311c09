//! Selection: picking out elements of a collection by predicate, or finding
//! where an element is.
use std::ops::ControlFlow;

use crate::collection::Collection;
use crate::predicate::some;
use crate::truthy::Truthy;

/// Returns the index of the first element of `seq` equal to `target`, or
/// `None` if there is no such element.
pub fn index_of<T: PartialEq>(seq: &[T], target: &T) -> Option<usize> {
    let found = seq.try_each(|item, index, _| {
        if item == target {
            ControlFlow::Break(index)
        } else {
            ControlFlow::Continue(())
        }
    });
    match found {
        ControlFlow::Break(index) => Some(index),
        ControlFlow::Continue(()) => None,
    }
}

/// Returns, in order, the elements of `collection` for which `predicate` is
/// truthy.
pub fn filter<'a, C, R>(collection: &'a C, mut predicate: impl FnMut(&C::Item) -> R) -> Vec<&'a C::Item>
where
    C: Collection + ?Sized,
    R: Truthy,
{
    let mut filtered = Vec::new();
    collection.each(|item, _, _| {
        if predicate(item).is_truthy() {
            filtered.push(item);
        }
    });
    filtered
}

/// Returns, in order, the elements of `collection` for which `predicate` is
/// falsy. Together `filter` and `reject` partition the collection.
pub fn reject<'a, C, R>(collection: &'a C, mut predicate: impl FnMut(&C::Item) -> R) -> Vec<&'a C::Item>
where
    C: Collection + ?Sized,
    R: Truthy,
{
    filter(collection, |item| !predicate(item).is_truthy())
}

/// Does `collection` have an element equal to `target`?
pub fn contains<C>(collection: &C, target: &C::Item) -> bool
where
    C: Collection + ?Sized,
    C::Item: PartialEq,
{
    some(collection, |item| item == target)
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::collection::Mapping;

    #[test]
    fn index_of_finds_the_first_match() {
        let numbers = [10, 20, 30, 20];
        assert_eq!(index_of(&numbers, &20), Some(1));
        assert_eq!(index_of(&numbers, &10), Some(0));
        assert_eq!(index_of(&numbers, &99), None);
        assert_eq!(index_of::<i32>(&[], &1), None);
    }

    #[test]
    fn filter_and_reject_split_a_sequence_in_order() {
        let numbers = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(filter(&numbers, |n| n % 2 == 0), [&2, &4, &6]);
        assert_eq!(reject(&numbers, |n| n % 2 == 0), [&1, &3, &5]);
    }

    #[test]
    fn predicates_may_return_any_truthy_value() {
        let words = ["", "a", "", "bc"];
        assert_eq!(filter(&words, |w| w.len()), [&"a", &"bc"]);
        assert_eq!(reject(&words, |w| w.len()), [&"", &""]);
    }

    #[test]
    fn filter_works_on_mapping_values() {
        let mut stock = Mapping::default();
        stock.insert("apples".to_string(), 0);
        stock.insert("pears".to_string(), 4);
        stock.insert("plums".to_string(), 2);
        assert_eq!(filter(&stock, |count| *count > 0), [&4, &2]);
    }

    #[test]
    fn contains_uses_equality() {
        let names = vec!["ann".to_string(), "bo".to_string()];
        assert!(contains(&names, &"bo".to_string()));
        assert!(!contains(&names, &"cy".to_string()));
        assert!(!contains::<[i32]>(&[], &0));
    }
}
