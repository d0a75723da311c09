//! Predicate aggregation: `every` and `some`, with and without a predicate.
//! `some` is written as the negation of `every` over the negated predicate.
use std::ops::ControlFlow;

use crate::collection::Collection;
use crate::truthy::Truthy;

/// Is `predicate` truthy for every element of `collection`? Stops at the
/// first failure. Vacuously true for an empty collection.
pub fn every<C, R>(collection: &C, mut predicate: impl FnMut(&C::Item) -> R) -> bool
where
    C: Collection + ?Sized,
    R: Truthy,
{
    let outcome = collection.try_each(|item, _, _| {
        if predicate(item).is_truthy() {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    });
    outcome.is_continue()
}

/// Is `predicate` truthy for at least one element of `collection`?
pub fn some<C, R>(collection: &C, mut predicate: impl FnMut(&C::Item) -> R) -> bool
where
    C: Collection + ?Sized,
    R: Truthy,
{
    !every(collection, |item| !predicate(item).is_truthy())
}

/// Is every element of `collection` itself truthy?
pub fn every_truthy<C>(collection: &C) -> bool
where
    C: Collection + ?Sized,
    C::Item: Truthy,
{
    every(collection, |item| item.is_truthy())
}

/// Is some element of `collection` itself truthy?
pub fn some_truthy<C>(collection: &C) -> bool
where
    C: Collection + ?Sized,
    C::Item: Truthy,
{
    some(collection, |item| item.is_truthy())
}
