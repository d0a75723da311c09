//! Transformation: building new values out of a collection's elements.
use crate::collection::Collection;
use crate::record::Record;

/// Returns `f(element)` for each element of `collection`, in order. For a
/// sequence the result has the same length as the input.
pub fn map<'a, C, U>(collection: &'a C, mut f: impl FnMut(&'a C::Item) -> U) -> Vec<U>
where
    C: Collection + ?Sized,
{
    let mut mapped = Vec::with_capacity(collection.size());
    collection.each(|item, _, _| mapped.push(f(item)));
    mapped
}

/// Returns the field called `name` from each element of `collection`; an
/// element without that field contributes `None`.
pub fn pluck<'a, C>(collection: &'a C, name: &str) -> Vec<Option<&'a <C::Item as Record>::Field>>
where
    C: Collection + ?Sized,
    C::Item: Record,
{
    let mut plucked = Vec::with_capacity(collection.size());
    collection.each(|item, _, _| plucked.push(item.field(name)));
    plucked
}

/// Calls `method(element, args)` on each element of `collection`, handing
/// every call its own clone of `args`, and returns the results in order.
///
/// ```
/// let words = ["ab", "c"];
/// assert_eq!(underbar::invoke(&words, |w, n| w.repeat(n), 2), ["abab", "cc"]);
/// ```
pub fn invoke<C, A, U>(collection: &C, mut method: impl FnMut(&C::Item, A) -> U, args: A) -> Vec<U>
where
    C: Collection + ?Sized,
    A: Clone,
{
    map(collection, |item| method(item, args.clone()))
}

/// Folds `collection` into one value, starting from `seed` and calling
/// `f(accumulator, element)` for every element.
pub fn fold<C, A>(collection: &C, seed: A, mut f: impl FnMut(A, &C::Item) -> A) -> A
where
    C: Collection + ?Sized,
{
    let mut accumulator = Some(seed);
    collection.each(|item, _, _| {
        accumulator = accumulator.take().map(|acc| f(acc, item));
    });
    match accumulator {
        Some(folded) => folded,
        // Every step puts the accumulator back; a panicking `f` never gets here
        None => unreachable!("fold lost its accumulator"),
    }
}

/// Folds `collection` into one value without a seed: the first element is
/// the starting accumulator and is never passed to `f`. Returns `None` for an
/// empty collection.
pub fn reduce<C>(collection: &C, mut f: impl FnMut(C::Item, &C::Item) -> C::Item) -> Option<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Clone,
{
    let mut accumulator: Option<C::Item> = None;
    collection.each(|item, _, _| {
        accumulator = Some(match accumulator.take() {
            None => item.clone(),
            Some(acc) => f(acc, item),
        });
    });
    accumulator
}
