//! `underbar` is a toolkit of small functional operations over sequences and
//! mappings, plus a handful of function decorators.
//!
//! * The `collection` module provides `Collection`, the iteration primitive
//!   everything else is written against.
//! * `select`, `transform` and `predicate` filter, map, fold and test
//!   collections.
//! * `setops` does set algebra by equality; `distinct` does it by hashing.
//! * `shape` zips, flattens, sorts and shuffles sequences, and `merge` merges
//!   mappings.
//! * `decorate` wraps functions with `once`, `memoize`, `throttle` and
//!   `delay`, scheduling through the `timer` module.
//! * `json` offers the same operations for dynamically shaped
//!   `serde_json::Value`s, checking shapes at run time.
//!
//! Operations that select elements return references into their input, so
//! `filter(&v, p)[0]` *is* an element of `v`, not a copy of one. An empty
//! input to `first`, `last` or `reduce` gives `None`.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![deny(missing_docs)]

pub mod collection;
pub mod decorate;
pub mod distinct;
pub mod error;
pub mod json;
pub mod merge;
pub mod predicate;
pub mod random;
pub mod record;
pub mod select;
pub mod setops;
pub mod shape;
pub mod timer;
pub mod transform;
pub mod truthy;

pub use crate::collection::{each, Collection, Mapping};
pub use crate::decorate::{
    cache_key, delay, delay_with, memoize, once, throttle, Memoize, Once, Throttle,
};
pub use crate::error::Error;
pub use crate::merge::{defaults, extend};
pub use crate::predicate::{every, every_truthy, some, some_truthy};
pub use crate::random::RandomSource;
pub use crate::record::Record;
pub use crate::select::{contains, filter, index_of, reject};
pub use crate::setops::{difference, intersection, uniq, uniq_by_key, uniq_with};
pub use crate::shape::{flatten, shuffle, shuffle_with, sort_by, sort_by_criterion, zip, Criterion, Nested};
pub use crate::timer::{default_timer, Callback, ManualTimer, ThreadTimer, Timer};
pub use crate::transform::{fold, invoke, map, pluck, reduce};
pub use crate::truthy::{Defined, Truthy};

/// Returns its argument unchanged
pub fn identity<T>(x: T) -> T {
    x
}

/// The first element of `seq`, or `None` if it's empty
pub fn first<T>(seq: &[T]) -> Option<&T> {
    seq.first()
}

/// The first `n` elements of `seq`, or all of them if there are fewer than `n`
pub fn first_n<T>(seq: &[T], n: usize) -> &[T] {
    &seq[..n.min(seq.len())]
}

/// The last element of `seq`, or `None` if it's empty
pub fn last<T>(seq: &[T]) -> Option<&T> {
    seq.last()
}

/// The last `n` elements of `seq`, or all of them if there are fewer than `n`
pub fn last_n<T>(seq: &[T], n: usize) -> &[T] {
    &seq[seq.len().saturating_sub(n)..]
}
