//! Hashed set algebra over any number of operands. Where `setops` compares
//! elements pairwise with `PartialEq`, the functions here need `Hash + Eq`
//! elements and run in linear time.
//!
//! Every operation has set semantics: each element is reported once, in
//! order of first appearance (first in the first operand, then, for `Union`,
//! in later operands).
use anyhow::Result;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::hash::Hash;

use crate::collection::Collection;
use crate::error::Error;

/// The set operation `calculate` performs on its operands:
///
/// * `Union` keeps the elements that occur in any operand,
/// * `Intersect` keeps the elements that occur in every operand,
/// * `Diff` keeps the elements of the first operand that occur in no other,
/// * `Single` keeps the elements that occur in exactly one operand, and
/// * `Multiple` keeps the elements that occur in more than one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    /// Elements in any operand
    Union,
    /// Elements in every operand
    Intersect,
    /// Elements in the first operand and no other
    Diff,
    /// Elements in exactly one operand
    Single,
    /// Elements in more than one operand
    Multiple,
}

/// Each element borrowed from an operand, with the bookkeeping value the
/// current operation tracks for it. Insertion order is output order.
struct Tracked<'a, T, B> {
    set: IndexMap<&'a T, B, FxBuildHasher>,
}

impl<'a, T: Hash + Eq, B: Copy> Tracked<'a, T, B> {
    fn from_operand(operand: &'a [T], initial: B) -> Self {
        let mut set = IndexMap::with_capacity_and_hasher(operand.len(), FxBuildHasher::default());
        operand.each(|item, _, _| {
            set.entry(item).or_insert(initial);
        });
        Tracked { set }
    }

    fn get_mut(&mut self, item: &T) -> Option<&mut B> {
        self.set.get_mut(item)
    }

    fn insert(&mut self, item: &'a T, bookkeeping: B) {
        self.set.entry(item).or_insert(bookkeeping);
    }

    fn retain(&mut self, keep: impl Fn(B) -> bool) {
        self.set.retain(|_, bookkeeping| keep(*bookkeeping));
    }

    fn into_items(self) -> Vec<&'a T> {
        self.set.into_keys().collect()
    }
}

/// Applies `op` to `first` and the `rest` of the operands. With no `rest`,
/// every operation but `Multiple` returns the distinct elements of `first`.
///
/// Fails with `Error::TooManyOperands` if there are more operands than a
/// `u32` can count.
///
/// ```
/// use underbar::distinct::{calculate, SetOp};
///
/// let xs = ["xyz", "abc", "xy", "xz", "x"];
/// let ys = ["xyz", "abc", "xy", "yz", "y"];
/// let both = calculate(SetOp::Intersect, &xs, &[&ys[..]]).unwrap();
/// assert_eq!(both, [&"xyz", &"abc", &"xy"]);
/// ```
pub fn calculate<'a, T: Hash + Eq>(op: SetOp, first: &'a [T], rest: &[&'a [T]]) -> Result<Vec<&'a T>> {
    tracing::trace!(?op, operands = rest.len() + 1, "calculating set operation");
    let rest = rest.iter().copied();
    match op {
        SetOp::Union => {
            let mut set = Tracked::from_operand(first, ());
            for operand in rest {
                operand.each(|item, _, _| set.insert(item, ()));
            }
            Ok(set.into_items())
        }

        SetOp::Diff => {
            let mut set = Tracked::from_operand(first, true);
            for operand in rest {
                operand.each(|item, _, _| {
                    if let Some(keep) = set.get_mut(item) {
                        *keep = false;
                    }
                });
            }
            set.retain(|keep| keep);
            Ok(set.into_items())
        }

        SetOp::Intersect => {
            // Survivors of each round are recolored; the rest are dropped
            let mut this_round = true;
            let mut set = Tracked::from_operand(first, this_round);
            for operand in rest {
                this_round = !this_round;
                operand.each(|item, _, _| {
                    if let Some(color) = set.get_mut(item) {
                        *color = this_round;
                    }
                });
                set.retain(|color| color == this_round);
            }
            Ok(set.into_items())
        }

        SetOp::Single | SetOp::Multiple => {
            #[derive(Clone, Copy)]
            struct SeenIn {
                first: u32,
                last: u32,
            }
            let mut operand_number = 0_u32;
            let mut set = Tracked::from_operand(first, SeenIn { first: 0, last: 0 });
            for operand in rest {
                operand_number = operand_number.checked_add(1).ok_or(Error::TooManyOperands)?;
                let seen_now = SeenIn { first: operand_number, last: operand_number };
                operand.each(|item, _, _| match set.get_mut(item) {
                    Some(seen_in) => seen_in.last = operand_number,
                    None => set.insert(item, seen_now),
                });
            }
            if op == SetOp::Single {
                set.retain(|seen_in| seen_in.first == seen_in.last);
            } else {
                set.retain(|seen_in| seen_in.first != seen_in.last);
            }
            Ok(set.into_items())
        }
    }
}

/// The distinct elements of `seq`, in order of first appearance. Equivalent
/// to `setops::uniq`, but hashed.
pub fn uniq<T: Hash + Eq>(seq: &[T]) -> Vec<&T> {
    Tracked::from_operand(seq, ()).into_items()
}
