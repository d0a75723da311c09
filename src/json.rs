//! Entry points for dynamically shaped data. Each function here takes a
//! `serde_json::Value` that may turn out to be a sequence, a mapping, or a
//! scalar, and fails with an `Error` when the shape is wrong, rather than
//! leaving that to the type checker as the typed functions do.
use anyhow::{bail, Result};
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::collection::Collection;
use crate::error::Error;
use crate::record::Record;
use crate::shape::{missing_last, sort_by_keys};
use crate::truthy::Defined;

/// The index or name under which `each` found a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// Position within an array
    Index(usize),
    /// Name within an object
    Name(&'a str),
}

/// The kind of a JSON value, as named in error messages
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_sequence(value: &Value) -> Result<&Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        other => bail!(Error::NotASequence { found: kind(other) }),
    }
}

fn as_mapping(value: &Value) -> Result<&Map<String, Value>> {
    match value {
        Value::Object(entries) => Ok(entries),
        other => bail!(Error::NotAMapping { found: kind(other) }),
    }
}

/// Calls `visitor(value, key, container)` for each element of an array (in
/// index order) or each entry of an object (in insertion order). Any other
/// kind of value fails with `Error::NotASequence`.
pub fn each<'a>(container: &'a Value, mut visitor: impl FnMut(&'a Value, Key<'a>, &'a Value)) -> Result<()> {
    match container {
        Value::Array(items) => items.each(|value, index, _| visitor(value, Key::Index(index), container)),
        Value::Object(entries) => entries.each(|value, name, _| visitor(value, Key::Name(name), container)),
        other => bail!(Error::NotASequence { found: kind(other) }),
    }
    Ok(())
}

/// The field called `name` of each element of the array `records`; `None`
/// where an element isn't an object or lacks the field.
pub fn pluck<'a>(records: &'a Value, name: &str) -> Result<Vec<Option<&'a Value>>> {
    Ok(crate::transform::pluck(as_sequence(records)?, name))
}

/// The leaves of the array `nested`: nested arrays are expanded in place,
/// depth first, however deep they go. Objects are leaves.
pub fn flatten(nested: &Value) -> Result<Vec<&Value>> {
    let mut flat = Vec::new();
    let mut stack = vec![as_sequence(nested)?.iter()];
    while let Some(top) = stack.last_mut() {
        match top.next() {
            None => {
                stack.pop();
            }
            Some(Value::Array(inner)) => stack.push(inner.iter()),
            Some(leaf) => flat.push(leaf),
        }
    }
    Ok(flat)
}

/// A field value used as a sort key. JSON values of different kinds are
/// ordered by kind (null, booleans, numbers, strings, then arrays and
/// objects); values of the same kind by value, except that arrays and
/// objects all tie.
#[derive(Debug)]
struct SortKey(Value);

impl SortKey {
    fn rank(&self) -> u8 {
        match self.0 {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) | Value::Object(_) => 4,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => {
                let (a, b) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
                a.total_cmp(&b)
            }
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Stably sorts the array `records` in place by the field called `field`.
/// Elements lacking the field (including non-objects) go last, in their
/// relative order. Returns the same array.
pub fn sort_by_field<'v>(records: &'v mut Value, field: &str) -> Result<&'v mut Value> {
    let found = kind(records);
    let Some(items) = records.as_array_mut() else {
        bail!(Error::NotASequence { found });
    };
    let keys: Vec<Option<SortKey>> = items.iter().map(|item| item.field(field).cloned().map(SortKey)).collect();
    sort_by_keys(items, &keys, missing_last);
    Ok(records)
}

/// Merges the objects in `sources` into the object `dest`, later sources
/// overriding earlier ones, and returns `dest`. Fails with
/// `Error::NotAMapping`, leaving `dest` untouched, if `dest` or any source
/// isn't an object.
pub fn extend<'d>(dest: &'d mut Value, sources: &[&Value]) -> Result<&'d mut Value> {
    let sources = sources.iter().map(|source| as_mapping(source)).collect::<Result<Vec<_>>>()?;
    let found = kind(dest);
    let Some(target) = dest.as_object_mut() else {
        bail!(Error::NotAMapping { found });
    };
    for source in sources {
        source.each(|value, name, _| {
            target.insert(name.clone(), value.clone());
        });
    }
    Ok(dest)
}

/// Fills in the names missing from the object `dest` from the objects in
/// `sources`, the first source to supply a name winning, and returns `dest`.
/// A name already present, even as `null`, is never overwritten. Fails like
/// `extend`.
pub fn defaults<'d>(dest: &'d mut Value, sources: &[&Value]) -> Result<&'d mut Value> {
    let sources = sources.iter().map(|source| as_mapping(source)).collect::<Result<Vec<_>>>()?;
    let found = kind(dest);
    let Some(target) = dest.as_object_mut() else {
        bail!(Error::NotAMapping { found });
    };
    for source in sources {
        source.each(|value, name, _| {
            if !target.get(name).is_some_and(Defined::is_defined) {
                target.insert(name.clone(), value.clone());
            }
        });
    }
    Ok(dest)
}
