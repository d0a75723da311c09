//! Provides the `Record` trait: elements whose fields can be looked up by name.
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// A `Record` is an element with named fields, as used by `pluck` and by the
/// field-name form of `sort_by_criterion`.
pub trait Record {
    /// The type of each field's value
    type Field;
    /// Returns the value of the field called `name`, or `None` if there's no
    /// such field.
    fn field(&self, name: &str) -> Option<&Self::Field>;
}

impl<V, S: BuildHasher> Record for IndexMap<String, V, S> {
    type Field = V;
    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V, S: BuildHasher> Record for HashMap<String, V, S> {
    type Field = V;
    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

/// Only JSON objects have fields. Looking up a field of any other kind of
/// value finds nothing.
impl Record for Value {
    type Field = Value;
    fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(name))
    }
}

impl<R: Record + ?Sized> Record for &R {
    type Field = R::Field;
    fn field(&self, name: &str) -> Option<&R::Field> {
        (**self).field(name)
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::collection::Mapping;
    use serde_json::json;

    #[test]
    fn maps_look_fields_up_by_key() {
        let mut ordered = Mapping::default();
        ordered.insert("age".to_string(), 40);
        let mut hashed = HashMap::new();
        hashed.insert("age".to_string(), 50);
        assert_eq!(ordered.field("age"), Some(&40));
        assert_eq!(hashed.field("age"), Some(&50));
        assert_eq!(ordered.field("name"), None);
        assert_eq!((&hashed).field("age"), Some(&50));
    }

    #[test]
    fn only_json_objects_have_fields() {
        assert_eq!(json!({"age": 40}).field("age"), Some(&json!(40)));
        assert_eq!(json!({"age": null}).field("age"), Some(&Value::Null));
        assert_eq!(json!([40]).field("0"), None);
        assert_eq!(json!("age").field("age"), None);
    }
}
