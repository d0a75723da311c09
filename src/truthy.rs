//! The `Truthy` and `Defined` traits give Rust values the two yes/no questions
//! dynamic code asks of any value: "does this count as true?" and "is there a
//! value here at all?"
use serde_json::Value;

/// The `Truthy` trait is used wherever a predicate result, or an element
/// standing in for its own predicate, is tested.
pub trait Truthy {
    /// Does `self` count as true?
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_unless_zero {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}
truthy_unless_zero!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Zero and NaN are false
impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}
impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}
impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// `None` is false; `Some(x)` is as truthy as `x`.
impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

/// A sequence is true even when empty.
impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f.is_truthy()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// The `Defined` trait tells `defaults` which existing values it may replace.
pub trait Defined {
    /// Is there a value here? `defaults` only fills slots where this is false.
    fn is_defined(&self) -> bool;
}

impl<T> Defined for Option<T> {
    fn is_defined(&self) -> bool {
        self.is_some()
    }
}

macro_rules! always_defined {
    ($($t:ty),*) => {
        $(impl Defined for $t {
            fn is_defined(&self) -> bool {
                true
            }
        })*
    };
}
// JSON `null` is a value that was set to null, not a missing one
always_defined!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &str, Value
);

impl<T> Defined for Vec<T> {
    fn is_defined(&self) -> bool {
        true
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_nan_and_empty_strings_are_false() {
        assert!(!0_i32.is_truthy());
        assert!(!0.0_f64.is_truthy());
        assert!(!f64::NAN.is_truthy());
        assert!(!"".is_truthy());
        assert!(!String::new().is_truthy());
        assert!(7_u8.is_truthy());
        assert!((-1.5_f32).is_truthy());
        assert!("x".is_truthy());
    }

    #[test]
    fn options_are_as_truthy_as_their_contents() {
        assert!(!None::<bool>.is_truthy());
        assert!(!Some(false).is_truthy());
        assert!(Some(3_i32).is_truthy());
    }

    #[test]
    fn empty_containers_are_true() {
        assert!(Vec::<i32>::new().is_truthy());
        assert!(json!([]).is_truthy());
        assert!(json!({}).is_truthy());
    }

    #[test]
    fn json_scalars_follow_dynamic_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!falsy.is_truthy(), "{falsy} should be false");
        }
        for truthy in [json!(true), json!(1), json!(-0.5), json!("0")] {
            assert!(truthy.is_truthy(), "{truthy} should be true");
        }
    }

    #[test]
    fn only_none_is_undefined() {
        assert!(!None::<i32>.is_defined());
        assert!(Some(0_i32).is_defined());
        assert!(0_i32.is_defined());
        assert!(json!(null).is_defined());
    }
}
