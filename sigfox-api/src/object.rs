//! Lazy read-only view over a JSON payload.
//!
//! `Object` wraps a `serde_json::Value` and dispatches field, index,
//! and length access on the value's runtime shape. Accessing a nested
//! object or array returns a new view over that value rather than an
//! eager deep conversion. Array-backed views support `+` and `+=`,
//! which is how callers accumulate paginated results.

use std::fmt;
use std::ops::{Add, AddAssign};

use serde_json::Value;

use sigfox_core::{SigfoxError, SigfoxResult};

/// Read-only view over a JSON-like value.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    value: Value,
}

pub(crate) fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Object {
    /// Wrap a value.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Borrow the underlying value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwrap into the underlying value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Access a field of an object-backed view.
    ///
    /// Fails with [`SigfoxError::NoSuchField`] when the field is
    /// absent and [`SigfoxError::WrongShape`] when the underlying
    /// value is not an object.
    pub fn field(&self, name: &str) -> SigfoxResult<Object> {
        match &self.value {
            Value::Object(map) => map
                .get(name)
                .cloned()
                .map(Object::new)
                .ok_or_else(|| SigfoxError::NoSuchField(name.to_string())),
            other => Err(SigfoxError::WrongShape {
                expected: "object",
                found: shape_name(other),
            }),
        }
    }

    /// Access an element of an array-backed view by position.
    pub fn at(&self, index: usize) -> SigfoxResult<Object> {
        match &self.value {
            Value::Array(items) => items
                .get(index)
                .cloned()
                .map(Object::new)
                .ok_or(SigfoxError::IndexOutOfRange {
                    index,
                    len: items.len(),
                }),
            other => Err(SigfoxError::WrongShape {
                expected: "array",
                found: shape_name(other),
            }),
        }
    }

    /// Element count for arrays, key count for objects, 0 otherwise.
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// Whether the view holds no elements/keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the elements of an array-backed view.
    ///
    /// Non-array views yield nothing.
    pub fn iter(&self) -> Iter<'_> {
        let items = match &self.value {
            Value::Array(items) => items.as_slice(),
            _ => &[],
        };
        Iter { items: items.iter() }
    }

    /// The string value, if this view wraps a string.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// The integer value, if this view wraps an integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    /// The float value, if this view wraps a number.
    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// The boolean value, if this view wraps a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    /// Concatenate two array-backed views into a new view.
    pub fn try_concat(&self, other: &Object) -> SigfoxResult<Object> {
        match (&self.value, &other.value) {
            (Value::Array(left), Value::Array(right)) => {
                let mut items = left.clone();
                items.extend(right.iter().cloned());
                Ok(Object::new(Value::Array(items)))
            }
            (Value::Array(_), other_value) => Err(SigfoxError::WrongShape {
                expected: "array",
                found: shape_name(other_value),
            }),
            (self_value, _) => Err(SigfoxError::WrongShape {
                expected: "array",
                found: shape_name(self_value),
            }),
        }
    }

    /// Append the elements of another array-backed view in place.
    ///
    /// Subsequent reads through this view reflect the appended
    /// elements.
    pub fn try_extend(&mut self, other: &Object) -> SigfoxResult<()> {
        let incoming = match &other.value {
            Value::Array(items) => items.clone(),
            other_value => {
                return Err(SigfoxError::WrongShape {
                    expected: "array",
                    found: shape_name(other_value),
                })
            }
        };
        match &mut self.value {
            Value::Array(items) => {
                items.extend(incoming);
                Ok(())
            }
            self_value => Err(SigfoxError::WrongShape {
                expected: "array",
                found: shape_name(self_value),
            }),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Add for Object {
    type Output = Object;

    /// Concatenation of array-backed views.
    ///
    /// Panics on non-array operands; use [`Object::try_concat`] for a
    /// fallible version.
    fn add(self, rhs: Object) -> Object {
        match self.try_concat(&rhs) {
            Ok(combined) => combined,
            Err(e) => panic!("cannot concatenate views: {e}"),
        }
    }
}

impl AddAssign for Object {
    /// In-place concatenation of array-backed views.
    ///
    /// Panics on non-array operands; use [`Object::try_extend`] for a
    /// fallible version.
    fn add_assign(&mut self, rhs: Object) {
        if let Err(e) = self.try_extend(&rhs) {
            panic!("cannot concatenate views: {e}");
        }
    }
}

/// Iterator over the elements of an array-backed [`Object`].
pub struct Iter<'a> {
    items: std::slice::Iter<'a, Value>,
}

impl Iterator for Iter<'_> {
    type Item = Object;

    fn next(&mut self) -> Option<Object> {
        self.items.next().cloned().map(Object::new)
    }
}
