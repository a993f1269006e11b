//! Runtime subject values.
//!
//! A `Value` is the normalized form of whatever the caller wants to match:
//! scalars, ordered sequences, mappings with scalar keys, and tagged records
//! standing in for class instances.
//!
//! # Construction
//!
//! Compound values go through factory methods on `Value`. `Heap<T>` has a
//! crate-private constructor, which keeps two invariants out of reach of
//! callers:
//!
//! - mapping keys are unique (by scalar equality, so `1` and `1.0` collide);
//! - record field names are unique.
//!
//! A repeated key or field replaces the earlier value and keeps its position.
//!
//! ```text
//! let user = Value::mapping([("type", Value::string("user")), ("name", Value::string("Alice"))]);
//! let origin = Value::record("Point", [("x", Value::int(0)), ("y", Value::int(0))]);
//! ```
//!
//! # Equality
//!
//! `equals` is structural. Int and float compare by magnitude, bool is never
//! equal to int, and `NaN` is never equal to anything. `PartialEq` delegates
//! to `equals`.

mod heap;
mod map;

use std::fmt;

use crate::{ensure_sufficient_stack, Name};

pub use heap::Heap;
pub use map::{MapValue, RecordValue};

/// Runtime kind of a value, as tested by typed captures and kind patterns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    None,
    Bool,
    Int,
    Float,
    Str,
    Sequence,
    Mapping,
    Record,
}

impl ValueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::None => "none",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
            ValueKind::Record => "record",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar payload. Also the key type of mappings.
#[derive(Clone, Debug)]
pub enum Scalar {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<str>),
}

impl Scalar {
    /// Create a string scalar.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Scalar::Str(Heap::from_string(s.into()))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Scalar::None => ValueKind::None,
            Scalar::Bool(_) => ValueKind::Bool,
            Scalar::Int(_) => ValueKind::Int,
            Scalar::Float(_) => ValueKind::Float,
            Scalar::Str(_) => ValueKind::Str,
        }
    }

    /// Scalar equality: same kind and payload, with int/float compared by
    /// magnitude.
    #[allow(
        clippy::float_cmp,
        reason = "literal matching is exact IEEE equality, not approximate"
    )]
    pub fn equals(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::None, Scalar::None) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Int(i), Scalar::Float(f)) | (Scalar::Float(f), Scalar::Int(i)) => {
                int_equals_float(*i, *f)
            }
            (Scalar::Str(a), Scalar::Str(b)) => **a == **b,
            _ => false,
        }
    }
}

/// Exact comparison of an `i64` with an `f64`.
///
/// Casting the int to float would round large magnitudes (2^53 + 1 would
/// equal 2^53), so the float is checked for integrality and range first and
/// then converted the other way.
#[allow(
    clippy::cast_possible_truncation,
    reason = "f is integral and inside the i64 range before the cast"
)]
fn int_equals_float(i: i64, f: f64) -> bool {
    // 2^63 is exactly representable; i64::MAX is not.
    const UPPER: f64 = 9_223_372_036_854_775_808.0;
    if !f.is_finite() || f.fract() != 0.0 || f < -UPPER || f >= UPPER {
        return false;
    }
    f as i64 == i
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::string(s)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::string(s)
    }
}

/// Runtime value handed to the matcher.
#[derive(Clone, Debug)]
pub enum Value {
    Scalar(Scalar),
    /// Ordered list of values.
    Sequence(Heap<Vec<Value>>),
    /// Insertion-ordered mapping with unique scalar keys.
    Mapping(Heap<MapValue>),
    /// Tagged record: a class instance projected to its type name and fields.
    Record(Heap<RecordValue>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    pub const NONE: Value = Value::Scalar(Scalar::None);

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Scalar(Scalar::Int(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Scalar(Scalar::Float(f))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::string(s))
    }

    #[inline]
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Heap::new(items))
    }

    /// Create a mapping. Later duplicates of a key replace the earlier value
    /// in place.
    pub fn mapping<K: Into<Scalar>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let map = MapValue::from_entries(entries.into_iter().map(|(k, v)| (k.into(), v)));
        Value::Mapping(Heap::new(map))
    }

    /// Create a record with the given type tag. Later duplicates of a field
    /// name replace the earlier value in place.
    pub fn record<N: Into<Name>>(
        type_tag: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, Value)>,
    ) -> Self {
        let record = RecordValue::from_fields(
            type_tag.into(),
            fields.into_iter().map(|(n, v)| (n.into(), v)),
        );
        Value::Record(Heap::new(record))
    }
}

// Value Methods

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(s) => s.kind(),
            Value::Sequence(_) => ValueKind::Sequence,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Name of this value's kind for messages.
    pub fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::Scalar(Scalar::None))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Scalar(Scalar::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Scalar(Scalar::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&MapValue> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Structural equality.
    ///
    /// Mapping and record comparison recurse back through here, so the stack
    /// guard covers every level.
    pub fn equals(&self, other: &Value) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a.equals(b),
            (Value::Sequence(a), Value::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Mapping(a), Value::Mapping(b)) => a.equals(b),
            (Value::Record(a), Value::Record(b)) => a.equals(b),
            _ => false,
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::sequence(items)
    }
}

// Display

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::None => f.write_str("None"),
            Scalar::Bool(true) => f.write_str("True"),
            Scalar::Bool(false) => f.write_str("False"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(x) if x.is_nan() => f.write_str("nan"),
            Scalar::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_negative() { "-inf" } else { "inf" })
            }
            Scalar::Float(x) => write!(f, "{x:?}"),
            Scalar::Str(s) => {
                f.write_str("'")?;
                for c in s.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("'")
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Value::Scalar(s) => s.fmt(f),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Value::Mapping(map) => map.fmt(f),
            Value::Record(record) => record.fmt(f),
        })
    }
}
