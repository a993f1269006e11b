//! Mapping and record payloads.

use std::fmt;

use super::{Heap, Scalar, Value};
use crate::Name;

/// Insertion-ordered mapping with unique scalar keys.
///
/// Lookup is a linear scan using scalar equality. Subject mappings are small
/// and keys are not all hashable (floats), so no index is kept.
#[derive(Clone, Debug, Default)]
pub struct MapValue {
    entries: Vec<(Scalar, Value)>,
}

impl MapValue {
    pub(super) fn from_entries(entries: impl Iterator<Item = (Scalar, Value)>) -> Self {
        let mut map = MapValue::default();
        for (key, value) in entries {
            match map.entries.iter_mut().find(|(k, _)| k.equals(&key)) {
                Some(slot) => slot.1 = value,
                None => map.entries.push((key, value)),
            }
        }
        map
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Scalar) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.equals(key))
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Scalar) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Scalar, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Scalar> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Build a new mapping value from the entries whose key satisfies `keep`,
    /// in this mapping's order.
    ///
    /// Keys are already unique, so no deduplication pass is needed.
    pub fn project(&self, mut keep: impl FnMut(&Scalar) -> bool) -> Value {
        let entries = self
            .entries
            .iter()
            .filter(|(k, _)| keep(k))
            .cloned()
            .collect();
        Value::Mapping(Heap::new(MapValue { entries }))
    }

    /// Same key set and equal values per key, regardless of order.
    pub fn equals(&self, other: &MapValue) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|w| v.equals(w)))
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

/// Record payload: a type tag plus named fields in declaration order.
#[derive(Clone, Debug)]
pub struct RecordValue {
    type_tag: Name,
    fields: Vec<(Name, Value)>,
}

impl RecordValue {
    pub(super) fn from_fields(type_tag: Name, fields: impl Iterator<Item = (Name, Value)>) -> Self {
        let mut record = RecordValue {
            type_tag,
            fields: Vec::new(),
        };
        for (name, value) in fields {
            match record.fields.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => record.fields.push((name, value)),
            }
        }
        record
    }

    pub fn type_tag(&self) -> &Name {
        &self.type_tag
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&Name, &Value)> + '_ {
        self.fields.iter().map(|(n, v)| (n, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn equals(&self, other: &RecordValue) -> bool {
        self.type_tag == other.type_tag
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(n, v)| other.field(n.as_str()).is_some_and(|w| v.equals(w)))
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_tag)?;
        for (i, (n, v)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}={v}")?;
        }
        f.write_str(")")
    }
}
