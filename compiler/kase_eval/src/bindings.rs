//! Name-to-value bindings produced by a successful match.

use std::fmt;

use smallvec::SmallVec;

use kase_ir::{Name, Value};

/// Bindings from one successful match, in the order the matcher produced them.
///
/// Names are unique: pattern construction rejects trees that bind a name
/// twice. Equality ignores order.
#[derive(Clone, Default)]
pub struct Bindings {
    entries: SmallVec<[(Name, Value); 4]>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> + '_ {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> + '_ {
        self.entries.iter().map(|(n, _)| n)
    }

    pub fn into_vec(self) -> Vec<(Name, Value)> {
        self.entries.into_vec()
    }

    // Matcher-only mutation

    pub(crate) fn push(&mut self, name: Name, value: Value) {
        self.entries.push((name, value));
    }

    /// Current length, to roll back to if an or-alternative fails midway.
    pub(crate) fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn rollback(&mut self, checkpoint: usize) {
        self.entries.truncate(checkpoint);
    }
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(n, v)| other.get(n.as_str()).is_some_and(|w| v.equals(w)))
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(n, v)| (n.as_str(), v)))
            .finish()
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (n, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}: {v}")?;
        }
        f.write_str("}")
    }
}

impl<N: Into<Name>> FromIterator<(N, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        Bindings {
            entries: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Bindings {
    type Item = (Name, Value);
    type IntoIter = smallvec::IntoIter<[(Name, Value); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
