//! Shared string identifier.
//!
//! Binding names, record field names, and record type tags all use `Name`.
//! Clones share one allocation; equality and hashing go by content, so a
//! `Name` can be looked up with a plain `&str`.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Reference-counted identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    /// Spelling reserved for the wildcard pattern.
    pub const WILDCARD: &'static str = "_";

    #[inline]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Name(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this name may be used as a binding target.
    ///
    /// Empty names and `_` are rejected.
    pub fn is_bindable(&self) -> bool {
        !self.0.is_empty() && &*self.0 != Self::WILDCARD
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name(Arc::from(name))
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Name(Arc::from(name))
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", &*self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests;
