//! Construction-time errors.
//!
//! Every invariant of a pattern tree or case list is checked when it is
//! built, never while matching. A tree that exists is a valid tree.

use std::fmt;

use crate::Name;

/// Stable codes for construction errors.
///
/// Uses the E3xxx pattern-error range.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Binding name is empty or `_`
    E3001,
    /// Name bound twice in one pattern
    E3002,
    /// Or-pattern alternatives bind different names
    E3003,
    /// Or-pattern without alternatives
    E3004,
    /// Irrefutable alternative before other alternatives
    E3005,
    /// Sequence tail without a rest slot
    E3006,
    /// Mapping pattern repeats a key
    E3007,
    /// Record pattern repeats a field
    E3008,
    /// Irrefutable unguarded case before other cases
    E3009,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An invariant violation detected while building a pattern or case list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("`{name}` cannot be used as a binding name")]
    InvalidBindingName { name: String },

    #[error("name `{name}` is bound more than once in the same pattern")]
    DuplicateBinding { name: Name },

    #[error(
        "alternative {alternative} binds {} but the first alternative binds {}",
        NameList(.found),
        NameList(.expected)
    )]
    OrBindingMismatch {
        alternative: usize,
        expected: Vec<Name>,
        found: Vec<Name>,
    },

    #[error("or-pattern has no alternatives")]
    EmptyOr,

    #[error("alternative {index} matches every value and makes the remaining alternatives unreachable")]
    UnreachableAlternative { index: usize },

    #[error("sequence pattern has patterns after the rest slot but no rest slot")]
    TailWithoutRest,

    #[error("mapping pattern checks key {key} more than once")]
    DuplicateKey { key: String },

    #[error("record pattern `{type_tag}` matches field `{field}` more than once")]
    DuplicateField { type_tag: Name, field: Name },

    #[error("case {index} matches every value and makes the remaining cases unreachable")]
    UnreachableCase { index: usize },
}

impl ConstructionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConstructionError::InvalidBindingName { .. } => ErrorCode::E3001,
            ConstructionError::DuplicateBinding { .. } => ErrorCode::E3002,
            ConstructionError::OrBindingMismatch { .. } => ErrorCode::E3003,
            ConstructionError::EmptyOr => ErrorCode::E3004,
            ConstructionError::UnreachableAlternative { .. } => ErrorCode::E3005,
            ConstructionError::TailWithoutRest => ErrorCode::E3006,
            ConstructionError::DuplicateKey { .. } => ErrorCode::E3007,
            ConstructionError::DuplicateField { .. } => ErrorCode::E3008,
            ConstructionError::UnreachableCase { .. } => ErrorCode::E3009,
        }
    }
}

/// Renders a name set as `{a, b}`.
struct NameList<'a>(&'a [Name]);

impl fmt::Display for NameList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}")?;
        }
        f.write_str("}")
    }
}
