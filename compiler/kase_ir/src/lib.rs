#![deny(clippy::arithmetic_side_effects)]
//! Kase IR - value, pattern, and case models for the Kase matching engine.
//!
//! This crate provides:
//! - Runtime subject values (`Value`, `Scalar`, `MapValue`, `RecordValue`)
//! - Validated pattern trees (`Pattern`, `PatternKind`, `Star`)
//! - Match cases (`Case`, `CaseTable`)
//! - Construction errors (`ConstructionError`, `ErrorCode`)
//!
//! Everything here is immutable after construction and `Send + Sync`.
//! Matching lives in `kase_eval`.

mod case;
mod errors;
mod name;
mod stack;
pub mod pattern;
pub mod value;

pub use case::{Case, CaseTable};
pub use errors::{ConstructionError, ErrorCode};
pub use name::Name;
pub use pattern::{Pattern, PatternKind, Star};
pub use stack::ensure_sufficient_stack;
pub use value::{Heap, MapValue, RecordValue, Scalar, Value, ValueKind};
