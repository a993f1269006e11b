//! Pattern trees.
//!
//! A `Pattern` is an immutable, shareable node. Its constructors enforce the
//! tree invariants up front:
//!
//! - a binding name appears at most once in a tree;
//! - every alternative of an or-pattern binds the same names;
//! - an or-pattern alternative that matches everything is last;
//! - mapping keys and record fields are not repeated;
//! - a sequence tail requires a rest slot.
//!
//! Each node caches the names it binds (first-occurrence order) and whether
//! it is irrefutable, so validating a parent only looks at its direct
//! children.
//!
//! # Example
//!
//! ```text
//! // [first, *middle, last]
//! let p = Pattern::sequence(
//!     vec![Pattern::capture("first")?],
//!     Some(Star::bind("middle")?),
//!     vec![Pattern::capture("last")?],
//! )?;
//! ```

mod display;

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::{ConstructionError, Name, Scalar, Value, ValueKind};

/// The rest slot of a sequence pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Star {
    /// `*_`: any number of elements, nothing bound.
    Discard,
    /// `*name`: binds the elements between head and tail as a new sequence.
    Bind(Name),
}

impl Star {
    /// Create a binding rest slot, validating the name.
    pub fn bind(name: impl Into<Name>) -> Result<Self, ConstructionError> {
        Ok(Star::Bind(bindable(name.into())?))
    }

    pub fn name(&self) -> Option<&Name> {
        match self {
            Star::Discard => None,
            Star::Bind(name) => Some(name),
        }
    }
}

/// Read-only view of a pattern node.
#[derive(Debug)]
pub enum PatternKind {
    /// Matches a value structurally equal to the literal.
    Literal(Value),
    /// `_`
    Wildcard,
    /// Matches anything and binds it.
    Capture(Name),
    /// `int(n)`: matches values of one kind and binds them.
    TypedCapture { kind: ValueKind, name: Name },
    /// `int()`: matches values of one kind, binds nothing.
    Kind(ValueKind),
    /// `[head..., *rest, tail...]`
    Sequence {
        head: Vec<Pattern>,
        rest: Option<Star>,
        tail: Vec<Pattern>,
    },
    /// `{key: pattern, ..., **rest}`
    Mapping {
        required: Vec<(Scalar, Pattern)>,
        rest: Option<Name>,
    },
    /// `Tag(field=pattern, ...)`
    Record {
        type_tag: Name,
        fields: Vec<(Name, Pattern)>,
    },
    /// `a | b | c`
    Or(Vec<Pattern>),
    /// `pattern as name`
    As { inner: Pattern, name: Name },
}

#[derive(Debug)]
struct PatternNode {
    kind: PatternKind,
    names: Vec<Name>,
    irrefutable: bool,
}

/// A validated pattern tree node. Cloning shares the node.
#[derive(Clone, Debug)]
pub struct Pattern(Arc<PatternNode>);

impl Pattern {
    fn from_parts(kind: PatternKind, names: Vec<Name>, irrefutable: bool) -> Self {
        Pattern(Arc::new(PatternNode {
            kind,
            names,
            irrefutable,
        }))
    }

    #[inline]
    pub fn kind(&self) -> &PatternKind {
        &self.0.kind
    }

    /// Names this pattern binds on success, in first-occurrence order.
    #[inline]
    pub fn binding_names(&self) -> &[Name] {
        &self.0.names
    }

    /// Whether this pattern matches every value.
    #[inline]
    pub fn is_irrefutable(&self) -> bool {
        self.0.irrefutable
    }

    // Leaves

    pub fn literal(value: impl Into<Value>) -> Self {
        Self::from_parts(PatternKind::Literal(value.into()), Vec::new(), false)
    }

    pub fn wildcard() -> Self {
        Self::from_parts(PatternKind::Wildcard, Vec::new(), true)
    }

    pub fn capture(name: impl Into<Name>) -> Result<Self, ConstructionError> {
        let name = bindable(name.into())?;
        Ok(Self::from_parts(
            PatternKind::Capture(name.clone()),
            vec![name],
            true,
        ))
    }

    pub fn typed_capture(kind: ValueKind, name: impl Into<Name>) -> Result<Self, ConstructionError> {
        let name = bindable(name.into())?;
        Ok(Self::from_parts(
            PatternKind::TypedCapture {
                kind,
                name: name.clone(),
            },
            vec![name],
            false,
        ))
    }

    pub fn of_kind(kind: ValueKind) -> Self {
        Self::from_parts(PatternKind::Kind(kind), Vec::new(), false)
    }

    // Composites

    /// Sequence pattern. Without a rest slot the length must match exactly
    /// and `tail` must be empty.
    pub fn sequence(
        head: Vec<Pattern>,
        rest: Option<Star>,
        tail: Vec<Pattern>,
    ) -> Result<Self, ConstructionError> {
        if rest.is_none() && !tail.is_empty() {
            return Err(ConstructionError::TailWithoutRest);
        }
        let mut names = NameSet::default();
        for pattern in &head {
            names.extend(pattern)?;
        }
        if let Some(name) = rest.as_ref().and_then(Star::name) {
            names.add(name)?;
        }
        for pattern in &tail {
            names.extend(pattern)?;
        }
        Ok(Self::from_parts(
            PatternKind::Sequence { head, rest, tail },
            names.into_vec(),
            false,
        ))
    }

    /// Fixed-length sequence pattern: `[p0, p1, ...]`.
    pub fn exact_sequence(items: Vec<Pattern>) -> Result<Self, ConstructionError> {
        Self::sequence(items, None, Vec::new())
    }

    /// Mapping pattern. Extra keys in the subject are allowed; with `rest`
    /// they are collected into a new mapping.
    pub fn mapping<K: Into<Scalar>>(
        required: impl IntoIterator<Item = (K, Pattern)>,
        rest: Option<Name>,
    ) -> Result<Self, ConstructionError> {
        let required: Vec<(Scalar, Pattern)> =
            required.into_iter().map(|(k, p)| (k.into(), p)).collect();
        let mut names = NameSet::default();
        for (i, (key, pattern)) in required.iter().enumerate() {
            if required[..i].iter().any(|(seen, _)| seen.equals(key)) {
                return Err(ConstructionError::DuplicateKey {
                    key: key.to_string(),
                });
            }
            names.extend(pattern)?;
        }
        let rest = rest.map(bindable).transpose()?;
        if let Some(name) = &rest {
            names.add(name)?;
        }
        Ok(Self::from_parts(
            PatternKind::Mapping { required, rest },
            names.into_vec(),
            false,
        ))
    }

    /// Record pattern: the subject must be a record with this tag and have
    /// every listed field.
    pub fn record<N: Into<Name>>(
        type_tag: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, Pattern)>,
    ) -> Result<Self, ConstructionError> {
        let type_tag = type_tag.into();
        let fields: Vec<(Name, Pattern)> =
            fields.into_iter().map(|(n, p)| (n.into(), p)).collect();
        let mut seen_fields = FxHashSet::default();
        let mut names = NameSet::default();
        for (field, pattern) in &fields {
            if !seen_fields.insert(field) {
                return Err(ConstructionError::DuplicateField {
                    type_tag,
                    field: field.clone(),
                });
            }
            names.extend(pattern)?;
        }
        Ok(Self::from_parts(
            PatternKind::Record { type_tag, fields },
            names.into_vec(),
            false,
        ))
    }

    /// Or-pattern. All alternatives must bind the same names, and only the
    /// last alternative may be irrefutable.
    pub fn or(alternatives: Vec<Pattern>) -> Result<Self, ConstructionError> {
        let Some(first) = alternatives.first() else {
            return Err(ConstructionError::EmptyOr);
        };
        let expected: FxHashSet<&Name> = first.binding_names().iter().collect();
        let last = alternatives.len().saturating_sub(1);
        for (index, alternative) in alternatives.iter().enumerate() {
            let found = alternative.binding_names();
            let same = found.len() == expected.len() && found.iter().all(|n| expected.contains(n));
            if !same {
                return Err(ConstructionError::OrBindingMismatch {
                    alternative: index,
                    expected: sorted(first.binding_names()),
                    found: sorted(found),
                });
            }
            if alternative.is_irrefutable() && index != last {
                return Err(ConstructionError::UnreachableAlternative { index });
            }
        }
        let names = first.binding_names().to_vec();
        let irrefutable = alternatives.iter().any(Pattern::is_irrefutable);
        Ok(Self::from_parts(
            PatternKind::Or(alternatives),
            names,
            irrefutable,
        ))
    }

    /// `inner as name`: binds the whole subject when `inner` matches.
    pub fn capture_as(inner: Pattern, name: impl Into<Name>) -> Result<Self, ConstructionError> {
        let name = bindable(name.into())?;
        let mut names = NameSet::default();
        names.extend(&inner)?;
        names.add(&name)?;
        let irrefutable = inner.is_irrefutable();
        Ok(Self::from_parts(
            PatternKind::As { inner, name },
            names.into_vec(),
            irrefutable,
        ))
    }
}

fn bindable(name: Name) -> Result<Name, ConstructionError> {
    if name.is_bindable() {
        Ok(name)
    } else {
        Err(ConstructionError::InvalidBindingName {
            name: name.as_str().to_owned(),
        })
    }
}

fn sorted(names: &[Name]) -> Vec<Name> {
    let mut names = names.to_vec();
    names.sort();
    names
}

/// Ordered set of binding names that rejects duplicates.
#[derive(Default)]
struct NameSet {
    seen: FxHashSet<Name>,
    ordered: Vec<Name>,
}

impl NameSet {
    fn add(&mut self, name: &Name) -> Result<(), ConstructionError> {
        if !self.seen.insert(name.clone()) {
            return Err(ConstructionError::DuplicateBinding { name: name.clone() });
        }
        self.ordered.push(name.clone());
        Ok(())
    }

    fn extend(&mut self, pattern: &Pattern) -> Result<(), ConstructionError> {
        pattern.binding_names().iter().try_for_each(|name| self.add(name))
    }

    fn into_vec(self) -> Vec<Name> {
        self.ordered
    }
}
