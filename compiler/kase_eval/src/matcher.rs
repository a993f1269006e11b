//! Structural matching of one pattern against one value.
//!
//! The matcher never fails loudly: a shape, kind, length, key, tag, or
//! literal disagreement is just `NoMatch`. Bindings are accumulated into a
//! single buffer as the walk proceeds; an or-pattern checkpoints the buffer
//! before each alternative and rolls back if that alternative fails.

use kase_ir::{Pattern, PatternKind, Scalar, Star, Value};

use crate::{ensure_sufficient_stack, Bindings};

/// Outcome of matching a single pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchResult {
    Matched(Bindings),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        match self {
            MatchResult::Matched(bindings) => Some(bindings),
            MatchResult::NoMatch => None,
        }
    }

    pub fn into_bindings(self) -> Option<Bindings> {
        match self {
            MatchResult::Matched(bindings) => Some(bindings),
            MatchResult::NoMatch => None,
        }
    }
}

/// Match `pattern` against `value`.
///
/// Pure and total: no panics, no side effects, and the same inputs always
/// give the same result.
pub fn match_pattern(pattern: &Pattern, value: &Value) -> MatchResult {
    let mut bindings = Bindings::new();
    if match_into(pattern, value, &mut bindings) {
        MatchResult::Matched(bindings)
    } else {
        MatchResult::NoMatch
    }
}

/// Match and append bindings. On `false` the buffer may hold partial
/// bindings; callers that continue after a failure must roll back.
pub(crate) fn match_into(pattern: &Pattern, value: &Value, out: &mut Bindings) -> bool {
    ensure_sufficient_stack(|| match pattern.kind() {
        PatternKind::Literal(literal) => literal.equals(value),

        PatternKind::Wildcard => true,

        PatternKind::Capture(name) => {
            out.push(name.clone(), value.clone());
            true
        }

        PatternKind::TypedCapture { kind, name } => {
            if value.kind() != *kind {
                return false;
            }
            out.push(name.clone(), value.clone());
            true
        }

        PatternKind::Kind(kind) => value.kind() == *kind,

        PatternKind::Sequence { head, rest, tail } => {
            let Some(items) = value.as_sequence() else {
                return false;
            };
            match_sequence(head, rest.as_ref(), tail, items, out)
        }

        PatternKind::Mapping { required, rest } => {
            let Some(map) = value.as_mapping() else {
                return false;
            };
            for (key, sub) in required {
                let Some(entry) = map.get(key) else {
                    return false;
                };
                if !match_into(sub, entry, out) {
                    return false;
                }
            }
            if let Some(name) = rest {
                let remaining = map.project(|k| !is_required(required, k));
                out.push(name.clone(), remaining);
            }
            true
        }

        PatternKind::Record { type_tag, fields } => {
            let Some(record) = value.as_record() else {
                return false;
            };
            if record.type_tag() != type_tag {
                return false;
            }
            fields.iter().all(|(field, sub)| {
                record
                    .field(field.as_str())
                    .is_some_and(|v| match_into(sub, v, out))
            })
        }

        PatternKind::Or(alternatives) => {
            let mark = out.checkpoint();
            for alternative in alternatives {
                if match_into(alternative, value, out) {
                    return true;
                }
                out.rollback(mark);
            }
            false
        }

        PatternKind::As { inner, name } => {
            if !match_into(inner, value, out) {
                return false;
            }
            out.push(name.clone(), value.clone());
            true
        }
    })
}

fn match_sequence(
    head: &[Pattern],
    rest: Option<&Star>,
    tail: &[Pattern],
    items: &[Value],
    out: &mut Bindings,
) -> bool {
    let fixed = head.len().saturating_add(tail.len());
    let length_ok = match rest {
        None => items.len() == fixed,
        Some(_) => items.len() >= fixed,
    };
    if !length_ok {
        return false;
    }

    let (front, back) = items.split_at(head.len());
    let (middle, back) = back.split_at(back.len().saturating_sub(tail.len()));

    if !match_all(head, front, out) {
        return false;
    }
    if let Some(Star::Bind(name)) = rest {
        out.push(name.clone(), Value::sequence(middle.to_vec()));
    }
    match_all(tail, back, out)
}

fn match_all(patterns: &[Pattern], items: &[Value], out: &mut Bindings) -> bool {
    patterns
        .iter()
        .zip(items)
        .all(|(pattern, item)| match_into(pattern, item, out))
}

fn is_required(required: &[(Scalar, Pattern)], key: &Scalar) -> bool {
    required.iter().any(|(k, _)| k.equals(key))
}
