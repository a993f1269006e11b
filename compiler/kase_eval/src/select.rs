//! First-match case selection with caller-evaluated guards.
//!
//! # Architecture
//!
//! The selector is pure: it takes the cases and a subject `Value`, and returns
//! the index of the selected case plus its bindings. Guard evaluation requires
//! a callback because only the caller knows what a guard means.

use std::convert::Infallible;

use kase_ir::{Case, Value};

use crate::matcher::match_pattern;
use crate::{Bindings, MatchResult};

/// Outcome of scanning a case list.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectResult {
    /// Case `index` matched and its guard (if any) accepted the bindings.
    Selected { index: usize, bindings: Bindings },
    /// No case applies.
    Exhausted,
}

impl SelectResult {
    pub fn index(&self) -> Option<usize> {
        match self {
            SelectResult::Selected { index, .. } => Some(*index),
            SelectResult::Exhausted => None,
        }
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        match self {
            SelectResult::Selected { bindings, .. } => Some(bindings),
            SelectResult::Exhausted => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, SelectResult::Exhausted)
    }
}

/// A guard callback failed while scanning.
///
/// The scan stops at the failing case; later cases are never tried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("guard of case {case_index} failed")]
pub struct GuardFailure<E> {
    /// Index of the case whose guard failed.
    pub case_index: usize,
    #[source]
    pub source: E,
}

/// Select the first case whose pattern matches `value` and whose guard holds.
///
/// `evaluate_guard` is called only after a structural match, with that
/// case's bindings, and at most once per case.
pub fn select<G, F>(cases: &[Case<G>], value: &Value, mut evaluate_guard: F) -> SelectResult
where
    F: FnMut(&G, &Bindings) -> bool,
{
    match try_select(cases, value, |guard, bindings| {
        Ok::<_, Infallible>(evaluate_guard(guard, bindings))
    }) {
        Ok(result) => result,
        Err(failure) => match failure.source {},
    }
}

/// Like [`select`], but guards may fail.
///
/// A guard error aborts the scan and is returned wrapped with the index of
/// its case. It is never treated as a rejection.
#[tracing::instrument(level = "trace", skip_all, fields(cases = cases.len(), subject = value.type_name()))]
pub fn try_select<G, E, F>(
    cases: &[Case<G>],
    value: &Value,
    mut evaluate_guard: F,
) -> Result<SelectResult, GuardFailure<E>>
where
    F: FnMut(&G, &Bindings) -> Result<bool, E>,
{
    for (index, case) in cases.iter().enumerate() {
        let MatchResult::Matched(bindings) = match_pattern(&case.pattern, value) else {
            continue;
        };
        let accepted = match &case.guard {
            None => true,
            Some(guard) => evaluate_guard(guard, &bindings).map_err(|source| GuardFailure {
                case_index: index,
                source,
            })?,
        };
        if accepted {
            tracing::trace!(index, bindings = bindings.len(), "case selected");
            return Ok(SelectResult::Selected { index, bindings });
        }
        tracing::trace!(index, "guard rejected");
    }
    tracing::debug!(cases = cases.len(), "no case applies");
    Ok(SelectResult::Exhausted)
}
