//! Match cases and validated case tables.

use crate::{ConstructionError, Pattern};

/// One arm of a match: a pattern plus an optional guard handle.
///
/// `G` is opaque to the engine. It is handed back, unevaluated, to the
/// caller's guard callback together with the bindings of a structural match.
#[derive(Clone, Debug)]
pub struct Case<G> {
    pub pattern: Pattern,
    pub guard: Option<G>,
}

impl<G> Case<G> {
    pub fn new(pattern: Pattern, guard: Option<G>) -> Self {
        Case { pattern, guard }
    }

    pub fn unguarded(pattern: Pattern) -> Self {
        Case {
            pattern,
            guard: None,
        }
    }

    pub fn guarded(pattern: Pattern, guard: G) -> Self {
        Case {
            pattern,
            guard: Some(guard),
        }
    }

    /// Whether this case selects every subject: irrefutable and unguarded.
    pub fn is_catch_all(&self) -> bool {
        self.guard.is_none() && self.pattern.is_irrefutable()
    }
}

/// An ordered case list in which every case is reachable.
///
/// A catch-all case (irrefutable pattern, no guard) may only come last.
#[derive(Clone, Debug)]
pub struct CaseTable<G> {
    cases: Vec<Case<G>>,
}

impl<G> CaseTable<G> {
    pub fn new(cases: Vec<Case<G>>) -> Result<Self, ConstructionError> {
        let last = cases.len().saturating_sub(1);
        if let Some(index) = cases
            .iter()
            .position(Case::is_catch_all)
            .filter(|&index| index != last)
        {
            return Err(ConstructionError::UnreachableCase { index });
        }
        Ok(CaseTable { cases })
    }

    #[inline]
    pub fn cases(&self) -> &[Case<G>] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Whether the last case catches every subject, so selection can never
    /// be exhausted.
    pub fn has_catch_all(&self) -> bool {
        self.cases.last().is_some_and(Case::is_catch_all)
    }

    pub fn into_cases(self) -> Vec<Case<G>> {
        self.cases
    }
}

impl<G> AsRef<[Case<G>]> for CaseTable<G> {
    fn as_ref(&self) -> &[Case<G>] {
        &self.cases
    }
}
