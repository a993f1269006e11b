//! Case selection over many subjects in parallel.
//!
//! Each subject gets its own independent scan on the rayon pool. Nothing is
//! shared between scans except the read-only cases and the guard callback,
//! which is why the callback must be `Fn + Sync` here rather than `FnMut`.

use rayon::prelude::*;

use kase_ir::{Case, Value};

use crate::select::{select, try_select, GuardFailure, SelectResult};
use crate::Bindings;

/// Run [`select`] for every value. Results are in input order.
pub fn select_batch<G, F>(cases: &[Case<G>], values: &[Value], evaluate_guard: F) -> Vec<SelectResult>
where
    G: Sync,
    F: Fn(&G, &Bindings) -> bool + Sync,
{
    tracing::debug!(cases = cases.len(), subjects = values.len(), "batch select");
    values
        .par_iter()
        .map(|value| select(cases, value, &evaluate_guard))
        .collect()
}

/// Run [`try_select`] for every value. A guard failure only affects the
/// result of its own subject.
pub fn try_select_batch<G, E, F>(
    cases: &[Case<G>],
    values: &[Value],
    evaluate_guard: F,
) -> Vec<Result<SelectResult, GuardFailure<E>>>
where
    G: Sync,
    E: Send,
    F: Fn(&G, &Bindings) -> Result<bool, E> + Sync,
{
    tracing::debug!(cases = cases.len(), subjects = values.len(), "batch try_select");
    values
        .par_iter()
        .map(|value| try_select(cases, value, &evaluate_guard))
        .collect()
}
