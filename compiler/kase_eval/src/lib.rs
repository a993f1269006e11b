#![deny(clippy::arithmetic_side_effects)]
//! Kase Eval - matcher and case selector for the Kase matching engine.
//!
//! Given a `Value` and an ordered list of `Case`s, picks the first case whose
//! pattern matches structurally and whose guard (if any) accepts the bindings.
//! Guards are evaluated by the caller through a callback, so the engine never
//! needs to know what a guard is.
//!
//! ```text
//! let cases = [
//!     Case::unguarded(Pattern::literal(0_i64)),
//!     Case::guarded(Pattern::capture("x")?, Guard::Negative),
//!     Case::unguarded(Pattern::wildcard()),
//! ];
//! match select(&cases, &Value::int(-5), |guard, bindings| guard.holds(bindings)) {
//!     SelectResult::Selected { index, bindings } => { /* index == 1 */ }
//!     SelectResult::Exhausted => { /* no case applies */ }
//! }
//! ```
//!
//! Everything here is synchronous and reentrant. The batch entry points spread
//! independent subjects over the rayon pool.

mod batch;
mod bindings;
mod matcher;
mod select;

use std::sync::Once;

pub use batch::{select_batch, try_select_batch};
pub use bindings::Bindings;
pub use matcher::{match_pattern, MatchResult};
pub use select::{select, try_select, GuardFailure, SelectResult};

pub use kase_ir::{
    ensure_sufficient_stack, Case, CaseTable, ConstructionError, ErrorCode, Heap, MapValue, Name, Pattern, PatternKind,
    RecordValue, Scalar, Star, Value, ValueKind,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber.
///
/// Call this once at startup to enable tracing output. Set `RUST_LOG`
/// environment variable to control log level (e.g., `RUST_LOG=kase_eval=trace`).
/// Without `RUST_LOG` nothing is installed, so an embedding application can
/// bring its own subscriber. If one is already installed it is kept.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if let Err(err) = installed {
                tracing::debug!(%err, "keeping the existing tracing subscriber");
            }
        }
    });
}
