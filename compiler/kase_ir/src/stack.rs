//! Stack growth for deeply nested values and patterns.
//!
//! Value and pattern trees come from the caller and can be arbitrarily deep.
//! Every recursive walk over them (equality, rendering, and the matcher in
//! `kase_eval`) goes through `ensure_sufficient_stack`.

/// Run `f`, first growing the native stack if less than the red zone remains.
///
/// On WASM the closure is called directly.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 102_400;

    /// Size of each new stack segment (1MB).
    const GROWTH: usize = 1_048_576;

    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
