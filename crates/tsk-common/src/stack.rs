//! Stack growth for recursive tree walks.

use crate::limits::{STACK_GROW_SIZE, STACK_RED_ZONE};

/// Run `f`, switching to a freshly allocated stack segment first if less
/// than `STACK_RED_ZONE` bytes remain.
///
/// Wrap the body of any function that recurses once per syntax tree level.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    #[test]
    fn deep_recursion_completes() {
        assert_eq!(depth(100_000), 100_000);
    }
}
