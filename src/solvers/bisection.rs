// Copyright @yucwang 2026

use crate::math::constants::Float;

pub const DEFAULT_MAX_ITERATIONS: usize = 128;

/// Bracketing search for the step length at which a ray crosses a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    pub tolerance: Float,
    pub max_iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refined<T> {
    pub state: T,
    /// Step length from the segment start to `state`.
    pub step: Float,
    pub iterations: usize,
}

impl Bisection {
    pub fn new(tolerance: Float) -> Self {
        Self { tolerance, max_iterations: DEFAULT_MAX_ITERATIONS }
    }

    /// Narrow [0, `taken`] around the crossing. `advance(h)` re-evaluates the
    /// segment at step `h`, `crossed` tells whether that state is already past
    /// the surface, `in_domain` rejects states the search must not use.
    ///
    /// The result is the evaluation at the crossed end of the final bracket.
    /// `None` means a state left the domain and nothing was refined.
    pub fn search<T, A, C, D>(
        &self,
        taken: Float,
        mut advance: A,
        mut crossed: C,
        mut in_domain: D,
    ) -> Option<Refined<T>>
    where
        A: FnMut(Float) -> T,
        C: FnMut(&T) -> bool,
        D: FnMut(&T) -> bool,
    {
        let mut lower = 0.0;
        let mut upper = taken;
        let mut upper_state: Option<T> = None;
        let mut iterations = 0;

        while (upper - lower).abs() >= self.tolerance && iterations < self.max_iterations {
            let mid = 0.5 * (lower + upper);
            let state = advance(mid);
            iterations += 1;
            if !in_domain(&state) {
                return None;
            }
            if crossed(&state) {
                upper = mid;
                upper_state = Some(state);
            } else {
                lower = mid;
            }
        }

        let state = match upper_state {
            Some(state) => state,
            None => {
                let state = advance(upper);
                if !in_domain(&state) {
                    return None;
                }
                state
            }
        };
        Some(Refined { state, step: upper, iterations })
    }
}
