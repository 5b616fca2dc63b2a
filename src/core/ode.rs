// Copyright @yucwang 2026

use crate::math::constants::Float;

/// A fixed-size system of first-order ODEs, y' = f(y).
///
/// Implementors carry everything the right-hand side needs; the solvers only
/// ever see this trait and the state array.
pub trait OdeSystem<const N: usize> {
    fn derivative(&self, y: &[Float; N], dydx: &mut [Float; N]);

    fn evaluate(&self, y: &[Float; N]) -> [Float; N] {
        let mut dydx = [0.0; N];
        self.derivative(y, &mut dydx);
        dydx
    }
}

pub fn is_finite_state<const N: usize>(y: &[Float; N]) -> bool {
    y.iter().all(|v| v.is_finite())
}
