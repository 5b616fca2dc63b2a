// Copyright @yucwang 2026

//! Embedded 4th/5th order Runge-Kutta (Cash-Karp) with step size control.

use crate::core::ode::OdeSystem;
use crate::math::constants::Float;

const SAFETY: Float = 0.9;
const SHRINK_LIMIT: Float = 0.1;
const GROW: Float = 5.0;
// (GROW / SAFETY)^(-5): below this error the step is simply grown by GROW.
const GROW_THRESHOLD: Float = 1.89e-4;

const A21: Float = 0.2;
const A31: Float = 3.0 / 40.0;
const A32: Float = 9.0 / 40.0;
const A41: Float = 0.3;
const A42: Float = -0.9;
const A43: Float = 1.2;
const A51: Float = -11.0 / 54.0;
const A52: Float = 2.5;
const A53: Float = -70.0 / 27.0;
const A54: Float = 35.0 / 27.0;
const A61: Float = 1631.0 / 55296.0;
const A62: Float = 175.0 / 512.0;
const A63: Float = 575.0 / 13824.0;
const A64: Float = 44275.0 / 110592.0;
const A65: Float = 253.0 / 4096.0;

const C1: Float = 37.0 / 378.0;
const C3: Float = 250.0 / 621.0;
const C4: Float = 125.0 / 594.0;
const C6: Float = 512.0 / 1771.0;

const DC1: Float = C1 - 2825.0 / 27648.0;
const DC3: Float = C3 - 18575.0 / 48384.0;
const DC4: Float = C4 - 13525.0 / 55296.0;
const DC5: Float = -277.0 / 14336.0;
const DC6: Float = C6 - 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveStep {
    /// Step actually used for the accepted update.
    pub taken: Float,
    /// Suggested size for the following step.
    pub next: Float,
}

/// One Cash-Karp step of size `h` from `y` with `dydx = f(y)` already known.
/// Returns the 5th order estimate and the per-component error estimate.
pub fn integrate_step<S, const N: usize>(
    system: &S,
    y: &[Float; N],
    dydx: &[Float; N],
    h: Float,
) -> ([Float; N], [Float; N])
where
    S: OdeSystem<N> + ?Sized,
{
    let mut ak = [0.0; N];
    let mut y2 = [0.0; N];
    let mut y3 = [0.0; N];
    let mut y4 = [0.0; N];
    let mut y5 = [0.0; N];
    let mut y6 = [0.0; N];
    let mut y_out = [0.0; N];
    let mut y_err = [0.0; N];

    for i in 0..N {
        let k = h * dydx[i];
        y2[i] = y[i] + A21 * k;
        y3[i] = y[i] + A31 * k;
        y4[i] = y[i] + A41 * k;
        y5[i] = y[i] + A51 * k;
        y6[i] = y[i] + A61 * k;
        y_out[i] = y[i] + C1 * k;
        y_err[i] = DC1 * k;
    }

    system.derivative(&y2, &mut ak);
    for i in 0..N {
        let k = h * ak[i];
        y3[i] += A32 * k;
        y4[i] += A42 * k;
        y5[i] += A52 * k;
        y6[i] += A62 * k;
    }

    system.derivative(&y3, &mut ak);
    for i in 0..N {
        let k = h * ak[i];
        y4[i] += A43 * k;
        y5[i] += A53 * k;
        y6[i] += A63 * k;
        y_out[i] += C3 * k;
        y_err[i] += DC3 * k;
    }

    system.derivative(&y4, &mut ak);
    for i in 0..N {
        let k = h * ak[i];
        y5[i] += A54 * k;
        y6[i] += A64 * k;
        y_out[i] += C4 * k;
        y_err[i] += DC4 * k;
    }

    system.derivative(&y5, &mut ak);
    for i in 0..N {
        let k = h * ak[i];
        y6[i] += A65 * k;
        y_err[i] += DC5 * k;
    }

    system.derivative(&y6, &mut ak);
    for i in 0..N {
        let k = h * ak[i];
        y_out[i] += C6 * k;
        y_err[i] += DC6 * k;
    }

    (y_out, y_err)
}

/// Advance `y` in place by one accepted step, shrinking the trial step until
/// the scaled error is at most 1.
///
/// A non-finite error estimate is accepted as is so the caller's state check
/// can end the ray instead of shrinking forever.
pub fn integrate<S, const N: usize>(
    system: &S,
    y: &mut [Float; N],
    dydx: &[Float; N],
    h_try: Float,
    error_scale: Float,
    y_scale: &[Float; N],
) -> AdaptiveStep
where
    S: OdeSystem<N> + ?Sized,
{
    let mut h = h_try;
    loop {
        let (y_out, y_err) = integrate_step(system, y, dydx, h);

        let mut err_max: Float = 0.0;
        for i in 0..N {
            let e = (y_err[i] / y_scale[i]).abs();
            if !e.is_finite() {
                err_max = e;
                break;
            }
            err_max = err_max.max(e);
        }
        err_max *= error_scale;

        if err_max <= 1.0 || !err_max.is_finite() {
            *y = y_out;
            let next = if err_max > GROW_THRESHOLD {
                SAFETY * h * err_max.powf(-0.2)
            } else {
                GROW * h
            };
            return AdaptiveStep { taken: h, next };
        }

        let shrunk = SAFETY * h / err_max.sqrt().sqrt();
        let floor = SHRINK_LIMIT * h;
        h = if shrunk.abs() > floor.abs() { shrunk } else { floor };
    }
}

/// Error-scale vector: |y| + |h dydx| + `floor` per component.
pub fn error_scale_vector<const N: usize>(y: &[Float; N], dydx: &[Float; N], h: Float, floor: Float) -> [Float; N] {
    let mut scale = [0.0; N];
    for i in 0..N {
        scale[i] = y[i].abs() + (dydx[i] * h).abs() + floor;
    }
    scale
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Decay;

    impl OdeSystem<1> for Decay {
        fn derivative(&self, y: &[Float; 1], dydx: &mut [Float; 1]) {
            dydx[0] = -y[0];
        }
    }

    struct Oscillator;

    impl OdeSystem<2> for Oscillator {
        fn derivative(&self, y: &[Float; 2], dydx: &mut [Float; 2]) {
            dydx[0] = y[1];
            dydx[1] = -y[0];
        }
    }

    #[test]
    fn test_single_step_accuracy() {
        let y = [1.0];
        let dydx = Decay.evaluate(&y);
        let (y_out, y_err) = integrate_step(&Decay, &y, &dydx, 0.1);
        assert!((y_out[0] - (-0.1 as Float).exp()).abs() < 1e-8);
        assert!(y_err[0].abs() < 1e-6);
    }

    #[test]
    fn test_adaptive_oscillator_period() {
        let mut y: [Float; 2] = [1.0, 0.0];
        let mut t: Float = 0.0;
        let mut h: Float = 0.5;
        let end = 2.0 * crate::math::constants::PI;
        while t < end {
            let h_try = h.min(end - t);
            let dydx = Oscillator.evaluate(&y);
            let scale = error_scale_vector(&y, &dydx, h_try, 1e-3);
            let step = integrate(&Oscillator, &mut y, &dydx, h_try, 1e8, &scale);
            assert!(step.taken <= h_try);
            t += step.taken;
            h = step.next;
        }
        assert!((y[0] - 1.0).abs() < 1e-5);
        assert!(y[1].abs() < 1e-5);
    }

    #[test]
    fn test_rejected_step_shrinks_and_keeps_direction() {
        let mut y: [Float; 2] = [1.0, 0.0];
        let dydx = Oscillator.evaluate(&y);
        let scale = [1.0, 1.0];
        let step = integrate(&Oscillator, &mut y, &dydx, -4.0, 1e11, &scale);
        assert!(step.taken < 0.0);
        assert!(step.taken > -4.0);
    }

    #[test]
    fn test_accepted_step_does_not_depend_on_rejections() {
        let start: [Float; 2] = [1.0, 0.0];
        let dydx = Oscillator.evaluate(&start);
        let scale = [1.0, 1.0];

        let mut shrunk = start;
        let step = integrate(&Oscillator, &mut shrunk, &dydx, 4.0, 1e11, &scale);
        assert!(step.taken < 4.0);

        let mut direct = start;
        let retry = integrate(&Oscillator, &mut direct, &dydx, step.taken, 1e11, &scale);
        assert_eq!(retry.taken.to_bits(), step.taken.to_bits());
        for i in 0..2 {
            assert_eq!(shrunk[i].to_bits(), direct[i].to_bits());
        }
    }

    #[test]
    fn test_integration_is_deterministic() {
        let run = || {
            let mut y = [0.3, -1.2];
            let mut h: Float = 0.7;
            for _ in 0..50 {
                let dydx = Oscillator.evaluate(&y);
                let scale = error_scale_vector(&y, &dydx, h, 1e-3);
                h = integrate(&Oscillator, &mut y, &dydx, h, 1e9, &scale).next;
            }
            (y, h)
        };
        let (a, ha) = run();
        let (b, hb) = run();
        assert_eq!(a.map(|v| v.to_bits()), b.map(|v| v.to_bits()));
        assert_eq!(ha.to_bits(), hb.to_bits());
    }
}
