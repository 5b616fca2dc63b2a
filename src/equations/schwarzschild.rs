// Copyright @yucwang 2026

//! Non-rotating black hole modelled as a Newtonian-looking r^-5 central
//! potential acting on a Cartesian photon position and velocity.

use crate::core::ode::OdeSystem;
use crate::math::constants::{Float, Vector3f};

pub const SCHWARZSCHILD_N: usize = 6;

pub type SchwarzschildState = [Float; SCHWARZSCHILD_N];

pub const DEFAULT_COEFFICIENT: Float = -1.5;
pub const DEFAULT_STEP_SIZE: Float = 0.16;

const MIN_COEFFICIENT: Float = -1.5;
const MAX_COEFFICIENT: Float = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchwarzschildEquation {
    coefficient: Float,
    step_size: Float,
}

/// Per-ray context: the squared specific angular momentum is fixed at launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchwarzschildRay {
    h2: Float,
    coefficient: Float,
    step_size: Float,
}

impl Default for SchwarzschildEquation {
    fn default() -> Self {
        Self::new(DEFAULT_COEFFICIENT)
    }
}

impl SchwarzschildEquation {
    pub fn new(coefficient: Float) -> Self {
        let clamped = if coefficient.is_nan() {
            DEFAULT_COEFFICIENT
        } else {
            coefficient.max(MIN_COEFFICIENT).min(MAX_COEFFICIENT)
        };
        if clamped != coefficient {
            log::warn!("Potential coefficient {} outside [{}, {}], using {}.",
                       coefficient, MIN_COEFFICIENT, MAX_COEFFICIENT, clamped);
        }
        Self { coefficient: clamped, step_size: DEFAULT_STEP_SIZE }
    }

    pub fn coefficient(&self) -> Float {
        self.coefficient
    }

    pub fn step_size(&self) -> Float {
        self.step_size
    }

    pub fn launch(&self, position: &Vector3f, velocity: &Vector3f) -> SchwarzschildRay {
        SchwarzschildRay {
            h2: position.cross(velocity).norm_squared(),
            coefficient: self.coefficient,
            step_size: self.step_size,
        }
    }
}

impl SchwarzschildRay {
    pub fn h2(&self) -> Float {
        self.h2
    }

    /// Step length used by the fixed stepper; grows linearly with distance.
    pub fn default_step(&self, position: &Vector3f) -> Float {
        position.norm() / 30.0 * self.step_size
    }

    fn acceleration(&self, position: &Vector3f) -> Vector3f {
        let r2 = position.norm_squared();
        position * (self.coefficient * self.h2 / r2.powf(2.5))
    }

    /// Semi-implicit Euler step. Returns the new squared distance from the
    /// centre.
    pub fn step(&self, position: &mut Vector3f, velocity: &mut Vector3f, h: Float) -> Float {
        *position += *velocity * h;
        *velocity += self.acceleration(position) * h;
        position.norm_squared()
    }
}

impl OdeSystem<SCHWARZSCHILD_N> for SchwarzschildRay {
    fn derivative(&self, y: &SchwarzschildState, dydx: &mut SchwarzschildState) {
        let accel = self.acceleration(&Vector3f::new(y[0], y[1], y[2]));
        dydx[0] = y[3];
        dydx[1] = y[4];
        dydx[2] = y[5];
        dydx[3] = accel.x;
        dydx[4] = accel.y;
        dydx[5] = accel.z;
    }
}

pub fn pack(position: &Vector3f, velocity: &Vector3f) -> SchwarzschildState {
    [position.x, position.y, position.z, velocity.x, velocity.y, velocity.z]
}

pub fn unpack(y: &SchwarzschildState) -> (Vector3f, Vector3f) {
    (Vector3f::new(y[0], y[1], y[2]), Vector3f::new(y[3], y[4], y[5]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ode::is_finite_state;

    #[test]
    fn test_coefficient_is_clamped() {
        assert_eq!(SchwarzschildEquation::new(-3.0).coefficient(), -1.5);
        assert_eq!(SchwarzschildEquation::new(0.5).coefficient(), 0.0);
        assert_eq!(SchwarzschildEquation::new(-0.75).coefficient(), -0.75);
    }

    #[test]
    fn test_launch_angular_momentum() {
        let eq = SchwarzschildEquation::default();
        let ray = eq.launch(&Vector3f::new(0.0, 0.0, -10.0), &Vector3f::new(1.0, 0.0, 0.0));
        assert!((ray.h2() - 100.0).abs() < 1e-12);
        assert!((ray.default_step(&Vector3f::new(0.0, 0.0, -30.0)) - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_flat_space_is_a_straight_line() {
        let eq = SchwarzschildEquation::new(0.0);
        let mut p = Vector3f::new(0.0, 1.0, -10.0);
        let mut v = Vector3f::new(0.0, 0.0, 1.0);
        let ray = eq.launch(&p, &v);
        for _ in 0..1000 {
            let h = ray.default_step(&p);
            ray.step(&mut p, &mut v, h);
        }
        assert!((p.y - 1.0).abs() < 1e-12);
        assert!(p.x.abs() < 1e-12);
        assert_eq!(v, Vector3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_derivative_matches_step() {
        let eq = SchwarzschildEquation::default();
        let p = Vector3f::new(3.0, -2.0, 8.0);
        let v = Vector3f::new(-0.1, 0.3, -0.9);
        let ray = eq.launch(&p, &v);
        let y = pack(&p, &v);
        let dydx = ray.evaluate(&y);
        assert!(is_finite_state(&dydx));
        assert_eq!(dydx[0], v.x);
        let accel = ray.acceleration(&p);
        assert!((dydx[5] - accel.z).abs() < 1e-15);
        assert!(accel.dot(&p) < 0.0);
    }
}
