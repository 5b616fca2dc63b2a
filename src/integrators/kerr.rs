// Copyright @yucwang 2026

use crate::core::hitable::{RayPoint, SearchBounds, Segment};
use crate::core::integrator::Integrator;
use crate::core::ode::{is_finite_state, OdeSystem};
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::equations::kerr::{KerrEquation, KerrRay, KerrState, PHI, R, THETA};
use crate::integrators::march::{record, visit_hitables, StepOutcome, Tint};
use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::pinhole::PinholeCamera;
use crate::solvers::bisection::Bisection;
use crate::solvers::cash_karp::{error_scale_vector, integrate, integrate_step};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KerrSettings {
    pub initial_step: Float,
    pub error_scale: Float,
    /// Added to every component of the error-scale vector.
    pub scale_floor: Float,
    pub max_iterations: usize,
    /// Absolute step-length tolerance of the crossing search.
    pub tolerance: Float,
}

impl Default for KerrSettings {
    fn default() -> Self {
        Self {
            initial_step: 0.5,
            error_scale: 1e11,
            scale_floor: 1e-3,
            max_iterations: 1_000_000,
            tolerance: 1e-7,
        }
    }
}

struct KerrSegment<'a> {
    ray: &'a KerrRay,
    start: &'a KerrState,
    dydx: &'a KerrState,
    taken: Float,
    end: KerrState,
}

impl<'a> Segment for KerrSegment<'a> {
    type State = KerrState;

    fn taken(&self) -> Float {
        self.taken
    }

    fn end_state(&self) -> KerrState {
        self.end
    }

    fn advance(&self, h: Float) -> KerrState {
        integrate_step(self.ray, self.start, self.dydx, h).0
    }

    fn point(&self, state: &KerrState) -> RayPoint {
        kerr_point(state)
    }
}

pub fn kerr_point(y: &KerrState) -> RayPoint {
    RayPoint::from_spherical(y[R], y[THETA], y[PHI])
}

pub struct KerrIntegrator {
    equation: KerrEquation,
    camera: PinholeCamera,
    settings: KerrSettings,
}

impl KerrIntegrator {
    pub fn new(equation: KerrEquation, camera: PinholeCamera, settings: KerrSettings) -> Self {
        Self { equation, camera, settings }
    }

    pub fn equation(&self) -> &KerrEquation {
        &self.equation
    }

    pub fn settings(&self) -> &KerrSettings {
        &self.settings
    }

    pub fn bounds(&self) -> SearchBounds {
        SearchBounds { horizon: self.equation.horizon_radius(), outer: self.equation.outer_radius() }
    }

    /// March one ray launched at camera angles (`alpha`, `beta`).
    pub fn trace(&self, scene: &Scene, alpha: Float, beta: Float, mut path: Option<&mut Vec<RayPoint>>) -> RGBSpectrum {
        let settings = &self.settings;
        let bounds = self.bounds();
        let bisection = Bisection::new(settings.tolerance);

        let (ray, mut y) = self.equation.launch(alpha, beta);
        if !is_finite_state(&y) {
            log::warn!("Non-finite launch state at alpha={}, beta={}.", alpha, beta);
            return RGBSpectrum::FAILURE;
        }

        let mut point = kerr_point(&y);
        record(&mut path, &point);

        let mut tint = Tint::default();
        let mut h_try = settings.initial_step;

        for _ in 0..settings.max_iterations {
            let dydx = ray.evaluate(&y);
            let y_scale = error_scale_vector(&y, &dydx, h_try, settings.scale_floor);

            let start = y;
            let start_point = point;
            let step = integrate(&ray, &mut y, &dydx, h_try, settings.error_scale, &y_scale);

            if !is_finite_state(&y) {
                log::warn!("Ray at alpha={}, beta={} left the finite domain at r={}.", alpha, beta, start[R]);
                return RGBSpectrum::FAILURE;
            }
            point = kerr_point(&y);

            let segment = KerrSegment { ray: &ray, start: &start, dydx: &dydx, taken: step.taken, end: y };
            match visit_hitables(scene, &segment, &start_point, &point, &bisection, &bounds, &mut tint) {
                StepOutcome::Continue => {},
                StepOutcome::Stop { color, point } => {
                    record(&mut path, &point);
                    return tint.apply(color);
                },
                // Boyer-Lindquist momenta cannot be mirrored, so mirrors are opaque here.
                StepOutcome::Reflect { crossing, color, .. } => {
                    record(&mut path, &crossing.point);
                    return tint.apply(color.unwrap_or(RGBSpectrum::WHITE));
                },
            }

            record(&mut path, &point);
            if y[R] < bounds.horizon || y[R] > bounds.outer {
                return tint.apply(RGBSpectrum::BLACK);
            }

            h_try = step.next;
        }

        log::warn!("Ray at alpha={}, beta={} did not converge after {} steps.", alpha, beta, settings.max_iterations);
        RGBSpectrum::FAILURE
    }
}

impl Integrator for KerrIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, x: usize, y: usize, path: Option<&mut Vec<RayPoint>>) -> RGBSpectrum {
        let (alpha, beta) = self.camera.sample(x, y);
        self.trace(scene, alpha, beta, path)
    }

    fn resolution(&self) -> (usize, usize) {
        self.camera.resolution()
    }

    fn describe(&self) -> String {
        format!("KerrIntegrator(a={}, r0={}, {})",
                self.equation.spin(), self.equation.distance(), self.camera.describe())
    }
}
