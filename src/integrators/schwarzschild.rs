// Copyright @yucwang 2026

use crate::core::hitable::{RayPoint, SearchBounds, Segment};
use crate::core::integrator::Integrator;
use crate::core::ode::{is_finite_state, OdeSystem};
use crate::core::scene::{Scene, SCHWARZSCHILD_HORIZON_RADIUS};
use crate::core::sensor::Sensor;
use crate::equations::schwarzschild::{pack, unpack, SchwarzschildEquation, SchwarzschildRay, SchwarzschildState};
use crate::integrators::march::{record, visit_hitables, StepOutcome, Tint};
use crate::math::constants::{Float, Vector3f};
use crate::math::coordinates::reflect;
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::solvers::bisection::Bisection;
use crate::solvers::cash_karp::{error_scale_vector, integrate, integrate_step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchwarzschildStepper {
    /// Semi-implicit Euler with a step proportional to the distance.
    Fixed,
    /// Cash-Karp with error control on the Cartesian state.
    Adaptive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchwarzschildSettings {
    pub stepper: SchwarzschildStepper,
    pub max_iterations: usize,
    /// Crossing search tolerance, relative to the step being refined.
    pub relative_tolerance: Float,
    pub horizon_radius: Float,
    pub outer_radius: Float,
    pub initial_step: Float,
    pub error_scale: Float,
    pub scale_floor: Float,
}

impl Default for SchwarzschildSettings {
    fn default() -> Self {
        Self {
            stepper: SchwarzschildStepper::Fixed,
            max_iterations: 10_000,
            relative_tolerance: 1e-5,
            horizon_radius: SCHWARZSCHILD_HORIZON_RADIUS,
            outer_radius: 30.0,
            initial_step: 0.5,
            error_scale: 1e9,
            scale_floor: 1e-3,
        }
    }
}

type Phase = (Vector3f, Vector3f);

struct FixedSegment<'a> {
    ray: &'a SchwarzschildRay,
    start: Phase,
    taken: Float,
    end: Phase,
}

impl<'a> Segment for FixedSegment<'a> {
    type State = Phase;

    fn taken(&self) -> Float {
        self.taken
    }

    fn end_state(&self) -> Phase {
        self.end
    }

    fn advance(&self, h: Float) -> Phase {
        let (mut position, mut velocity) = self.start;
        self.ray.step(&mut position, &mut velocity, h);
        (position, velocity)
    }

    fn point(&self, state: &Phase) -> RayPoint {
        RayPoint::from_cartesian(state.0)
    }
}

struct AdaptiveSegment<'a> {
    ray: &'a SchwarzschildRay,
    start: &'a SchwarzschildState,
    dydx: &'a SchwarzschildState,
    taken: Float,
    end: SchwarzschildState,
}

impl<'a> Segment for AdaptiveSegment<'a> {
    type State = SchwarzschildState;

    fn taken(&self) -> Float {
        self.taken
    }

    fn end_state(&self) -> SchwarzschildState {
        self.end
    }

    fn advance(&self, h: Float) -> SchwarzschildState {
        integrate_step(self.ray, self.start, self.dydx, h).0
    }

    fn point(&self, state: &SchwarzschildState) -> RayPoint {
        RayPoint::from_cartesian(Vector3f::new(state[0], state[1], state[2]))
    }
}

fn is_finite_phase(phase: &Phase) -> bool {
    phase.0.iter().chain(phase.1.iter()).all(|v| v.is_finite())
}

pub struct SchwarzschildIntegrator {
    equation: SchwarzschildEquation,
    camera: PerspectiveCamera,
    settings: SchwarzschildSettings,
}

impl SchwarzschildIntegrator {
    pub fn new(equation: SchwarzschildEquation, camera: PerspectiveCamera, settings: SchwarzschildSettings) -> Self {
        Self { equation, camera, settings }
    }

    pub fn equation(&self) -> &SchwarzschildEquation {
        &self.equation
    }

    pub fn settings(&self) -> &SchwarzschildSettings {
        &self.settings
    }

    pub fn bounds(&self) -> SearchBounds {
        SearchBounds { horizon: self.settings.horizon_radius, outer: self.settings.outer_radius }
    }

    pub fn trace(&self, scene: &Scene, origin: Vector3f, direction: Vector3f, path: Option<&mut Vec<RayPoint>>) -> RGBSpectrum {
        match self.settings.stepper {
            SchwarzschildStepper::Fixed => self.trace_fixed(scene, origin, direction, path),
            SchwarzschildStepper::Adaptive => self.trace_adaptive(scene, origin, direction, path),
        }
    }

    fn outside(&self, bounds: &SearchBounds, point: &RayPoint) -> bool {
        point.r < bounds.horizon || point.r > bounds.outer
    }

    fn trace_fixed(&self, scene: &Scene, origin: Vector3f, direction: Vector3f, mut path: Option<&mut Vec<RayPoint>>) -> RGBSpectrum {
        let bounds = self.bounds();
        let mut position = origin;
        let mut velocity = direction;
        let mut ray = self.equation.launch(&position, &velocity);

        let mut point = RayPoint::from_cartesian(position);
        record(&mut path, &point);
        let mut tint = Tint::default();

        for _ in 0..self.settings.max_iterations {
            let start = (position, velocity);
            let start_point = point;
            let h = ray.default_step(&position);
            ray.step(&mut position, &mut velocity, h);

            if !is_finite_phase(&(position, velocity)) {
                log::warn!("Ray from ({}, {}, {}) left the finite domain.", origin.x, origin.y, origin.z);
                return RGBSpectrum::FAILURE;
            }
            point = RayPoint::from_cartesian(position);

            let bisection = Bisection::new(self.settings.relative_tolerance * h.abs());
            let segment = FixedSegment { ray: &ray, start, taken: h, end: (position, velocity) };
            match visit_hitables(scene, &segment, &start_point, &point, &bisection, &bounds, &mut tint) {
                StepOutcome::Continue => {},
                StepOutcome::Stop { color, point } => {
                    record(&mut path, &point);
                    return tint.apply(color);
                },
                StepOutcome::Reflect { crossing, normal, .. } => {
                    position = crossing.state.0;
                    velocity = reflect(&crossing.state.1, &normal);
                    ray = self.equation.launch(&position, &velocity);
                    point = crossing.point;
                },
            }

            record(&mut path, &point);
            if self.outside(&bounds, &point) {
                return tint.apply(RGBSpectrum::BLACK);
            }
        }

        log::warn!("Ray from ({}, {}, {}) did not converge after {} steps.",
                   origin.x, origin.y, origin.z, self.settings.max_iterations);
        RGBSpectrum::FAILURE
    }

    fn trace_adaptive(&self, scene: &Scene, origin: Vector3f, direction: Vector3f, mut path: Option<&mut Vec<RayPoint>>) -> RGBSpectrum {
        let settings = &self.settings;
        let bounds = self.bounds();
        let mut ray = self.equation.launch(&origin, &direction);
        let mut y = pack(&origin, &direction);

        let mut point = RayPoint::from_cartesian(origin);
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
                log::warn!("Ray from ({}, {}, {}) left the finite domain.", origin.x, origin.y, origin.z);
                return RGBSpectrum::FAILURE;
            }
            point = RayPoint::from_cartesian(Vector3f::new(y[0], y[1], y[2]));

            let bisection = Bisection::new(settings.relative_tolerance * step.taken.abs());
            let segment = AdaptiveSegment { ray: &ray, start: &start, dydx: &dydx, taken: step.taken, end: y };
            match visit_hitables(scene, &segment, &start_point, &point, &bisection, &bounds, &mut tint) {
                StepOutcome::Continue => {},
                StepOutcome::Stop { color, point } => {
                    record(&mut path, &point);
                    return tint.apply(color);
                },
                StepOutcome::Reflect { crossing, normal, .. } => {
                    let (position, velocity) = unpack(&crossing.state);
                    let velocity = reflect(&velocity, &normal);
                    ray = self.equation.launch(&position, &velocity);
                    y = pack(&position, &velocity);
                    point = crossing.point;
                },
            }

            record(&mut path, &point);
            if self.outside(&bounds, &point) {
                return tint.apply(RGBSpectrum::BLACK);
            }
            h_try = step.next;
        }

        log::warn!("Ray from ({}, {}, {}) did not converge after {} steps.",
                   origin.x, origin.y, origin.z, settings.max_iterations);
        RGBSpectrum::FAILURE
    }
}

impl Integrator for SchwarzschildIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, x: usize, y: usize, path: Option<&mut Vec<RayPoint>>) -> RGBSpectrum {
        let ray = self.camera.sample(x, y);
        self.trace(scene, ray.origin, ray.direction, path)
    }

    fn resolution(&self) -> (usize, usize) {
        self.camera.resolution()
    }

    fn describe(&self) -> String {
        format!("SchwarzschildIntegrator(coefficient={}, {:?}, {})",
                self.equation.coefficient(), self.settings.stepper, self.camera.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hitables::horizon::Horizon;
    use crate::hitables::sky::Sky;
    use crate::hitables::sphere::Sphere;
    use crate::textures::pattern::Pattern;
    use std::sync::Arc;

    fn integrator(coefficient: Float, stepper: SchwarzschildStepper) -> SchwarzschildIntegrator {
        let camera = PerspectiveCamera::new(Vector3f::new(0.0, -20.0, 2.0), Vector3f::zeros(),
                                            Vector3f::new(0.0, 0.0, 1.0), 40.0, 16, 16);
        let settings = SchwarzschildSettings { stepper, ..SchwarzschildSettings::default() };
        SchwarzschildIntegrator::new(SchwarzschildEquation::new(coefficient), camera, settings)
    }

    fn horizon_and_sky() -> Scene {
        let mut scene = Scene::new();
        scene.add_hitable(Arc::new(Horizon::new(1.0, Pattern::Solid(RGBSpectrum::GREEN))));
        scene.add_hitable(Arc::new(Sky::new(30.0, Pattern::Solid(RGBSpectrum::WHITE))));
        scene
    }

    #[test]
    fn test_flat_space_misses_the_horizon() {
        let integrator = integrator(0.0, SchwarzschildStepper::Fixed);
        let origin = Vector3f::new(0.0, -20.0, 1.5);
        let direction = Vector3f::new(0.0, 1.0, 0.0);
        let mut path = Vec::new();
        let color = integrator.trace(&horizon_and_sky(), origin, direction, Some(&mut path));
        assert_eq!(color, RGBSpectrum::WHITE);
        for p in path.iter() {
            assert!(p.position.x.abs() < 1e-12);
            assert!((p.position.z - 1.5).abs() < 1e-12);
            assert!(p.r > 1.0);
        }
    }

    #[test]
    fn test_curved_space_captures_close_ray() {
        for stepper in [SchwarzschildStepper::Fixed, SchwarzschildStepper::Adaptive].iter() {
            let integrator = integrator(-1.5, *stepper);
            let origin = Vector3f::new(0.0, -20.0, 1.5);
            let direction = Vector3f::new(0.0, 1.0, 0.0);
            let color = integrator.trace(&horizon_and_sky(), origin, direction, None);
            assert_eq!(color, RGBSpectrum::GREEN, "{:?}", stepper);
        }
    }

    #[test]
    fn test_reflective_sphere_bounces_back() {
        let integrator = integrator(0.0, SchwarzschildStepper::Fixed);
        let mut scene = horizon_and_sky();
        scene.add_hitable(Arc::new(Sphere::reflective(Vector3f::new(0.0, -10.0, 0.0), 1.0, RGBSpectrum::WHITE)));

        let mut path = Vec::new();
        let color = integrator.trace(&scene, Vector3f::new(0.0, -20.0, 0.0), Vector3f::new(0.0, 1.0, 0.0), Some(&mut path));
        assert_eq!(color, RGBSpectrum::WHITE);

        // The turning point sits on the sphere surface.
        let nearest = path.iter().map(|p| p.position.y).fold(Float::MIN, Float::max);
        assert!((nearest + 11.0).abs() < 1e-4);
        assert!(path.last().unwrap().position.y < -20.0);
    }

    #[test]
    fn test_sphere_chord_refines_to_surface() {
        let equation = SchwarzschildEquation::new(0.0);
        let start = (Vector3f::new(1.2, 0.0, 0.0), Vector3f::new(-1.0, 0.0, 0.0));
        let ray = equation.launch(&start.0, &start.1);
        let segment = FixedSegment { ray: &ray, start, taken: 0.4, end: (Vector3f::new(0.8, 0.0, 0.0), start.1) };
        let sphere = Sphere::reflective(Vector3f::zeros(), 1.0, RGBSpectrum::WHITE);
        let bounds = SearchBounds { horizon: 0.0, outer: 30.0 };
        let crossing = crate::core::hitable::refine(&sphere, &segment,
                                                    &RayPoint::from_cartesian(start.0),
                                                    &RayPoint::from_cartesian(segment.end.0),
                                                    &Bisection::new(1e-5 * 0.4), &bounds);
        assert!(crossing.refined);
        assert!(((crossing.state.0).norm() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_adaptive_and_fixed_agree_far_from_the_hole() {
        let scene = horizon_and_sky();
        let fixed = integrator(-1.5, SchwarzschildStepper::Fixed);
        let adaptive = integrator(-1.5, SchwarzschildStepper::Adaptive);
        let origin = Vector3f::new(0.0, -20.0, 12.0);
        let direction = Vector3f::new(0.0, 1.0, 0.0);
        assert_eq!(fixed.trace(&scene, origin, direction, None), RGBSpectrum::WHITE);
        assert_eq!(adaptive.trace(&scene, origin, direction, None), RGBSpectrum::WHITE);
    }
}
