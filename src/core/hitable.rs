// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector3f};
use crate::math::coordinates::{to_cartesian, to_spherical};
use crate::math::spectrum::RGBSpectrum;
use crate::solvers::bisection::Bisection;

/// Model independent view of a ray state: Cartesian position plus the same
/// point in spherical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPoint {
    pub position: Vector3f,
    pub r: Float,
    pub theta: Float,
    pub phi: Float,
}

impl RayPoint {
    pub fn from_spherical(r: Float, theta: Float, phi: Float) -> Self {
        Self { position: to_cartesian(r, theta, phi), r, theta, phi }
    }

    pub fn from_cartesian(position: Vector3f) -> Self {
        let s = to_spherical(&position);
        Self { position, r: s.x, theta: s.y, phi: s.z }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.theta.is_finite() && self.phi.is_finite()
            && self.position.iter().all(|v| v.is_finite())
    }
}

/// Radii the integrator considers meaningful for the current model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBounds {
    pub horizon: Float,
    pub outer: Float,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    /// Keep integrating from the unrefined state.
    Continue,
    /// Continue from the crossing with the velocity mirrored about `normal`.
    Reflect { normal: Vector3f },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub color: Option<RGBSpectrum>,
    pub response: Response,
}

impl Interaction {
    pub fn stop(color: RGBSpectrum) -> Self {
        Self { color: Some(color), response: Response::Stop }
    }

    pub fn tint(color: RGBSpectrum) -> Self {
        Self { color: Some(color), response: Response::Continue }
    }

    pub fn reflect(normal: Vector3f) -> Self {
        Self { color: None, response: Response::Reflect { normal } }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point: RayPoint,
    /// Sign of the level function before the crossing.
    pub side: Float,
}

pub trait Hitable: Send + Sync {
    /// Signed distance-like value whose sign change marks a crossing.
    fn level(&self, point: &RayPoint) -> Float;

    /// Two-sided surfaces are crossed in either direction, closed ones only
    /// when entering (level going from >= 0 to < 0).
    fn two_sided(&self) -> bool {
        false
    }

    fn search_range(&self, bounds: &SearchBounds) -> (Float, Float) {
        (bounds.horizon, bounds.outer)
    }

    fn interact(&self, hit: &Hit) -> Option<Interaction>;

    fn describe(&self) -> String {
        String::from("Hitable")
    }

    fn crossed(&self, previous: Float, current: Float) -> bool {
        if self.two_sided() {
            // A ray sitting exactly on the plane has no side yet.
            previous != 0.0 && current * previous.signum() <= 0.0
        } else {
            previous >= 0.0 && current < 0.0
        }
    }
}

/// One integration step that can be re-evaluated at any shorter length.
pub trait Segment {
    type State: Copy;

    fn taken(&self) -> Float;
    fn end_state(&self) -> Self::State;
    fn advance(&self, h: Float) -> Self::State;
    fn point(&self, state: &Self::State) -> RayPoint;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<S> {
    pub state: S,
    pub point: RayPoint,
    pub side: Float,
    /// False when the search left its domain and `state` is the unrefined
    /// end of the step.
    pub refined: bool,
}

/// Narrow a step known to cross `hitable` down to the crossing point.
pub fn refine<H, G>(
    hitable: &H,
    segment: &G,
    start: &RayPoint,
    end: &RayPoint,
    bisection: &Bisection,
    bounds: &SearchBounds,
) -> Crossing<G::State>
where
    H: Hitable + ?Sized,
    G: Segment,
{
    let previous = hitable.level(start);
    let side = if previous < 0.0 { -1.0 } else { 1.0 };
    let (low, high) = hitable.search_range(bounds);

    let refined = bisection.search(
        segment.taken(),
        |h| {
            let state = segment.advance(h);
            (state, segment.point(&state))
        },
        |candidate: &(G::State, RayPoint)| hitable.crossed(previous, hitable.level(&candidate.1)),
        |candidate: &(G::State, RayPoint)| {
            let point = &candidate.1;
            point.is_finite() && point.r > low && point.r < high
        },
    );

    match refined {
        Some(refined) => {
            let (state, point) = refined.state;
            Crossing { state, point, side, refined: true }
        },
        None => {
            log::debug!("{}: crossing search left its domain, keeping the full step", hitable.describe());
            Crossing { state: segment.end_state(), point: *end, side, refined: false }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::HALF_PI;

    struct Plane;

    impl Hitable for Plane {
        fn level(&self, point: &RayPoint) -> Float {
            point.theta - HALF_PI
        }

        fn two_sided(&self) -> bool {
            true
        }

        fn interact(&self, _hit: &Hit) -> Option<Interaction> {
            None
        }
    }

    struct Ball;

    impl Hitable for Ball {
        fn level(&self, point: &RayPoint) -> Float {
            point.r - 1.0
        }

        fn interact(&self, _hit: &Hit) -> Option<Interaction> {
            Some(Interaction::stop(RGBSpectrum::WHITE))
        }
    }

    struct Line {
        origin: Vector3f,
        direction: Vector3f,
        taken: Float,
    }

    impl Segment for Line {
        type State = Vector3f;

        fn taken(&self) -> Float {
            self.taken
        }

        fn end_state(&self) -> Vector3f {
            self.advance(self.taken)
        }

        fn advance(&self, h: Float) -> Vector3f {
            self.origin + self.direction * h
        }

        fn point(&self, state: &Vector3f) -> RayPoint {
            RayPoint::from_cartesian(*state)
        }
    }

    #[test]
    fn test_crossing_rules() {
        assert!(Plane.crossed(0.1, -0.1));
        assert!(Plane.crossed(-0.1, 0.2));
        assert!(!Plane.crossed(0.1, 0.2));
        assert!(!Plane.crossed(0.0, -0.1));
        assert!(Ball.crossed(0.5, -0.1));
        assert!(!Ball.crossed(-0.5, 0.1));
        assert!(!Ball.crossed(-0.5, -0.1));
    }

    #[test]
    fn test_refine_radial_chord() {
        let line = Line {
            origin: Vector3f::new(1.2, 0.0, 0.0),
            direction: Vector3f::new(-1.0, 0.0, 0.0),
            taken: 0.4,
        };
        let start = line.point(&line.origin);
        let end = line.point(&line.end_state());
        let bounds = SearchBounds { horizon: 0.0, outer: 10.0 };
        let crossing = refine(&Ball, &line, &start, &end, &Bisection::new(1e-7), &bounds);
        assert!(crossing.refined);
        assert!((crossing.point.r - 1.0).abs() < 1e-6);
        assert!(crossing.point.r <= 1.0);
        assert_eq!(crossing.side, 1.0);
    }

    #[test]
    fn test_refine_out_of_domain_keeps_end() {
        let line = Line {
            origin: Vector3f::new(1.2, 0.0, 0.0),
            direction: Vector3f::new(-1.0, 0.0, 0.0),
            taken: 0.4,
        };
        let start = line.point(&line.origin);
        let end = line.point(&line.end_state());
        let bounds = SearchBounds { horizon: 1.15, outer: 10.0 };
        let crossing = refine(&Ball, &line, &start, &end, &Bisection::new(1e-7), &bounds);
        assert!(!crossing.refined);
        assert_eq!(crossing.point, end);
    }

    #[test]
    fn test_ray_point_views_agree() {
        let a = RayPoint::from_spherical(2.0, 1.0, -0.5);
        let b = RayPoint::from_cartesian(a.position);
        assert!((a.r - b.r).abs() < 1e-12);
        assert!((a.theta - b.theta).abs() < 1e-12);
        assert!((a.phi - b.phi).abs() < 1e-12);
    }
}
