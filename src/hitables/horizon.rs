// Copyright @yucwang 2026

use crate::core::hitable::{Hit, Hitable, Interaction, RayPoint, SearchBounds};
use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;
use crate::textures::mapping::SphericalMapping;
use crate::textures::pattern::Pattern;

/// Event horizon. Anything that falls in is absorbed.
pub struct Horizon {
    radius: Float,
    pattern: Pattern,
}

impl Horizon {
    pub fn new(radius: Float, pattern: Pattern) -> Self {
        Self { radius, pattern }
    }

    pub fn black(radius: Float) -> Self {
        Self::new(radius, Pattern::Solid(RGBSpectrum::BLACK))
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl Hitable for Horizon {
    fn level(&self, point: &RayPoint) -> Float {
        point.r - self.radius
    }

    fn search_range(&self, bounds: &SearchBounds) -> (Float, Float) {
        (0.0, bounds.outer)
    }

    fn interact(&self, hit: &Hit) -> Option<Interaction> {
        let p = &hit.point;
        let color = self.pattern.eval(p.theta, p.phi, || SphericalMapping.map(p.theta, -p.phi));
        Some(Interaction::stop(color))
    }

    fn describe(&self) -> String {
        format!("Horizon(r={}, {})", self.radius, self.pattern.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hitable::Response;

    #[test]
    fn test_horizon_absorbs() {
        let horizon = Horizon::new(2.0, Pattern::checkered(RGBSpectrum::BLACK, RGBSpectrum::GREEN));
        let outside = RayPoint::from_spherical(2.1, 1.0, 0.0);
        let inside = RayPoint::from_spherical(1.9, 1.0, 0.0);
        assert!(horizon.crossed(horizon.level(&outside), horizon.level(&inside)));
        assert!(!horizon.crossed(horizon.level(&inside), horizon.level(&outside)));

        let interaction = horizon.interact(&Hit { point: inside, side: 1.0 }).unwrap();
        assert_eq!(interaction.response, Response::Stop);
        assert!(interaction.color == Some(RGBSpectrum::BLACK) || interaction.color == Some(RGBSpectrum::GREEN));
    }
}
