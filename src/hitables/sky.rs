// Copyright @yucwang 2026

use crate::core::hitable::{Hit, Hitable, Interaction, RayPoint, SearchBounds};
use crate::math::constants::Float;
use crate::textures::mapping::SphericalMapping;
use crate::textures::pattern::Pattern;

/// Celestial sphere at `radius`; rays leaving it have escaped.
pub struct Sky {
    radius: Float,
    pattern: Pattern,
}

impl Sky {
    pub fn new(radius: Float, pattern: Pattern) -> Self {
        Self { radius, pattern }
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl Hitable for Sky {
    fn level(&self, point: &RayPoint) -> Float {
        self.radius - point.r
    }

    fn search_range(&self, bounds: &SearchBounds) -> (Float, Float) {
        (bounds.horizon, 2.0 * bounds.outer.max(self.radius))
    }

    fn interact(&self, hit: &Hit) -> Option<Interaction> {
        let p = &hit.point;
        let color = self.pattern.eval(p.theta, p.phi, || SphericalMapping.map(p.theta, p.phi));
        Some(Interaction::stop(color))
    }

    fn describe(&self) -> String {
        format!("Sky(r={}, {})", self.radius, self.pattern.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_sky_is_entered_from_inside() {
        let sky = Sky::new(30.0, Pattern::Solid(RGBSpectrum::WHITE));
        let inside = RayPoint::from_spherical(29.9, 1.0, 0.0);
        let outside = RayPoint::from_spherical(30.1, 1.0, 0.0);
        assert!(sky.crossed(sky.level(&inside), sky.level(&outside)));
        assert!(!sky.crossed(sky.level(&outside), sky.level(&inside)));
        let bounds = SearchBounds { horizon: 2.0, outer: 30.0 };
        assert_eq!(sky.search_range(&bounds), (2.0, 60.0));
    }
}
