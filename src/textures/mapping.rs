// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, PI, TWO_PI};
use crate::math::trig;

/// Equirectangular projection of a sphere onto a texture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SphericalMapping;

impl SphericalMapping {
    pub fn map(&self, theta: Float, phi: Float) -> Vector2f {
        Vector2f::new(phi / TWO_PI, theta / PI)
    }

    /// Texture coordinates of the unit direction (x, y, z), with y as the
    /// polar axis.
    pub fn map_cartesian(&self, x: Float, y: Float, z: Float) -> Vector2f {
        let u = 0.5 + trig::atan2(z, x) / TWO_PI;
        let v = 0.5 - y.max(-1.0).min(1.0).asin() / PI;
        Vector2f::new(u, v)
    }
}

/// Radial mapping for an annulus: u follows the azimuth, v runs from the
/// inner edge (0) to the outer edge (1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscMapping {
    r_min: Float,
    r_max: Float,
}

impl DiscMapping {
    pub fn new(r_min: Float, r_max: Float) -> Self {
        Self { r_min, r_max }
    }

    pub fn map(&self, r: Float, phi: Float) -> Vector2f {
        let span = self.r_max - self.r_min;
        let v = if span > 0.0 { (r - self.r_min) / span } else { 0.0 };
        Vector2f::new(phi / TWO_PI, v.max(0.0).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::HALF_PI;

    #[test]
    fn test_spherical_map() {
        let uv = SphericalMapping.map(HALF_PI, PI);
        assert!((uv.x - 0.5).abs() < 1e-12);
        assert!((uv.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_spherical_map_cartesian_poles() {
        let top = SphericalMapping.map_cartesian(0.0, 1.0, 0.0);
        assert!(top.y.abs() < 1e-12);
        let bottom = SphericalMapping.map_cartesian(0.0, -1.0, 0.0);
        assert!((bottom.y - 1.0).abs() < 1e-12);
        let front = SphericalMapping.map_cartesian(1.0, 0.0, 0.0);
        assert!((front.x - 0.5).abs() < 1e-12);
        // Slightly denormalised input must not produce NaN.
        assert!(SphericalMapping.map_cartesian(0.0, 1.0 + 1e-9, 0.0).y.is_finite());
    }

    #[test]
    fn test_disc_map_clamps_radius() {
        let mapping = DiscMapping::new(6.0, 20.0);
        assert_eq!(mapping.map(6.0, 0.0).y, 0.0);
        assert_eq!(mapping.map(30.0, 0.0).y, 1.0);
        assert!((mapping.map(13.0, 0.0).y - 0.5).abs() < 1e-12);
    }
}
