// Copyright @yucwang 2026

use crate::core::hitable::{Hit, Hitable, Interaction, RayPoint, Response};
use crate::math::constants::{Float, Vector3f, PI};
use crate::math::coordinates::{to_cartesian, to_spherical};
use crate::math::spectrum::RGBSpectrum;
use crate::textures::mapping::SphericalMapping;
use crate::textures::pattern::Pattern;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
    pattern: Pattern,
    reflective: bool,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float, pattern: Pattern) -> Self {
        Self { center, radius, pattern, reflective: false }
    }

    /// Mirror sphere. Models that cannot redirect a ray stop on it and use
    /// `color` instead.
    pub fn reflective(center: Vector3f, radius: Float, color: RGBSpectrum) -> Self {
        Self { center, radius, pattern: Pattern::Solid(color), reflective: true }
    }

    pub fn center(&self) -> &Vector3f {
        &self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    pub fn is_reflective(&self) -> bool {
        self.reflective
    }

    fn color(&self, direction: &Vector3f) -> RGBSpectrum {
        let local = to_spherical(direction);
        let (theta, phi) = (local.y, local.z);
        self.pattern.eval(theta, phi, || {
            // Rotate by π and swap axes so textures come out upright.
            let d = to_cartesian(1.0, theta, phi + PI);
            SphericalMapping.map_cartesian(-d.x, d.z, d.y)
        })
    }
}

impl Hitable for Sphere {
    fn level(&self, point: &RayPoint) -> Float {
        (point.position - self.center).norm() - self.radius
    }

    fn interact(&self, hit: &Hit) -> Option<Interaction> {
        let offset = hit.point.position - self.center;
        let norm = offset.norm();
        let direction = if norm > 0.0 { offset / norm } else { Vector3f::z() };
        let color = self.color(&direction);
        let response = if self.reflective {
            Response::Reflect { normal: direction }
        } else {
            Response::Stop
        };
        Some(Interaction { color: Some(color), response })
    }

    fn describe(&self) -> String {
        format!("Sphere(c=({}, {}, {}), r={}, {}{})",
                self.center.x, self.center.y, self.center.z, self.radius,
                self.pattern.describe(), if self.reflective { ", reflective" } else { "" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_level() {
        let sphere = Sphere::new(Vector3f::new(1.0, 2.0, 3.0), 0.5, Pattern::Solid(RGBSpectrum::WHITE));
        let p = RayPoint::from_cartesian(Vector3f::new(1.0, 2.0, 4.0));
        assert!((sphere.level(&p) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_reflective_sphere_reports_normal() {
        let sphere = Sphere::reflective(Vector3f::zeros(), 1.0, RGBSpectrum::WHITE);
        let hit = Hit { point: RayPoint::from_cartesian(Vector3f::new(0.0, -0.9999, 0.0)), side: 1.0 };
        let interaction = sphere.interact(&hit).unwrap();
        match interaction.response {
            Response::Reflect { normal } => assert!((normal - Vector3f::new(0.0, -1.0, 0.0)).norm() < 1e-12),
            other => panic!("unexpected response {:?}", other),
        }
        assert_eq!(interaction.color, Some(RGBSpectrum::WHITE));
    }

    #[test]
    fn test_checkered_sphere_stops() {
        let blue = RGBSpectrum::from_bytes(65, 105, 225);
        let dark = RGBSpectrum::from_bytes(0, 0, 139);
        let sphere = Sphere::new(Vector3f::new(-10.0, -10.0, -10.0), 1.0, Pattern::checkered(blue, dark));
        let hit = Hit { point: RayPoint::from_cartesian(Vector3f::new(-9.0, -10.0, -10.0)), side: 1.0 };
        let interaction = sphere.interact(&hit).unwrap();
        assert_eq!(interaction.response, Response::Stop);
        let color = interaction.color.unwrap();
        assert!(color == blue || color == dark);
    }
}
