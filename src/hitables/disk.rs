// Copyright @yucwang 2026

use crate::core::hitable::{Hit, Hitable, Interaction, RayPoint};
use crate::core::texture::Texture;
use crate::math::constants::{Float, HALF_PI};
use crate::math::spectrum::RGBSpectrum;
use crate::textures::mapping::DiscMapping;
use crate::textures::pattern::stripe;
use std::sync::Arc;

pub enum DiskSurface {
    Solid(RGBSpectrum),
    /// Azimuthal stripes with separate colours above and below the plane.
    Checkered { top: [RGBSpectrum; 2], bottom: [RGBSpectrum; 2] },
    Textured(Arc<dyn Texture>),
}

/// Flat annulus in the equatorial plane. Crossing it tints the ray and the
/// integration carries on.
pub struct Disk {
    inner: Float,
    outer: Float,
    surface: DiskSurface,
    mapping: DiscMapping,
}

impl Disk {
    pub fn new(inner: Float, outer: Float, surface: DiskSurface) -> Self {
        Self { inner, outer, surface, mapping: DiscMapping::new(inner, outer) }
    }

    pub fn inner(&self) -> Float {
        self.inner
    }

    pub fn outer(&self) -> Float {
        self.outer
    }

    fn color(&self, side: Float, point: &RayPoint) -> RGBSpectrum {
        match &self.surface {
            DiskSurface::Solid(color) => *color,
            DiskSurface::Checkered { top, bottom } => {
                // Coming from θ < π/2 means the ray saw the top face.
                let colors = if side < 0.0 { top } else { bottom };
                if stripe(point.phi) { colors[0] } else { colors[1] }
            },
            DiskSurface::Textured(texture) => texture.eval(self.mapping.map(point.r, point.phi)),
        }
    }
}

impl Hitable for Disk {
    fn level(&self, point: &RayPoint) -> Float {
        point.theta - HALF_PI
    }

    fn two_sided(&self) -> bool {
        true
    }

    fn interact(&self, hit: &Hit) -> Option<Interaction> {
        let r = hit.point.r;
        if r >= self.inner && r <= self.outer {
            Some(Interaction::tint(self.color(hit.side, &hit.point)))
        } else {
            None
        }
    }

    fn describe(&self) -> String {
        format!("Disk({}..{})", self.inner, self.outer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hitable::Response;

    fn checkered() -> Disk {
        Disk::new(6.0, 20.0, DiskSurface::Checkered {
            top: [RGBSpectrum::WHITE, RGBSpectrum::BLACK],
            bottom: [RGBSpectrum::GREEN, RGBSpectrum::FAILURE],
        })
    }

    #[test]
    fn test_disk_radius_window() {
        let disk = checkered();
        let inside = Hit { point: RayPoint::from_spherical(10.0, HALF_PI, 0.1), side: -1.0 };
        let outside = Hit { point: RayPoint::from_spherical(25.0, HALF_PI, 0.1), side: -1.0 };
        let interaction = disk.interact(&inside).unwrap();
        assert_eq!(interaction.response, Response::Continue);
        assert_eq!(interaction.color, Some(RGBSpectrum::WHITE));
        assert!(disk.interact(&outside).is_none());
    }

    #[test]
    fn test_disk_faces() {
        let disk = checkered();
        let bottom = Hit { point: RayPoint::from_spherical(10.0, HALF_PI, 0.7), side: 1.0 };
        assert_eq!(disk.interact(&bottom).unwrap().color, Some(RGBSpectrum::FAILURE));
    }

    #[test]
    fn test_disk_is_two_sided() {
        let disk = checkered();
        let above = RayPoint::from_spherical(10.0, HALF_PI - 0.01, 0.0);
        let below = RayPoint::from_spherical(10.0, HALF_PI + 0.01, 0.0);
        assert!(disk.crossed(disk.level(&above), disk.level(&below)));
        assert!(disk.crossed(disk.level(&below), disk.level(&above)));
    }
}
