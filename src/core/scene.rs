// Copyright @yucwang 2026

use crate::core::hitable::Hitable;
use crate::core::texture::Texture;
use crate::equations::kerr::KerrEquation;
use crate::hitables::disk::{Disk, DiskSurface};
use crate::hitables::horizon::Horizon;
use crate::hitables::sky::Sky;
use crate::hitables::sphere::Sphere;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::textures::pattern::Pattern;
use std::sync::Arc;

pub const DEFAULT_DISK_OUTER_RADIUS: Float = 20.0;
pub const SCHWARZSCHILD_HORIZON_RADIUS: Float = 1.0;

/// Named colours used by the built-in scenes.
pub mod palette {
    use crate::math::spectrum::RGBSpectrum;

    pub fn blue_violet() -> RGBSpectrum { RGBSpectrum::from_bytes(138, 43, 226) }
    pub fn medium_blue() -> RGBSpectrum { RGBSpectrum::from_bytes(0, 0, 205) }
    pub fn forest_green() -> RGBSpectrum { RGBSpectrum::from_bytes(34, 139, 34) }
    pub fn light_sea_green() -> RGBSpectrum { RGBSpectrum::from_bytes(32, 178, 170) }
    pub fn royal_blue() -> RGBSpectrum { RGBSpectrum::from_bytes(65, 105, 225) }
    pub fn dark_blue() -> RGBSpectrum { RGBSpectrum::from_bytes(0, 0, 139) }
    pub fn gold() -> RGBSpectrum { RGBSpectrum::from_bytes(255, 215, 0) }
    pub fn dark_orange() -> RGBSpectrum { RGBSpectrum::from_bytes(255, 140, 0) }
    pub fn dim_gray() -> RGBSpectrum { RGBSpectrum::from_bytes(105, 105, 105) }
    pub fn midnight_blue() -> RGBSpectrum { RGBSpectrum::from_bytes(25, 25, 112) }
}

/// Everything a ray can run into, tested in insertion order.
#[derive(Clone, Default)]
pub struct Scene {
    hitables: Vec<Arc<dyn Hitable>>,
}

impl Scene {
    pub fn new() -> Self {
        Self { hitables: Vec::new() }
    }

    pub fn with_hitables(hitables: Vec<Arc<dyn Hitable>>) -> Self {
        Self { hitables }
    }

    pub fn add_hitable(&mut self, hitable: Arc<dyn Hitable>) {
        self.hitables.push(hitable);
    }

    pub fn hitables(&self) -> &[Arc<dyn Hitable>] {
        &self.hitables
    }

    pub fn is_empty(&self) -> bool {
        self.hitables.is_empty()
    }

    pub fn describe(&self) -> String {
        let names: Vec<String> = self.hitables.iter().map(|h| h.describe()).collect();
        format!("Scene[{}]", names.join(", "))
    }
}

pub fn checkered_disk(inner: Float, outer: Float) -> Disk {
    Disk::new(inner, outer, DiskSurface::Checkered {
        top: [palette::blue_violet(), palette::medium_blue()],
        bottom: [palette::forest_green(), palette::light_sea_green()],
    })
}

pub fn sky_pattern(texture: Option<Arc<dyn Texture>>) -> Pattern {
    match texture {
        Some(texture) => Pattern::Textured(texture),
        None => Pattern::checkered(palette::dim_gray(), palette::midnight_blue()),
    }
}

/// The stock Kerr scene: disk from the innermost stable orbit out to 20,
/// horizon, sky at the camera distance and two small spheres.
pub fn default_kerr_scene(equation: &KerrEquation, sky: Option<Arc<dyn Texture>>) -> Scene {
    let mut scene = Scene::new();
    scene.add_hitable(Arc::new(checkered_disk(equation.isco_radius(), DEFAULT_DISK_OUTER_RADIUS)));
    scene.add_hitable(Arc::new(Horizon::black(equation.horizon_radius())));
    scene.add_hitable(Arc::new(Sky::new(equation.outer_radius(), sky_pattern(sky))));
    scene.add_hitable(Arc::new(Sphere::new(Vector3f::new(16.0, 0.0, 4.0), 1.0,
                                           Pattern::checkered(palette::gold(), palette::dark_orange()))));
    scene.add_hitable(Arc::new(Sphere::new(Vector3f::new(-10.0, -10.0, -10.0), 1.0,
                                           Pattern::checkered(palette::royal_blue(), palette::dark_blue()))));
    scene
}

/// The stock Schwarzschild scene. Distances are in units of the horizon
/// radius.
pub fn default_schwarzschild_scene(sky_radius: Float, sky: Option<Arc<dyn Texture>>) -> Scene {
    let mut scene = Scene::new();
    scene.add_hitable(Arc::new(checkered_disk(3.0, 10.0)));
    scene.add_hitable(Arc::new(Horizon::new(SCHWARZSCHILD_HORIZON_RADIUS,
                                            Pattern::checkered(RGBSpectrum::BLACK, RGBSpectrum::GREEN))));
    scene.add_hitable(Arc::new(Sky::new(sky_radius, sky_pattern(sky))));
    scene.add_hitable(Arc::new(Sphere::reflective(Vector3f::new(7.0, 3.0, 1.0), 1.0, RGBSpectrum::WHITE)));
    scene.add_hitable(Arc::new(Sphere::new(Vector3f::new(-6.0, 2.0, -2.0), 1.0,
                                           Pattern::checkered(palette::royal_blue(), palette::dark_blue()))));
    scene
}
