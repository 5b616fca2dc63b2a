// Copyright @yucwang 2026

use crate::core::hitable::RayPoint;
use crate::core::scene::Scene;
use crate::math::spectrum::RGBSpectrum;

pub trait Integrator: Sync {
    /// Colour of output pixel (`x`, `y`). When `path` is given every visited
    /// point, including the launch point and the final crossing, is pushed
    /// onto it.
    fn trace_ray_forward(&self, scene: &Scene, x: usize, y: usize, path: Option<&mut Vec<RayPoint>>) -> RGBSpectrum;
    fn resolution(&self) -> (usize, usize);
    fn describe(&self) -> String {
        String::from("Integrator")
    }
}
