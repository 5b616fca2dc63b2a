// Copyright @yucwang 2026

use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;

pub trait Renderer {
    fn render(&self, scene: &Scene) -> Bitmap;
}
