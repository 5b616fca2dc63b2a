// Copyright @yucwang 2026

use crate::core::texture::Texture;
use crate::math::constants::{Float, Vector2f, CHECKER_CELL, CHECKER_HALF_CELL};
use crate::math::coordinates::double_mod;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Parity of the (θ, φ) checkerboard with π/3 cells.
pub fn checker(theta: Float, phi: Float) -> bool {
    let m1 = double_mod(phi, CHECKER_CELL);
    let m2 = double_mod(theta, CHECKER_CELL);
    (m1 < CHECKER_HALF_CELL) ^ (m2 < CHECKER_HALF_CELL)
}

/// Azimuthal stripes, used on disks.
pub fn stripe(phi: Float) -> bool {
    double_mod(phi, CHECKER_CELL) < CHECKER_HALF_CELL
}

/// How a surface picks its colour.
#[derive(Clone)]
pub enum Pattern {
    Solid(RGBSpectrum),
    Checkered { first: RGBSpectrum, second: RGBSpectrum },
    Textured(Arc<dyn Texture>),
}

impl Pattern {
    pub fn checkered(first: RGBSpectrum, second: RGBSpectrum) -> Self {
        Pattern::Checkered { first, second }
    }

    /// Colour for angular coordinates; `uv` is only consulted for textures.
    pub fn eval(&self, theta: Float, phi: Float, uv: impl FnOnce() -> Vector2f) -> RGBSpectrum {
        match self {
            Pattern::Solid(color) => *color,
            Pattern::Checkered { first, second } => {
                if checker(theta, phi) { *first } else { *second }
            },
            Pattern::Textured(texture) => texture.eval(uv()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Pattern::Solid(_) => String::from("solid"),
            Pattern::Checkered { .. } => String::from("checkered"),
            Pattern::Textured(texture) => texture.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_alternates() {
        assert!(!checker(0.1, 0.1));
        assert!(checker(0.1, 0.6));
        assert!(checker(0.6, 0.1));
        assert!(!checker(0.6, 0.6));
        // Negative angles use floored modulo.
        assert!(checker(0.1, -0.1));
    }

    #[test]
    fn test_pattern_eval() {
        let p = Pattern::checkered(RGBSpectrum::WHITE, RGBSpectrum::BLACK);
        assert_eq!(p.eval(0.1, 0.6, || Vector2f::zeros()), RGBSpectrum::WHITE);
        assert_eq!(p.eval(0.1, 0.1, || Vector2f::zeros()), RGBSpectrum::BLACK);
        let solid = Pattern::Solid(RGBSpectrum::GREEN);
        assert_eq!(solid.eval(0.0, 0.0, || Vector2f::zeros()), RGBSpectrum::GREEN);
    }
}
