// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::Float;

pub const DEFAULT_FIELD_SCALE: Float = 20.0;
const ANGLE_PER_UNIT: Float = 0.0025;

/// Camera for the Kerr model: each pixel becomes a pair of small launch
/// angles (α, β) around the direction towards the black hole.
#[derive(Debug, Clone, PartialEq)]
pub struct PinholeCamera {
    width: usize,
    height: usize,
    tilt_sin: Float,
    tilt_cos: Float,
    /// Horizontal shift, as a fraction of the image width.
    yaw: Float,
    range: Float,
}

impl PinholeCamera {
    pub fn new(width: usize, height: usize, tilt_degrees: Float, yaw: Float, field_scale: Float) -> Self {
        let (tilt_sin, tilt_cos) = tilt_degrees.to_radians().sin_cos();
        let span = width.saturating_sub(1).max(1) as Float;
        Self {
            width,
            height,
            tilt_sin,
            tilt_cos,
            yaw,
            range: ANGLE_PER_UNIT * field_scale / span,
        }
    }

    pub fn with_resolution(width: usize, height: usize) -> Self {
        Self::new(width, height, 0.0, 0.0, DEFAULT_FIELD_SCALE)
    }

    pub fn range(&self) -> Float {
        self.range
    }
}

impl Sensor for PinholeCamera {
    type Sample = (Float, Float);

    fn sample(&self, x: usize, y: usize) -> (Float, Float) {
        // Launch rows run bottom-up.
        let row = self.height.saturating_sub(y + 1);

        let x_rot = x as Float - ((self.width + 1) / 2) as Float - self.yaw * self.width as Float;
        let y_rot = row as Float - ((self.height + 1) / 2) as Float;

        let alpha = (x_rot * self.tilt_cos - y_rot * self.tilt_sin).trunc() * self.range;
        let beta = (y_rot * self.tilt_cos + x_rot * self.tilt_sin).trunc() * self.range;
        (alpha, beta)
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn describe(&self) -> String {
        format!("PinholeCamera({}x{}, range={})", self.width, self.height, self.range)
    }
}
