// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector3f};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRay {
    pub origin: Vector3f,
    pub direction: Vector3f,
}

/// Pinhole camera in Cartesian space, used by the Schwarzschild model.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    side: Vector3f,
    up: Vector3f,
    tan_fov: Float,
    aspect: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    /// `fov_degrees` sets the horizontal spread: the image edges sit at
    /// ±tan(fov)/2 on the unit view plane.
    pub fn new(
        origin: Vector3f,
        target: Vector3f,
        up: Vector3f,
        fov_degrees: Float,
        width: usize,
        height: usize,
    ) -> Self {
        let forward = (target - origin).normalize();
        let side = up.cross(&forward).normalize();
        let up = forward.cross(&side);

        Self {
            origin,
            forward,
            side,
            up,
            tan_fov: fov_degrees.to_radians().tan(),
            aspect: height as Float / width.max(1) as Float,
            width,
            height,
        }
    }

    pub fn origin(&self) -> &Vector3f {
        &self.origin
    }
}

impl Sensor for PerspectiveCamera {
    type Sample = CameraRay;

    fn sample(&self, x: usize, y: usize) -> CameraRay {
        let inv_width = 1.0 / self.width.max(1) as Float;
        let inv_height = 1.0 / self.height.max(1) as Float;

        let vx = (x as Float * inv_width - 0.5) * self.tan_fov;
        let vy = (0.5 - y as Float * inv_height) * self.aspect * self.tan_fov;
        let direction = (self.side * vx + self.up * vy + self.forward).normalize();

        CameraRay { origin: self.origin, direction }
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera({}x{}, origin=({}, {}, {}))",
                self.width, self.height, self.origin.x, self.origin.y, self.origin.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_camera_center_ray() {
        let camera = PerspectiveCamera::new(Vector3f::new(0.0, -20.0, 0.0),
                                            Vector3f::zeros(),
                                            Vector3f::new(0.0, 0.0, 1.0),
                                            45.0, 4, 4);
        let ray = camera.sample(2, 2);
        assert!((ray.direction - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        assert_eq!(ray.origin, Vector3f::new(0.0, -20.0, 0.0));
    }

    #[test]
    fn test_top_row_points_up() {
        let camera = PerspectiveCamera::new(Vector3f::new(0.0, -20.0, 0.0),
                                            Vector3f::zeros(),
                                            Vector3f::new(0.0, 0.0, 1.0),
                                            45.0, 4, 4);
        assert!(camera.sample(2, 0).direction.z > 0.0);
        assert!(camera.sample(2, 3).direction.z < 0.0);
        assert!((camera.sample(0, 0).direction.norm() - 1.0).abs() < 1e-12);
    }
}
