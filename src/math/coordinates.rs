// Copyright @yucwang 2026

use super::constants::{Float, Vector3f};
use super::trig;

/// (r, θ, φ) to Cartesian, with θ measured from the +z axis.
pub fn to_cartesian(r: Float, theta: Float, phi: Float) -> Vector3f {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vector3f::new(r * cos_phi * sin_theta, r * sin_phi * sin_theta, r * cos_theta)
}

/// Cartesian to (r, θ, φ). The origin maps to (0, 0, 0).
pub fn to_spherical(p: &Vector3f) -> Vector3f {
    let r = p.norm();
    if r == 0.0 {
        return Vector3f::zeros();
    }
    Vector3f::new(r, trig::acos(p.z / r), trig::atan2(p.y, p.x))
}

/// Floored modulo: the result always has the sign of `m`.
pub fn double_mod(n: Float, m: Float) -> Float {
    n - m * (n / m).floor()
}

/// Mirror `v` about the plane with unit normal `n`.
pub fn reflect(v: &Vector3f, n: &Vector3f) -> Vector3f {
    v - n * (2.0 * v.dot(n))
}
