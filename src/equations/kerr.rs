// Copyright @yucwang 2026

//! Photon geodesics around a rotating black hole in Boyer-Lindquist-like
//! coordinates, in units where the mass is 1.
//!
//! State layout: `[r, θ, φ, p_r, p_θ]`.

use crate::core::ode::OdeSystem;
use crate::math::constants::{Float, PI, SIN_THETA_FLOOR};

pub const KERR_N: usize = 5;

pub type KerrState = [Float; KERR_N];

pub const R: usize = 0;
pub const THETA: usize = 1;
pub const PHI: usize = 2;
pub const P_R: usize = 3;
pub const P_THETA: usize = 4;

// Launch energies below this are treated as degenerate.
const MIN_ENERGY2: Float = 1e-12;

fn floor_magnitude(v: Float, floor: Float) -> Float {
    if v.abs() < floor {
        if v < 0.0 { -floor } else { floor }
    } else {
        v
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KerrEquation {
    spin: Float,
    a2: Float,
    r0: Float,
    theta0: Float,
    phi0: Float,
    horizon_radius: Float,
    isco_radius: Float,
}

/// Conserved quantities of one ray, fixed at launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KerrRay {
    spin: Float,
    a2: Float,
    angular_momentum: Float,
    carter: Float,
}

impl KerrEquation {
    /// `distance` is the camera radius and doubles as the outer integration
    /// boundary. Angles are in degrees.
    pub fn new(distance: Float, theta_degrees: Float, phi_degrees: Float, spin: Float) -> Self {
        let a2 = spin * spin;
        Self {
            spin,
            a2,
            r0: distance,
            theta0: theta_degrees.to_radians(),
            phi0: phi_degrees.to_radians(),
            horizon_radius: 1.0 + (1.0 - a2).sqrt() + 1e-5,
            isco_radius: innermost_stable_orbit(spin),
        }
    }

    pub fn spin(&self) -> Float {
        self.spin
    }

    pub fn distance(&self) -> Float {
        self.r0
    }

    pub fn outer_radius(&self) -> Float {
        self.r0
    }

    pub fn horizon_radius(&self) -> Float {
        self.horizon_radius
    }

    pub fn isco_radius(&self) -> Float {
        self.isco_radius
    }

    /// Starting state and conserved quantities for a ray leaving the camera
    /// at pixel-plane angles (`alpha`, `beta`).
    pub fn launch(&self, alpha: Float, beta: Float) -> (KerrRay, KerrState) {
        let r0 = self.r0;
        let (sin_theta, cos_theta) = self.theta0.sin_cos();
        let sin_theta = floor_magnitude(sin_theta, SIN_THETA_FLOOR);
        let sin2 = sin_theta * sin_theta;
        let cos2 = cos_theta * cos_theta;

        let rdot0 = beta.cos() * alpha.cos();
        let thetadot0 = beta.sin();

        let r2 = r0 * r0;
        let sigma = r2 + self.a2 * cos2;
        let delta = r2 - 2.0 * r0 + self.a2;
        let s1 = floor_magnitude(sigma - 2.0 * r0, SIN_THETA_FLOOR);

        let sin_alpha = {
            let s = alpha.sin();
            if s.abs() < 1e-8 { 1e-8 } else { s }
        };
        let phidot0 = beta.cos() * sin_alpha / sin_theta;

        let mut energy2 = s1 * (rdot0 * rdot0 / delta + thetadot0 * thetadot0) + delta * sin2 * phidot0 * phidot0;
        if !(energy2 > MIN_ENERGY2) {
            log::trace!("degenerate launch energy {} at alpha={} beta={}, flooring", energy2, alpha, beta);
            energy2 = MIN_ENERGY2;
        }
        let energy = energy2.sqrt();

        let p_r = rdot0 * sigma / delta / energy;
        let p_theta = thetadot0 * sigma / energy;

        let angular_momentum = ((sigma * delta * phidot0 - 2.0 * self.spin * r0 * energy) * sin2 / s1) / energy;
        let carter = p_theta * p_theta + self.a2 * sin2 + angular_momentum * angular_momentum / sin2;

        let ray = KerrRay { spin: self.spin, a2: self.a2, angular_momentum, carter };
        (ray, [r0, self.theta0, self.phi0, p_r, p_theta])
    }

    /// Energy implied by the momenta of `y` and the ray's angular momentum,
    /// using the same local expression as the launch normalisation.
    pub fn launch_energy(&self, ray: &KerrRay, y: &KerrState) -> Float {
        let r = y[R];
        let (sin_theta, cos_theta) = y[THETA].sin_cos();
        let sin_theta = floor_magnitude(sin_theta, SIN_THETA_FLOOR);
        let sin2 = sin_theta * sin_theta;

        let sigma = r * r + self.a2 * cos_theta * cos_theta;
        let delta = r * r - 2.0 * r + self.a2;
        let s1 = floor_magnitude(sigma - 2.0 * r, SIN_THETA_FLOOR);

        let rdot = y[P_R] * delta / sigma;
        let thetadot = y[P_THETA] / sigma;
        let phidot = (ray.angular_momentum * s1 / sin2 + 2.0 * self.spin * r) / (sigma * delta);

        (s1 * (rdot * rdot / delta + thetadot * thetadot) + delta * sin2 * phidot * phidot).sqrt()
    }
}

impl KerrRay {
    pub fn angular_momentum(&self) -> Float {
        self.angular_momentum
    }

    pub fn carter(&self) -> Float {
        self.carter
    }
}

impl OdeSystem<KERR_N> for KerrRay {
    fn derivative(&self, y: &KerrState, dydx: &mut KerrState) {
        let r = y[R];
        let p_r = y[P_R];
        let p_theta = y[P_THETA];

        let r2 = r * r;
        let two_r = 2.0 * r;

        let (sin_theta, cos_theta) = y[THETA].sin_cos();
        let sigma = r2 + self.a2 * cos_theta * cos_theta;
        let delta = r2 - two_r + self.a2;
        let sig_inv = 1.0 / sigma;
        let bot = 1.0 / (sigma * delta);

        let sin_theta = floor_magnitude(sin_theta, SIN_THETA_FLOOR);
        let sin2 = sin_theta * sin_theta;
        let l = self.angular_momentum;

        dydx[R] = -p_r * delta * sig_inv;
        dydx[THETA] = -p_theta * sig_inv;
        dydx[PHI] = -(two_r * self.spin + (sigma - two_r) * l / sin2) * bot;
        dydx[P_R] = -(((r - 1.0) * (-self.carter) + two_r * (r2 + self.a2) - 2.0 * self.spin * l) * bot
            - 2.0 * p_r * p_r * (r - 1.0) * sig_inv);
        dydx[P_THETA] = -sin_theta * cos_theta * (l * l / (sin2 * sin2) - self.a2) * sig_inv;
    }
}

/// Bardeen's closed form for the prograde innermost stable circular orbit.
pub fn innermost_stable_orbit(spin: Float) -> Float {
    let a2 = spin * spin;
    let z1 = 1.0 + (1.0 - a2).cbrt() * ((1.0 + spin).cbrt() + (1.0 - spin).cbrt());
    let z2 = (3.0 * a2 + z1 * z1).sqrt();
    3.0 + z2 - ((3.0 - z1) * (3.0 + z1 + 2.0 * z2)).sqrt()
}

/// Which side of the equatorial plane θ lies on: 1 below, -1 above, 0 on it.
pub fn equator_side(theta: Float) -> i8 {
    let half_pi = 0.5 * PI;
    if theta > half_pi {
        1
    } else if theta < half_pi {
        -1
    } else {
        0
    }
}
