/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f64;
pub type Int = i32;
pub type UInt = u32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = std::f64::consts::PI;
pub const HALF_PI: Float = std::f64::consts::FRAC_PI_2;
pub const TWO_PI: Float = 2.0 * std::f64::consts::PI;
pub const INV_PI: Float = std::f64::consts::FRAC_1_PI;

// Checker cells used by every patterned surface.
pub const CHECKER_CELL: Float = PI / 3.0;
pub const CHECKER_HALF_CELL: Float = PI / 6.0;

// Smallest |sin θ| the geodesic equations ever divide by.
pub const SIN_THETA_FLOOR: Float = 1e-8;
