// Copyright @yucwang 2026

//! Inverse trigonometric functions used by the coordinate conversions.
//!
//! By default these forward to the standard library. With the `fast-trig`
//! feature enabled they read from process-wide lookup tables instead, which
//! trades a few digits of accuracy for speed in the per-step conversions.

use super::constants::{Float, HALF_PI, PI};

#[cfg(feature = "fast-trig")]
use std::sync::OnceLock;

pub const DEFAULT_TABLE_ENTRIES: usize = 1_000_000;

/// Lookup tables for `acos` and `atan` sampled uniformly over [-1, 1].
pub struct TrigTables {
    acos: Vec<Float>,
    atan: Vec<Float>,
}

impl TrigTables {
    pub fn new(entries: usize) -> Self {
        let entries = entries.max(2);
        let step = 2.0 / ((entries - 1) as Float);
        let sample = |i: usize| (-1.0 + step * (i as Float)).min(1.0);

        Self {
            acos: (0..entries).map(|i| sample(i).acos()).collect(),
            atan: (0..entries).map(|i| sample(i).atan()).collect(),
        }
    }

    fn index(&self, x: Float) -> usize {
        let last = self.acos.len() - 1;
        let t = ((x.max(-1.0).min(1.0) + 1.0) * 0.5 * (last as Float)).round();
        (t as usize).min(last)
    }

    pub fn acos(&self, x: Float) -> Float {
        self.acos[self.index(x)]
    }

    pub fn atan(&self, x: Float) -> Float {
        self.atan[self.index(x)]
    }

    /// Four-quadrant arctangent built from the [-1, 1] table, folding
    /// |y/x| > 1 through atan(z) = π/2 − atan(1/z).
    pub fn atan2(&self, y: Float, x: Float) -> Float {
        if x != 0.0 {
            if x.abs() > y.abs() {
                let z = y / x;
                if x > 0.0 {
                    self.atan(z)
                } else if y >= 0.0 {
                    self.atan(z) + PI
                } else {
                    self.atan(z) - PI
                }
            } else {
                let z = x / y;
                if y > 0.0 {
                    HALF_PI - self.atan(z)
                } else {
                    -HALF_PI - self.atan(z)
                }
            }
        } else if y > 0.0 {
            HALF_PI
        } else if y < 0.0 {
            -HALF_PI
        } else {
            0.0
        }
    }
}

#[cfg(feature = "fast-trig")]
fn tables() -> &'static TrigTables {
    static TABLES: OnceLock<TrigTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        log::debug!("Building trigonometric lookup tables ({} entries).", DEFAULT_TABLE_ENTRIES);
        TrigTables::new(DEFAULT_TABLE_ENTRIES)
    })
}

#[cfg(feature = "fast-trig")]
pub fn acos(x: Float) -> Float {
    tables().acos(x)
}

#[cfg(not(feature = "fast-trig"))]
pub fn acos(x: Float) -> Float {
    x.max(-1.0).min(1.0).acos()
}

#[cfg(feature = "fast-trig")]
pub fn atan2(y: Float, x: Float) -> Float {
    tables().atan2(y, x)
}

#[cfg(not(feature = "fast-trig"))]
pub fn atan2(y: Float, x: Float) -> Float {
    y.atan2(x)
}
