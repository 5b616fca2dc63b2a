// Copyright @yucwang 2026

//! Pieces shared by the per-pixel ray-march loops.

use crate::core::hitable::{refine, Crossing, Hit, RayPoint, Response, SearchBounds, Segment};
use crate::core::scene::Scene;
use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;
use crate::solvers::bisection::Bisection;

/// Disk colours picked up along the way.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tint(Option<RGBSpectrum>);

impl Tint {
    pub fn add(&mut self, color: RGBSpectrum) {
        self.0 = Some(match self.0 {
            Some(tint) => color.tinted(&tint),
            None => color,
        });
    }

    pub fn apply(&self, hit: RGBSpectrum) -> RGBSpectrum {
        match self.0 {
            Some(tint) => hit.tinted(&tint),
            None => hit,
        }
    }

    pub fn color(&self) -> Option<RGBSpectrum> {
        self.0
    }
}

pub enum StepOutcome<S> {
    Continue,
    Stop { color: RGBSpectrum, point: RayPoint },
    Reflect {
        crossing: Crossing<S>,
        normal: Vector3f,
        color: Option<RGBSpectrum>,
    },
}

/// Test one accepted step against every hitable in scene order. Tints are
/// folded into `tint`; the first stopping or reflecting surface ends the
/// visit.
pub fn visit_hitables<G: Segment>(
    scene: &Scene,
    segment: &G,
    start: &RayPoint,
    end: &RayPoint,
    bisection: &Bisection,
    bounds: &SearchBounds,
    tint: &mut Tint,
) -> StepOutcome<G::State> {
    for hitable in scene.hitables() {
        let previous = hitable.level(start);
        let current = hitable.level(end);
        if !hitable.crossed(previous, current) {
            continue;
        }

        let crossing = refine(hitable.as_ref(), segment, start, end, bisection, bounds);
        let hit = Hit { point: crossing.point, side: crossing.side };
        let interaction = match hitable.interact(&hit) {
            Some(interaction) => interaction,
            None => continue,
        };

        match interaction.response {
            Response::Continue => {
                if let Some(color) = interaction.color {
                    tint.add(color);
                }
            },
            Response::Stop => {
                let color = interaction.color.unwrap_or(RGBSpectrum::BLACK);
                return StepOutcome::Stop { color, point: crossing.point };
            },
            Response::Reflect { normal } => {
                return StepOutcome::Reflect { crossing, normal, color: interaction.color };
            },
        }
    }
    StepOutcome::Continue
}

pub fn record(path: &mut Option<&mut Vec<RayPoint>>, point: &RayPoint) {
    if let Some(path) = path.as_mut() {
        path.push(*point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tint_is_taken_as_is() {
        let mut tint = Tint::default();
        assert_eq!(tint.apply(RGBSpectrum::WHITE), RGBSpectrum::WHITE);
        tint.add(RGBSpectrum::new(0.2, 0.4, 0.6));
        assert_eq!(tint.color(), Some(RGBSpectrum::new(0.2, 0.4, 0.6)));
    }

    #[test]
    fn test_tint_blends_into_hit() {
        let mut tint = Tint::default();
        tint.add(RGBSpectrum::WHITE);
        assert_eq!(tint.apply(RGBSpectrum::BLACK), RGBSpectrum::WHITE);
    }
}
