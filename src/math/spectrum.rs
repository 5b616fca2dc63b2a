// Copyright 2020 @TwoCookingMice

use std::ops;

/// Display colour with channels in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBSpectrum {
    rgb: [f32; 3],
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: [0.0f32, 0.0f32, 0.0f32] }
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.rgb[index]
    }
}

impl RGBSpectrum {
    pub const BLACK: RGBSpectrum = RGBSpectrum { rgb: [0.0, 0.0, 0.0] };
    pub const WHITE: RGBSpectrum = RGBSpectrum { rgb: [1.0, 1.0, 1.0] };
    pub const GREEN: RGBSpectrum = RGBSpectrum { rgb: [0.0, 0.5019608, 0.0] };
    // Rays that never converge are painted with this.
    pub const FAILURE: RGBSpectrum = RGBSpectrum { rgb: [1.0, 0.0, 1.0] };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { rgb: [r, g, b] }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn r(&self) -> f32 {
        self.rgb[0]
    }

    pub fn g(&self) -> f32 {
        self.rgb[1]
    }

    pub fn b(&self) -> f32 {
        self.rgb[2]
    }

    pub fn is_black(&self) -> bool {
        self.rgb.iter().all(|c| *c == 0.0f32)
    }

    /// HSL lightness: mean of the largest and smallest channel.
    pub fn brightness(&self) -> f32 {
        let max = self.rgb[0].max(self.rgb[1]).max(self.rgb[2]);
        let min = self.rgb[0].min(self.rgb[1]).min(self.rgb[2]);
        0.5 * (max + min)
    }

    /// Blend a terminal colour with the tint collected along the ray. The
    /// hit colour is dimmed by the tint's brightness and the tint is added
    /// on top with a slight boost, saturating at 1.
    pub fn tinted(&self, tint: &RGBSpectrum) -> RGBSpectrum {
        let keep = 1.0 - tint.brightness();
        let boost = 255.0 / 205.0;
        let channel = |hit: f32, t: f32| (keep * hit + t.max(0.0) * boost).min(1.0);
        RGBSpectrum::new(
            channel(self.rgb[0], tint.rgb[0]),
            channel(self.rgb[1], tint.rgb[1]),
            channel(self.rgb[2], tint.rgb[2]),
        )
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        let q = |c: f32| (c.max(0.0).min(1.0) * 255.0).round() as u8;
        [q(self.rgb[0]), q(self.rgb[1]), q(self.rgb[2])]
    }

    /// Parse "r,g,b" with either [0, 1] floats or 0-255 integers.
    pub fn parse(text: &str) -> Option<RGBSpectrum> {
        let parts: Vec<&str> = text.split(',').map(|s| s.trim()).collect();
        if parts.len() != 3 {
            return None;
        }
        let is_bytes = parts.iter().all(|p| !p.contains('.')) && parts.iter().any(|p| p.parse::<u32>().map_or(false, |v| v > 1));
        let mut values = [0.0f32; 3];
        for (value, part) in values.iter_mut().zip(parts.iter()) {
            *value = part.parse::<f32>().ok()?;
            if is_bytes {
                *value /= 255.0;
            }
        }
        Some(RGBSpectrum::new(values[0], values[1], values[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::RGBSpectrum;

    #[test]
    fn test_black_tint_keeps_hit_colour() {
        let hit = RGBSpectrum::new(0.2, 0.4, 0.6);
        let out = hit.tinted(&RGBSpectrum::BLACK);
        assert!((out.r() - 0.2).abs() < 1e-6);
        assert!((out.b() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_white_tint_saturates() {
        let out = RGBSpectrum::BLACK.tinted(&RGBSpectrum::WHITE);
        assert_eq!(out, RGBSpectrum::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_parse_colours() {
        assert_eq!(RGBSpectrum::parse("255, 0, 255"), Some(RGBSpectrum::FAILURE));
        assert_eq!(RGBSpectrum::parse("0.5,0.25,1.0"), Some(RGBSpectrum::new(0.5, 0.25, 1.0)));
        assert_eq!(RGBSpectrum::parse("1,2"), None);
        assert!(RGBSpectrum::BLACK.is_black());
    }
}
