// Copyright @yucwang 2026

use crate::core::texture::Texture;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;
use exr::prelude::*;
use image::io::Reader as ImageReader;
use image::GenericImageView;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    Clamp,
}

/// Nearest-texel lookup into a decoded image.
pub struct ImageTexture {
    bitmap: Bitmap,
    wrap_mode: WrapMode,
}

impl ImageTexture {
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        Self { bitmap, wrap_mode: WrapMode::Repeat }
    }

    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    pub fn from_exr(path: &str) -> std::result::Result<Self, String> {
        let image = read()
            .no_deep_data()
            .largest_resolution_level()
            .rgba_channels(
                |resolution, _| Bitmap::new(resolution.width(), resolution.height()),
                |bitmap: &mut Bitmap, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                    bitmap[(position.x(), position.y())] = RGBSpectrum::new(r, g, b);
                },
            )
            .first_valid_layer()
            .all_attributes()
            .from_file(path)
            .map_err(|e| format!("failed to read exr {}: {}", path, e))?;

        let bitmap = image.layer_data.channel_data.pixels;
        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(format!("empty texture: {}", path));
        }
        Ok(Self::from_bitmap(bitmap))
    }

    pub fn from_image(path: &str) -> std::result::Result<Self, String> {
        let img = ImageReader::open(path)
            .map_err(|e| format!("failed to open image {}: {}", path, e))?
            .decode()
            .map_err(|e| format!("failed to decode image {}: {}", path, e))?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(format!("empty texture: {}", path));
        }
        let rgb = img.to_rgb32f();
        let mut bitmap = Bitmap::new(width as usize, height as usize);
        for (x, y, p) in rgb.enumerate_pixels() {
            bitmap[(x as usize, y as usize)] = RGBSpectrum::new(p[0], p[1], p[2]);
        }
        Ok(Self::from_bitmap(bitmap))
    }

    pub fn from_file(path: &str) -> std::result::Result<Self, String> {
        let ext = Path::new(path)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "exr" => Self::from_exr(path),
            "jpg" | "jpeg" | "png" | "bmp" => Self::from_image(path),
            _ => Err(format!("unsupported texture format: {}", ext)),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.bitmap.width(), self.bitmap.height())
    }

    fn wrap_index(&self, idx: isize, size: usize) -> usize {
        let n = size as isize;
        match self.wrap_mode {
            WrapMode::Repeat => idx.rem_euclid(n) as usize,
            WrapMode::Clamp => idx.clamp(0, n - 1) as usize,
        }
    }

    pub fn texel(&self, x: isize, y: isize) -> RGBSpectrum {
        let xi = self.wrap_index(x, self.bitmap.width());
        let yi = self.wrap_index(y, self.bitmap.height());
        self.bitmap[(xi, yi)]
    }
}

impl Texture for ImageTexture {
    fn describe(&self) -> String {
        let (w, h) = self.dimensions();
        format!("ImageTexture({}x{})", w, h)
    }

    fn eval(&self, uv: Vector2f) -> RGBSpectrum {
        if !uv.x.is_finite() || !uv.y.is_finite() {
            return RGBSpectrum::BLACK;
        }
        let x = (uv.x * self.bitmap.width() as Float).floor() as isize;
        let y = (uv.y * self.bitmap.height() as Float).floor() as isize;
        self.texel(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> ImageTexture {
        let mut bitmap = Bitmap::new(4, 2);
        for x in 0..4 {
            bitmap[(x, 0)] = RGBSpectrum::new(x as f32 / 4.0, 0.0, 0.0);
            bitmap[(x, 1)] = RGBSpectrum::new(x as f32 / 4.0, 1.0, 0.0);
        }
        ImageTexture::from_bitmap(bitmap)
    }

    #[test]
    fn test_eval_picks_nearest_texel() {
        let tex = gradient();
        assert_eq!(tex.eval(Vector2f::new(0.6, 0.2)), RGBSpectrum::new(0.5, 0.0, 0.0));
        assert_eq!(tex.eval(Vector2f::new(0.0, 0.9)), RGBSpectrum::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_repeat_and_clamp() {
        let tex = gradient();
        assert_eq!(tex.eval(Vector2f::new(-0.1, 0.0)), RGBSpectrum::new(0.75, 0.0, 0.0));
        assert_eq!(tex.eval(Vector2f::new(0.0, 1.0)), RGBSpectrum::new(0.0, 0.0, 0.0));

        let tex = gradient().with_wrap_mode(WrapMode::Clamp);
        assert_eq!(tex.eval(Vector2f::new(0.0, 1.0)), RGBSpectrum::new(0.0, 1.0, 0.0));
        assert_eq!(tex.eval(Vector2f::new(1.5, 0.0)), RGBSpectrum::new(0.75, 0.0, 0.0));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(ImageTexture::from_file("sky.tga").is_err());
        assert!(ImageTexture::from_file("does_not_exist.png").is_err());
    }
}
