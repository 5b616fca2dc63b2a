/* Copyright 2020 @TwoCookingMice */

use crate::math::bitmap::Bitmap;

use exr::prelude::write_rgb_file;
use std::path::Path;

/// Write `bitmap` to `file_path`. `.exr` keeps the linear float channels,
/// anything `image` knows (png, jpg, bmp, ...) gets 8-bit quantised pixels.
pub fn write_image(file_path: &str, bitmap: &Bitmap) -> Result<(), String> {
    log::info!("Writing {}x{} image to: {}.", bitmap.width(), bitmap.height(), file_path);

    let extension = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "exr" => write_exr(file_path, bitmap),
        _ => write_ldr(file_path, bitmap),
    }
}

pub fn write_exr(file_path: &str, bitmap: &Bitmap) -> Result<(), String> {
    let width = bitmap.width();
    write_rgb_file(file_path, width, bitmap.height(), |x, y| {
        let p = bitmap[(x, y)];
        (p.r(), p.g(), p.b())
    }).map_err(|e| format!("failed to write exr {}: {}", file_path, e))
}

pub fn write_ldr(file_path: &str, bitmap: &Bitmap) -> Result<(), String> {
    let buffer = to_rgb_image(bitmap)?;
    buffer.save(file_path).map_err(|e| format!("failed to write {}: {}", file_path, e))
}

pub fn to_rgb_image(bitmap: &Bitmap) -> Result<image::RgbImage, String> {
    let bytes: Vec<u8> = bitmap.pixels().iter().flat_map(|p| p.to_bytes()).collect();
    image::RgbImage::from_raw(bitmap.width() as u32, bitmap.height() as u32, bytes)
        .ok_or_else(|| String::from("bitmap size does not match its pixel buffer"))
}
