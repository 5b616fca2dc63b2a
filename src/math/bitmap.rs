// Copyright 2020 @TwoCookingMice

use super::spectrum::RGBSpectrum;

use std::ops;
use std::vec::Vec;

#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<RGBSpectrum>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = RGBSpectrum;

    fn index(&self, index: (usize, usize)) -> &RGBSpectrum {
        let transformed_index = index.0 + self.width * index.1;
        assert!(index.0 < self.width && index.1 < self.height);
        &self.data[transformed_index]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut RGBSpectrum {
        let transformed_index = index.0 + self.width * index.1;
        assert!(index.0 < self.width && index.1 < self.height);
        &mut self.data[transformed_index]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(RGBSpectrum::default(); pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Overwrite scan line `y` with `row`.
    pub fn set_row(&mut self, y: usize, row: &[RGBSpectrum]) {
        assert_eq!(row.len(), self.width);
        let start = y * self.width;
        self.data[start..start + self.width].copy_from_slice(row);
    }

    pub fn pixels(&self) -> &[RGBSpectrum] {
        &self.data
    }
}

/* Test for Bitmap */
#[cfg(test)]
mod tests {
    use super::Bitmap;
    use super::RGBSpectrum;

    #[test]
    fn test_bitmap_basic_functions() {
        let mut bitmap = Bitmap::new(256usize, 128usize);
        assert_eq!(bitmap.width(), 256);
        assert_eq!(bitmap.height(), 128);

        bitmap[(5, 6)] = RGBSpectrum::new(1.0, 0.5, 0.6);
        assert_eq!(bitmap[(5, 6)].r(), 1.0);
        assert_eq!(bitmap[(2, 6)].r(), 0.0);
    }

    #[test]
    fn test_bitmap_set_row() {
        let mut bitmap = Bitmap::new(3, 2);
        bitmap.set_row(1, &[RGBSpectrum::WHITE; 3]);
        assert_eq!(bitmap[(2, 1)], RGBSpectrum::WHITE);
        assert!(bitmap[(2, 0)].is_black());
    }
}
