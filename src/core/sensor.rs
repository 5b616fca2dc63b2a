// Copyright @yucwang 2026

/// Maps an output pixel to whatever a model needs to launch a ray.
pub trait Sensor: Sync {
    type Sample;

    /// `(x, y)` addresses the output image, row 0 at the top.
    fn sample(&self, x: usize, y: usize) -> Self::Sample;
    fn resolution(&self) -> (usize, usize);
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
