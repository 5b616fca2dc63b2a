// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::scene::Scene;
use crate::math::bitmap::Bitmap;
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::Renderer;

/// Scan-line renderer: a fixed pool of workers claims whole rows and sends
/// them back to the calling thread, which owns the bitmap.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    threads: usize,
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene) -> Bitmap {
        let (width, height) = self.integrator.resolution();
        if width == 0 || height == 0 {
            return Bitmap::new(0, 0);
        }

        log::info!("Rendering {}x{} with {} threads: {}", width, height, self.threads, self.integrator.describe());
        let integrator_ref: &dyn Integrator = self.integrator.as_ref();

        let progress = ProgressBar::new(height as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_row = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(usize, Vec<RGBSpectrum>)>();
        let mut bitmap = Bitmap::new(width, height);

        thread::scope(|scope| {
            for _ in 0..self.threads {
                let next_row = Arc::clone(&next_row);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let y = next_row.fetch_add(1, Ordering::Relaxed);
                        if y >= height {
                            break;
                        }

                        let row: Vec<RGBSpectrum> = (0..width)
                            .map(|x| integrator_ref.trace_ray_forward(scene, x, y, None))
                            .collect();
                        if tx.send((y, row)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for (y, row) in rx.iter() {
                bitmap.set_row(y, &row);
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        let failures = bitmap.pixels().iter().filter(|p| **p == RGBSpectrum::FAILURE).count();
        if failures > 0 {
            log::warn!("{} of {} pixels did not converge.", failures, width * height);
        }
        bitmap
    }
}

impl SimpleRenderer {
    /// `threads == 0` uses all available cores.
    pub fn new(integrator: Box<dyn Integrator>, threads: usize) -> Self {
        let threads = match threads {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        };
        Self { integrator, threads }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }
}
