//! 2-D frequency transform behind a swappable backend.
//!
//! The resampling probe only needs a centered magnitude spectrum; the
//! `SpectrumBackend` trait keeps the transform implementation replaceable
//! (e.g. a GPU or real-valued backend) without touching the probe.

use num_complex::Complex;
use rustfft::FftPlanner;

use image::GrayImage;

/// Centered (DC in the middle) magnitude spectrum of a grayscale raster.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub magnitudes: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl Spectrum {
    pub fn center(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.magnitudes[y * self.width + x]
    }
}

/// Capability trait for the frequency transform.
pub trait SpectrumBackend {
    /// Compute the shifted 2-D magnitude spectrum of a grayscale image.
    fn magnitude_centered(&self, gray: &GrayImage) -> Spectrum;
}

/// Default backend built on rustfft (row pass, then column pass).
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFftBackend;

impl SpectrumBackend for RustFftBackend {
    fn magnitude_centered(&self, gray: &GrayImage) -> Spectrum {
        let width = gray.width() as usize;
        let height = gray.height() as usize;

        let mut buffer: Vec<Complex<f64>> = gray
            .as_raw()
            .iter()
            .map(|&v| Complex::new(v as f64, 0.0))
            .collect();

        let mut planner = FftPlanner::new();

        // rows
        let row_fft = planner.plan_fft_forward(width);
        for row in buffer.chunks_exact_mut(width) {
            row_fft.process(row);
        }

        // columns, via a scratch column buffer
        let col_fft = planner.plan_fft_forward(height);
        let mut column = vec![Complex::new(0.0, 0.0); height];
        for x in 0..width {
            for y in 0..height {
                column[y] = buffer[y * width + x];
            }
            col_fft.process(&mut column);
            for y in 0..height {
                buffer[y * width + x] = column[y];
            }
        }

        // magnitude with quadrant swap so DC lands in the center
        let mut magnitudes = vec![0.0f64; width * height];
        let half_w = width / 2;
        let half_h = height / 2;
        for y in 0..height {
            let sy = (y + half_h) % height;
            for x in 0..width {
                let sx = (x + half_w) % width;
                magnitudes[sy * width + sx] = buffer[y * width + x].norm();
            }
        }

        Spectrum {
            magnitudes,
            width,
            height,
        }
    }
}
