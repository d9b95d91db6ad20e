//! Spatial filters used by the probes.
//!
//! Gaussian blur and 3x3 convolution come from `image::imageops`; the rank
//! filter is hand-rolled because the image crate does not ship one.

use image::imageops;
use image::GrayImage;

/// Edge-extraction kernel (zero-sum Laplacian). Flat regions map to zero.
pub const FIND_EDGES_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// Edge-enhancement kernel (unit-sum). Flat regions pass through unchanged.
pub const EDGE_ENHANCE_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0];

/// Gaussian blur with the given sigma.
pub fn gaussian_blur(gray: &GrayImage, sigma: f32) -> GrayImage {
    imageops::blur(gray, sigma)
}

/// Apply a 3x3 kernel with output clamped to u8.
pub fn convolve_3x3(gray: &GrayImage, kernel: &[f32; 9]) -> GrayImage {
    imageops::filter3x3(gray, kernel)
}

/// 3x3 median filter with clamped borders.
pub fn median_filter_3x3(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let src = gray.as_raw();
    let mut out = vec![0u8; src.len()];

    let w = width as i64;
    let h = height as i64;
    let mut window = [0u8; 9];

    for y in 0..h {
        for x in 0..w {
            let mut n = 0;
            for dy in -1..=1i64 {
                for dx in -1..=1i64 {
                    let sx = (x + dx).clamp(0, w - 1);
                    let sy = (y + dy).clamp(0, h - 1);
                    window[n] = src[(sy * w + sx) as usize];
                    n += 1;
                }
            }
            window.sort_unstable();
            out[(y * w + x) as usize] = window[4];
        }
    }

    GrayImage::from_raw(width, height, out).expect("buffer sized from dimensions")
}
