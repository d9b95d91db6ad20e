// src/core/analysis/clone.rs
//
// Clone-stamp detection via block perceptual hashing: every block is
// reduced to an 8x8 grayscale thumbnail and hashed; identical hashes at
// distant positions indicate copied regions.

use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::config::Thresholds;

/// Reported clone pairs are capped; past this the verdict cannot change.
const MAX_REPORTED_PAIRS: usize = 10;

/// Side of the reduced thumbnail fed into the hash.
const HASH_GRID: u32 = 8;

/// A pair of block origins whose perceptual hashes collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClonePair {
    pub first: (u32, u32),
    pub second: (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloneScan {
    pub pairs: Vec<ClonePair>,
    /// Set when the image was too small to tile into blocks.
    pub note: Option<String>,
}

impl CloneScan {
    pub fn match_count(&self) -> u32 {
        self.pairs.len() as u32
    }
}

/// Scan a grayscale raster for cloned blocks.
pub fn scan(gray: &GrayImage, thresholds: &Thresholds) -> CloneScan {
    let block = thresholds.clone_block_size;
    let (width, height) = gray.dimensions();

    if width < block || height < block {
        return CloneScan {
            pairs: Vec::new(),
            note: Some(format!(
                "image smaller than one {block}x{block} block, clone scan skipped"
            )),
        };
    }

    let min_distance = (block * thresholds.clone_distance_min_blocks) as f64;
    let mut seen: HashMap<[u8; 16], (u32, u32)> = HashMap::new();
    let mut pairs = Vec::new();

    let mut y = 0;
    while y + block <= height {
        let mut x = 0;
        while x + block <= width {
            let digest = block_hash(gray, x, y, block);
            match seen.get(&digest) {
                Some(&(px, py)) => {
                    let dx = x as f64 - px as f64;
                    let dy = y as f64 - py as f64;
                    if (dx * dx + dy * dy).sqrt() > min_distance
                        && pairs.len() < MAX_REPORTED_PAIRS
                    {
                        pairs.push(ClonePair {
                            first: (px, py),
                            second: (x, y),
                        });
                    }
                }
                None => {
                    seen.insert(digest, (x, y));
                }
            }
            x += block;
        }
        y += block;
    }

    CloneScan { pairs, note: None }
}

fn block_hash(gray: &GrayImage, x: u32, y: u32, block: u32) -> [u8; 16] {
    let region = imageops::crop_imm(gray, x, y, block, block).to_image();
    let thumb = imageops::resize(&region, HASH_GRID, HASH_GRID, FilterType::Lanczos3);
    md5::compute(thumb.as_raw()).0
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-noise raster; distinct blocks hash distinctly.
    fn noise_image(width: u32, height: u32, seed: u32) -> GrayImage {
        let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
        let pixels: Vec<u8> = (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                (state >> 24) as u8
            })
            .collect();
        GrayImage::from_raw(width, height, pixels).unwrap()
    }

    fn copy_block(img: &mut GrayImage, from: (u32, u32), to: (u32, u32), size: u32) {
        for dy in 0..size {
            for dx in 0..size {
                let v = *img.get_pixel(from.0 + dx, from.1 + dy);
                img.put_pixel(to.0 + dx, to.1 + dy, v);
            }
        }
    }

    #[test]
    fn test_no_clones_in_noise() {
        let img = noise_image(256, 256, 7);
        let scan = scan(&img, &Thresholds::default());
        assert_eq!(scan.match_count(), 0);
    }

    #[test]
    fn test_distant_copy_is_detected() {
        let mut img = noise_image(256, 256, 11);
        copy_block(&mut img, (32, 32), (160, 160), 32);
        let scan = scan(&img, &Thresholds::default());
        assert!(scan.match_count() >= 1);
        assert!(scan
            .pairs
            .iter()
            .any(|p| p.first == (32, 32) && p.second == (160, 160)));
    }

    #[test]
    fn test_adjacent_copy_is_ignored() {
        // identical neighbors are common in smooth regions; distance filter
        // must drop them
        let mut img = noise_image(256, 256, 13);
        copy_block(&mut img, (64, 64), (96, 64), 32);
        let scan = scan(&img, &Thresholds::default());
        assert_eq!(scan.match_count(), 0);
    }

    #[test]
    fn test_tiny_image_degrades() {
        let img = noise_image(16, 16, 17);
        let scan = scan(&img, &Thresholds::default());
        assert_eq!(scan.match_count(), 0);
        assert!(scan.note.is_some());
    }
}
