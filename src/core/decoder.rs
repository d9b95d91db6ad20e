// src/core/decoder.rs
//
// Image decoding boundary: turns raw bytes into an ImageSample.
// Uses the image crate for raster decoding; JPEG quantization tables are
// recovered by walking DQT segments directly since the decoder does not
// surface them.

use std::collections::BTreeMap;
use std::path::Path;

use image::{GrayImage, ImageFormat, RgbImage};
use log::debug;

use crate::error::EngineError;

/// Decoded raster plus the metadata the probes need.
///
/// Created once per analysis request and never mutated; helper views
/// allocate fresh buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSample {
    /// Interleaved RGB8, `width * height * 3` bytes.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Whether the original encoding was JPEG.
    pub source_is_jpeg: bool,
    /// Quantization tables by table id, if the source was JPEG and the
    /// tables survived decoding.
    pub quantization_tables: Option<BTreeMap<u8, Vec<u16>>>,
    /// True when the image was fetched from a URL rather than uploaded;
    /// affects ELA threshold calibration.
    pub is_remote_origin: bool,
}

impl ImageSample {
    /// Build a sample from raw parts, validating the buffer length.
    pub fn from_rgb8(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        source_is_jpeg: bool,
        quantization_tables: Option<BTreeMap<u8, Vec<u16>>>,
        is_remote_origin: bool,
    ) -> Result<Self, EngineError> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(EngineError::InvalidSample(format!(
                "expected {} bytes for {}x{} RGB8, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
            source_is_jpeg,
            quantization_tables,
            is_remote_origin,
        })
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Rec.601 grayscale view.
    pub fn luma_image(&self) -> GrayImage {
        let luma: Vec<u8> = self
            .pixels
            .chunks_exact(3)
            .map(|px| {
                let y = 299 * px[0] as u32 + 587 * px[1] as u32 + 114 * px[2] as u32;
                (y / 1000) as u8
            })
            .collect();
        GrayImage::from_raw(self.width, self.height, luma).expect("buffer sized from dimensions")
    }

    /// RGB view as an image-crate buffer (copies).
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .expect("buffer validated at construction")
    }
}

/// Capability trait for the ImageSample loader boundary.
pub trait Decode {
    fn decode(&self, bytes: &[u8], remote_origin: bool) -> Result<ImageSample, EngineError>;
}

/// Default decoder built on the image crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdImageDecoder;

impl Decode for StdImageDecoder {
    fn decode(&self, bytes: &[u8], remote_origin: bool) -> Result<ImageSample, EngineError> {
        let format = image::guess_format(bytes).map_err(|e| EngineError::Decode(e.to_string()))?;
        let source_is_jpeg = format == ImageFormat::Jpeg;

        let decoded = image::load_from_memory(bytes)
            .map_err(|e| EngineError::Decode(e.to_string()))?
            .to_rgb8();
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(EngineError::Decode("image has zero dimensions".into()));
        }

        let quantization_tables = if source_is_jpeg {
            scan_quantization_tables(bytes)
        } else {
            None
        };
        debug!(
            "decoded {}x{} image (jpeg: {}, qtables: {})",
            width,
            height,
            source_is_jpeg,
            quantization_tables.as_ref().map_or(0, |t| t.len())
        );

        ImageSample::from_rgb8(
            decoded.into_raw(),
            width,
            height,
            source_is_jpeg,
            quantization_tables,
            remote_origin,
        )
    }
}

/// Decode an image file from disk.
pub fn decode_file(path: &Path, remote_origin: bool) -> Result<ImageSample, EngineError> {
    let bytes = std::fs::read(path).map_err(|e| EngineError::Decode(e.to_string()))?;
    StdImageDecoder.decode(&bytes, remote_origin)
}

/// Walk JPEG segments and collect DQT tables by id.
///
/// Returns None for non-JPEG bytes or when no table is found; malformed
/// tails are tolerated (whatever parsed before the damage is kept).
fn scan_quantization_tables(bytes: &[u8]) -> Option<BTreeMap<u8, Vec<u16>>> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }

    let mut tables = BTreeMap::new();
    let mut i = 2usize;
    while i + 4 <= bytes.len() {
        if bytes[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = bytes[i + 1];
        if marker == 0xFF {
            // fill byte before the marker
            i += 1;
            continue;
        }
        // standalone markers carry no length field
        if marker == 0x01 || (0xD0..=0xD8).contains(&marker) {
            i += 2;
            continue;
        }
        if marker == 0xD9 {
            break; // EOI
        }

        let len = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
        if len < 2 || i + 2 + len > bytes.len() {
            break;
        }

        if marker == 0xDB {
            let mut seg = &bytes[i + 4..i + 2 + len];
            while !seg.is_empty() {
                let pq_tq = seg[0];
                let precision = pq_tq >> 4;
                let id = pq_tq & 0x0F;
                let entry_len = if precision == 0 { 64 } else { 128 };
                if seg.len() < 1 + entry_len {
                    break;
                }
                let values: Vec<u16> = if precision == 0 {
                    seg[1..65].iter().map(|&v| v as u16).collect()
                } else {
                    seg[1..129]
                        .chunks_exact(2)
                        .map(|c| u16::from_be_bytes([c[0], c[1]]))
                        .collect()
                };
                tables.insert(id, values);
                seg = &seg[1 + entry_len..];
            }
        } else if marker == 0xDA {
            break; // entropy-coded data follows, no further tables expected
        }

        i += 2 + len;
    }

    if tables.is_empty() {
        None
    } else {
        Some(tables)
    }
}
