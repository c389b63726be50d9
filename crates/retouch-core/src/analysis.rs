//! Lightweight statistics over a decoded buffer.
//!
//! Analysis is a pure function of the pixels. It only feeds the automatic
//! brightness delta, so it is kept apart from the adjustment step and can be
//! tested on its own.

use crate::decode::{PixelBuffer, CHANNELS};

/// Mean brightness below which automatic brightness lightens the image.
pub const DARK_THRESHOLD: f32 = 100.0;

/// Delta applied to images darker than [`DARK_THRESHOLD`].
pub const DARK_IMAGE_DELTA: f32 = 10.0;

/// Delta applied to all other images.
pub const BRIGHT_IMAGE_DELTA: f32 = -70.0;

/// Summary statistics for a buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageAnalysis {
    /// Mean over all pixels of the per-pixel `(R + G + B) / 3`, in `[0, 255]`.
    pub brightness: f32,
    /// Mean over all pixels of the summed absolute deviation of R, G and B
    /// from that pixel's own brightness. Zero for any grayscale image.
    pub contrast: f32,
}

impl ImageAnalysis {
    /// Brightness delta chosen when the caller asks for automatic brightness.
    pub fn auto_brightness_delta(&self) -> f32 {
        if self.brightness < DARK_THRESHOLD {
            DARK_IMAGE_DELTA
        } else {
            BRIGHT_IMAGE_DELTA
        }
    }
}

/// Compute brightness and contrast statistics in a single pass.
///
/// Alpha is ignored.
pub fn analyze(buffer: &PixelBuffer) -> ImageAnalysis {
    let mut total_brightness = 0.0f64;
    let mut total_contrast = 0.0f64;

    for px in buffer.pixels().chunks_exact(CHANNELS) {
        let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
        let brightness = (r + g + b) / 3.0;
        total_brightness += brightness;
        total_contrast +=
            (r - brightness).abs() + (g - brightness).abs() + (b - brightness).abs();
    }

    // PixelBuffer is never empty
    let count = buffer.pixel_count() as f64;
    ImageAnalysis {
        brightness: (total_brightness / count) as f32,
        contrast: (total_contrast / count) as f32,
    }
}
