//! Per-pixel tonal adjustments on RGBA data.
//!
//! Each function makes one full pass over the buffer, writing rounded and
//! clamped 8-bit values back before returning, so successive steps always
//! see the committed output of the previous one. Alpha is never touched.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation

use crate::decode::{clamp_channel, CHANNELS};

/// Numerator constant of the contrast factor.
pub const CONTRAST_K: f32 = 259.0;

/// Luma weight of the red channel.
pub const LUMA_R: f32 = 0.2989;

/// Luma weight of the green channel.
pub const LUMA_G: f32 = 0.5870;

/// Luma weight of the blue channel.
pub const LUMA_B: f32 = 0.1140;

/// Channel value contrast pivots around.
const MIDPOINT: f32 = 128.0;

/// Add a signed delta to R, G and B of every pixel.
pub fn adjust_brightness(pixels: &mut [u8], delta: f32) {
    if delta == 0.0 {
        return;
    }
    for px in pixels.chunks_exact_mut(CHANNELS) {
        for channel in &mut px[..3] {
            *channel = clamp_channel(*channel as f32 + delta);
        }
    }
}

/// Multiplicative contrast factor for a signed contrast value.
///
/// Formula: `K * (contrast + 255) / (255 * (259 - contrast))`. With K = 259 a
/// contrast of 0 yields exactly 1.0.
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    (CONTRAST_K * (contrast + 255.0)) / (255.0 * (259.0 - contrast))
}

/// Stretch or compress every channel around the midpoint.
///
/// Formula: `factor * (channel - 128) + 128`
pub fn adjust_contrast(pixels: &mut [u8], contrast: f32) {
    if contrast == 0.0 {
        return;
    }
    let factor = contrast_factor(contrast);
    for px in pixels.chunks_exact_mut(CHANNELS) {
        for channel in &mut px[..3] {
            *channel = clamp_channel(factor * (*channel as f32 - MIDPOINT) + MIDPOINT);
        }
    }
}

/// Weighted luma of an RGB triple.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Scale each channel's distance from the pixel's luma.
///
/// 0.0 produces grayscale, 1.0 is the identity, larger values intensify color.
pub fn adjust_saturation(pixels: &mut [u8], saturation: f32) {
    if saturation == 1.0 {
        return;
    }
    for px in pixels.chunks_exact_mut(CHANNELS) {
        let gray = luma(px[0], px[1], px[2]);
        for channel in &mut px[..3] {
            *channel = clamp_channel(gray + saturation * (*channel as f32 - gray));
        }
    }
}
