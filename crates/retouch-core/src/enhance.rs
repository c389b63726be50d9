//! Enhancement engine.
//!
//! Decodes once, runs the enabled steps on a single buffer and encodes once.
//!
//! ## Step Order
//! 1. Brightness (fixed offset, or picked from [`analyze`] when automatic)
//! 2. Contrast
//! 3. Saturation
//! 4. Sharpening
//! 5. Texture
//!
//! Each step sees the clamped output of the one before it.

use crate::adjustments::{adjust_brightness, adjust_contrast, adjust_saturation};
use crate::analysis::analyze;
use crate::codec::ImageCodec;
use crate::convolution::{apply_kernel, Kernel};
use crate::decode::PixelBuffer;
use crate::error::Result;
use crate::options::{Brightness, EnhancementSettings};
use crate::{ProcessedResult, RawImage};

/// Quality factor for the single re-encode after enhancement.
pub const ENHANCED_QUALITY: f32 = 0.92;

/// Brightness delta to apply, if any.
///
/// Only [`Brightness::Auto`] looks at the pixels.
pub fn brightness_delta(brightness: Brightness, buffer: &PixelBuffer) -> Option<f32> {
    match brightness {
        Brightness::Off => None,
        Brightness::Offset(delta) => Some(delta),
        Brightness::Auto => Some(analyze(buffer).auto_brightness_delta()),
    }
}

/// Run every enabled enhancement step on `buffer` in place.
pub fn enhance_buffer(buffer: &mut PixelBuffer, settings: &EnhancementSettings) {
    if let Some(delta) = brightness_delta(settings.brightness, buffer) {
        log::debug!("Brightness delta {delta}");
        adjust_brightness(buffer.pixels_mut(), delta);
    }

    adjust_contrast(buffer.pixels_mut(), settings.contrast);
    adjust_saturation(buffer.pixels_mut(), settings.saturation);

    if settings.sharpening {
        apply_kernel(buffer, &Kernel::sharpen());
    }
    if settings.texture {
        apply_kernel(buffer, &Kernel::texture());
    }
}

/// Decode `image`, enhance it and re-encode it in its declared type.
///
/// # Errors
///
/// `ProcessError::DecodeFailed` or `ProcessError::EncodeFailed` from the codec.
pub fn enhance<C: ImageCodec>(
    codec: &C,
    image: &RawImage,
    settings: &EnhancementSettings,
) -> Result<ProcessedResult> {
    let mut buffer = codec.decode(&image.bytes, &image.mime_type)?;
    log::debug!(
        "Enhancing {} ({}x{})",
        image.name,
        buffer.width(),
        buffer.height()
    );

    enhance_buffer(&mut buffer, settings);

    let encoded = codec.encode(&buffer, &image.mime_type, ENHANCED_QUALITY)?;
    Ok(ProcessedResult::from_encoded(
        encoded,
        buffer.width(),
        buffer.height(),
    ))
}
