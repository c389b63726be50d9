//! Encoding via the `image` crate's codecs.
//!
//! JPEG is the only lossy target; its quality is derived from the 0.0-1.0
//! quality factor. The other formats are lossless and ignore the factor.
//! Target types without an encoder fall back to PNG, matching how a browser
//! canvas treats unknown export types.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat};
use thiserror::Error;

use super::EncodedImage;
use crate::decode::PixelBuffer;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The underlying encoder rejected the image.
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed {
        format: &'static str,
        reason: String,
    },
}

/// Container formats the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Pick the encoder for a requested MIME type.
    ///
    /// Unknown or decode-only types (SVG, HEIC, ICO, ...) map to PNG.
    pub fn from_mime_type(mime_type: &str) -> Self {
        match mime_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" | "image/jfif" => OutputFormat::Jpeg,
            "image/webp" => OutputFormat::WebP,
            "image/gif" => OutputFormat::Gif,
            "image/bmp" | "image/x-ms-bmp" => OutputFormat::Bmp,
            "image/tiff" => OutputFormat::Tiff,
            _ => OutputFormat::Png,
        }
    }

    /// Canonical MIME type of the bytes this format produces.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
            OutputFormat::Gif => "image/gif",
            OutputFormat::Bmp => "image/bmp",
            OutputFormat::Tiff => "image/tiff",
        }
    }

    fn name(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
            OutputFormat::Gif => "GIF",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Tiff => "TIFF",
        }
    }
}

/// Map a 0.0-1.0 quality factor onto the JPEG encoder's 1-100 scale.
pub fn jpeg_quality(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 100;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a pixel buffer for the requested MIME type.
///
/// # Arguments
///
/// * `buffer` - The RGBA raster to encode
/// * `target_type` - Requested output MIME type
/// * `quality` - Quality factor (0.0-1.0), honoured by JPEG only
///
/// # Returns
///
/// The encoded bytes together with the MIME type actually produced, which
/// differs from `target_type` when the PNG fallback kicks in.
pub fn encode_image(
    buffer: &PixelBuffer,
    target_type: &str,
    quality: f32,
) -> Result<EncodedImage, EncodeError> {
    let format = OutputFormat::from_mime_type(target_type);
    let rgba = buffer.to_rgba_image();
    let (width, height) = rgba.dimensions();
    let mut out = Cursor::new(Vec::new());

    let result = match format {
        OutputFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();
            JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality)).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::WebP => WebPEncoder::new_lossless(&mut out).write_image(
            rgba.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Png => rgba.write_to(&mut out, ImageFormat::Png),
        OutputFormat::Gif => rgba.write_to(&mut out, ImageFormat::Gif),
        OutputFormat::Bmp => rgba.write_to(&mut out, ImageFormat::Bmp),
        OutputFormat::Tiff => rgba.write_to(&mut out, ImageFormat::Tiff),
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format: format.name(),
        reason: e.to_string(),
    })?;

    Ok(EncodedImage::new(out.into_inner(), format.mime_type()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: encoding the same buffer twice gives identical bytes.
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 0.0f32..=1.0,
            seed in any::<u8>(),
        ) {
            let pixels: Vec<u8> = (0..width * height * 4)
                .map(|i| (i as u8).wrapping_mul(seed))
                .collect();
            let buffer = PixelBuffer::new(width, height, pixels).unwrap();

            let first = encode_image(&buffer, "image/jpeg", quality).unwrap();
            let second = encode_image(&buffer, "image/jpeg", quality).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
