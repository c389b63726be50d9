//! Compression engine: resample to fit, then re-encode at the level's quality.

use crate::codec::ImageCodec;
use crate::decode::resize_to_fit;
use crate::error::Result;
use crate::options::CompressionSettings;
use crate::{ProcessedResult, RawImage};

/// Decode `image`, shrink it to the effective max dimension and re-encode it
/// in its declared type.
///
/// Images already within the cap keep their dimensions. The reported width
/// and height are those of the encoded output.
///
/// # Errors
///
/// `ProcessError::DecodeFailed` or `ProcessError::EncodeFailed` from the codec.
pub fn compress<C: ImageCodec>(
    codec: &C,
    image: &RawImage,
    settings: &CompressionSettings,
) -> Result<ProcessedResult> {
    let buffer = codec.decode(&image.bytes, &image.mime_type)?;
    let max_edge = settings.effective_max_dimension();
    let quality = settings.quality();

    let resized = resize_to_fit(&buffer, max_edge, settings.filter)?;
    log::debug!(
        "Compressing {}: {}x{} -> {}x{} at quality {}",
        image.name,
        buffer.width(),
        buffer.height(),
        resized.width(),
        resized.height(),
        quality
    );

    let encoded = codec.encode(&resized, &image.mime_type, quality)?;
    Ok(ProcessedResult::from_encoded(
        encoded,
        resized.width(),
        resized.height(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::StandardCodec;
    use crate::decode::PixelBuffer;
    use crate::encode::encode_image;
    use crate::options::CompressionLevel;

    fn png(width: u32, height: u32) -> RawImage {
        let buffer = PixelBuffer::filled(width, height, [90, 140, 210, 255]).unwrap();
        let encoded = encode_image(&buffer, "image/png", 1.0).unwrap();
        RawImage::new("img.png", "image/png", encoded.bytes)
    }

    fn settings(level: CompressionLevel, max_dimension: Option<u32>) -> CompressionSettings {
        CompressionSettings {
            level,
            max_dimension,
            ..Default::default()
        }
    }

    #[test]
    fn test_downscales_longer_edge() {
        let result = compress(
            &StandardCodec,
            &png(300, 100),
            &settings(CompressionLevel::Normal, Some(150)),
        )
        .unwrap();
        assert_eq!((result.width, result.height), (150, 50));
        assert_eq!(result.mime_type, "image/png");
    }

    #[test]
    fn test_portrait_downscale() {
        let result = compress(
            &StandardCodec,
            &png(90, 240),
            &settings(CompressionLevel::High, Some(120)),
        )
        .unwrap();
        assert_eq!((result.width, result.height), (45, 120));
    }

    #[test]
    fn test_never_upscales() {
        let result = compress(
            &StandardCodec,
            &png(40, 30),
            &settings(CompressionLevel::Low, Some(1000)),
        )
        .unwrap();
        assert_eq!((result.width, result.height), (40, 30));
    }

    #[test]
    fn test_level_default_dimension_applies() {
        let result = compress(
            &StandardCodec,
            &png(1500, 20),
            &settings(CompressionLevel::Highest, None),
        )
        .unwrap();
        assert_eq!(result.width, 1024);
        assert!(result.height <= 20);
    }

    #[test]
    fn test_jpeg_stays_jpeg() {
        let buffer = PixelBuffer::filled(64, 48, [200, 100, 50, 255]).unwrap();
        let encoded = encode_image(&buffer, "image/jpeg", 0.9).unwrap();
        let image = RawImage::new("photo.jpg", "image/jpeg", encoded.bytes);

        let result = compress(
            &StandardCodec,
            &image,
            &settings(CompressionLevel::Normal, Some(32)),
        )
        .unwrap();
        assert_eq!(result.mime_type, "image/jpeg");
        assert_eq!((result.width, result.height), (32, 24));
        assert_eq!(&result.bytes[..2], &[0xFF, 0xD8]);
    }
}
