//! Byte-to-raster decoding backed by the `image` crate.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, PixelBuffer};

/// Decode an encoded image into an RGBA pixel buffer.
///
/// The container format is sniffed from the leading bytes. The declared MIME
/// type is only consulted when sniffing fails, which matters for formats
/// without a reliable signature (TGA, some ICO files).
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if no decoder matches the bytes or the
/// declared type, and `DecodeError::CorruptedFile` if decoding itself fails.
pub fn decode_image(bytes: &[u8], declared_type: &str) -> Result<PixelBuffer, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        let format = ImageFormat::from_mime_type(declared_type).ok_or_else(|| {
            DecodeError::InvalidFormat(format!("cannot decode {declared_type}"))
        })?;
        reader.set_format(format);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    PixelBuffer::from_rgba_image(img.into_rgba8())
}
