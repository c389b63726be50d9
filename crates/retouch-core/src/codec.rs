//! The boundary between the pixel pipeline and file formats.
//!
//! The engines only ever see a [`PixelBuffer`]. Turning bytes into one and
//! back goes through an [`ImageCodec`], so a host can plug in its own codec
//! and tests can inject failures.

use crate::decode::{decode_image, DecodeError, PixelBuffer};
use crate::encode::{encode_image, EncodeError, EncodedImage};

/// Decode and encode collaborator used by every engine.
pub trait ImageCodec: Send + Sync {
    /// Decode `bytes` into an RGBA buffer. `declared_type` is a hint only.
    fn decode(&self, bytes: &[u8], declared_type: &str) -> Result<PixelBuffer, DecodeError>;

    /// Encode `buffer` as `target_type` with a 0.0-1.0 quality factor.
    fn encode(
        &self,
        buffer: &PixelBuffer,
        target_type: &str,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError>;
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodec;

impl ImageCodec for StandardCodec {
    fn decode(&self, bytes: &[u8], declared_type: &str) -> Result<PixelBuffer, DecodeError> {
        decode_image(bytes, declared_type)
    }

    fn encode(
        &self,
        buffer: &PixelBuffer,
        target_type: &str,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError> {
        encode_image(buffer, target_type, quality)
    }
}

impl<C: ImageCodec + ?Sized> ImageCodec for &C {
    fn decode(&self, bytes: &[u8], declared_type: &str) -> Result<PixelBuffer, DecodeError> {
        (**self).decode(bytes, declared_type)
    }

    fn encode(
        &self,
        buffer: &PixelBuffer,
        target_type: &str,
        quality: f32,
    ) -> Result<EncodedImage, EncodeError> {
        (**self).encode(buffer, target_type, quality)
    }
}
