//! Retouch Core - batch image validation, enhancement and compression
//!
//! This crate provides the pixel pipeline behind Retouch: input validation,
//! tonal adjustments, convolution filters, dimension-aware resampling and
//! quality-level re-encoding, dispatched per image by processing mode.
//!
//! # Module Structure
//!
//! - `validate` - Batch count, file size and declared type checks
//! - `adjustments` - Brightness, contrast and saturation
//! - `convolution` - Square-kernel filters (sharpening, texture)
//! - `enhance` / `compress` - The two engines
//! - `processor` - Mode dispatch and parallel batches
//! - `codec` - Decode/encode seam, backed by `decode` and `encode`

pub mod adjustments;
pub mod analysis;
pub mod codec;
pub mod compress;
pub mod config;
pub mod convolution;
pub mod decode;
pub mod encode;
pub mod enhance;
pub mod error;
pub mod options;
pub mod processor;
pub mod validate;

pub use analysis::{analyze, ImageAnalysis};
pub use codec::{ImageCodec, StandardCodec};
pub use config::{ProcessorConfig, DEFAULT_SUPPORTED_FORMATS};
pub use convolution::{apply_kernel, convolve, Kernel, KernelError};
pub use decode::{DecodeError, FilterType, PixelBuffer};
pub use encode::{EncodeError, EncodedImage};
pub use error::{ProcessError, Result};
pub use options::{
    Brightness, CompressionLevel, CompressionOptions, CompressionSettings, EnhancementOptions,
    EnhancementSettings, ProcessingMode, ProcessingOptions,
};
pub use processor::ImageProcessor;
pub use validate::ValidationLimits;

use serde::{Deserialize, Serialize};

/// An input file: name, declared MIME type and encoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    pub name: String,
    /// MIME type as declared by the host, e.g. `image/jpeg`.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl RawImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Size of the encoded payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Output of one image's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResult {
    pub bytes: Vec<u8>,
    /// `data:{mime};base64,...` rendering of `bytes`.
    pub data_url: String,
    /// MIME type of `bytes`.
    pub mime_type: String,
    /// Output width; 0 when the image was passed through without decoding.
    pub width: u32,
    /// Output height; 0 when the image was passed through without decoding.
    pub height: u32,
}

impl ProcessedResult {
    /// Wrap encoder output together with the dimensions it was encoded at.
    pub fn from_encoded(encoded: EncodedImage, width: u32, height: u32) -> Self {
        Self {
            data_url: encoded.data_url(),
            bytes: encoded.bytes,
            mime_type: encoded.mime_type,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_image_len() {
        let image = RawImage::new("a.jpg", "image/jpeg", vec![0u8; 42]);
        assert_eq!(image.len(), 42);
        assert!(!image.is_empty());
        assert!(RawImage::new("e.png", "image/png", vec![]).is_empty());
    }

    #[test]
    fn test_processed_result_from_encoded() {
        let encoded = EncodedImage::new(b"hello".to_vec(), "image/png");
        let result = ProcessedResult::from_encoded(encoded, 3, 2);

        assert_eq!(result.bytes, b"hello");
        assert_eq!(result.data_url, "data:image/png;base64,aGVsbG8=");
        assert_eq!(result.mime_type, "image/png");
        assert_eq!((result.width, result.height), (3, 2));
    }
}
