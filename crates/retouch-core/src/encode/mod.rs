//! Raster-to-bytes encoding.
//!
//! This module provides:
//! - Encoding a [`PixelBuffer`](crate::PixelBuffer) into JPEG, PNG, WebP,
//!   GIF, BMP or TIFF bytes with a quality factor
//! - The data-URI rendering of encoded bytes

mod data_url;
mod writer;

pub use data_url::{to_data_url, EncodedImage};
pub use writer::{encode_image, jpeg_quality, EncodeError, OutputFormat};
