//! Raster decoding and resampling.
//!
//! This module provides:
//! - The [`PixelBuffer`] RGBA raster every pipeline stage operates on
//! - Decoding encoded bytes into a buffer via the `image` crate
//! - Aspect-preserving, non-upscaling resampling

mod reader;
mod resize;
mod types;

pub use reader::decode_image;
pub use resize::{fit_dimensions, resize, resize_to_fit};
pub use types::{clamp_channel, DecodeError, FilterType, PixelBuffer, CHANNELS};
