//! Batch and per-image input validation.
//!
//! Runs before any decoding. Checks happen in a fixed order: batch count
//! first, then for each image in submission order its size and then its
//! declared type. The first violation aborts the whole batch.

use crate::config::ProcessorConfig;
use crate::error::{ProcessError, Result};
use crate::options::ProcessingOptions;
use crate::RawImage;

/// Bytes per MB as used in size limits and messages.
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Limits in effect for one call, after per-call overrides are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationLimits<'a> {
    pub max_file_size_mb: f64,
    pub max_image_count: usize,
    pub supported_formats: &'a [String],
}

impl<'a> ValidationLimits<'a> {
    /// Merge per-call overrides over the processor config, caller values winning.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::InvalidConfiguration` if the merged file size
    /// limit is not a positive number, the image count limit is zero, or the
    /// format list is empty.
    pub fn resolve(config: &'a ProcessorConfig, options: &'a ProcessingOptions) -> Result<Self> {
        let max_file_size_mb = options.max_file_size_mb.unwrap_or(config.max_file_size_mb);
        let max_image_count = options.max_image_count.unwrap_or(config.max_image_count);
        let supported_formats = options
            .supported_formats
            .as_deref()
            .unwrap_or(&config.supported_formats);

        if !max_file_size_mb.is_finite() || max_file_size_mb <= 0.0 {
            log::warn!("Rejecting call: max file size {} MB", max_file_size_mb);
            return Err(ProcessError::InvalidConfiguration(
                "maxFileSizeMB is not defined",
            ));
        }
        if max_image_count == 0 {
            log::warn!("Rejecting call: max image count is 0");
            return Err(ProcessError::InvalidConfiguration(
                "maxImageCount is not defined",
            ));
        }
        if supported_formats.is_empty() {
            log::warn!("Rejecting call: no supported formats");
            return Err(ProcessError::InvalidConfiguration(
                "supportedFormats is not defined or empty",
            ));
        }

        Ok(Self {
            max_file_size_mb,
            max_image_count,
            supported_formats,
        })
    }
}

/// Size of a payload in MB.
pub fn size_in_mb(byte_len: usize) -> f64 {
    byte_len as f64 / BYTES_PER_MB
}

/// Check the batch count, then every image in order.
pub fn validate_batch(images: &[RawImage], limits: &ValidationLimits<'_>) -> Result<()> {
    if images.len() > limits.max_image_count {
        log::warn!(
            "Rejecting batch of {} images (limit {})",
            images.len(),
            limits.max_image_count
        );
        return Err(ProcessError::CountExceeded {
            limit: limits.max_image_count,
            count: images.len(),
        });
    }

    images
        .iter()
        .try_for_each(|image| validate_image(image, limits))
}

/// Check one image's size and declared type.
pub fn validate_image(image: &RawImage, limits: &ValidationLimits<'_>) -> Result<()> {
    let size_mb = size_in_mb(image.len());
    if size_mb > limits.max_file_size_mb {
        log::warn!(
            "Rejecting {}: {:.2} MB exceeds {} MB",
            image.name,
            size_mb,
            limits.max_file_size_mb
        );
        return Err(ProcessError::SizeExceeded {
            limit_mb: limits.max_file_size_mb,
            size_mb,
        });
    }

    if !limits
        .supported_formats
        .iter()
        .any(|format| *format == image.mime_type)
    {
        log::warn!("Rejecting {}: unsupported type {}", image.name, image.mime_type);
        return Err(ProcessError::UnsupportedFormat {
            mime_type: image.mime_type.clone(),
            supported: limits.supported_formats.to_vec(),
        });
    }

    Ok(())
}
