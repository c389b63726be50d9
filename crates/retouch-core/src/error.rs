//! Error taxonomy for the processing pipeline.
//!
//! Validation variants are raised before any pixel work starts and carry the
//! interpolated limit and actual values. Codec variants wrap the decode and
//! encode errors unchanged.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Cannot process more than {limit} images at a time. Files provided: {count}")]
    CountExceeded { limit: usize, count: usize },

    #[error("File size exceeds the maximum limit of {limit_mb} MB. File size: {size_mb:.2} MB")]
    SizeExceeded { limit_mb: f64, size_mb: f64 },

    #[error("Unsupported file format: {mime_type}. Supported formats: {}", .supported.join(", "))]
    UnsupportedFormat {
        mime_type: String,
        supported: Vec<String>,
    },

    /// A limit resolved to an unusable value; this is a caller bug, not bad input.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    #[error("Invalid processing mode: {0}")]
    InvalidMode(String),

    #[error(transparent)]
    DecodeFailed(#[from] DecodeError),

    #[error(transparent)]
    EncodeFailed(#[from] EncodeError),
}

impl ProcessError {
    /// True for the errors detected before any decoding happens.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProcessError::CountExceeded { .. }
                | ProcessError::SizeExceeded { .. }
                | ProcessError::UnsupportedFormat { .. }
                | ProcessError::InvalidConfiguration(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ProcessError>;
