//! Processor-level configuration.

use serde::{Deserialize, Serialize};

/// MIME types accepted when the caller doesn't configure any.
pub const DEFAULT_SUPPORTED_FORMATS: [&str; 11] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
    "image/tiff",
    "image/x-icon",
    "image/svg+xml",
    "image/heif",
    "image/heic",
    "image/jfif",
];

/// Limits and pool sizing fixed for a processor's lifetime.
///
/// Per-call [`ProcessingOptions`](crate::ProcessingOptions) can override the
/// three limits for a single call; see
/// [`ValidationLimits::resolve`](crate::validate::ValidationLimits::resolve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessorConfig {
    /// Largest accepted input, in MiB (bytes / 1,048,576).
    #[serde(rename = "maxFileSizeMB")]
    pub max_file_size_mb: f64,
    /// Largest accepted batch.
    pub max_image_count: usize,
    /// Accepted declared MIME types, in the order error messages list them.
    pub supported_formats: Vec<String>,
    /// Worker threads for batch processing; 0 shares the global pool.
    pub worker_threads: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 5.0,
            max_image_count: 1,
            supported_formats: DEFAULT_SUPPORTED_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            worker_threads: 0,
        }
    }
}

impl ProcessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_size_mb(mut self, mb: f64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    pub fn with_max_image_count(mut self, count: usize) -> Self {
        self.max_image_count = count;
        self
    }

    pub fn with_supported_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.max_file_size_mb, 5.0);
        assert_eq!(config.max_image_count, 1);
        assert_eq!(config.supported_formats.len(), 11);
        assert_eq!(config.supported_formats[0], "image/jpeg");
        assert_eq!(config.worker_threads, 0);
    }

    #[test]
    fn test_builder() {
        let config = ProcessorConfig::new()
            .with_max_file_size_mb(2.5)
            .with_max_image_count(3)
            .with_supported_formats(["image/png"])
            .with_worker_threads(2);

        assert_eq!(config.max_file_size_mb, 2.5);
        assert_eq!(config.max_image_count, 3);
        assert_eq!(config.supported_formats, vec!["image/png".to_string()]);
        assert_eq!(config.worker_threads, 2);
    }

    #[test]
    fn test_from_json() {
        let config: ProcessorConfig = serde_json::from_str(
            r#"{"maxFileSizeMB":2.5,"maxImageCount":3,"supportedFormats":["image/png"],"workerThreads":2}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            ProcessorConfig::new()
                .with_max_file_size_mb(2.5)
                .with_max_image_count(3)
                .with_supported_formats(["image/png"])
                .with_worker_threads(2)
        );
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config: ProcessorConfig = serde_json::from_str(r#"{"maxImageCount":4}"#).unwrap();
        assert_eq!(config.max_image_count, 4);
        assert_eq!(config.max_file_size_mb, 5.0);
        assert_eq!(config.supported_formats.len(), 11);

        let config: ProcessorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProcessorConfig::default());
    }
}
