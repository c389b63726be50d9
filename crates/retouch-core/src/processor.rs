//! Mode dispatch and batch processing.
//!
//! An [`ImageProcessor`] owns the processor-level config, the codec and the
//! step defaults. It holds no per-call state, so one processor can serve
//! concurrent calls.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::codec::{ImageCodec, StandardCodec};
use crate::compress::compress;
use crate::config::ProcessorConfig;
use crate::encode::to_data_url;
use crate::enhance::enhance;
use crate::error::Result;
use crate::options::{CompressionSettings, EnhancementSettings, ProcessingMode, ProcessingOptions};
use crate::validate::{validate_batch, ValidationLimits};
use crate::{ProcessedResult, RawImage};

pub struct ImageProcessor<C = StandardCodec> {
    config: ProcessorConfig,
    codec: C,
    enhancement_defaults: EnhancementSettings,
    compression_defaults: CompressionSettings,
    #[cfg(feature = "parallel")]
    thread_pool: Option<rayon::ThreadPool>,
}

impl ImageProcessor<StandardCodec> {
    /// Create a processor backed by the `image` crate codecs.
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        Self::with_codec(config, StandardCodec)
    }
}

impl<C: ImageCodec> ImageProcessor<C> {
    /// Create a processor with a custom codec.
    ///
    /// With the `parallel` feature and a non-zero `worker_threads`, a
    /// dedicated worker pool is built once here.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::InvalidConfiguration` if the worker pool
    /// cannot be created.
    pub fn with_codec(config: ProcessorConfig, codec: C) -> Result<Self> {
        #[cfg(feature = "parallel")]
        let thread_pool = if config.worker_threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.worker_threads)
                .build()
                .map_err(|e| {
                    log::error!("Failed to create thread pool: {}", e);
                    crate::error::ProcessError::InvalidConfiguration(
                        "workerThreads could not be started",
                    )
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            config,
            codec,
            enhancement_defaults: EnhancementSettings::default(),
            compression_defaults: CompressionSettings::default(),
            #[cfg(feature = "parallel")]
            thread_pool,
        })
    }

    /// Replace the enhancement step defaults that caller options merge over.
    pub fn with_enhancement_defaults(mut self, defaults: EnhancementSettings) -> Self {
        self.enhancement_defaults = defaults;
        self
    }

    /// Replace the compression step defaults that caller options merge over.
    pub fn with_compression_defaults(mut self, defaults: CompressionSettings) -> Self {
        self.compression_defaults = defaults;
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Validate a batch, then process every image with the same options.
    ///
    /// Results are in input order. The first validation or processing error
    /// fails the whole call.
    pub fn process_images(
        &self,
        images: &[RawImage],
        options: &ProcessingOptions,
    ) -> Result<Vec<ProcessedResult>> {
        let limits = ValidationLimits::resolve(&self.config, options)?;
        validate_batch(images, &limits)?;

        log::info!(
            "Processing {} images in {} mode",
            images.len(),
            options.mode()
        );

        self.run_batch(images, options)
    }

    #[cfg(feature = "parallel")]
    fn run_batch(
        &self,
        images: &[RawImage],
        options: &ProcessingOptions,
    ) -> Result<Vec<ProcessedResult>> {
        let run = || {
            images
                .par_iter()
                .map(|image| self.process_image(image, options))
                .collect()
        };

        match &self.thread_pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_batch(
        &self,
        images: &[RawImage],
        options: &ProcessingOptions,
    ) -> Result<Vec<ProcessedResult>> {
        images
            .iter()
            .map(|image| self.process_image(image, options))
            .collect()
    }

    /// Process one image according to `options.mode`. No validation is done.
    pub fn process_image(
        &self,
        image: &RawImage,
        options: &ProcessingOptions,
    ) -> Result<ProcessedResult> {
        let mode = options.mode();
        log::debug!("Dispatching {} to {} mode", image.name, mode);

        match mode {
            ProcessingMode::Direct => Ok(direct(image)),
            ProcessingMode::Enhancement => self.enhance(image, options),
            ProcessingMode::Compression => self.compress(image, options),
            ProcessingMode::Both => {
                let enhanced = self.enhance(image, options)?;
                let intermediate =
                    RawImage::new(image.name.clone(), image.mime_type.clone(), enhanced.bytes);
                self.compress(&intermediate, options)
            }
        }
    }

    fn enhance(&self, image: &RawImage, options: &ProcessingOptions) -> Result<ProcessedResult> {
        let settings = options.enhancement(&self.enhancement_defaults);
        enhance(&self.codec, image, &settings)
    }

    fn compress(&self, image: &RawImage, options: &ProcessingOptions) -> Result<ProcessedResult> {
        let settings = options.compression(&self.compression_defaults);
        compress(&self.codec, image, &settings)
    }
}

/// Pass the input through without decoding; dimensions are reported as 0.
fn direct(image: &RawImage) -> ProcessedResult {
    ProcessedResult {
        data_url: to_data_url(&image.bytes, &image.mime_type),
        bytes: image.bytes.clone(),
        mime_type: image.mime_type.clone(),
        width: 0,
        height: 0,
    }
}
