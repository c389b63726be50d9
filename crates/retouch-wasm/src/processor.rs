//! `ImageProcessor` class exposed to JavaScript.
//!
//! # Example
//!
//! ```typescript
//! import init, { ImageProcessor, RawImage } from '@retouch/wasm';
//!
//! await init();
//!
//! const processor = new ImageProcessor({ maxImageCount: 5 });
//! const file = new RawImage(f.name, f.type, new Uint8Array(await f.arrayBuffer()));
//! const [result] = processor.processImages([file], {
//!   mode: 'both',
//!   compressionOptions: { level: 'high' },
//! });
//! img.src = result.dataUrl;
//! ```

use retouch_core::{ImageProcessor, ProcessingOptions, ProcessorConfig, RawImage};
use wasm_bindgen::prelude::*;

use crate::types::{JsProcessedResult, JsRawImage};

#[wasm_bindgen(js_name = ImageProcessor)]
pub struct JsImageProcessor {
    inner: ImageProcessor,
}

#[wasm_bindgen(js_class = ImageProcessor)]
impl JsImageProcessor {
    /// Create a processor.
    ///
    /// # Arguments
    /// * `config` - Optional `{ maxFileSizeMB, maxImageCount, supportedFormats }`;
    ///   missing fields take their defaults
    ///
    /// # Errors
    /// Returns error if the config object has the wrong shape
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsImageProcessor, JsValue> {
        let config: ProcessorConfig = from_optional(config, "Invalid processor config")?;
        let inner = ImageProcessor::new(config).map_err(to_js_error)?;
        Ok(JsImageProcessor { inner })
    }

    /// Validate and process a batch of files.
    ///
    /// Results come back in input order. Any validation or processing error
    /// rejects the whole batch with its message.
    #[wasm_bindgen(js_name = processImages)]
    pub fn process_images(
        &self,
        files: Vec<JsRawImage>,
        options: JsValue,
    ) -> Result<Vec<JsProcessedResult>, JsValue> {
        let options: ProcessingOptions = from_optional(options, "Invalid processing options")?;
        let images: Vec<RawImage> = files.into_iter().map(JsRawImage::into_core).collect();

        let results = self
            .inner
            .process_images(&images, &options)
            .map_err(to_js_error)?;
        Ok(results.into_iter().map(JsProcessedResult::from).collect())
    }

    /// Process a single file without batch validation.
    #[wasm_bindgen(js_name = processImage)]
    pub fn process_image(
        &self,
        file: &JsRawImage,
        options: JsValue,
    ) -> Result<JsProcessedResult, JsValue> {
        let options: ProcessingOptions = from_optional(options, "Invalid processing options")?;
        self.inner
            .process_image(file.as_core(), &options)
            .map(JsProcessedResult::from)
            .map_err(to_js_error)
    }
}

/// Deserialize an optional JS object, treating `undefined` and `null` as `{}`.
fn from_optional<T>(value: JsValue, context: &str) -> Result<T, JsValue>
where
    T: Default + serde::de::DeserializeOwned,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_sys::Error::new(&format!("{}: {}", context, e)).into())
}

/// Surface a pipeline error as a JS `Error` carrying its message.
fn to_js_error(err: retouch_core::ProcessError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// WASM-specific tests that require JsValue.
///
/// These go through the JS boundary and can only run on wasm32 targets.
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use retouch_core::encode::encode_image;
    use retouch_core::PixelBuffer;
    use serde::Serialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TestOptions {
        mode: &'static str,
    }

    fn png_file(name: &str, width: u32, height: u32) -> JsRawImage {
        let buffer = PixelBuffer::filled(width, height, [40, 80, 120, 255]).unwrap();
        let encoded = encode_image(&buffer, "image/png", 1.0).unwrap();
        JsRawImage::new(name.to_string(), "image/png".to_string(), encoded.bytes)
    }

    fn message(err: JsValue) -> String {
        String::from(err.unchecked_into::<js_sys::Error>().message())
    }

    fn mode(name: &'static str) -> JsValue {
        serde_wasm_bindgen::to_value(&TestOptions { mode: name }).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_default_processor_compresses() {
        let processor = JsImageProcessor::new(JsValue::UNDEFINED).unwrap();
        let results = processor
            .process_images(vec![png_file("a.png", 16, 8)], JsValue::UNDEFINED)
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!((results[0].width(), results[0].height()), (16, 8));
        assert!(results[0].data_url().starts_with("data:image/png;base64,"));
    }

    #[wasm_bindgen_test]
    fn test_direct_mode() {
        let processor = JsImageProcessor::new(JsValue::NULL).unwrap();
        let file = png_file("a.png", 4, 4);
        let result = processor.process_image(&file, mode("direct")).unwrap();
        assert_eq!(result.bytes(), file.as_core().bytes);
        assert_eq!(result.width(), 0);
    }

    #[wasm_bindgen_test]
    fn test_invalid_mode_rejected() {
        let processor = JsImageProcessor::new(JsValue::UNDEFINED).unwrap();
        let err = processor
            .process_image(&png_file("a.png", 4, 4), mode("sepia"))
            .unwrap_err();
        assert!(message(err).contains("Invalid processing mode: sepia"));
    }

    #[wasm_bindgen_test]
    fn test_count_limit_from_config() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct TestConfig {
            max_image_count: usize,
        }

        let config = serde_wasm_bindgen::to_value(&TestConfig { max_image_count: 1 }).unwrap();
        let processor = JsImageProcessor::new(config).unwrap();
        let err = processor
            .process_images(
                vec![png_file("a.png", 2, 2), png_file("b.png", 2, 2)],
                JsValue::UNDEFINED,
            )
            .unwrap_err();
        assert_eq!(
            message(err),
            "Cannot process more than 1 images at a time. Files provided: 2"
        );
    }
}
