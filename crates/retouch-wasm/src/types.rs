//! WASM-compatible wrapper types for input files and results.
//!
//! Byte payloads cross the boundary as `Uint8Array`; each getter returns a
//! copy in JavaScript memory.

use retouch_core::{ProcessedResult, RawImage};
use wasm_bindgen::prelude::*;

/// An input file for JavaScript: `new RawImage(name, type, bytes)`.
#[wasm_bindgen(js_name = RawImage)]
pub struct JsRawImage {
    inner: RawImage,
}

#[wasm_bindgen(js_class = RawImage)]
impl JsRawImage {
    /// Create an input file.
    ///
    /// # Arguments
    /// * `name` - File name, kept through every mode
    /// * `mime_type` - Declared MIME type (a `File`'s `type`)
    /// * `bytes` - Encoded file contents
    #[wasm_bindgen(constructor)]
    pub fn new(name: String, mime_type: String, bytes: Vec<u8>) -> JsRawImage {
        JsRawImage {
            inner: RawImage::new(name, mime_type, bytes),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[wasm_bindgen(getter, js_name = "type")]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.clone()
    }

    /// Size of the payload in bytes.
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.inner.len()
    }
}

impl JsRawImage {
    pub(crate) fn as_core(&self) -> &RawImage {
        &self.inner
    }

    pub(crate) fn into_core(self) -> RawImage {
        self.inner
    }
}

/// A processed image returned to JavaScript.
#[wasm_bindgen(js_name = ProcessedResult)]
pub struct JsProcessedResult {
    inner: ProcessedResult,
}

#[wasm_bindgen(js_class = ProcessedResult)]
impl JsProcessedResult {
    /// Encoded output bytes as a `Uint8Array`.
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// `data:` URI of the output, ready for an `<img src>`.
    #[wasm_bindgen(getter, js_name = dataUrl)]
    pub fn data_url(&self) -> String {
        self.inner.data_url.clone()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.clone()
    }

    /// Output width; 0 in direct mode.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height; 0 in direct mode.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }
}

impl From<ProcessedResult> for JsProcessedResult {
    fn from(inner: ProcessedResult) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_image_accessors() {
        let file = JsRawImage::new("a.png".into(), "image/png".into(), vec![1, 2, 3, 4]);
        assert_eq!(file.name(), "a.png");
        assert_eq!(file.mime_type(), "image/png");
        assert_eq!(file.size(), 4);
        assert_eq!(file.into_core().bytes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_processed_result_accessors() {
        let result = JsProcessedResult::from(ProcessedResult {
            bytes: vec![7, 7],
            data_url: "data:image/png;base64,Bwc=".to_string(),
            mime_type: "image/png".to_string(),
            width: 10,
            height: 20,
        });
        assert_eq!(result.bytes(), vec![7, 7]);
        assert_eq!(result.data_url(), "data:image/png;base64,Bwc=");
        assert_eq!(result.mime_type(), "image/png");
        assert_eq!((result.width(), result.height()), (10, 20));
    }
}
