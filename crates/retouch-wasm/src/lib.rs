//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core pipeline to JavaScript/TypeScript
//! applications. Batches run sequentially; the browser has no worker pool.
//!
//! # Module Structure
//!
//! - `processor` - The `ImageProcessor` class (`processImages`, `processImage`)
//! - `types` - WASM-compatible wrappers for input files and results

use wasm_bindgen::prelude::*;

mod processor;
mod types;

pub use processor::JsImageProcessor;
pub use types::{JsProcessedResult, JsRawImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
