//! Encoded bytes and their `data:` URI representation.

use base64::{engine::general_purpose, Engine as _};

/// Bytes produced by an encoder, tagged with the MIME type actually written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Render as `data:{mime};base64,{payload}`.
    pub fn data_url(&self) -> String {
        to_data_url(&self.bytes, &self.mime_type)
    }
}

/// Render bytes as a base64 `data:` URI with the given MIME type.
pub fn to_data_url(bytes: &[u8], mime_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_prefix_and_payload() {
        let url = to_data_url(b"hello", "image/png");
        assert_eq!(url, "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_data_url_empty_payload() {
        assert_eq!(to_data_url(&[], "image/jpeg"), "data:image/jpeg;base64,");
    }

    #[test]
    fn test_encoded_image_data_url_uses_own_type() {
        let encoded = EncodedImage::new(vec![0xFF, 0xD8], "image/jpeg");
        assert_eq!(encoded.data_url(), "data:image/jpeg;base64,/9g=");
    }
}
