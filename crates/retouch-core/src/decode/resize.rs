//! Dimension-constrained resampling.
//!
//! All functions return new `PixelBuffer` instances without modifying the input,
//! and none of them ever enlarge an image.

use super::{DecodeError, FilterType, PixelBuffer};

/// Resize a buffer to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target edge is zero.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    let resized = image::imageops::resize(
        &image.to_rgba_image(),
        width,
        height,
        filter.to_image_filter(),
    );

    PixelBuffer::from_rgba_image(resized)
}

/// Resize a buffer so its longer edge is at most `max_edge`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged; there is no upscaling.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &PixelBuffer,
    max_edge: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    let (new_width, new_height) = fit_dimensions(image.width(), image.height(), max_edge);
    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions that fit within `max_edge` while preserving aspect ratio.
///
/// The longer edge becomes `max_edge` and the shorter edge is
/// `shorter * max_edge / longer`, rounded, never below 1. Dimensions that
/// already fit are returned as-is.
pub fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    if width <= max_edge && height <= max_edge {
        return (width, height);
    }

    if width >= height {
        // Landscape or square: constrain by width
        let new_height = (height as f64 * max_edge as f64 / width as f64).round() as u32;
        (max_edge, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_width = (width as f64 * max_edge as f64 / height as f64).round() as u32;
        (new_width.max(1), max_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_resize_basic() {
        let img = gradient(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 25);
        assert_eq!(resized.pixels().len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_same_dimensions_is_identity() {
        let img = gradient(40, 20);
        let resized = resize(&img, 40, 20, FilterType::Lanczos3).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = gradient(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = gradient(600, 400);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();

        // 400 * (256 / 600) ≈ 170.67
        assert_eq!(resized.width(), 256);
        assert_eq!(resized.height(), 171);
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = gradient(400, 600);
        let resized = resize_to_fit(&img, 256, FilterType::Nearest).unwrap();

        assert_eq!(resized.width(), 171);
        assert_eq!(resized.height(), 256);
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = gradient(100, 50);
        let resized = resize_to_fit(&img, 256, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width(), 100);
        assert_eq!(resized.height(), 50);
    }

    #[test]
    fn test_resize_to_fit_keeps_alpha() {
        let img = PixelBuffer::filled(64, 64, [10, 20, 30, 0]).unwrap();
        let resized = resize_to_fit(&img, 16, FilterType::Bilinear).unwrap();
        assert_eq!(resized.pixel(8, 8)[3], 0);
    }

    #[test]
    fn test_resize_to_fit_zero_max_edge_error() {
        let img = gradient(100, 50);
        assert!(resize_to_fit(&img, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_fit_dimensions() {
        assert_eq!(fit_dimensions(6000, 4000, 2560), (2560, 1707));
        assert_eq!(fit_dimensions(4000, 6000, 2560), (1707, 2560));
        assert_eq!(fit_dimensions(4000, 4000, 256), (256, 256));
        assert_eq!(fit_dimensions(300, 200, 2048), (300, 200));
        assert_eq!(fit_dimensions(0, 0, 256), (0, 0));
    }

    #[test]
    fn test_fit_dimensions_extreme_aspect_never_zero() {
        assert_eq!(fit_dimensions(10_000, 2, 100), (100, 1));
        assert_eq!(fit_dimensions(2, 10_000, 100), (1, 100));
    }
}
