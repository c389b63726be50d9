//! Square-kernel spatial filtering.
//!
//! A kernel of odd side `s` is centred on each pixel and the weighted sum of
//! the `s × s` neighbourhood is taken per color channel. Taps that fall
//! outside the image contribute nothing (zero padding), so border pixels of a
//! kernel that sums to 1 drift away from the source while interior pixels of
//! a flat region stay put.
//!
//! [`convolve`] returns raw, unclamped sums. [`apply_kernel`] is the
//! write-back used by the enhancement pipeline and clamps exactly once.

use thiserror::Error;

use crate::decode::{clamp_channel, PixelBuffer, CHANNELS};

/// Weights of the sharpening kernel (sum 1).
pub const SHARPEN_WEIGHTS: [f32; 9] = [
    0.0, -1.0, 0.0, //
    -1.0, 5.0, -1.0, //
    0.0, -1.0, 0.0,
];

/// Weights of the texture kernel, a normalized high-boost (sum 1).
pub const TEXTURE_WEIGHTS: [f32; 9] = [
    -1.0 / 12.0, -1.0 / 12.0, -1.0 / 12.0, //
    -1.0 / 12.0, 20.0 / 12.0, -1.0 / 12.0, //
    -1.0 / 12.0, -1.0 / 12.0, -1.0 / 12.0,
];

/// Errors constructing a [`Kernel`].
#[derive(Debug, Error, PartialEq)]
pub enum KernelError {
    #[error("Kernel has {len} weights, which is not an odd square")]
    NotOddSquare { len: usize },
}

/// A square matrix of convolution weights in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    side: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// The side length is `round(sqrt(len))`; it must be odd and its square
    /// must equal the number of weights.
    pub fn new(weights: Vec<f32>) -> Result<Self, KernelError> {
        let len = weights.len();
        let side = (len as f64).sqrt().round() as usize;
        if len == 0 || side * side != len || side % 2 == 0 {
            return Err(KernelError::NotOddSquare { len });
        }
        Ok(Self { side, weights })
    }

    /// The fixed 3×3 sharpening kernel.
    pub fn sharpen() -> Self {
        Self {
            side: 3,
            weights: SHARPEN_WEIGHTS.to_vec(),
        }
    }

    /// The fixed 3×3 texture kernel.
    pub fn texture() -> Self {
        Self {
            side: 3,
            weights: TEXTURE_WEIGHTS.to_vec(),
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Sum of all weights. A kernel summing to 1 preserves flat regions.
    pub fn weight_sum(&self) -> f32 {
        self.weights.iter().sum()
    }
}

/// Convolve every pixel of `buffer` with `kernel` in one pass.
///
/// Returns `width * height * 4` samples laid out like the source. R, G and B
/// hold unclamped weighted sums; alpha is copied from the source.
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel) -> Vec<f32> {
    let width = buffer.width() as i64;
    let height = buffer.height() as i64;
    let src = buffer.pixels();
    let side = kernel.side as i64;
    let half = side / 2;

    let mut out = vec![0.0f32; src.len()];

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 3];

            for (k, &weight) in kernel.weights.iter().enumerate() {
                if weight == 0.0 {
                    continue;
                }
                let sx = x + (k as i64 % side) - half;
                let sy = y + (k as i64 / side) - half;
                if sx < 0 || sy < 0 || sx >= width || sy >= height {
                    continue;
                }
                let i = (sy * width + sx) as usize * CHANNELS;
                for (c, sum) in acc.iter_mut().enumerate() {
                    *sum += weight * src[i + c] as f32;
                }
            }

            let o = (y * width + x) as usize * CHANNELS;
            out[o..o + 3].copy_from_slice(&acc);
            out[o + 3] = src[o + 3] as f32;
        }
    }

    out
}

/// Convolve and write the clamped result back into `buffer`.
pub fn apply_kernel(buffer: &mut PixelBuffer, kernel: &Kernel) {
    let sums = convolve(buffer, kernel);
    for (dst, sum) in buffer.pixels_mut().iter_mut().zip(sums) {
        *dst = clamp_channel(sum);
    }
}
