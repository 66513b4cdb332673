//! Histogram equalization.
//!
//! Remaps every pixel through the CDF of the image's own density histogram,
//! flattening its intensity distribution. The CDF is scaled by `1 / n_bins`
//! (see [`crate::filters::histogram::scaled_cdf`]), so results are biased
//! low and never reach 1.0.
//!
//! ## Supported Formats
//!
//! - **Grayscale f64**: (height, width) - the core [`equalize`]
//! - **f32**: (height, width, 1|3|4) - each color channel independently
//! - **u8**: (height, width, 1|3|4) - mapped through 0.0-1.0, rounded back
//!
//! Alpha (channel 3 of 4) is always preserved.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{invalid_argument, Result};
use crate::filters::histogram::{histogram_cdf, interp, validate_bins};

/// Default histogram resolution.
pub const DEFAULT_BINS: usize = 256;

/// Equalization parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualizeParams {
    /// Number of bin edges; the histogram has `n_bins - 1` intervals.
    pub n_bins: usize,
}

impl Default for EqualizeParams {
    fn default() -> Self {
        Self { n_bins: DEFAULT_BINS }
    }
}

impl EqualizeParams {
    pub fn with_bins(n_bins: usize) -> Self {
        Self { n_bins }
    }

    pub fn validate(&self) -> Result<()> {
        validate_bins(self.n_bins)
    }
}

// ============================================================================
// Grayscale (f64)
// ============================================================================

/// Equalize a grayscale image.
///
/// Values are expected in [0, 1] but not checked: out-of-range pixels are not
/// counted in the histogram and clamp to the first or last CDF value.
///
/// # Arguments
/// * `image` - 2D array view (height, width), any memory layout
/// * `n_bins` - Number of bin edges, at least 2 (256 by default)
///
/// # Returns
/// New array of the same shape holding the interpolated CDF values
pub fn equalize(image: ArrayView2<f64>, n_bins: usize) -> Result<Array2<f64>> {
    validate_bins(n_bins)?;
    if image.is_empty() {
        return Err(invalid_argument("image has no pixels"));
    }

    let (rows, cols) = image.dim();
    debug!(rows, cols, n_bins, "equalizing image");

    // Row-major in logical order, regardless of strides
    let flat: Vec<f64> = image.iter().copied().collect();

    let hc = histogram_cdf(&flat, n_bins)?;
    trace!(final_cdf = hc.final_cdf(), "cdf computed");

    let xp = hc.left_edges();
    let equalized: Vec<f64> = flat.iter().map(|&v| interp(v, xp, &hc.cdf)).collect();

    Ok(Array2::from_shape_vec((rows, cols), equalized)?)
}

/// Equalize with parameters from an [`EqualizeParams`].
pub fn equalize_with(image: ArrayView2<f64>, params: &EqualizeParams) -> Result<Array2<f64>> {
    equalize(image, params.n_bins)
}

/// CDF that [`equalize`] would interpolate through for `image`.
pub fn equalization_cdf(image: ArrayView2<f64>, n_bins: usize) -> Result<Vec<f64>> {
    if image.is_empty() {
        return Err(invalid_argument("image has no pixels"));
    }
    let flat: Vec<f64> = image.iter().copied().collect();
    Ok(histogram_cdf(&flat, n_bins)?.cdf)
}

// ============================================================================
// Multi-channel
// ============================================================================

/// Check that a flat buffer holds exactly `height * width * channels` samples.
pub fn check_buffer_len(len: usize, height: usize, width: usize, channels: usize) -> Result<()> {
    let expected = height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            invalid_argument(format!(
                "buffer size {height}x{width}x{channels} overflows usize"
            ))
        })?;

    if len != expected {
        return Err(invalid_argument(format!(
            "buffer has {len} samples, expected {expected} for {height}x{width}x{channels}"
        )));
    }
    Ok(())
}

fn color_channels(channels: usize) -> Result<usize> {
    match channels {
        1 | 3 => Ok(channels),
        4 => Ok(3),
        _ => Err(invalid_argument(format!(
            "expected 1, 3 or 4 channels, got {channels}"
        ))),
    }
}

/// Equalize each color channel of a float image independently.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels), values 0.0-1.0
/// * `n_bins` - Number of bin edges, at least 2
///
/// # Returns
/// Equalized image with same channel count, alpha preserved
pub fn equalize_channels_f32(input: ArrayView3<f32>, n_bins: usize) -> Result<Array3<f32>> {
    let (height, width, channels) = input.dim();
    let color = color_channels(channels)?;

    let planes = (0..color)
        .into_par_iter()
        .map(|c| {
            let plane = input.index_axis(Axis(2), c).mapv(f64::from);
            equalize(plane.view(), n_bins)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut output = Array3::<f32>::zeros((height, width, channels));
    for (c, plane) in planes.iter().enumerate() {
        output
            .index_axis_mut(Axis(2), c)
            .assign(&plane.mapv(|v| v as f32));
    }
    if channels == 4 {
        output
            .index_axis_mut(Axis(2), 3)
            .assign(&input.index_axis(Axis(2), 3));
    }

    Ok(output)
}

/// Equalize each color channel of an 8-bit image independently.
///
/// Values are mapped to 0.0-1.0 before equalization and rounded back to 0-255.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `n_bins` - Number of bin edges, at least 2
///
/// # Returns
/// Equalized image with same channel count, alpha preserved
pub fn equalize_channels_u8(input: ArrayView3<u8>, n_bins: usize) -> Result<Array3<u8>> {
    let (height, width, channels) = input.dim();
    let color = color_channels(channels)?;

    let planes = (0..color)
        .into_par_iter()
        .map(|c| {
            let plane = input.index_axis(Axis(2), c).mapv(|v| v as f64 / 255.0);
            equalize(plane.view(), n_bins)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut output = Array3::<u8>::zeros((height, width, channels));
    for (c, plane) in planes.iter().enumerate() {
        output
            .index_axis_mut(Axis(2), c)
            .assign(&plane.mapv(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8));
    }
    if channels == 4 {
        output
            .index_axis_mut(Axis(2), 3)
            .assign(&input.index_axis(Axis(2), 3));
    }

    Ok(output)
}
