//! WebAssembly exports for histogram equalization.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Buffers are
//! flat and row-major; failures surface as JS exceptions carrying the error
//! message.

use wasm_bindgen::prelude::*;
use ndarray::{Array2, Array3};

use crate::error::EqualizeError;
use crate::filters::equalize::{check_buffer_len, equalize, equalize_channels_u8};

fn to_js(err: EqualizeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Equalize a grayscale float image.
///
/// # Arguments
/// * `data` - Flat array of intensities (length = width * height), values 0.0-1.0
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `n_bins` - Number of bin edges (256 is the usual choice)
///
/// # Returns
/// Flat array of equalized intensities
#[wasm_bindgen]
pub fn equalize_wasm(
    data: &[f64],
    width: usize,
    height: usize,
    n_bins: usize,
) -> Result<Vec<f64>, JsValue> {
    check_buffer_len(data.len(), height, width, 1).map_err(to_js)?;
    let input = Array2::from_shape_vec((height, width), data.to_vec())
        .map_err(|e| to_js(e.into()))?;

    let result = equalize(input.view(), n_bins).map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}

/// Equalize the RGB channels of an RGBA u8 image, alpha preserved.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `n_bins` - Number of bin edges
#[wasm_bindgen]
pub fn equalize_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    n_bins: usize,
) -> Result<Vec<u8>, JsValue> {
    check_buffer_len(data.len(), height, width, 4).map_err(to_js)?;
    let input = Array3::from_shape_vec((height, width, 4), data.to_vec())
        .map_err(|e| to_js(e.into()))?;

    let result = equalize_channels_u8(input.view(), n_bins).map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}
