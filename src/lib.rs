//! histeq Rust Extensions
//!
//! Histogram equalization of real-valued grayscale images, with Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! The core operates on 2D `f64` arrays (height, width) with values nominally
//! in 0.0-1.0. Multi-channel wrappers accept:
//! - **Grayscale**: (height, width, 1) - single channel
//! - **RGB**: (height, width, 3) - 3 color channels
//! - **RGBA**: (height, width, 4) - 3 color channels + alpha
//!
//! ## Known CDF Scaling
//! The cumulative distribution is divided by the bin count rather than the
//! interval count. Equalized values therefore top out below 1.0; this is
//! kept so the bias stays observable and testable.

pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{EqualizeError, Result};
pub use filters::equalize::{
    equalization_cdf, equalize, equalize_channels_f32, equalize_channels_u8, equalize_with,
    EqualizeParams, DEFAULT_BINS,
};
pub use filters::histogram::{histogram_cdf, HistogramCdf};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{
        IntoPyArray, PyArray1, PyArray2, PyArray3, PyReadonlyArray2, PyReadonlyArray3,
        PyReadonlyArrayDyn,
    };
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::EqualizeError;
    use crate::filters::equalize as equalize_mod;
    use crate::filters::histogram;

    impl From<EqualizeError> for PyErr {
        fn from(err: EqualizeError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Equalization
    // ========================================================================

    /// Equalize a 2D float64 grayscale image (values 0.0-1.0).
    ///
    /// Raises ValueError if n_bins < 2 or the image is empty.
    #[pyfunction]
    #[pyo3(signature = (image, n_bins=256))]
    pub fn equalize<'py>(
        py: Python<'py>,
        image: PyReadonlyArray2<'py, f64>,
        n_bins: usize,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let result = equalize_mod::equalize(image.as_array(), n_bins)?;
        Ok(result.into_pyarray(py))
    }

    /// Equalize each color channel of an f32 image (1, 3 or 4 channels).
    #[pyfunction]
    #[pyo3(signature = (image, n_bins=256))]
    pub fn equalize_channels_f32<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, f32>,
        n_bins: usize,
    ) -> PyResult<Bound<'py, PyArray3<f32>>> {
        let result = equalize_mod::equalize_channels_f32(image.as_array(), n_bins)?;
        Ok(result.into_pyarray(py))
    }

    /// Equalize each color channel of a u8 image (1, 3 or 4 channels).
    #[pyfunction]
    #[pyo3(signature = (image, n_bins=256))]
    pub fn equalize_channels<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        n_bins: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = equalize_mod::equalize_channels_u8(image.as_array(), n_bins)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Histogram Data
    // ========================================================================

    /// Compute (edges, histogram, cdf) for plotting.
    ///
    /// `data` may have any shape; it is flattened in C order.
    #[pyfunction]
    #[pyo3(signature = (data, n_bins=256))]
    pub fn histogram_cdf<'py>(
        py: Python<'py>,
        data: PyReadonlyArrayDyn<'py, f64>,
        n_bins: usize,
    ) -> PyResult<(
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
    )> {
        let flat: Vec<f64> = data.as_array().iter().copied().collect();
        let hc = histogram::histogram_cdf(&flat, n_bins)?;
        Ok((
            hc.edges.into_pyarray(py),
            hc.histogram.into_pyarray(py),
            hc.cdf.into_pyarray(py),
        ))
    }

    #[pymodule]
    pub fn histeq_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(equalize, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_channels_f32, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_channels, m)?)?;
        m.add_function(wrap_pyfunction!(histogram_cdf, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::histeq_rust;
