//! Histogram primitives: uniform bin edges, density histogram, scaled CDF
//! and monotonic piecewise-linear interpolation.
//!
//! These are the building blocks of [`crate::filters::equalize`]. They work
//! on flat `f64` slices; callers flatten their images in row-major order.
//!
//! ## Binning Rules
//!
//! - Edges are uniformly spaced over [0, 1], both endpoints included
//! - Every bin is half-open `[lo, hi)` except the last one, which is closed
//! - Values outside [0, 1] and NaN are not counted

use crate::error::{invalid_argument, Result};

/// Smallest bin count that still yields one histogram interval.
pub const MIN_BINS: usize = 2;

/// Numeric data behind a histogram plot.
///
/// `histogram` and `cdf` have `edges.len() - 1` entries. A renderer plots both
/// against `edges[..edges.len() - 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramCdf {
    pub edges: Vec<f64>,
    pub histogram: Vec<f64>,
    pub cdf: Vec<f64>,
}

impl HistogramCdf {
    /// Left edge of every histogram interval (the interpolation abscissae).
    pub fn left_edges(&self) -> &[f64] {
        self.edges.split_last().map_or(&[][..], |(_, rest)| rest)
    }

    /// Last CDF value. Less than 1.0 in general, see [`scaled_cdf`].
    pub fn final_cdf(&self) -> f64 {
        self.cdf.last().copied().unwrap_or(f64::NAN)
    }
}

pub fn validate_bins(n_bins: usize) -> Result<()> {
    if n_bins < MIN_BINS {
        return Err(invalid_argument(format!(
            "n_bins must be at least {MIN_BINS}, got {n_bins}"
        )));
    }
    Ok(())
}

// ============================================================================
// Binning
// ============================================================================

/// Generate `n_bins` uniformly spaced edges over [0, 1].
///
/// The last edge is exactly 1.0.
///
/// # Arguments
/// * `n_bins` - Number of edges (at least 2)
pub fn bin_edges(n_bins: usize) -> Result<Vec<f64>> {
    validate_bins(n_bins)?;

    let step = 1.0 / (n_bins - 1) as f64;
    let mut edges: Vec<f64> = (0..n_bins).map(|i| i as f64 * step).collect();
    edges[n_bins - 1] = 1.0;

    Ok(edges)
}

/// Locate the histogram interval for `v`, or `None` if it falls outside.
fn bin_index(v: f64, edges: &[f64]) -> Option<usize> {
    let first = edges[0];
    let last = edges[edges.len() - 1];
    if !(v >= first && v <= last) {
        return None;
    }

    let intervals = edges.len() - 1;
    let norm = intervals as f64 / (last - first);
    let mut idx = (((v - first) * norm) as usize).min(intervals - 1);

    // Rounding in the scaled position can land one interval off
    if v < edges[idx] {
        idx -= 1;
    } else if idx + 1 < intervals && v >= edges[idx + 1] {
        idx += 1;
    }

    Some(idx)
}

/// Compute a density histogram of `values` against `edges`.
///
/// Each interval holds `count / width / total`, so the histogram integrates
/// to 1 over the edge range. If no value falls inside the range the result is
/// all NaN.
///
/// # Arguments
/// * `values` - Flattened samples
/// * `edges` - Ascending bin edges (at least 2)
///
/// # Returns
/// `edges.len() - 1` density values
pub fn density_histogram(values: &[f64], edges: &[f64]) -> Result<Vec<f64>> {
    if edges.len() < MIN_BINS {
        return Err(invalid_argument(format!(
            "need at least {MIN_BINS} bin edges, got {}",
            edges.len()
        )));
    }

    let intervals = edges.len() - 1;
    let mut counts = vec![0u64; intervals];
    for &v in values {
        if let Some(idx) = bin_index(v, edges) {
            counts[idx] += 1;
        }
    }

    let total = counts.iter().sum::<u64>() as f64;
    let histogram = counts
        .iter()
        .zip(edges.windows(2))
        .map(|(&count, w)| count as f64 / (w[1] - w[0]) / total)
        .collect();

    Ok(histogram)
}

/// Running sum of `histogram` divided by `n_bins`.
///
/// The divisor is the edge count, not the interval count, so the final value
/// is `sum(histogram) / n_bins` and does not reach 1.0 for a normalized
/// histogram.
pub fn scaled_cdf(histogram: &[f64], n_bins: usize) -> Vec<f64> {
    let scale = n_bins as f64;
    let mut acc = 0.0;
    histogram
        .iter()
        .map(|&h| {
            acc += h;
            acc / scale
        })
        .collect()
}

/// Compute edges, density histogram and CDF for a flattened sequence.
///
/// # Arguments
/// * `data` - Flattened samples, nominally in [0, 1]
/// * `n_bins` - Number of bin edges (at least 2)
pub fn histogram_cdf(data: &[f64], n_bins: usize) -> Result<HistogramCdf> {
    let edges = bin_edges(n_bins)?;
    let histogram = density_histogram(data, &edges)?;
    let cdf = scaled_cdf(&histogram, n_bins);

    Ok(HistogramCdf { edges, histogram, cdf })
}

// ============================================================================
// Interpolation
// ============================================================================

/// Piecewise-linear interpolation of a single point.
///
/// `xp` must be non-decreasing and have the same length as `fp`; an empty
/// table yields NaN. Points at or below `xp[0]` clamp to `fp[0]`, points at
/// or above the last abscissa clamp to the last ordinate. NaN stays NaN.
/// [`interp_slice`] is the checked entry point.
#[inline]
pub(crate) fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    debug_assert!(xp.len() == fp.len());

    if x.is_nan() || xp.is_empty() || fp.is_empty() {
        return f64::NAN;
    }
    let last = xp.len().min(fp.len()) - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    // xp[0] < x < xp[last], so 1 <= upper <= last
    let upper = xp[..=last].partition_point(|&e| e <= x);
    let j = upper - 1;
    let slope = (fp[j + 1] - fp[j]) / (xp[j + 1] - xp[j]);
    slope * (x - xp[j]) + fp[j]
}

/// Interpolate every value of `xs` through `(xp, fp)`.
pub fn interp_slice(xs: &[f64], xp: &[f64], fp: &[f64]) -> Result<Vec<f64>> {
    if xp.is_empty() || xp.len() != fp.len() {
        return Err(invalid_argument(format!(
            "xp and fp must be non-empty and of equal length, got {} and {}",
            xp.len(),
            fp.len()
        )));
    }

    Ok(xs.iter().map(|&x| interp(x, xp, fp)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_edges_inclusive() {
        let edges = bin_edges(5).unwrap();

        assert_eq!(edges.len(), 5);
        assert_eq!(edges[0], 0.0);
        assert_eq!(edges[4], 1.0);
        assert!((edges[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bin_edges_rejects_single_bin() {
        assert!(bin_edges(1).is_err());
        assert!(bin_edges(0).is_err());
    }

    #[test]
    fn test_density_histogram_integrates_to_one() {
        let values = [0.05, 0.1, 0.3, 0.55, 0.6, 0.61, 0.9, 1.0];
        let edges = bin_edges(11).unwrap();
        let hist = density_histogram(&values, &edges).unwrap();

        let area: f64 = hist
            .iter()
            .zip(edges.windows(2))
            .map(|(h, w)| h * (w[1] - w[0]))
            .sum();

        assert_eq!(hist.len(), 10);
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_histogram_last_bin_closed() {
        let edges = bin_edges(3).unwrap();
        let hist = density_histogram(&[1.0, 1.0], &edges).unwrap();

        // Both samples land in [0.5, 1.0] of width 0.5
        assert_eq!(hist[0], 0.0);
        assert!((hist[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_histogram_ignores_out_of_range() {
        let edges = bin_edges(3).unwrap();
        let hist = density_histogram(&[-0.5, 0.25, 1.5, f64::NAN], &edges).unwrap();

        assert!((hist[0] - 2.0).abs() < 1e-12);
        assert_eq!(hist[1], 0.0);
    }

    #[test]
    fn test_density_histogram_nothing_counted_is_nan() {
        let edges = bin_edges(3).unwrap();
        let hist = density_histogram(&[2.0, 3.0], &edges).unwrap();

        assert!(hist.iter().all(|h| h.is_nan()));
    }

    #[test]
    fn test_scaled_cdf_divides_by_bin_count() {
        let cdf = scaled_cdf(&[0.75, 1.5, 0.75], 4);

        assert_eq!(cdf, vec![0.1875, 0.5625, 0.75]);
    }

    #[test]
    fn test_histogram_cdf_final_value_not_one() {
        let data: Vec<f64> = (0..100).map(|i| i as f64 / 99.0).collect();
        let hc = histogram_cdf(&data, 2).unwrap();
        let sum: f64 = hc.histogram.iter().sum();

        assert_eq!(hc.histogram.len(), 1);
        assert!((hc.final_cdf() - sum / 2.0).abs() < 1e-12);
        assert!((hc.final_cdf() - 0.5).abs() < 1e-12);
        assert_eq!(hc.left_edges(), &[0.0]);
    }

    #[test]
    fn test_interp_clamps_and_interpolates() {
        let xp = [0.0, 0.5, 1.0];
        let fp = [0.0, 1.0, 3.0];

        assert_eq!(interp(-1.0, &xp, &fp), 0.0);
        assert_eq!(interp(2.0, &xp, &fp), 3.0);
        assert_eq!(interp(0.5, &xp, &fp), 1.0);
        assert!((interp(0.25, &xp, &fp) - 0.5).abs() < 1e-12);
        assert!((interp(0.75, &xp, &fp) - 2.0).abs() < 1e-12);
        assert!(interp(f64::NAN, &xp, &fp).is_nan());
    }

    #[test]
    fn test_interp_single_point() {
        assert_eq!(interp(0.0, &[0.0], &[0.4]), 0.4);
        assert_eq!(interp(0.9, &[0.0], &[0.4]), 0.4);
    }

    #[test]
    fn test_interp_empty_table_is_nan() {
        assert!(interp(0.5, &[], &[]).is_nan());
    }

    #[test]
    fn test_left_edges_of_empty_edges() {
        let hc = HistogramCdf {
            edges: Vec::new(),
            histogram: Vec::new(),
            cdf: Vec::new(),
        };

        assert!(hc.left_edges().is_empty());
        assert!(hc.final_cdf().is_nan());
    }

    #[test]
    fn test_interp_slice_length_mismatch() {
        assert!(interp_slice(&[0.5], &[0.0, 1.0], &[0.0]).is_err());
        assert!(interp_slice(&[0.5], &[], &[]).is_err());
    }
}
