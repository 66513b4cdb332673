//! Tonal filters built on image histograms.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale | (H, W) | f64 | Single intensity plane, 0.0-1.0 |
//! | Grayscale/RGB/RGBA float | (H, W, 1/3/4) | f32 | Per-channel, 0.0-1.0 |
//! | Grayscale/RGB/RGBA 8-bit | (H, W, 1/3/4) | u8 | Per-channel, 0-255 |
//!
//! ## Architecture
//!
//! - **histogram** - bin edges, density histogram, scaled CDF, interpolation
//! - **equalize** - histogram equalization on top of those primitives
//!
//! All functions are pure: inputs are views, outputs are new arrays.
//! Multi-channel variants use rayon to process channels in parallel.

pub mod histogram;
pub mod equalize;
