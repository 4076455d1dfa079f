//! Numeric building blocks for measuring and resampling images

/// Perceptual luminance and plain brightness
pub mod luminance;
/// Decimation and bilinear downscaling
pub mod resample;
