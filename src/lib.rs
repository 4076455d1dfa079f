//! Photomosaic and photo collage builder
//!
//! A creator image is split into a grid of cells and each cell is filled with
//! the candidate photo whose brightness layout matches it best, while photos
//! are kept from repeating close to each other. A single-image mode tiles an
//! image with tinted thumbnails of itself instead.

#![forbid(unsafe_code)]

/// Cell matching, compositing and mosaic assembly
pub mod algorithm;
/// Luminance shapes and the candidate pool
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Luminance measures and resampling
pub mod math;
/// Pixel buffers and grid geometry
pub mod spatial;

pub use io::error::{CollageError, Result};
