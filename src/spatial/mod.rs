//! Pixel storage and grid layout
//!
//! This module contains spatial-related functionality including:
//! - The RGB pixel buffer every stage works on
//! - Print sizes and the cell grid derived from them
//! - The per-cell selection history

/// RGB pixel buffer
pub mod buffer;
/// Print sizes, borders and cell grid geometry
pub mod geometry;
/// Selection history and exclusion windows
pub mod grid;

pub use buffer::PixelBuffer;
