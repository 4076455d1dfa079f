//! Perceptual measurements of candidate photos and creator cells

/// Candidate photos scaled to cell size with their measures
pub mod pool;
/// Four-quadrant brightness descriptor
pub mod shape;
