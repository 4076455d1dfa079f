/// Final layout and framing of print-sized mosaics
pub mod assembler;
/// Tinted paste, borders and the single-image collage
pub mod composite;
/// Bitset of candidates barred from a cell
pub mod exclusion;
/// Candidate selection strategies
pub mod matching;
/// Row-by-row multi-image mosaic assembly
pub mod mosaic;
