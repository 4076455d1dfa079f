//! Collage constants and runtime configuration defaults

// Paper sizes at 300 pixels per inch, landscape orientation
/// A1 width in pixels
pub const A1_WIDTH_300PPI: usize = 9933;
/// A1 height in pixels
pub const A1_HEIGHT_300PPI: usize = 7016;
/// A2 width in pixels
pub const A2_WIDTH_300PPI: usize = 7016;
/// A2 height in pixels
pub const A2_HEIGHT_300PPI: usize = 4961;
/// A3 width in pixels
pub const A3_WIDTH_300PPI: usize = 4961;
/// A3 height in pixels
pub const A3_HEIGHT_300PPI: usize = 3508;
/// A4 width in pixels
pub const A4_WIDTH_300PPI: usize = 3508;
/// A4 height in pixels
pub const A4_HEIGHT_300PPI: usize = 2480;

// Perceptual luminance model
/// Red channel weight
pub const LUMINANCE_RED: f32 = 0.2126;
/// Green channel weight
pub const LUMINANCE_GREEN: f32 = 0.7152;
/// Blue channel weight
pub const LUMINANCE_BLUE: f32 = 0.0722;
/// Gamma exponent applied to each normalized channel
pub const LUMINANCE_POWER_CURVE: f32 = 2.2;
/// Channel normalization divisor (256, not 255, so full intensity stays below 1.0)
pub const LUMINANCE_NORMALIZATION: f32 = 256.0;

// Matching
/// Initial distance bound for luminance matching
pub const LUMINANCE_MATCH_BOUND: f32 = 1.0;
/// Initial distance bound for shape matching, large enough to accept any candidate
pub const SHAPE_MATCH_BOUND: f32 = 1000.0;
/// Radius of the already-visited neighborhood whose selections are excluded
pub const DEFAULT_EXCLUSION_RADIUS: usize = 2;
/// Cells closer than this to the all-white shape take the contour path
pub const CONTOUR_TOLERANCE: f32 = 0.8;
/// Minimum luminance a candidate needs to fill a contour cell
pub const CONTOUR_LUMINANCE_THRESHOLD: f32 = 0.2;

// Multi-image mosaic layout
/// Guidance cell size in pixels (about 1 cm at 300 ppi)
pub const DEFAULT_CELL_SIZE: usize = 118;
/// Default border guidance in pixels (0 disables the border)
pub const DEFAULT_BORDER_SIZE: usize = 0;
/// Border colour
pub const DEFAULT_BORDER_COLOR: [u8; 3] = [255, 255, 255];
/// Maximum number of candidate files read from the folder
pub const CANDIDATE_LIMIT: usize = 600;

// Shrink and single-image collage
/// Default decimation factor for the shrink command
pub const DEFAULT_SHRINK_FACTOR: usize = 5;
/// Default bilinear target width for the shrink command
pub const DEFAULT_SHRINK_WIDTH: usize = 200;
/// Default bilinear target height for the shrink command
pub const DEFAULT_SHRINK_HEIGHT: usize = 200;
/// Decimation factor producing the base grid of a single-image collage
pub const SINGLE_SHRINK_FACTOR: usize = 10;

// Output settings
/// JPEG quality used when none is given
pub const DEFAULT_JPG_QUALITY: u8 = 70;
/// Suffix of the debug dump of the shrunk creator image
pub const CREATOR_DEBUG_SUFFIX: &str = "_creator";
/// Suffix of the debug dump of the mosaic before its border is added
pub const INNER_DEBUG_SUFFIX: &str = "_inner";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
