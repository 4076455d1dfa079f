//! Print sizes and the cell grid derived from them
//!
//! A mosaic is laid out as `cols` x `rows` square cells centred on the
//! output canvas. Whatever width or height the cells cannot fill is split
//! into a floor/ceil border pair so that the two sides always add up to the
//! leftover exactly.

use crate::io::configuration::{
    A1_HEIGHT_300PPI, A1_WIDTH_300PPI, A2_HEIGHT_300PPI, A2_WIDTH_300PPI, A3_HEIGHT_300PPI,
    A3_WIDTH_300PPI, A4_HEIGHT_300PPI, A4_WIDTH_300PPI,
};
use crate::io::error::{CollageError, Result, invalid_argument};
use std::fmt;
use std::str::FromStr;

/// Target output size of a mosaic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSize {
    /// ISO A1 at 300 ppi
    A1,
    /// ISO A2 at 300 ppi
    A2,
    /// ISO A3 at 300 ppi
    A3,
    /// ISO A4 at 300 ppi
    A4,
    /// Explicit pixel dimensions
    Custom {
        /// Width in pixels
        width: usize,
        /// Height in pixels
        height: usize,
    },
}

impl PrintSize {
    /// Pixel dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        match self {
            Self::A1 => (A1_WIDTH_300PPI, A1_HEIGHT_300PPI),
            Self::A2 => (A2_WIDTH_300PPI, A2_HEIGHT_300PPI),
            Self::A3 => (A3_WIDTH_300PPI, A3_HEIGHT_300PPI),
            Self::A4 => (A4_WIDTH_300PPI, A4_HEIGHT_300PPI),
            Self::Custom { width, height } => (*width, *height),
        }
    }
}

impl FromStr for PrintSize {
    type Err = CollageError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "A1" => return Ok(Self::A1),
            "A2" => return Ok(Self::A2),
            "A3" => return Ok(Self::A3),
            "A4" => return Ok(Self::A4),
            _ => {}
        }

        let reason = "expected A1, A2, A3, A4 or WIDTHxHEIGHT";
        let (width, height) = s
            .split_once('x')
            .ok_or_else(|| invalid_argument("size", &s, &reason))?;
        let width: usize = width
            .trim()
            .parse()
            .map_err(|e| invalid_argument("size", &s, &format!("{reason} ({e})")))?;
        let height: usize = height
            .trim()
            .parse()
            .map_err(|e| invalid_argument("size", &s, &format!("{reason} ({e})")))?;

        if width == 0 || height == 0 {
            return Err(invalid_argument(
                "size",
                &s,
                &"width and height must be positive",
            ));
        }

        Ok(Self::Custom { width, height })
    }
}

impl fmt::Display for PrintSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A1 => write!(f, "A1"),
            Self::A2 => write!(f, "A2"),
            Self::A3 => write!(f, "A3"),
            Self::A4 => write!(f, "A4"),
            Self::Custom { width, height } => write!(f, "{width}x{height}"),
        }
    }
}

/// Padding around the mosaic, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Border {
    /// Rows above the image
    pub top: usize,
    /// Rows below the image
    pub bottom: usize,
    /// Columns left of the image
    pub left: usize,
    /// Columns right of the image
    pub right: usize,
}


/// Cell grid of a multi-image mosaic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicGeometry {
    /// Requested output width
    pub output_width: usize,
    /// Requested output height
    pub output_height: usize,
    /// Width of one cell
    pub cell_width: usize,
    /// Height of one cell (cells are square)
    pub cell_height: usize,
    /// Number of cells per row
    pub cols: usize,
    /// Number of cell rows
    pub rows: usize,
    /// Padding that centres the cells on the output
    pub border: Border,
}

impl MosaicGeometry {
    /// Derive the grid for an output size from a guidance cell size
    ///
    /// The guidance size is only approximate: the actual cell width is the
    /// largest integer that fits `floor(width / guidance)` cells across the
    /// full output width. `border_guidance` reserves at least that many
    /// pixels on every side before counting cells.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the guidance cell size is zero or larger
    /// than the output, or if the border leaves no room for a single cell
    pub fn derive(
        output_width: usize,
        output_height: usize,
        guidance_cell_size: usize,
        border_guidance: usize,
    ) -> Result<Self> {
        if output_width == 0 || output_height == 0 {
            return Err(invalid_argument(
                "size",
                &format!("{output_width}x{output_height}"),
                &"width and height must be positive",
            ));
        }
        if guidance_cell_size == 0 || guidance_cell_size > output_width {
            return Err(invalid_argument(
                "cell_size",
                &guidance_cell_size,
                &format!("must be between 1 and the output width {output_width}"),
            ));
        }

        let cells_per_row = output_width / guidance_cell_size;
        let cell_width = output_width / cells_per_row;
        let cell_height = cell_width;

        let reserved = border_guidance
            .checked_mul(2)
            .filter(|&both_sides| both_sides < output_width && both_sides < output_height)
            .ok_or_else(|| {
                invalid_argument(
                    "border",
                    &border_guidance,
                    &format!("leaves no room inside {output_width}x{output_height}"),
                )
            })?;
        let usable_width = output_width - reserved;
        let usable_height = output_height - reserved;
        let cols = usable_width / cell_width;
        let rows = usable_height / cell_height;

        if cols == 0 || rows == 0 {
            return Err(invalid_argument(
                "border",
                &border_guidance,
                &format!(
                    "no {cell_width}px cell fits into {output_width}x{output_height} with this border"
                ),
            ));
        }

        let leftover_width = output_width - cols * cell_width;
        let leftover_height = output_height - rows * cell_height;

        let border = Border {
            top: leftover_height / 2,
            bottom: leftover_height - leftover_height / 2,
            left: leftover_width / 2,
            right: leftover_width - leftover_width / 2,
        };

        Ok(Self {
            output_width,
            output_height,
            cell_width,
            cell_height,
            cols,
            rows,
            border,
        })
    }

    /// Derive the grid for a named or explicit print size
    ///
    /// # Errors
    ///
    /// See [`MosaicGeometry::derive`]
    pub fn for_print(
        size: PrintSize,
        guidance_cell_size: usize,
        border_guidance: usize,
    ) -> Result<Self> {
        let (width, height) = size.dimensions();
        Self::derive(width, height, guidance_cell_size, border_guidance)
    }

    /// Width covered by cells
    pub const fn inner_width(&self) -> usize {
        self.cols * self.cell_width
    }

    /// Height covered by cells
    pub const fn inner_height(&self) -> usize {
        self.rows * self.cell_height
    }

    /// Resolution the creator image is shrunk to: one 2x2 block per cell
    pub const fn creator_dimensions(&self) -> (usize, usize) {
        (self.cols * 2, self.rows * 2)
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}
