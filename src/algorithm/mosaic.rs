//! Row-by-row assembly of a multi-image mosaic
//!
//! The creator image is the target downsampled to two pixels per cell in
//! each direction. Each cell is described by its 2x2 creator block, matched
//! against the pool and filled with the chosen candidate at full cell size.

use rand::Rng;
use tracing::{debug, warn};

use crate::algorithm::composite::paste_at;
use crate::algorithm::matching::{CellTarget, Matcher, MosaicOptions};
use crate::analysis::pool::CandidatePool;
use crate::io::error::{CollageError, Result, exhausted, invalid_argument};
use crate::spatial::buffer::PixelBuffer;
use crate::spatial::grid::SelectionGrid;

/// Incremental mosaic assembly, one row of cells per step
#[derive(Debug)]
pub struct MosaicBuilder<'a, R> {
    creator: PixelBuffer,
    pool: &'a CandidatePool,
    matcher: Matcher<R>,
    grid: SelectionGrid,
    output: PixelBuffer,
    cell_width: usize,
    cell_height: usize,
    next_row: usize,
    halted: bool,
}

impl<'a, R: Rng> MosaicBuilder<'a, R> {
    /// Prepare assembly of a `creator.width / 2` x `creator.height / 2` cell mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pool holds no usable candidate
    /// - The creator image has fewer than 2x2 pixels
    /// - The candidates were prepared for a different cell size
    /// - The output image cannot be allocated
    pub fn new(
        creator: PixelBuffer,
        pool: &'a CandidatePool,
        cell_width: usize,
        cell_height: usize,
        options: MosaicOptions,
        rng: R,
    ) -> Result<Self> {
        if pool.usable_count() == 0 {
            return Err(CollageError::EmptyPool {
                source: pool.source().to_owned(),
                examined: pool.len(),
            });
        }
        if pool.cell_dimensions() != (cell_width, cell_height) {
            let (width, height) = pool.cell_dimensions();
            return Err(invalid_argument(
                "cell",
                &format!("{cell_width}x{cell_height}"),
                &format!("candidates were prepared at {width}x{height}"),
            ));
        }

        let (cols, rows) = (creator.width() / 2, creator.height() / 2);
        if cols == 0 || rows == 0 {
            return Err(invalid_argument(
                "creator",
                &format!("{}x{}", creator.width(), creator.height()),
                &"needs at least one 2x2 block",
            ));
        }

        let width = cols
            .checked_mul(cell_width)
            .ok_or_else(|| exhausted("mosaic", usize::MAX))?;
        let height = rows
            .checked_mul(cell_height)
            .ok_or_else(|| exhausted("mosaic", usize::MAX))?;
        let output = PixelBuffer::new(width, height)?;

        debug!(cols, rows, width, height, "Starting mosaic");

        Ok(Self {
            creator,
            pool,
            matcher: Matcher::new(options, rng),
            grid: SelectionGrid::new(rows, cols),
            output,
            cell_width,
            cell_height,
            next_row: 0,
            halted: false,
        })
    }

    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Number of cells per row
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Rows completed so far
    pub const fn rows_done(&self) -> usize {
        self.next_row
    }

    /// Candidates chosen so far
    pub const fn grid(&self) -> &SelectionGrid {
        &self.grid
    }

    /// Fill the next row of cells
    ///
    /// Returns true while rows remain. Returns false after the last row, or
    /// once a cell could not be filled; the remaining cells then stay black.
    pub fn fill_next_row(&mut self) -> bool {
        if self.halted || self.next_row >= self.rows() {
            return false;
        }

        let row = self.next_row;
        let radius = self.matcher.options().exclusion_radius;

        for col in 0..self.cols() {
            let Some(block) = self.block(row, col) else {
                warn!(row, col, "Creator block out of range, stopping");
                self.halted = true;
                return false;
            };

            let cell = CellTarget::from_block(block);
            let excluded = self.grid.exclusion_window(row, col, radius, self.pool.len());

            let Some(index) = self.matcher.select(&cell, self.pool, &excluded) else {
                warn!(row, col, "No candidate available, stopping");
                self.halted = true;
                return false;
            };
            let Some(candidate) = self.pool.get(index) else {
                self.halted = true;
                return false;
            };

            let (x, y) = (col * self.cell_width, row * self.cell_height);
            if !paste_at(&mut self.output, candidate.pixels(), x, y, 1.0) {
                warn!(row, col, "Candidate does not fit its cell, stopping");
                self.halted = true;
                return false;
            }
            self.grid.record(row, col, index);
        }

        self.next_row += 1;
        self.next_row < self.rows()
    }

    /// The 2x2 creator block of a cell in top-left, top-right, bottom-left,
    /// bottom-right order
    fn block(&self, row: usize, col: usize) -> Option<[[u8; 3]; 4]> {
        let (x, y) = (2 * col, 2 * row);
        Some([
            self.creator.pixel(x, y)?,
            self.creator.pixel(x + 1, y)?,
            self.creator.pixel(x, y + 1)?,
            self.creator.pixel(x + 1, y + 1)?,
        ])
    }

    /// Take the mosaic and the record of which candidate went where
    pub fn finish(self) -> (PixelBuffer, SelectionGrid) {
        (self.output, self.grid)
    }
}

/// Build a whole mosaic in one call
///
/// # Errors
///
/// See [`MosaicBuilder::new`]
pub fn multi_image_mosaic<R: Rng>(
    creator: PixelBuffer,
    pool: &CandidatePool,
    cell_width: usize,
    cell_height: usize,
    options: MosaicOptions,
    rng: R,
) -> Result<PixelBuffer> {
    let mut builder = MosaicBuilder::new(creator, pool, cell_width, cell_height, options, rng)?;
    while builder.fill_next_row() {}
    Ok(builder.finish().0)
}
