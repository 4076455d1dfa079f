//! Per-cell selection history of a mosaic
//!
//! Records which candidate was placed in each cell while the assembler walks
//! the grid row-major. Only cells already visited are ever read back, which
//! is what keeps the exclusion window a single backward-looking pass.

use ndarray::Array2;

use crate::algorithm::exclusion::ExclusionSet;

/// Row-major record of candidate indices placed at each mosaic cell
#[derive(Debug, Clone)]
pub struct SelectionGrid {
    /// Candidate index per cell, `None` until the cell is filled
    selections: Array2<Option<usize>>,
}

impl SelectionGrid {
    /// Create a grid where no cell has been filled
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            selections: Array2::from_elem((rows, cols), None),
        }
    }

    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.selections.nrows()
    }

    /// Number of cells per row
    pub fn cols(&self) -> usize {
        self.selections.ncols()
    }

    /// Candidate placed at a cell, if any
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.selections.get([row, col]).copied().flatten()
    }

    /// Record the candidate placed at a cell
    ///
    /// Returns false if the cell lies outside the grid
    pub fn record(&mut self, row: usize, col: usize, candidate: usize) -> bool {
        self.selections
            .get_mut([row, col])
            .map(|slot| *slot = Some(candidate))
            .is_some()
    }

    /// Number of cells filled so far
    pub fn filled(&self) -> usize {
        self.selections.iter().filter(|slot| slot.is_some()).count()
    }

    /// How many times each candidate index was used
    pub fn usage(&self, pool_len: usize) -> Vec<usize> {
        let mut counts = vec![0; pool_len];
        for &candidate in self.selections.iter().flatten() {
            if let Some(count) = counts.get_mut(candidate) {
                *count += 1;
            }
        }
        counts
    }

    /// Candidates placed in the already-visited neighborhood of a cell
    ///
    /// Covers rows `row - radius ..= row` and columns
    /// `col - radius ..= col + radius`, clipped to the grid. In the current
    /// row only the cells left of `col` count, since everything from `col`
    /// onwards has not been visited yet.
    pub fn exclusion_window(
        &self,
        row: usize,
        col: usize,
        radius: usize,
        pool_len: usize,
    ) -> ExclusionSet {
        let mut excluded = ExclusionSet::new(pool_len);

        let col_end = (col + radius + 1).min(self.cols());
        for k in row.saturating_sub(radius)..=row {
            for l in col.saturating_sub(radius)..col_end {
                if k == row && l >= col {
                    continue;
                }
                if let Some(candidate) = self.get(k, l) {
                    excluded.insert(candidate);
                }
            }
        }

        excluded
    }
}
