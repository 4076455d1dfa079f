//! Candidate selection for a single mosaic cell
//!
//! Three selectors, all of which skip excluded indices and empty pool slots:
//! - `best_by_luminance`: closest mean luminance
//! - `best_by_shape`: smallest quadrant difference
//! - `any_above_threshold`: random pick among bright candidates, used for
//!   near-white regions so background areas get varied light photos

use rand::Rng;
use tracing::trace;

use crate::algorithm::exclusion::ExclusionSet;
use crate::analysis::pool::CandidatePool;
use crate::analysis::shape::{LuminanceShape, shape_difference};
use crate::io::configuration::{
    CONTOUR_LUMINANCE_THRESHOLD, CONTOUR_TOLERANCE, DEFAULT_EXCLUSION_RADIUS,
    LUMINANCE_MATCH_BOUND, SHAPE_MATCH_BOUND,
};

/// Which measure ranks candidates for ordinary cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum MatchStrategy {
    /// Compare the four quadrant luminances
    #[default]
    Shape,
    /// Compare mean luminance only
    Luminance,
}

/// Tunables for cell matching
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicOptions {
    /// Pick random bright candidates for near-white cells
    pub contour: bool,
    /// Neighborhood radius, in cells, inside which a candidate may not repeat
    pub exclusion_radius: usize,
    /// Shape distance from pure white below which a cell counts as background
    pub contour_tolerance: f32,
    /// Minimum candidate luminance for background cells
    pub contour_threshold: f32,
    /// Ranking used for ordinary cells
    pub strategy: MatchStrategy,
}

impl Default for MosaicOptions {
    fn default() -> Self {
        Self {
            contour: true,
            exclusion_radius: DEFAULT_EXCLUSION_RADIUS,
            contour_tolerance: CONTOUR_TOLERANCE,
            contour_threshold: CONTOUR_LUMINANCE_THRESHOLD,
            strategy: MatchStrategy::default(),
        }
    }
}

/// What a cell of the creator image looks like
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTarget {
    /// Luminance of each pixel of the 2x2 block
    pub shape: LuminanceShape,
    /// Mean of the four quadrant values
    pub luminance: f32,
}

impl CellTarget {
    /// Describe a 2x2 block given as top-left, top-right, bottom-left, bottom-right
    pub fn from_block(block: [[u8; 3]; 4]) -> Self {
        let shape = LuminanceShape::from_block(block);
        Self {
            luminance: shape.mean(),
            shape,
        }
    }
}

/// Index of the candidate whose mean luminance is closest to `target`
///
/// Ties keep the lowest index. Returns `None` if every usable candidate is
/// excluded or lies further than the initial bound.
pub fn best_by_luminance(
    target: f32,
    pool: &CandidatePool,
    excluded: &ExclusionSet,
) -> Option<usize> {
    let mut best = None;
    let mut best_diff = LUMINANCE_MATCH_BOUND;

    for (index, candidate) in pool.iter() {
        if excluded.contains(index) {
            continue;
        }
        let diff = (candidate.luminance() - target).abs();
        if diff < best_diff {
            best_diff = diff;
            best = Some(index);
        }
    }

    best
}

/// Index of the candidate with the smallest quadrant difference to `target`
///
/// Ties keep the lowest index.
pub fn best_by_shape(
    target: &LuminanceShape,
    pool: &CandidatePool,
    excluded: &ExclusionSet,
) -> Option<usize> {
    let mut best = None;
    let mut best_diff = SHAPE_MATCH_BOUND;

    for (index, candidate) in pool.iter() {
        if excluded.contains(index) {
            continue;
        }
        let diff = shape_difference(candidate.shape(), target);
        if diff < best_diff {
            best_diff = diff;
            best = Some(index);
        }
    }

    best
}

/// Random candidate at least as bright as `threshold`
///
/// Makes `pool.len()` uniform draws over all slots and returns the first
/// one that is usable, not excluded and bright enough. May return
/// `None` even when a qualifying candidate exists.
pub fn any_above_threshold<R: Rng>(
    threshold: f32,
    pool: &CandidatePool,
    excluded: &ExclusionSet,
    rng: &mut R,
) -> Option<usize> {
    let slots = pool.len();
    if slots == 0 {
        return None;
    }

    (0..slots)
        .map(|_| rng.random_range(0..slots))
        .find(|&index| {
            !excluded.contains(index)
                && pool
                    .get(index)
                    .is_some_and(|candidate| candidate.luminance() >= threshold)
        })
}

/// Stateful selector combining the strategies with their fallbacks
#[derive(Debug)]
pub struct Matcher<R> {
    options: MosaicOptions,
    rng: R,
}

impl<R: Rng> Matcher<R> {
    /// Create a matcher drawing contour picks from `rng`
    pub const fn new(options: MosaicOptions, rng: R) -> Self {
        Self { options, rng }
    }

    /// Options in use
    pub const fn options(&self) -> &MosaicOptions {
        &self.options
    }

    /// Pick a candidate for one cell
    ///
    /// Near-white cells try a random bright candidate first when contour mode
    /// is on, then fall through to the configured ranking. If the exclusion
    /// set rules out every candidate the ranking is retried without it.
    /// Returns `None` only if the pool has no usable candidate at all.
    pub fn select(
        &mut self,
        cell: &CellTarget,
        pool: &CandidatePool,
        excluded: &ExclusionSet,
    ) -> Option<usize> {
        if self.options.contour
            && shape_difference(&cell.shape, &LuminanceShape::WHITE) < self.options.contour_tolerance
        {
            if let Some(index) =
                any_above_threshold(self.options.contour_threshold, pool, excluded, &mut self.rng)
            {
                trace!(index, "Contour pick");
                return Some(index);
            }
        }

        self.rank(cell, pool, excluded).or_else(|| {
            trace!("Neighborhood exhausted, ignoring exclusions");
            self.rank(cell, pool, &ExclusionSet::new(pool.len()))
        })
    }

    fn rank(
        &self,
        cell: &CellTarget,
        pool: &CandidatePool,
        excluded: &ExclusionSet,
    ) -> Option<usize> {
        match self.options.strategy {
            MatchStrategy::Shape => best_by_shape(&cell.shape, pool, excluded),
            MatchStrategy::Luminance => best_by_luminance(cell.luminance, pool, excluded),
        }
    }
}
