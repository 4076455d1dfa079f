//! Print-sized mosaic assembly: geometry, creator image, cells and border

use rand::Rng;
use tracing::info;

use crate::algorithm::composite::add_border;
use crate::algorithm::matching::MosaicOptions;
use crate::algorithm::mosaic::MosaicBuilder;
use crate::analysis::pool::CandidatePool;
use crate::io::configuration::DEFAULT_BORDER_COLOR;
use crate::io::error::Result;
use crate::math::resample::resize_to;
use crate::spatial::buffer::PixelBuffer;
use crate::spatial::geometry::{MosaicGeometry, PrintSize};

/// Lays a mosaic out on a print size and drives its assembly
#[derive(Debug, Clone)]
pub struct MosaicAssembler {
    geometry: MosaicGeometry,
    options: MosaicOptions,
    border_color: [u8; 3],
    border_guidance: usize,
}

impl MosaicAssembler {
    /// Derive the cell grid for a print size
    ///
    /// `guidance` is the approximate cell edge in pixels and `border_guidance`
    /// the minimum border on each side; with zero border guidance the mosaic
    /// is delivered without a frame.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the print cannot hold a single cell
    pub fn new(
        size: PrintSize,
        guidance: usize,
        border_guidance: usize,
        options: MosaicOptions,
    ) -> Result<Self> {
        let geometry = MosaicGeometry::for_print(size, guidance, border_guidance)?;
        info!(
            cols = geometry.cols,
            rows = geometry.rows,
            cell = geometry.cell_width,
            "Mosaic layout for {size}"
        );

        Ok(Self {
            geometry,
            options,
            border_color: DEFAULT_BORDER_COLOR,
            border_guidance,
        })
    }

    /// Fill the border with another colour
    #[must_use]
    pub const fn with_border_color(mut self, color: [u8; 3]) -> Self {
        self.border_color = color;
        self
    }

    /// Cell grid and border sizes
    pub const fn geometry(&self) -> &MosaicGeometry {
        &self.geometry
    }

    /// Options passed to the matcher
    pub const fn options(&self) -> &MosaicOptions {
        &self.options
    }

    /// Downsample the target to two pixels per cell in each direction
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the target is smaller than the creator
    pub fn prepare_creator(&self, target: &PixelBuffer) -> Result<PixelBuffer> {
        let (width, height) = self.geometry.creator_dimensions();
        resize_to(target, width, height)
    }

    /// Start cell-by-cell assembly from a prepared creator image
    ///
    /// # Errors
    ///
    /// See [`MosaicBuilder::new`]
    pub fn builder<'a, R: Rng>(
        &self,
        creator: PixelBuffer,
        pool: &'a CandidatePool,
        rng: R,
    ) -> Result<MosaicBuilder<'a, R>> {
        MosaicBuilder::new(
            creator,
            pool,
            self.geometry.cell_width,
            self.geometry.cell_height,
            self.options,
            rng,
        )
    }

    /// Frame the assembled cells, if a border was requested
    ///
    /// # Errors
    ///
    /// Returns `ResourceExhaustion` if the framed image cannot be allocated
    pub fn finish(&self, inner: PixelBuffer) -> Result<PixelBuffer> {
        if self.border_guidance == 0 {
            return Ok(inner);
        }
        add_border(&inner, self.geometry.border, self.border_color)
    }

    /// Build the finished mosaic of `target` in one call
    ///
    /// # Errors
    ///
    /// Propagates errors from creator preparation, assembly and framing
    pub fn assemble<R: Rng>(
        &self,
        target: &PixelBuffer,
        pool: &CandidatePool,
        rng: R,
    ) -> Result<PixelBuffer> {
        let creator = self.prepare_creator(target)?;
        let mut builder = self.builder(creator, pool, rng)?;
        while builder.fill_next_row() {}
        let (inner, _) = builder.finish();
        self.finish(inner)
    }
}
