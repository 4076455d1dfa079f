//! Candidate photos prepared for matching
//!
//! Every photo offered to the pool is scaled to the cell size once, up front,
//! and its luminance and quadrant shape are measured at that size. Photos that
//! cannot take part are recorded as empty slots so that indices stay aligned
//! with the order in which files were offered.

use std::fmt;

use tracing::{debug, warn};

use crate::analysis::shape::{LuminanceShape, ShapeModel, shape_with_model};
use crate::io::error::{CollageError, Result};
use crate::io::image::DecodedImage;
use crate::math::luminance::average_luminance;
use crate::math::resample::resize_to;
use crate::spatial::buffer::{CHANNELS, PixelBuffer};

/// A photo scaled to the cell size with its precomputed measures
#[derive(Debug, Clone)]
pub struct Candidate {
    name: String,
    pixels: PixelBuffer,
    luminance: f32,
    shape: LuminanceShape,
}

impl Candidate {
    /// Display name, usually the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixels at exactly the cell size
    pub const fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Mean perceptual luminance
    pub const fn luminance(&self) -> f32 {
        self.luminance
    }

    /// Quadrant descriptor
    pub const fn shape(&self) -> &LuminanceShape {
        &self.shape
    }
}

/// Why a photo was left out of the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The file could not be decoded
    Unreadable(String),
    /// The photo is smaller than a cell in at least one dimension
    TooSmall {
        /// Photo width
        width: usize,
        /// Photo height
        height: usize,
    },
    /// The file is not three-channel RGB
    ChannelCount(u8),
    /// The photo could not be measured
    Degenerate(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(reason) => write!(f, "unreadable: {reason}"),
            Self::TooSmall { width, height } => {
                write!(f, "{width}x{height} is smaller than a cell")
            }
            Self::ChannelCount(channels) => {
                write!(f, "{channels} channels, expected {CHANNELS}")
            }
            Self::Degenerate(reason) => write!(f, "cannot be measured: {reason}"),
        }
    }
}

/// Ordered collection of candidate slots
#[derive(Debug, Clone)]
pub struct CandidatePool {
    source: String,
    cell_width: usize,
    cell_height: usize,
    model: ShapeModel,
    slots: Vec<Option<Candidate>>,
}

impl CandidatePool {
    /// Create an empty pool for cells of the given size
    pub fn new(source: impl Into<String>, cell_width: usize, cell_height: usize) -> Self {
        Self {
            source: source.into(),
            cell_width,
            cell_height,
            model: ShapeModel::default(),
            slots: Vec::new(),
        }
    }

    /// Measure quadrant shapes with a different model
    #[must_use]
    pub const fn with_model(mut self, model: ShapeModel) -> Self {
        self.model = model;
        self
    }

    /// Offer a decoded photo, or the error that decoding produced
    ///
    /// A slot is appended either way. Returns the reason if the photo was
    /// left out.
    ///
    /// # Errors
    ///
    /// Only allocation failures are propagated; every other problem with a
    /// photo is reported as a [`Rejection`]
    pub fn offer(
        &mut self,
        name: impl Into<String>,
        decoded: Result<DecodedImage>,
    ) -> Result<Option<Rejection>> {
        let name = name.into();
        let outcome = match decoded {
            Ok(image) => self.prepare(&name, image)?,
            Err(err @ CollageError::ResourceExhaustion { .. }) => return Err(err),
            Err(err) => Err(Rejection::Unreadable(err.to_string())),
        };

        match outcome {
            Ok(candidate) => {
                debug!(
                    name = candidate.name(),
                    luminance = candidate.luminance,
                    shape = ?candidate.shape.quadrants(),
                    "Accepted candidate"
                );
                self.slots.push(Some(candidate));
                Ok(None)
            }
            Err(rejection) => {
                warn!(name = %name, "Skipping candidate: {rejection}");
                self.slots.push(None);
                Ok(Some(rejection))
            }
        }
    }

    fn prepare(
        &self,
        name: &str,
        image: DecodedImage,
    ) -> Result<std::result::Result<Candidate, Rejection>> {
        if usize::from(image.source_channels) != CHANNELS {
            return Ok(Err(Rejection::ChannelCount(image.source_channels)));
        }

        let (width, height) = image.pixels.dimensions();
        if width < self.cell_width || height < self.cell_height {
            return Ok(Err(Rejection::TooSmall { width, height }));
        }

        let pixels = match resize_to(&image.pixels, self.cell_width, self.cell_height) {
            Ok(pixels) => pixels,
            Err(err @ CollageError::ResourceExhaustion { .. }) => return Err(err),
            Err(err) => return Ok(Err(Rejection::Degenerate(err.to_string()))),
        };

        let shape = match shape_with_model(&pixels, self.model) {
            Ok(shape) => shape,
            Err(err) => return Ok(Err(Rejection::Degenerate(err.to_string()))),
        };

        Ok(Ok(Candidate {
            name: name.to_owned(),
            luminance: average_luminance(&pixels),
            pixels,
            shape,
        }))
    }

    /// Where the candidates came from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Cell size every candidate was scaled to
    pub const fn cell_dimensions(&self) -> (usize, usize) {
        (self.cell_width, self.cell_height)
    }

    /// Number of slots, usable or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Test if nothing has been offered yet
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding a candidate
    pub fn usable_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Candidate at a slot, `None` for rejected photos and out-of-range indices
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Usable candidates with their slot index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Candidate)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|candidate| (index, candidate)))
    }
}
