//! Owned RGB pixel buffer shared by every pipeline stage
//!
//! Pixels are stored row-major, three bytes per pixel, with no padding.
//! Allocation goes through `try_reserve_exact` so that oversized mosaics
//! surface as `ResourceExhaustion` instead of aborting the process.

use crate::io::error::{Result, exhausted, invalid_argument};

/// Number of interleaved channels per pixel
pub const CHANNELS: usize = 3;

/// Width x height x 3 byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

/// Byte length of a `width` x `height` RGB buffer, `None` on overflow
pub const fn byte_len_for(width: usize, height: usize) -> Option<usize> {
    match width.checked_mul(height) {
        Some(area) => area.checked_mul(CHANNELS),
        None => None,
    }
}

fn allocate(width: usize, height: usize, what: &'static str) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(invalid_argument(
            "dimensions",
            &format!("{width}x{height}"),
            &"width and height must be positive",
        ));
    }

    let size = byte_len_for(width, height).ok_or_else(|| exhausted(what, usize::MAX))?;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(size)
        .map_err(|_reserve_error| exhausted(what, size))?;
    Ok(pixels)
}

impl PixelBuffer {
    /// Allocate a black buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero dimension and
    /// `ResourceExhaustion` if the buffer cannot be allocated
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Allocate a buffer where every pixel has the same colour
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero dimension and
    /// `ResourceExhaustion` if the buffer cannot be allocated
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self> {
        let mut pixels = allocate(width, height, "pixel buffer")?;
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgb);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build a buffer by evaluating `pixel` at every coordinate, row by row
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero dimension and
    /// `ResourceExhaustion` if the buffer cannot be allocated
    pub fn from_fn<F>(width: usize, height: usize, mut pixel: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> [u8; 3],
    {
        let mut pixels = allocate(width, height, "pixel buffer")?;
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&pixel(x, y));
            }
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Wrap existing interleaved RGB bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a dimension is zero or the byte count
    /// does not equal `width * height * 3`
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_argument(
                "dimensions",
                &format!("{width}x{height}"),
                &"width and height must be positive",
            ));
        }
        if byte_len_for(width, height) != Some(pixels.len()) {
            return Err(invalid_argument(
                "pixels",
                &pixels.len(),
                &format!("expected {width}x{height}x{CHANNELS} bytes"),
            ));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total size in bytes
    pub const fn byte_len(&self) -> usize {
        self.pixels.len()
    }

    /// Raw interleaved bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether (x, y) addresses a pixel of this buffer
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Whether a `width` x `height` rectangle at (x, y) lies entirely inside
    pub const fn contains_rect(&self, x: usize, y: usize, width: usize, height: usize) -> bool {
        match (x.checked_add(width), y.checked_add(height)) {
            (Some(right), Some(bottom)) => right <= self.width && bottom <= self.height,
            _ => false,
        }
    }

    const fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// Colour at (x, y), `None` outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if !self.contains(x, y) {
            return None;
        }
        let start = self.offset(x, y);
        match self.pixels.get(start..start + CHANNELS) {
            Some(&[r, g, b]) => Some([r, g, b]),
            _ => None,
        }
    }

    /// Overwrite the colour at (x, y); returns false outside the buffer
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let start = self.offset(x, y);
        self.pixels
            .get_mut(start..start + CHANNELS)
            .map(|slot| slot.copy_from_slice(&rgb))
            .is_some()
    }

    /// Bytes of row `y`
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let stride = self.width * CHANNELS;
        self.pixels.get(y * stride..(y + 1) * stride)
    }

    /// Mutable bytes of row `y`
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [u8]> {
        let stride = self.width * CHANNELS;
        self.pixels.get_mut(y * stride..(y + 1) * stride)
    }

    /// Iterate over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .filter_map(|chunk| match chunk {
                &[r, g, b] => Some([r, g, b]),
                _ => None,
            })
    }
}
