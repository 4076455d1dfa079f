//! Pixel compositing: tinted paste, borders and the single-image collage

use std::f64::consts::PI;

use tracing::debug;

use crate::io::error::{Result, exhausted, invalid_argument};
use crate::math::luminance::pixel_luminance;
use crate::spatial::buffer::{CHANNELS, PixelBuffer};
use crate::spatial::geometry::Border;

/// Copy `src` into `dest` with its top-left corner at (`x`, `y`)
///
/// Every channel is multiplied by `tone` and truncated, so a tone of 1.0 is
/// an exact copy. Returns false, leaving `dest` untouched, if the source is
/// larger than the destination or does not fit at that position.
pub fn paste_at(dest: &mut PixelBuffer, src: &PixelBuffer, x: usize, y: usize, tone: f32) -> bool {
    if dest.byte_len() < src.byte_len() || !dest.contains_rect(x, y, src.width(), src.height()) {
        return false;
    }

    let offset = x * CHANNELS;
    let span = src.width() * CHANNELS;
    let exact = (tone - 1.0).abs() < f32::EPSILON;

    for row in 0..src.height() {
        let (Some(from), Some(to)) = (src.row(row), dest.row_mut(y + row)) else {
            return false;
        };
        let Some(to) = to.get_mut(offset..offset + span) else {
            return false;
        };
        if exact {
            to.copy_from_slice(from);
        } else {
            for (d, &s) in to.iter_mut().zip(from) {
                *d = (tone * f32::from(s)) as u8;
            }
        }
    }

    true
}

/// Surround an image with a solid border
///
/// # Errors
///
/// Returns `ResourceExhaustion` if the bordered image cannot be allocated
pub fn add_border(image: &PixelBuffer, border: Border, color: [u8; 3]) -> Result<PixelBuffer> {
    let width = image
        .width()
        .checked_add(border.left)
        .and_then(|w| w.checked_add(border.right))
        .ok_or_else(|| exhausted("bordered image", usize::MAX))?;
    let height = image
        .height()
        .checked_add(border.top)
        .and_then(|h| h.checked_add(border.bottom))
        .ok_or_else(|| exhausted("bordered image", usize::MAX))?;

    let mut out = PixelBuffer::filled(width, height, color)?;
    paste_at(&mut out, image, border.left, border.top, 1.0);
    Ok(out)
}

/// How each pasted copy is tinted in a single-image collage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneMode {
    /// Tint by the luminance of the base pixel the copy stands for
    Luminance = 0,
    /// Tint by a sine wave peaking at the centre of the grid
    Sine = 1,
}

impl TryFrom<u8> for ToneMode {
    type Error = crate::io::error::CollageError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Luminance),
            1 => Ok(Self::Sine),
            other => Err(invalid_argument(
                "mode",
                &other,
                &"expected 0 (luminance) or 1 (sine)",
            )),
        }
    }
}

impl ToneMode {
    /// Tone for the copy standing in for base pixel (x, y)
    fn tone(self, base: &PixelBuffer, x: usize, y: usize) -> f32 {
        match self {
            Self::Luminance => base.pixel(x, y).map_or(0.0, pixel_luminance),
            Self::Sine => {
                let fx = (x as f64 * PI / base.width() as f64).sin();
                let fy = (y as f64 * PI / base.height() as f64).sin();
                (fx * fy).abs() as f32
            }
        }
    }
}

/// Tile `paste` once per pixel of `base`, tinting each copy
///
/// The result is `base.width * paste.width` x `base.height * paste.height`.
///
/// # Errors
///
/// Returns `ResourceExhaustion` if the output size overflows or cannot be
/// allocated
pub fn single_image_collage(
    base: &PixelBuffer,
    paste: &PixelBuffer,
    mode: ToneMode,
) -> Result<PixelBuffer> {
    let width = base
        .width()
        .checked_mul(paste.width())
        .ok_or_else(|| exhausted("single-image collage", usize::MAX))?;
    let height = base
        .height()
        .checked_mul(paste.height())
        .ok_or_else(|| exhausted("single-image collage", usize::MAX))?;

    debug!(width, height, ?mode, "Composing single-image collage");
    let mut out = PixelBuffer::new(width, height)?;

    for y in 0..base.height() {
        for x in 0..base.width() {
            let tone = mode.tone(base, x, y);
            paste_at(&mut out, paste, x * paste.width(), y * paste.height(), tone);
        }
    }

    Ok(out)
}
