//! Four-quadrant brightness descriptor
//!
//! A shape captures where the light sits inside a cell, which lets the
//! matcher prefer a candidate whose bright corner lines up with the bright
//! corner of the region it replaces.
//!
//! All quadrants are measured with perceptual luminance by default, the
//! same measure used for the 2x2 creator blocks they are compared against.
//! `ShapeModel::Legacy` measures the top-left quadrant with the plain channel
//! average instead, reproducing mosaics made before the measures were unified.

use crate::io::error::{Result, invalid_argument};
use crate::math::luminance::{brightness_of, luminance_of, pixel_luminance};
use crate::spatial::buffer::PixelBuffer;

/// Mean brightness of the four quadrants of a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuminanceShape {
    /// Top-left quadrant
    pub top_left: f32,
    /// Top-right quadrant
    pub top_right: f32,
    /// Bottom-left quadrant
    pub bottom_left: f32,
    /// Bottom-right quadrant
    pub bottom_right: f32,
}

impl LuminanceShape {
    /// Shape of a fully white cell
    pub const WHITE: Self = Self::uniform(1.0);

    /// Shape with the same value in every quadrant
    pub const fn uniform(value: f32) -> Self {
        Self {
            top_left: value,
            top_right: value,
            bottom_left: value,
            bottom_right: value,
        }
    }

    /// Shape of a 2x2 pixel block, one pixel per quadrant
    ///
    /// Pixels are given as top-left, top-right, bottom-left, bottom-right.
    pub fn from_block(block: [[u8; 3]; 4]) -> Self {
        let [top_left, top_right, bottom_left, bottom_right] = block.map(pixel_luminance);
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Quadrant values in top-left, top-right, bottom-left, bottom-right order
    pub const fn quadrants(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Average over the four quadrants
    pub fn mean(&self) -> f32 {
        self.quadrants().iter().sum::<f32>() / 4.0
    }
}

/// How the quadrants of a photo are measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShapeModel {
    /// Perceptual luminance in every quadrant
    #[default]
    Perceptual,
    /// Plain channel average in the top-left quadrant, luminance elsewhere
    Legacy,
}

/// Sum of absolute per-quadrant differences
///
/// Not divided by four: the contour tolerance is calibrated against the sum.
pub fn shape_difference(a: &LuminanceShape, b: &LuminanceShape) -> f32 {
    a.quadrants()
        .iter()
        .zip(b.quadrants().iter())
        .map(|(x, y)| (x - y).abs())
        .sum()
}

/// Compute the quadrant descriptor of an image with perceptual luminance
///
/// # Errors
///
/// See [`shape_with_model`]
pub fn shape_of(image: &PixelBuffer) -> Result<LuminanceShape> {
    shape_with_model(image, ShapeModel::Perceptual)
}

/// Compute the quadrant descriptor of an image
///
/// Each quadrant is `width / 2` x `height / 2` pixels; with an odd
/// dimension the last row or column belongs to no quadrant.
///
/// # Errors
///
/// Returns `InvalidArgument` if the image is narrower or shorter than
/// 2 pixels, since a quadrant would then be empty
pub fn shape_with_model(image: &PixelBuffer, model: ShapeModel) -> Result<LuminanceShape> {
    let (half_width, half_height) = (image.width() / 2, image.height() / 2);
    if half_width == 0 || half_height == 0 {
        return Err(invalid_argument(
            "image",
            &format!("{}x{}", image.width(), image.height()),
            &"at least 2x2 pixels are needed for a shape",
        ));
    }

    let quadrant_mean = |x0: usize, y0: usize, measure: fn(u8, u8, u8) -> f32| -> f32 {
        let mut sum = 0.0f64;
        for y in y0..y0 + half_height {
            for x in x0..x0 + half_width {
                if let Some([r, g, b]) = image.pixel(x, y) {
                    sum += f64::from(measure(r, g, b));
                }
            }
        }
        (sum / (half_width * half_height) as f64) as f32
    };

    let top_left_measure: fn(u8, u8, u8) -> f32 = match model {
        ShapeModel::Perceptual => luminance_of,
        ShapeModel::Legacy => brightness_of,
    };

    Ok(LuminanceShape {
        top_left: quadrant_mean(0, 0, top_left_measure),
        top_right: quadrant_mean(half_width, 0, luminance_of),
        bottom_left: quadrant_mean(0, half_height, luminance_of),
        bottom_right: quadrant_mean(half_width, half_height, luminance_of),
    })
}
