//! Downscaling by integer decimation and by bilinear interpolation
//!
//! Both operations only ever shrink. The bilinear path crops the source to
//! the target aspect ratio (centred) so no output pixel is stretched.

use crate::io::error::{Result, invalid_argument};
use crate::spatial::buffer::PixelBuffer;

/// Keep every `factor`-th pixel in both directions
///
/// The output is `floor(width / factor)` x `floor(height / factor)` and
/// output pixel (x, y) is exactly source pixel (x * factor, y * factor).
///
/// # Errors
///
/// Returns `InvalidArgument` if `factor` is zero or larger than either
/// dimension, and `ResourceExhaustion` if the output cannot be allocated
pub fn shrink_by_factor(image: &PixelBuffer, factor: usize) -> Result<PixelBuffer> {
    if factor == 0 {
        return Err(invalid_argument("factor", &factor, &"must be at least 1"));
    }

    let (width, height) = (image.width() / factor, image.height() / factor);
    if width == 0 || height == 0 {
        return Err(invalid_argument(
            "factor",
            &factor,
            &format!(
                "larger than the {}x{} source image",
                image.width(),
                image.height()
            ),
        ));
    }

    PixelBuffer::from_fn(width, height, |x, y| {
        image.pixel(x * factor, y * factor).unwrap_or_default()
    })
}

/// Bilinear downscale to exactly `target_width` x `target_height`
///
/// A single scale factor is used for both axes: the smaller of the two
/// per-axis ratios, so the sampled window spans the full source along one
/// axis and is centred along the other.
///
/// # Errors
///
/// Returns `InvalidArgument` if a target dimension is zero or exceeds the
/// source, and `ResourceExhaustion` if the output cannot be allocated
pub fn resize_to(
    image: &PixelBuffer,
    target_width: usize,
    target_height: usize,
) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();

    if target_width == 0 || target_height == 0 {
        return Err(invalid_argument(
            "target",
            &format!("{target_width}x{target_height}"),
            &"width and height must be positive",
        ));
    }
    if target_width > width || target_height > height {
        return Err(invalid_argument(
            "target",
            &format!("{target_width}x{target_height}"),
            &format!("resize only downscales, source is {width}x{height}"),
        ));
    }

    let width_factor = width as f64 / target_width as f64;
    let height_factor = height as f64 / target_height as f64;

    let (scale, offset_x, offset_y) = if width_factor <= height_factor {
        let diff = (target_height as f64).mul_add(-width_factor, height as f64);
        (width_factor, 0.0, diff / 2.0)
    } else {
        let diff = (target_width as f64).mul_add(-height_factor, width as f64);
        (height_factor, diff / 2.0, 0.0)
    };

    PixelBuffer::from_fn(target_width, target_height, |x, y| {
        let x_src = (x as f64).mul_add(scale, offset_x);
        let y_src = (y as f64).mul_add(scale, offset_y);
        sample_bilinear(image, x_src, y_src)
    })
}

/// Interpolate the colour at fractional source coordinates
///
/// Neighbours past the last row or column are clamped to it. Each channel is
/// truncated towards zero when converted back to a byte.
pub fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 3] {
    let max_x = image.width() - 1;
    let max_y = image.height() - 1;

    let x1 = (x.max(0.0) as usize).min(max_x);
    let y1 = (y.max(0.0) as usize).min(max_y);
    let x2 = (x1 + 1).min(max_x);
    let y2 = (y1 + 1).min(max_y);

    let x_weight = (x - x1 as f64).clamp(0.0, 1.0);
    let y_weight = (y - y1 as f64).clamp(0.0, 1.0);

    let top_left = image.pixel(x1, y1).unwrap_or_default();
    let top_right = image.pixel(x2, y1).unwrap_or_default();
    let bottom_left = image.pixel(x1, y2).unwrap_or_default();
    let bottom_right = image.pixel(x2, y2).unwrap_or_default();

    let mut out = [0u8; 3];
    for (c, value) in out.iter_mut().enumerate() {
        let channel = |p: [u8; 3]| f64::from(p.get(c).copied().unwrap_or(0));
        let blended = (1.0 - x_weight) * (1.0 - y_weight) * channel(top_left)
            + x_weight * (1.0 - y_weight) * channel(top_right)
            + (1.0 - x_weight) * y_weight * channel(bottom_left)
            + x_weight * y_weight * channel(bottom_right);
        *value = blended as u8;
    }
    out
}
