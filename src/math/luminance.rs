//! Per-pixel brightness measures
//!
//! `luminance_of` is a gamma-weighted approximation of perceived brightness,
//! not a standard colour space conversion. Channels are divided by 256 so
//! full white lands just below 1.0; keep that divisor for numeric parity with
//! existing mosaics.

use crate::io::configuration::{
    LUMINANCE_BLUE, LUMINANCE_GREEN, LUMINANCE_NORMALIZATION, LUMINANCE_POWER_CURVE, LUMINANCE_RED,
};
use crate::spatial::buffer::PixelBuffer;

/// Perceptual luminance of one pixel, roughly in [0, 1)
pub fn luminance_of(r: u8, g: u8, b: u8) -> f32 {
    let channel = |value: u8| (f32::from(value) / LUMINANCE_NORMALIZATION).powf(LUMINANCE_POWER_CURVE);

    channel(r).mul_add(
        LUMINANCE_RED,
        channel(g).mul_add(LUMINANCE_GREEN, channel(b) * LUMINANCE_BLUE),
    )
}

/// Plain channel average of one pixel in [0, 1]
pub fn brightness_of(r: u8, g: u8, b: u8) -> f32 {
    (f32::from(r) + f32::from(g) + f32::from(b)) / (255.0 * 3.0)
}

/// Luminance of an `[r, g, b]` triple
pub fn pixel_luminance(rgb: [u8; 3]) -> f32 {
    let [r, g, b] = rgb;
    luminance_of(r, g, b)
}

/// Mean perceptual luminance over every pixel of the buffer
pub fn average_luminance(image: &PixelBuffer) -> f32 {
    let sum: f64 = image
        .pixels()
        .map(|rgb| f64::from(pixel_luminance(rgb)))
        .sum();
    let count = image.width() * image.height();

    (sum / count as f64) as f32
}
