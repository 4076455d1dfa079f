//! JPEG/PNG decoding into RGB buffers, JPEG export and folder listing

use crate::io::error::{CollageError, Result, WithPath, invalid_argument};
use crate::spatial::buffer::PixelBuffer;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// An image converted to RGB, remembering how many channels the file had
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Pixels coerced to 8-bit RGB
    pub pixels: PixelBuffer,
    /// Channel count of the encoded file (1 grey, 2 grey+alpha, 3 RGB, 4 RGBA)
    pub source_channels: u8,
}

impl DecodedImage {
    /// Wrap an in-memory RGB buffer as if it had been decoded from an RGB file
    pub const fn rgb(pixels: PixelBuffer) -> Self {
        Self {
            pixels,
            source_channels: 3,
        }
    }
}

/// Decode an image file and coerce it to RGB
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn decode(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|e| CollageError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source_channels = img.color().channel_count();
    let rgb = img.into_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let pixels = PixelBuffer::from_raw(width, height, rgb.into_raw())?;

    Ok(DecodedImage {
        pixels,
        source_channels,
    })
}

/// Decode an image file into an RGB buffer, whatever its channel count
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_rgb(path: &Path) -> Result<PixelBuffer> {
    decode(path).map(|decoded| decoded.pixels)
}

/// Encode a buffer as JPEG
///
/// Quality is clamped to the 1..=100 range the encoder accepts.
///
/// # Errors
///
/// Returns an error if:
/// - The buffer is wider or taller than a JPEG can describe
/// - The parent directory or the file cannot be created
/// - Encoding fails
pub fn save_jpeg(path: &Path, image: &PixelBuffer, quality: u8) -> Result<()> {
    let width = u32::try_from(image.width())
        .map_err(|e| invalid_argument("width", &image.width(), &e))?;
    let height = u32::try_from(image.height())
        .map_err(|e| invalid_argument("height", &image.height(), &e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CollageError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| CollageError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;

    let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality.clamp(1, 100));
    encoder
        .encode(image.as_bytes(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| CollageError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}

/// List the regular files of a folder, sorted by path
///
/// Sorting makes candidate order, and with it every index-based tie break,
/// independent of the filesystem's enumeration order.
///
/// # Errors
///
/// Returns `FileSystem` if the folder cannot be read
pub fn list_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder).map_err(|e| CollageError::FileSystem {
        path: folder.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_path(folder)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
