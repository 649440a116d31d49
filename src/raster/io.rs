// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Loading and saving rasters through on-disk image containers.
//!
//! Decoding and encoding is delegated to the `image` crate. The only thing
//! this layer adds is the lossless-container policy: LSB payloads survive
//! PNG, BMP and TIFF bit-for-bit, while any lossy codec perturbs pixel
//! values and destroys them. Lossy targets are refused unless the caller
//! explicitly opts in.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::error::{ImageError, ImageFormatHint, UnsupportedError};
use image::io::Reader as ImageReader;
use image::{ImageFormat, RgbImage};

use super::Raster;
use crate::stego::error::StegoError;

/// Extensions whose codecs preserve pixel values exactly.
const LOSSLESS_EXTENSIONS: &[&str] = &["png", "bmp", "tif", "tiff"];

/// Extensions whose codecs will corrupt an embedded payload.
const LOSSY_EXTENSIONS: &[&str] = &["jpg", "jpeg", "webp", "heic"];

/// Extension appended when the target path has none.
const DEFAULT_EXTENSION: &str = "png";

/// Encoder chosen for a save target.
enum Container {
    Known(ImageFormat),
    /// Recognised extension with no encoder available.
    Unsupported,
    /// Anything else; written as PNG.
    Unknown,
}

/// Map a lowercase extension to its encoder. Only the listed containers are
/// honoured; GIF, ICO, AVIF and the like fall through to PNG, since their
/// encoders quantize or otherwise alter pixel values.
fn container_format(ext: &str) -> Container {
    match ext {
        "png" => Container::Known(ImageFormat::Png),
        "bmp" => Container::Known(ImageFormat::Bmp),
        "tif" | "tiff" => Container::Known(ImageFormat::Tiff),
        "jpg" | "jpeg" => Container::Known(ImageFormat::Jpeg),
        "webp" => Container::Known(ImageFormat::WebP),
        "heic" => Container::Unsupported,
        _ => Container::Unknown,
    }
}

/// Options for [`Raster::save`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// Write lossy containers (JPEG, WebP) anyway. The hidden message will
    /// almost certainly not survive.
    pub allow_lossy: bool,
}

/// Whether `ext` (without the dot, any case) is a known lossy container.
pub fn is_lossy_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    LOSSY_EXTENSIONS.contains(&ext.as_str())
}

/// Whether `ext` (without the dot, any case) is a known lossless container.
pub fn is_lossless_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    LOSSLESS_EXTENSIONS.contains(&ext.as_str())
}

impl Raster {
    /// Decode an image file and convert it to RGB8.
    ///
    /// The container is detected from the file contents, not the extension,
    /// so a PNG saved under an unknown extension loads back. Alpha is
    /// dropped; grayscale and palette images are expanded.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StegoError> {
        let img = ImageReader::open(path.as_ref())
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| StegoError::Io(ImageError::IoError(e)))?
            .decode()
            .map_err(StegoError::Io)?;
        Self::from_rgb_image(img.to_rgb8())
    }

    /// Decode an in-memory image in any format the `image` crate supports.
    pub fn from_image_bytes(bytes: &[u8]) -> Result<Self, StegoError> {
        let img = image::load_from_memory(bytes).map_err(StegoError::Io)?;
        Self::from_rgb_image(img.to_rgb8())
    }

    /// Take ownership of an `image` RGB buffer.
    pub fn from_rgb_image(img: RgbImage) -> Result<Self, StegoError> {
        let (width, height) = img.dimensions();
        Ok(Self::new(width, height, img.into_raw())?)
    }

    /// Copy into an `image` RGB buffer.
    pub fn to_rgb_image(&self) -> RgbImage {
        // The size invariant guarantees from_raw accepts the buffer.
        match RgbImage::from_raw(self.width, self.height, self.pixels.clone()) {
            Some(img) => img,
            None => unreachable!("raster buffer length is validated on construction"),
        }
    }

    /// Encode as PNG into memory.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StegoError> {
        let mut out = Vec::new();
        self.to_rgb_image()
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(StegoError::Io)?;
        Ok(out)
    }

    /// Save to `path`, choosing the container from the extension.
    ///
    /// A path without an extension gets `.png`. Unknown extensions are
    /// written as PNG. Returns the path actually written.
    ///
    /// # Errors
    /// - [`StegoError::LossyFormat`] for JPEG/WebP/HEIC targets unless
    ///   `options.allow_lossy` is set.
    /// - [`StegoError::Io`] if encoding or writing fails.
    pub fn save(&self, path: impl AsRef<Path>, options: SaveOptions) -> Result<PathBuf, StegoError> {
        let mut path = path.as_ref().to_path_buf();
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if !ext.is_empty() => ext.to_ascii_lowercase(),
            _ => {
                path.set_extension(DEFAULT_EXTENSION);
                DEFAULT_EXTENSION.to_string()
            }
        };

        if is_lossy_extension(&ext) {
            if !options.allow_lossy {
                return Err(StegoError::LossyFormat(ext));
            }
            log::warn!("saving to lossy container .{ext}; the hidden message will likely be destroyed");
        }

        let format = match container_format(&ext) {
            Container::Known(format) => format,
            Container::Unsupported => {
                let hint = ImageFormatHint::PathExtension(PathBuf::from(&ext));
                return Err(StegoError::Io(ImageError::Unsupported(UnsupportedError::from(hint))));
            }
            Container::Unknown => ImageFormat::Png,
        };

        self.to_rgb_image()
            .save_with_format(&path, format)
            .map_err(StegoError::Io)?;
        log::debug!("saved {}x{} raster to {}", self.width, self.height, path.display());
        Ok(path)
    }
}
