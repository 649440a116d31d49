// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Decoded RGB pixel buffers.
//!
//! A [`Raster`] is the only image representation the embedding engine sees:
//! `width * height` pixels, three 8-bit channels each, stored row-major with
//! R, G, B interleaved. Loading and saving through on-disk containers lives
//! in [`io`].

pub mod error;
pub mod io;

use error::{RasterError, Result};

/// Number of channels per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// A validated RGB8 raster.
///
/// The buffer length always equals `width * height * CHANNELS` and both
/// dimensions are non-zero; every constructor enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Number of channel bytes in a `width` x `height` RGB raster.
pub(crate) fn channel_bytes(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(RasterError::ZeroDimension);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|p| p.checked_mul(CHANNELS))
        .ok_or(RasterError::DimensionOverflow)
}

impl Raster {
    /// Wrap an existing row-major RGB buffer.
    ///
    /// # Errors
    /// - [`RasterError::ZeroDimension`] if either dimension is zero.
    /// - [`RasterError::BufferSizeMismatch`] if `pixels.len()` is not
    ///   `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = channel_bytes(width, height)?;
        if pixels.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Create a raster with every pixel set to `rgb`.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        let len = channel_bytes(width, height)?;
        let pixels = rgb.iter().copied().cycle().take(len).collect();
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The `[r, g, b]` triple at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let px = &self.pixels[start..start + CHANNELS];
        Some([px[0], px[1], px[2]])
    }

    /// Mutable access to the channel bytes for in-crate writers. The length
    /// cannot change through a slice, so the size invariant holds.
    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
