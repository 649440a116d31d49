// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for raster construction.

use std::fmt;

/// Reasons a pixel buffer cannot be accepted as a [`Raster`](super::Raster).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Width or height is zero.
    ZeroDimension,
    /// The buffer length is not `width * height * 3`.
    BufferSizeMismatch { expected: usize, actual: usize },
    /// `width * height * 3` does not fit in `usize`.
    DimensionOverflow,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "raster has a zero dimension"),
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "raster buffer holds {actual} bytes, expected {expected}")
            }
            Self::DimensionOverflow => write!(f, "raster dimensions overflow"),
        }
    }
}

impl std::error::Error for RasterError {}

pub type Result<T> = std::result::Result<T, RasterError>;
