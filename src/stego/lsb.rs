// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! LSB bit embedding and extraction.
//!
//! One payload bit per channel byte. Traversal is pixels in row-major order,
//! channels R, G, B within each pixel. That is exactly the raster's buffer
//! order, so position `k` of the bit sequence lives in the LSB of
//! `pixels[k]`. Only that bit is ever written; the upper seven bits of every
//! byte and all bytes past the sequence are left as they were.

use crate::raster::Raster;
use crate::stego::capacity::raster_capacity_bits;
use crate::stego::error::StegoError;

/// Write `bits` into the LSBs of a copy of `raster`.
///
/// Each element of `bits` must be `0` or `1`; only its low bit is used.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if `bits.len()` exceeds the raster's
/// channel count. Nothing is written in that case.
pub fn embed_bits(raster: &Raster, bits: &[u8]) -> Result<Raster, StegoError> {
    let available_bits = raster_capacity_bits(raster);
    if bits.len() > available_bits {
        return Err(StegoError::CapacityExceeded {
            required_bits: bits.len(),
            available_bits,
        });
    }

    let mut out = raster.clone();
    for (byte, &bit) in out.pixels_mut().iter_mut().zip(bits) {
        *byte = (*byte & 0xFE) | (bit & 1);
    }
    Ok(out)
}

/// Read `count` LSBs in traversal order.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if `count` exceeds the raster's channel
/// count.
pub fn extract_bits(raster: &Raster, count: usize) -> Result<Vec<u8>, StegoError> {
    let available_bits = raster_capacity_bits(raster);
    if count > available_bits {
        return Err(StegoError::CapacityExceeded {
            required_bits: count,
            available_bits,
        });
    }
    Ok(raster.pixels()[..count].iter().map(|b| b & 1).collect())
}
