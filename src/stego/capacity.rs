// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Embedding capacity.
//!
//! LSB embedding carries exactly one bit per channel byte, so capacity is a
//! pure function of the raster dimensions:
//!
//! ```text
//! capacity_bits  = width * height * 3
//! capacity_bytes = floor(capacity_bits / 8) - FRAME_OVERHEAD   (min 0)
//! ```

use crate::raster::{self, Raster};
use crate::stego::crypto::MAX_PLAINTEXT_LEN;
use crate::stego::error::StegoError;
use crate::stego::frame::FRAME_OVERHEAD;

/// Number of LSBs available in a `width` x `height` RGB raster.
///
/// # Errors
/// [`StegoError::CorruptInput`] if either dimension is zero or the product
/// overflows.
pub fn capacity_bits(width: u32, height: u32) -> Result<usize, StegoError> {
    Ok(raster::channel_bytes(width, height)?)
}

/// Maximum plaintext bytes for the given dimensions.
///
/// Returns 0 when the raster cannot even hold the frame overhead. Capped at
/// the frame's u32 length field.
pub fn capacity_for_dimensions(width: u32, height: u32) -> Result<usize, StegoError> {
    let frame_bytes = capacity_bits(width, height)? / 8;
    Ok(frame_bytes.saturating_sub(FRAME_OVERHEAD).min(MAX_PLAINTEXT_LEN))
}

/// Maximum plaintext bytes that [`encode`](crate::encode) accepts for
/// `raster`.
pub fn capacity_bytes(raster: &Raster) -> Result<usize, StegoError> {
    capacity_for_dimensions(raster.width(), raster.height())
}

/// Bit capacity of an already-validated raster.
pub(crate) fn raster_capacity_bits(raster: &Raster) -> usize {
    raster.pixels().len()
}

/// How much of a raster's capacity a message would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageBudget {
    /// UTF-8 length of the message.
    pub used: usize,
    /// [`capacity_bytes`] of the raster.
    pub limit: usize,
}

impl MessageBudget {
    pub fn fits(&self) -> bool {
        self.used <= self.limit
    }

    /// Bytes left, or 0 when over budget.
    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used)
    }
}

/// Measure `message` against the capacity of `raster`.
///
/// Intended for a live "used / max bytes" readout while the user types.
pub fn message_budget(raster: &Raster, message: &str) -> Result<MessageBudget, StegoError> {
    Ok(MessageBudget {
        used: message.len(),
        limit: capacity_bytes(raster)?,
    })
}
