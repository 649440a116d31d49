// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers every failure mode from raster validation through
//! encryption, frame parsing and image I/O. All of them are recoverable: the
//! caller shows the message and lets the user retry.

use core::fmt;

use crate::raster::error::RasterError;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The raster is malformed (zero dimension, wrong buffer size).
    CorruptInput(RasterError),
    /// There is no message to embed.
    EmptyMessage,
    /// The UTF-8 message is longer than the raster can carry.
    MessageTooLong { size: usize, limit: usize },
    /// A bit sequence longer than the raster's channel count was handed to
    /// the embedder or requested from the extractor.
    CapacityExceeded { required_bits: usize, available_bits: usize },
    /// The authentication tag did not verify: wrong password, wrong key, or
    /// the embedded bits were damaged after encoding.
    AuthenticationFailure,
    /// The embedded frame is malformed, has an unknown format tag, declares
    /// a length the raster cannot hold, or decrypts to non-UTF-8 bytes.
    CorruptPayload,
    /// The supplied key text is not a valid key.
    InvalidKeyFormat,
    /// Argon2 rejected its parameters.
    KeyDerivation(argon2::Error),
    /// Refused to save to a lossy container (extension given).
    LossyFormat(String),
    /// Image decoding, encoding, or file access failed.
    Io(image::ImageError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptInput(e) => write!(f, "invalid raster: {e}"),
            Self::EmptyMessage => write!(f, "message is empty"),
            Self::MessageTooLong { size, limit } => {
                write!(f, "message too long: {size} bytes, max {limit} bytes")
            }
            Self::CapacityExceeded { required_bits, available_bits } => write!(
                f,
                "payload needs {required_bits} bits but the image holds {available_bits}"
            ),
            Self::AuthenticationFailure => write!(f, "failed to decode: key or password incorrect"),
            Self::CorruptPayload => write!(f, "no valid hidden message found in this image"),
            Self::InvalidKeyFormat => write!(f, "key is not in the expected format"),
            Self::KeyDerivation(e) => write!(f, "key derivation failed: {e}"),
            Self::LossyFormat(ext) => write!(
                f,
                ".{ext} is a lossy format and would destroy the hidden message"
            ),
            Self::Io(e) => write!(f, "image I/O error: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CorruptInput(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RasterError> for StegoError {
    fn from(e: RasterError) -> Self {
        Self::CorruptInput(e)
    }
}
