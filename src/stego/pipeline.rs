// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Encode/decode pipeline.
//!
//! Encode:
//! 1. Check the message against [`capacity_bytes`]
//! 2. Draw a fresh [`Key`]
//! 3. Seal with AES-256-GCM-SIV under Argon2id(password, key, salt)
//! 4. Pack the frame and write it into the LSBs of a copy of the raster
//!
//! Decode runs the same steps backwards, reading the fixed header first so a
//! bogus length is rejected before the rest of the raster is scanned.

use crate::raster::Raster;
use crate::stego::capacity::{capacity_bytes, raster_capacity_bits};
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, FORMAT_V1, HEADER_BITS};
use crate::stego::key::Key;
use crate::stego::lsb;

/// Result of a successful [`encode`].
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The stego raster. Save it only to a lossless container.
    pub raster: Raster,
    /// Printable key; required, with the password, to decode.
    pub key: String,
}

/// Hide `message` in a copy of `raster`.
///
/// # Errors
/// - [`StegoError::EmptyMessage`] if `message` is empty.
/// - [`StegoError::MessageTooLong`] if its UTF-8 length exceeds
///   [`capacity_bytes`]; both sizes are reported.
/// - [`StegoError::KeyDerivation`] if Argon2 fails.
pub fn encode(raster: &Raster, message: &str, password: &str) -> Result<Encoded, StegoError> {
    if message.is_empty() {
        return Err(StegoError::EmptyMessage);
    }

    let limit = capacity_bytes(raster)?;
    let size = message.len();
    if size > limit {
        return Err(StegoError::MessageTooLong { size, limit });
    }

    let key = Key::generate();

    // size <= limit <= u32::MAX, checked above.
    let aad = frame::associated_data(FORMAT_V1, size as u32);
    let sealed = crypto::seal(message.as_bytes(), password, &key, &aad)?;

    let bits = frame::pack_frame(&sealed)?;
    let stego = lsb::embed_bits(raster, &bits)?;

    log::debug!(
        "embedded {} byte message as {} frame bits into {}x{} raster",
        size,
        bits.len(),
        raster.width(),
        raster.height()
    );

    Ok(Encoded {
        raster: stego,
        key: key.to_text(),
    })
}

/// Recover a message hidden by [`encode`].
///
/// # Errors
/// - [`StegoError::InvalidKeyFormat`] if `key` is not valid key text.
/// - [`StegoError::CorruptPayload`] if no well-formed frame is present or
///   its declared length exceeds the raster.
/// - [`StegoError::AuthenticationFailure`] if the password or key is wrong,
///   or the embedded bits were damaged.
pub fn decode(raster: &Raster, password: &str, key: &str) -> Result<String, StegoError> {
    let key = Key::parse(key)?;
    let available_bits = raster_capacity_bits(raster);

    if available_bits < HEADER_BITS {
        log::debug!("raster holds {available_bits} bits, less than a frame header");
        return Err(StegoError::CorruptPayload);
    }
    let header_bits = lsb::extract_bits(raster, HEADER_BITS)?;
    let header = frame::parse_header(&header_bits)?;

    let frame_bits = header.frame_bits();
    if frame_bits > available_bits {
        log::debug!(
            "declared frame of {frame_bits} bits exceeds raster capacity of {available_bits}"
        );
        return Err(StegoError::CorruptPayload);
    }

    let bits = lsb::extract_bits(raster, frame_bits)?;
    let (header, sealed) = frame::unpack_frame(&bits, available_bits)?;

    let plaintext = crypto::open(&sealed, password, &key, &header.associated_data())?;
    log::debug!("recovered {} byte message", plaintext.len());

    String::from_utf8(plaintext).map_err(|_| StegoError::CorruptPayload)
}
