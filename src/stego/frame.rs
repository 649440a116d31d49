// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Payload frame construction and parsing.
//!
//! The frame is the binary container embedded into the raster:
//!
//! ```text
//! [1 byte  ] format tag (0x01)
//! [4 bytes ] ciphertext length (big-endian u32)
//! [16 bytes] Argon2 salt
//! [12 bytes] AES-GCM-SIV nonce
//! [N bytes ] ciphertext (N = plaintext length)
//! [16 bytes] authentication tag
//! ```
//!
//! Total frame size = 49 + N bytes. The format tag and length bytes are the
//! AEAD associated data, so they are authenticated along with the body.
//!
//! Frames travel as bit vectors (one `0`/`1` per element, MSB first within
//! each byte), which is what the LSB embedder consumes.

use crate::stego::crypto::{Sealed, NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::stego::error::StegoError;

/// Current (and only) frame format.
pub const FORMAT_V1: u8 = 0x01;

/// Format tag + length field. Doubles as the AEAD associated data.
pub const PREFIX_LEN: usize = 1 + 4;

/// Fixed-size header read before the body: prefix + salt + nonce.
pub const HEADER_LEN: usize = PREFIX_LEN + SALT_LEN + NONCE_LEN; // 33

/// Header size in bits.
pub const HEADER_BITS: usize = HEADER_LEN * 8;

/// Fixed overhead: header(33) + tag(16) = 49 bytes.
pub const FRAME_OVERHEAD: usize = HEADER_LEN + TAG_LEN;

/// Parsed fixed-size frame header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    pub format: u8,
    pub ciphertext_len: u32,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

impl FrameHeader {
    /// Total frame length in bytes.
    pub fn frame_len(&self) -> usize {
        FRAME_OVERHEAD.saturating_add(self.ciphertext_len as usize)
    }

    /// Total frame length in bits. Saturates on 32-bit targets, where a
    /// hostile length field could overflow.
    pub fn frame_bits(&self) -> usize {
        self.frame_len().saturating_mul(8)
    }

    /// Associated data bound to the ciphertext.
    pub fn associated_data(&self) -> [u8; PREFIX_LEN] {
        associated_data(self.format, self.ciphertext_len)
    }
}

/// The authenticated prefix for a frame of the given format and length.
pub fn associated_data(format: u8, ciphertext_len: u32) -> [u8; PREFIX_LEN] {
    let mut out = [0u8; PREFIX_LEN];
    out[0] = format;
    out[1..].copy_from_slice(&ciphertext_len.to_be_bytes());
    out
}

/// Serialize a sealed message as a v1 frame bit vector.
///
/// # Errors
/// [`StegoError::MessageTooLong`] if the ciphertext does not fit the u32
/// length field.
pub fn pack_frame(sealed: &Sealed) -> Result<Vec<u8>, StegoError> {
    let len = u32::try_from(sealed.ciphertext.len()).map_err(|_| StegoError::MessageTooLong {
        size: sealed.ciphertext.len(),
        limit: u32::MAX as usize,
    })?;

    let mut frame = Vec::with_capacity(FRAME_OVERHEAD + sealed.ciphertext.len());
    frame.extend_from_slice(&associated_data(FORMAT_V1, len));
    frame.extend_from_slice(&sealed.salt);
    frame.extend_from_slice(&sealed.nonce);
    frame.extend_from_slice(&sealed.ciphertext);
    frame.extend_from_slice(&sealed.tag);

    Ok(bytes_to_bits(&frame))
}

/// Parse the fixed-size header from the first [`HEADER_BITS`] of `bits`.
///
/// Only the header prefix is read; the body is not touched.
///
/// # Errors
/// [`StegoError::CorruptPayload`] if fewer than [`HEADER_BITS`] bits are
/// given or the format tag is unknown.
pub fn parse_header(bits: &[u8]) -> Result<FrameHeader, StegoError> {
    if bits.len() < HEADER_BITS {
        return Err(StegoError::CorruptPayload);
    }
    let header = bits_to_bytes(&bits[..HEADER_BITS]);

    let format = header[0];
    if format != FORMAT_V1 {
        return Err(StegoError::CorruptPayload);
    }

    let ciphertext_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&header[PREFIX_LEN..PREFIX_LEN + SALT_LEN]);

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&header[PREFIX_LEN + SALT_LEN..HEADER_LEN]);

    Ok(FrameHeader {
        format,
        ciphertext_len,
        salt,
        nonce,
    })
}

/// Parse a full frame.
///
/// `available_bits` is the number of bits the carrier can hold at all. The
/// declared length is checked against it (and against `bits.len()`) before
/// anything past the header is read. Trailing bits after the frame are
/// ignored.
///
/// # Errors
/// [`StegoError::CorruptPayload`] on a bad header, or if the declared frame
/// is larger than `available_bits` or than the bits supplied.
pub fn unpack_frame(bits: &[u8], available_bits: usize) -> Result<(FrameHeader, Sealed), StegoError> {
    let header = parse_header(bits)?;
    let frame_bits = header.frame_bits();
    if frame_bits > available_bits || frame_bits > bits.len() {
        return Err(StegoError::CorruptPayload);
    }

    let body = bits_to_bytes(&bits[HEADER_BITS..frame_bits]);
    let ct_len = header.ciphertext_len as usize;
    let ciphertext = body[..ct_len].to_vec();
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&body[ct_len..ct_len + TAG_LEN]);

    let sealed = Sealed {
        salt: header.salt,
        nonce: header.nonce,
        ciphertext,
        tag,
    };
    Ok((header, sealed))
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}
