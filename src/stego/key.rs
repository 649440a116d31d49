// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! The random per-message key.
//!
//! Every encode draws a fresh 32-byte key. The user gets it back as
//! URL-safe base64 text (44 characters including padding) and must supply
//! it verbatim, together with the password, to decode. The key is never
//! stored in the image and cannot be derived from the password.

use core::fmt;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the printable key text.
pub const KEY_TEXT_LEN: usize = 44;

/// A random message key.
#[derive(Clone, PartialEq, Eq)]
pub struct Key(Zeroizing<[u8; KEY_LEN]>);

impl Key {
    /// Draw a fresh key from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        rand::thread_rng().fill_bytes(&mut *bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parse key text as produced by [`Key::to_text`].
    ///
    /// Surrounding whitespace is ignored (keys are usually pasted).
    ///
    /// # Errors
    /// [`StegoError::InvalidKeyFormat`] if the text is not base64 or does
    /// not decode to exactly [`KEY_LEN`] bytes.
    pub fn parse(text: &str) -> Result<Self, StegoError> {
        let text = text.trim();
        if text.len() != KEY_TEXT_LEN {
            return Err(StegoError::InvalidKeyFormat);
        }
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(text)
                .map_err(|_| StegoError::InvalidKeyFormat)?,
        );
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        if decoded.len() != KEY_LEN {
            return Err(StegoError::InvalidKeyFormat);
        }
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Printable form handed to the user.
    pub fn to_text(&self) -> String {
        URL_SAFE.encode(&*self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}
