// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! # snapsteg-core
//!
//! Pure-Rust engine for hiding encrypted text messages in lossless RGB
//! images (PNG, BMP, TIFF) by LSB embedding.
//!
//! Every encode produces a fresh random key. Decoding needs both that key
//! and the password: the two are combined by Argon2id into the AES-256-GCM-SIV
//! key, and a wrong value for either fails the same authentication check.
//!
//! Image decoding/encoding is delegated to the `image` crate ([`raster::io`]).
//! The engine itself works on an in-memory [`Raster`] and never mutates the
//! caller's copy.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use snapsteg_core::{encode, decode, Raster, SaveOptions};
//!
//! let cover = Raster::load("photo.png")?;
//! let out = encode(&cover, "secret message", "passphrase")?;
//! out.raster.save("photo_steg.png", SaveOptions::default())?;
//! println!("key: {}", out.key);
//!
//! let stego = Raster::load("photo_steg.png")?;
//! let message = decode(&stego, "passphrase", &out.key)?;
//! assert_eq!(message, "secret message");
//! ```

pub mod raster;
pub mod stego;

pub use raster::error::RasterError;
pub use raster::io::SaveOptions;
pub use raster::Raster;
pub use stego::{capacity_bytes, decode, encode, message_budget, Encoded, Key, MessageBudget, StegoError};
