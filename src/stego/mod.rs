// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Steganographic encoding and decoding.
//!
//! Messages are encrypted with AES-256-GCM-SIV under a key derived by
//! Argon2id from the user's password and a random per-message [`Key`], then
//! written one bit per channel byte into the LSBs of an RGB raster.
//!
//! - [`capacity`]: how many plaintext bytes a raster can carry.
//! - [`crypto`]: key derivation and authenticated encryption.
//! - [`frame`]: the embedded wire format.
//! - [`lsb`]: bit embedding and extraction.
//! - [`encode`] / [`decode`]: the full pipeline.

pub mod capacity;
pub mod crypto;
pub mod error;
pub mod frame;
pub mod key;
pub mod lsb;
mod pipeline;

pub use capacity::{capacity_bytes, message_budget, MessageBudget};
pub use error::StegoError;
pub use key::Key;
pub use pipeline::{decode, encode, Encoded};
