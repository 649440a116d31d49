// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Cryptographic primitives for payload encryption.
//!
//! The working AES-256-GCM-SIV key comes from a single Argon2id derivation
//! that takes both secrets:
//!
//! - **password** as the Argon2 password input (the only human-chosen
//!   secret, hence the memory-hard KDF),
//! - the random **key** as the Argon2 secret (pepper) parameter,
//! - a random per-message **salt** that travels in the frame.
//!
//! Dropping either secret changes the working key, so a wrong password and
//! a wrong key both surface as the same tag mismatch.
//!
//! AES-256-GCM-SIV is used over AES-256-GCM for its nonce-misuse resistance:
//! the nonce is random and a user may reuse a key for several messages.

use aes_gcm_siv::aead::generic_array::GenericArray;
use aes_gcm_siv::aead::AeadInPlace;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;
use crate::stego::key::Key;

/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// Argon2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// AES-GCM-SIV authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Largest plaintext the frame length field can describe.
pub const MAX_PLAINTEXT_LEN: usize = u32::MAX as usize;

/// Argon2id memory cost in KiB (19 MiB, the OWASP baseline).
const KDF_MEMORY_KIB: u32 = 19 * 1024;
/// Argon2id passes.
const KDF_ITERATIONS: u32 = 2;
/// Argon2id lanes.
const KDF_PARALLELISM: u32 = 1;

/// Encrypted message plus everything needed to open it except the secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Argon2 salt for the working-key derivation.
    pub salt: [u8; SALT_LEN],
    /// AES-GCM-SIV nonce.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Detached authentication tag.
    pub tag: [u8; TAG_LEN],
}

/// Derive the AES-256 working key from password + key + salt.
pub fn derive_working_key(
    password: &str,
    key: &Key,
    salt: &[u8; SALT_LEN],
) -> Result<Zeroizing<[u8; 32]>, StegoError> {
    let params = Params::new(KDF_MEMORY_KIB, KDF_ITERATIONS, KDF_PARALLELISM, Some(32))
        .map_err(StegoError::KeyDerivation)?;
    let kdf = Argon2::new_with_secret(key.as_bytes(), Algorithm::Argon2id, Version::V0x13, params)
        .map_err(StegoError::KeyDerivation)?;

    let mut output = Zeroizing::new([0u8; 32]);
    kdf.hash_password_into(password.as_bytes(), salt, &mut *output)
        .map_err(StegoError::KeyDerivation)?;
    Ok(output)
}

/// Encrypt `plaintext` with a fresh random salt and nonce.
///
/// `aad` is authenticated but not encrypted; the frame passes its header
/// bytes here so a tampered length or format tag fails verification.
pub fn seal(plaintext: &[u8], password: &str, key: &Key, aad: &[u8]) -> Result<Sealed, StegoError> {
    let mut rng = rand::thread_rng();

    let mut salt = [0u8; SALT_LEN];
    rng.fill_bytes(&mut salt);

    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    seal_with(plaintext, password, key, aad, &salt, &nonce)
}

/// Encrypt with caller-provided salt and nonce.
///
/// Only deterministic tests should call this directly; reusing a salt/nonce
/// pair under the same secrets leaks plaintext equality.
pub fn seal_with(
    plaintext: &[u8],
    password: &str,
    key: &Key,
    aad: &[u8],
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Sealed, StegoError> {
    let too_long = || StegoError::MessageTooLong {
        size: plaintext.len(),
        limit: MAX_PLAINTEXT_LEN,
    };
    if plaintext.len() > MAX_PLAINTEXT_LEN {
        return Err(too_long());
    }

    let working = derive_working_key(password, key, salt)?;
    let cipher = Aes256GcmSiv::new(GenericArray::from_slice(&working[..]));

    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), aad, &mut ciphertext)
        .map_err(|_| too_long())?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(Sealed {
        salt: *salt,
        nonce: *nonce,
        ciphertext,
        tag: tag_bytes,
    })
}

/// Verify and decrypt.
///
/// Returns [`StegoError::AuthenticationFailure`] if either secret is wrong
/// or any bit of the sealed data or `aad` changed.
pub fn open(sealed: &Sealed, password: &str, key: &Key, aad: &[u8]) -> Result<Vec<u8>, StegoError> {
    let working = derive_working_key(password, key, &sealed.salt)?;
    let cipher = Aes256GcmSiv::new(GenericArray::from_slice(&working[..]));

    let mut plaintext = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&sealed.nonce),
            aad,
            &mut plaintext,
            GenericArray::from_slice(&sealed.tag),
        )
        .map_err(|_| StegoError::AuthenticationFailure)?;
    Ok(plaintext)
}
