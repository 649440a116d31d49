// Copyright (C) 2025 argeincharge
// SPDX-License-Identifier: GPL-3.0-only

//! Round-trip integration tests for encode/decode.

use snapsteg_core::stego::frame::{FRAME_OVERHEAD, HEADER_LEN};
use snapsteg_core::{capacity_bytes, decode, encode, Key, Raster, StegoError};

/// Deterministic pseudo-photo so LSBs start out mixed.
fn cover(width: u32, height: u32) -> Raster {
    let mut state = 0x2545_F491u32;
    let pixels = (0..width as usize * height as usize * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    Raster::new(width, height, pixels).unwrap()
}

#[test]
fn roundtrip_basic() {
    let raster = cover(64, 48);
    let out = encode(&raster, "Hello, steganography!", "test-passphrase-123").unwrap();
    let decoded = decode(&out.raster, "test-passphrase-123", &out.key).unwrap();
    assert_eq!(decoded, "Hello, steganography!");
}

#[test]
fn roundtrip_various_lengths() {
    let raster = cover(40, 40);
    let cap = capacity_bytes(&raster).unwrap();
    for len in [1, 10, 50, 100, cap] {
        let message: String = (0..len).map(|i| (b'A' + (i % 26) as u8) as char).collect();
        let out = encode(&raster, &message, "multi-test").unwrap();
        let decoded = decode(&out.raster, "multi-test", &out.key).unwrap();
        assert_eq!(decoded, message, "failed for message length {len}");
    }
}

#[test]
fn roundtrip_unicode() {
    let raster = cover(32, 32);
    let message = "Héllo wörld! 日本語テスト 🔐";
    let out = encode(&raster, message, "unicode-key").unwrap();
    assert_eq!(decode(&out.raster, "unicode-key", &out.key).unwrap(), message);
}

#[test]
fn roundtrip_empty_password() {
    // The key alone still protects the message.
    let raster = cover(32, 32);
    let out = encode(&raster, "no password", "").unwrap();
    assert_eq!(decode(&out.raster, "", &out.key).unwrap(), "no password");
}

#[test]
fn exact_capacity_boundary() {
    // 20x20: 1200 bits -> 150 bytes -> 101 bytes of plaintext.
    let raster = cover(20, 20);
    assert_eq!(capacity_bytes(&raster).unwrap(), 101);

    let fits = "m".repeat(101);
    let out = encode(&raster, &fits, "pw").unwrap();
    assert_eq!(decode(&out.raster, "pw", &out.key).unwrap(), fits);

    match encode(&raster, &"m".repeat(102), "pw") {
        Err(StegoError::MessageTooLong { size: 102, limit: 101 }) => {}
        other => panic!("expected MessageTooLong, got {other:?}"),
    }
}

#[test]
fn multibyte_characters_count_as_bytes() {
    // 101-byte budget: 50 two-byte chars fit (100), 51 do not (102).
    let raster = cover(20, 20);
    assert!(encode(&raster, &"é".repeat(50), "pw").is_ok());
    assert!(matches!(
        encode(&raster, &"é".repeat(51), "pw"),
        Err(StegoError::MessageTooLong { size: 102, limit: 101 })
    ));
}

#[test]
fn ten_by_ten_black_has_no_room() {
    // 300 bits -> 37 bytes, below the 49-byte frame overhead.
    let raster = Raster::filled(10, 10, [0, 0, 0]).unwrap();
    assert_eq!(capacity_bytes(&raster).unwrap(), 0);
    match encode(&raster, "x", "pw") {
        Err(StegoError::MessageTooLong { size: 1, limit: 0 }) => {}
        other => panic!("expected MessageTooLong, got {other:?}"),
    }
}

#[test]
fn wrong_password_fails() {
    let raster = cover(32, 32);
    let out = encode(&raster, "secret msg", "correct-pass").unwrap();
    assert!(matches!(
        decode(&out.raster, "wrong-pass", &out.key),
        Err(StegoError::AuthenticationFailure)
    ));
}

#[test]
fn wrong_key_fails() {
    let raster = cover(32, 32);
    let out = encode(&raster, "secret msg", "pass").unwrap();
    let other_key = Key::generate().to_text();
    assert!(matches!(
        decode(&out.raster, "pass", &other_key),
        Err(StegoError::AuthenticationFailure)
    ));
}

#[test]
fn both_wrong_fails_the_same_way() {
    let raster = cover(32, 32);
    let out = encode(&raster, "secret msg", "pass").unwrap();
    let other_key = Key::generate().to_text();
    assert!(matches!(
        decode(&out.raster, "nope", &other_key),
        Err(StegoError::AuthenticationFailure)
    ));
}

#[test]
fn malformed_key_text() {
    let raster = cover(32, 32);
    let out = encode(&raster, "secret msg", "pass").unwrap();
    let truncated = &out.key[..out.key.len() - 4];
    assert!(matches!(
        decode(&out.raster, "pass", truncated),
        Err(StegoError::InvalidKeyFormat)
    ));
}

#[test]
fn key_with_surrounding_whitespace_accepted() {
    let raster = cover(32, 32);
    let out = encode(&raster, "pasted", "pass").unwrap();
    let pasted = format!("\t{}  \n", out.key);
    assert_eq!(decode(&out.raster, "pass", &pasted).unwrap(), "pasted");
}

#[test]
fn bit_locality() {
    let raster = cover(30, 30);
    let message = "only the frame prefix may change";
    let out = encode(&raster, message, "pw").unwrap();
    let frame_bits = (FRAME_OVERHEAD + message.len()) * 8;

    assert_eq!(out.raster.width(), raster.width());
    assert_eq!(out.raster.height(), raster.height());
    for (i, (&before, &after)) in raster.pixels().iter().zip(out.raster.pixels()).enumerate() {
        if i < frame_bits {
            assert_eq!(before & 0xFE, after & 0xFE, "upper bits changed at byte {i}");
        } else {
            assert_eq!(before, after, "byte {i} outside the frame changed");
        }
    }
}

#[test]
fn original_raster_untouched() {
    let raster = cover(30, 30);
    let snapshot = raster.clone();
    let _ = encode(&raster, "hello", "pw").unwrap();
    assert_eq!(raster, snapshot);
}

#[test]
fn flipped_tag_bit_is_authentication_failure() {
    let raster = cover(30, 30);
    let message = "integrity";
    let out = encode(&raster, message, "pw").unwrap();

    let tag_start_bit = (HEADER_LEN + message.len()) * 8;
    for offset in [0, 7, 64, 127] {
        let mut pixels = out.raster.clone().into_pixels();
        pixels[tag_start_bit + offset] ^= 1;
        let tampered = Raster::new(raster.width(), raster.height(), pixels).unwrap();
        assert!(
            matches!(decode(&tampered, "pw", &out.key), Err(StegoError::AuthenticationFailure)),
            "tag bit {offset} flip not detected"
        );
    }
}

#[test]
fn flipped_body_or_nonce_bit_is_authentication_failure() {
    let raster = cover(30, 30);
    let message = "integrity";
    let out = encode(&raster, message, "pw").unwrap();

    // First salt bit, first nonce bit, first ciphertext bit.
    for bit in [5 * 8, 21 * 8, HEADER_LEN * 8] {
        let mut pixels = out.raster.clone().into_pixels();
        pixels[bit] ^= 1;
        let tampered = Raster::new(raster.width(), raster.height(), pixels).unwrap();
        assert!(matches!(
            decode(&tampered, "pw", &out.key),
            Err(StegoError::AuthenticationFailure)
        ));
    }
}

#[test]
fn inflated_length_field_is_corrupt_payload() {
    let raster = cover(30, 30);
    let out = encode(&raster, "short", "pw").unwrap();

    // Set the top bit of the length field: ~2 GiB declared.
    let mut pixels = out.raster.clone().into_pixels();
    pixels[8] |= 1;
    let tampered = Raster::new(raster.width(), raster.height(), pixels).unwrap();
    assert!(matches!(
        decode(&tampered, "pw", &out.key),
        Err(StegoError::CorruptPayload)
    ));
}

#[test]
fn shifted_length_within_capacity_is_authentication_failure() {
    // A length that still fits the raster is caught by the AEAD, since the
    // length bytes are associated data.
    let raster = cover(30, 30);
    let out = encode(&raster, "short", "pw").unwrap();

    let mut pixels = out.raster.clone().into_pixels();
    // Lowest length bit: 5 -> 4.
    pixels[39] ^= 1;
    let tampered = Raster::new(raster.width(), raster.height(), pixels).unwrap();
    assert!(matches!(
        decode(&tampered, "pw", &out.key),
        Err(StegoError::AuthenticationFailure)
    ));
}

#[test]
fn corrupted_format_tag_is_corrupt_payload() {
    let raster = cover(30, 30);
    let out = encode(&raster, "short", "pw").unwrap();
    let mut pixels = out.raster.clone().into_pixels();
    pixels[7] ^= 1; // 0x01 -> 0x00
    let tampered = Raster::new(raster.width(), raster.height(), pixels).unwrap();
    assert!(matches!(
        decode(&tampered, "pw", &out.key),
        Err(StegoError::CorruptPayload)
    ));
}

#[test]
fn successive_encodes_use_fresh_randomness() {
    let raster = cover(32, 32);
    let a = encode(&raster, "same message", "same pass").unwrap();
    let b = encode(&raster, "same message", "same pass").unwrap();

    assert_ne!(a.key, b.key);
    assert_ne!(a.raster, b.raster);

    assert_eq!(decode(&a.raster, "same pass", &a.key).unwrap(), "same message");
    assert_eq!(decode(&b.raster, "same pass", &b.key).unwrap(), "same message");

    // Keys are not interchangeable.
    assert!(matches!(
        decode(&a.raster, "same pass", &b.key),
        Err(StegoError::AuthenticationFailure)
    ));
}

#[test]
fn reencode_over_stego_image() {
    // The UI encodes onto its working copy; a second message replaces the first.
    let raster = cover(32, 32);
    let first = encode(&raster, "first message that is longer", "pw").unwrap();
    let second = encode(&first.raster, "second", "pw").unwrap();
    assert_eq!(decode(&second.raster, "pw", &second.key).unwrap(), "second");
    assert!(decode(&second.raster, "pw", &first.key).is_err());
}

#[test]
fn operations_run_off_the_main_thread() {
    let raster = cover(32, 32);
    let handle = std::thread::spawn(move || {
        let out = encode(&raster, "background", "pw").unwrap();
        decode(&out.raster, "pw", &out.key).unwrap()
    });
    assert_eq!(handle.join().unwrap(), "background");
}
