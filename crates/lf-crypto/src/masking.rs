//! Value masking: optional LZW compression followed by AES-256-CFB.
//!
//! The value is authenticated by the owner's signature over the work hash,
//! not by the cipher, so CFB with a derived (non-random) IV is sufficient —
//! uniqueness of (timestamp, owner) under the honest-writer assumption
//! stands in for AEAD or nonce randomness.

use aes::Aes256;
use cfb_mode::cipher::generic_array::GenericArray;
use cfb_mode::cipher::{AsyncStreamCipher, KeyIvInit};
use cfb_mode::{Decryptor, Encryptor};
use weezl::{decode::Decoder, encode::Encoder, BitOrder};

use lf_core::types::{Digest32, Timestamp};
use lf_core::COMPRESSION_MIN_INPUT_LEN;

type Aes256CfbEnc = Encryptor<Aes256>;
type Aes256CfbDec = Decryptor<Aes256>;

const FLAG_RAW: u8 = 0x00;
const FLAG_COMPRESSED: u8 = 0x01;

/// Derives the 16-byte CFB IV from the record's timestamp and owner public
/// bytes: big-endian timestamp in the first 8 bytes, the owner's leading
/// 8 bytes (zero-padded if shorter) in the rest.
fn derive_iv(timestamp: Timestamp, owner_public: &[u8]) -> [u8; 16] {
    let mut iv = [0u8; 16];
    iv[..8].copy_from_slice(&timestamp.to_be_bytes());
    let take = owner_public.len().min(8);
    iv[8..8 + take].copy_from_slice(&owner_public[..take]);
    iv
}

/// Masks `plaintext` into its on-wire `masked_value` bytes: an optional
/// LZW compression pass, a leading flag byte, then AES-256-CFB encryption.
pub fn mask(
    plaintext: &[u8],
    masking_key: &Digest32,
    timestamp: Timestamp,
    owner_public: &[u8],
) -> Vec<u8> {
    let mut payload = Vec::with_capacity(plaintext.len() + 1);

    if let Some(compressed) = try_compress(plaintext) {
        payload.push(FLAG_COMPRESSED);
        payload.extend_from_slice(&compressed);
    } else {
        payload.push(FLAG_RAW);
        payload.extend_from_slice(plaintext);
    }

    let iv = derive_iv(timestamp, owner_public);
    let key = GenericArray::from_slice(masking_key);
    let iv = GenericArray::from_slice(&iv);
    Aes256CfbEnc::new(key, iv).encrypt(&mut payload);
    payload
}

/// Attempts LZW compression, returning `Some` only when the input is long
/// enough that compression could plausibly help and the result actually
/// comes out shorter than the raw flag-plus-payload encoding.
fn try_compress(plaintext: &[u8]) -> Option<Vec<u8>> {
    if plaintext.len() < COMPRESSION_MIN_INPUT_LEN {
        return None;
    }
    let compressed = Encoder::new(BitOrder::Lsb, 8).encode(plaintext).ok()?;
    if compressed.len() + 1 < plaintext.len() {
        Some(compressed)
    } else {
        None
    }
}

/// Reverses `mask`. A decompression failure on a `FLAG_COMPRESSED` payload
/// yields an empty value rather than an error.
pub fn unmask(
    masked_value: &[u8],
    masking_key: &Digest32,
    timestamp: Timestamp,
    owner_public: &[u8],
) -> Vec<u8> {
    if masked_value.is_empty() {
        return Vec::new();
    }

    let iv = derive_iv(timestamp, owner_public);
    let mut payload = masked_value.to_vec();
    let key = GenericArray::from_slice(masking_key);
    let iv = GenericArray::from_slice(&iv);
    Aes256CfbDec::new(key, iv).decrypt(&mut payload);

    let Some((&flag, body)) = payload.split_first() else {
        return Vec::new();
    };

    match flag {
        FLAG_COMPRESSED => Decoder::new(BitOrder::Lsb, 8)
            .decode(body)
            .unwrap_or_default(),
        _ => body.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Digest32 {
        crate::hash::masking_key(b"k")
    }

    #[test]
    fn short_value_skips_compression() {
        let masked = mask(b"hi", &key(), 1_000_000, &[0x01, 0xAA]);
        // Decrypt to inspect the flag byte without going through unmask.
        let iv_bytes = derive_iv(1_000_000, &[0x01, 0xAA]);
        let mut payload = masked.clone();
        let key_bytes = key();
        let key_arr = GenericArray::from_slice(&key_bytes);
        let iv_arr = GenericArray::from_slice(&iv_bytes);
        Aes256CfbDec::new(key_arr, iv_arr).decrypt(&mut payload);
        assert_eq!(payload[0], FLAG_RAW);
    }

    #[test]
    fn large_repeated_value_compresses() {
        let plaintext = vec![b'x'; 10_000];
        let masked = mask(&plaintext, &key(), 1_000_000, &[0x01, 0xAA]);
        assert!(masked.len() < plaintext.len());
    }

    #[test]
    fn round_trips_for_arbitrary_values() {
        for plaintext in [&b""[..], b"hello", b"hi", &vec![b'z'; 10_000]] {
            let masked = mask(plaintext, &key(), 1_000_000, &[0x01, 0xAA, 0xBB]);
            let recovered = unmask(&masked, &key(), 1_000_000, &[0x01, 0xAA, 0xBB]);
            assert_eq!(recovered, plaintext);
        }
    }

    #[test]
    fn wrong_key_does_not_recover_plaintext() {
        let masked = mask(b"hello world", &key(), 1_000_000, &[0x01]);
        let other_key = crate::hash::masking_key(b"not-k");
        let recovered = unmask(&masked, &other_key, 1_000_000, &[0x01]);
        assert_ne!(recovered, b"hello world");
    }

    #[test]
    fn empty_value_round_trips() {
        let masked = mask(b"", &key(), 42, &[]);
        let recovered = unmask(&masked, &key(), 42, &[]);
        assert_eq!(recovered, b"");
    }

    proptest::proptest! {
        #[test]
        fn mask_unmask_round_trips_over_arbitrary_inputs(
            plaintext in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..2000),
            key_material in proptest::collection::vec(proptest::prelude::any::<u8>(), 1..64),
            timestamp in proptest::prelude::any::<u64>(),
            owner in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..40),
        ) {
            let masking_key = crate::hash::masking_key(&key_material);
            let masked = mask(&plaintext, &masking_key, timestamp, &owner);
            let recovered = unmask(&masked, &masking_key, timestamp, &owner);
            proptest::prop_assert_eq!(recovered, plaintext);
        }
    }
}
