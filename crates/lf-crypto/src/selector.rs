//! Selector claims: deterministic name-derived keypairs with a signature
//! proving the creator knew the plaintext name.
//!
//! A selector's key bytes embed the Ed25519 public key derived from its
//! plaintext name, so `verify_claim` can check the claim signature against
//! nothing but the selector itself and the chained hash it was bound to —
//! no plaintext name is needed at ingestion time. Looking a selector up
//! *by* name, which does need the name, is the separate `matches_name`
//! helper the index layer calls once it already has a name in hand.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use lf_core::types::Digest32;
use lf_core::Selector;

const CLAIM_DOMAIN: &[u8] = b"lf-selector-v1";
const ORDINAL_DOMAIN: &[u8] = b"lf-selector-ordinal-v1";

/// Derives the deterministic Ed25519 signing key for a plaintext selector
/// name. Two callers who pass the same `name` always derive the same key,
/// without needing to exchange one.
fn claim_signing_key(name: &[u8]) -> SigningKey {
    let mut preimage = Vec::with_capacity(CLAIM_DOMAIN.len() + name.len());
    preimage.extend_from_slice(CLAIM_DOMAIN);
    preimage.extend_from_slice(name);
    let seed: Digest32 = crate::hash::hwork(&preimage);
    SigningKey::from_bytes(&seed)
}

/// Encodes `ordinal` so that key bytes sort in the same order as the
/// ordinal itself, without revealing the ordinal's magnitude to an
/// observer who doesn't know `name`: `ordinal` is added, in a widened
/// 128-bit field with no modular wraparound, to a per-name offset derived
/// from `name`. Adding the same offset to two ordinals preserves their
/// relative order exactly; XOR or truncated modular addition would not,
/// since both can wrap the comparison around a byte or field boundary.
fn encode_ordinal(name: &[u8], ordinal: u64) -> [u8; 16] {
    let mut preimage = Vec::with_capacity(ORDINAL_DOMAIN.len() + name.len());
    preimage.extend_from_slice(ORDINAL_DOMAIN);
    preimage.extend_from_slice(name);
    let keystream = crate::hash::hwork(&preimage);

    let mut offset_bytes = [0u8; 8];
    offset_bytes.copy_from_slice(&keystream[..8]);
    let offset = u64::from_be_bytes(offset_bytes);

    let widened = ordinal as u128 + offset as u128;
    widened.to_be_bytes()
}

/// Produces a selector claiming `name` at `ordinal`, bound to `chained_hash`
/// so the claim cannot be replayed against a different record body or a
/// different position in the selector chain. The caller passes
/// `body_signing_hash` itself for the first selector and the running
/// `HWORK(hash_i ∥ selectors[i].bytes())` chain for every subsequent one.
pub fn claim(name: &[u8], ordinal: u64, chained_hash: &Digest32) -> Selector {
    let signing_key = claim_signing_key(name);
    let verifying_key = signing_key.verifying_key();

    let ordinal_bytes = encode_ordinal(name, ordinal);
    let mut key_bytes = Vec::with_capacity(32 + 16);
    key_bytes.extend_from_slice(verifying_key.as_bytes());
    key_bytes.extend_from_slice(&ordinal_bytes);

    let mut preimage = Vec::with_capacity(key_bytes.len() + 32);
    preimage.extend_from_slice(&key_bytes);
    preimage.extend_from_slice(chained_hash);
    let claim_signature = signing_key.sign(&preimage).to_bytes().to_vec();

    Selector::new(key_bytes, claim_signature)
}

/// Verifies the embedded claim signature against `chained_hash`. This is
/// the check the ingestion validator runs on every selector in order — it
/// needs only the selector and the hash it should have been bound to,
/// never the plaintext name. Returns `false` on any malformed input.
pub fn verify_claim(selector: &Selector, chained_hash: &Digest32) -> bool {
    let key_bytes = selector.key();
    if key_bytes.len() < 32 {
        return false;
    }
    let Ok(public_key_bytes): Result<[u8; 32], _> = key_bytes[..32].try_into() else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key_bytes) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(selector.claim_signature.as_slice()) else {
        return false;
    };

    let mut preimage = Vec::with_capacity(key_bytes.len() + 32);
    preimage.extend_from_slice(key_bytes);
    preimage.extend_from_slice(chained_hash);
    verifying_key.verify(&preimage, &signature).is_ok()
}

/// Checks that `selector` was claimed under `name` — direct equality
/// lookup by name, used by an index that already holds the plaintext name
/// and wants to confirm a candidate selector matches it.
pub fn matches_name(selector: &Selector, name: &[u8]) -> bool {
    let expected = claim_signing_key(name).verifying_key();
    let key_bytes = selector.key();
    key_bytes.len() >= 32 && key_bytes[..32] == *expected.as_bytes()
}

/// Checks that `selector`'s key bytes recover to exactly `ordinal` for
/// `name` — used once a caller already knows the plaintext name and wants
/// to confirm the ordinal, e.g. for a range query over a known name.
pub fn ordinal_matches(selector: &Selector, name: &[u8], ordinal: u64) -> bool {
    let key_bytes = selector.key();
    if key_bytes.len() < 48 {
        return false;
    }
    key_bytes[32..48] == encode_ordinal(name, ordinal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_round_trips() {
        let body_hash = [7u8; 32];
        let selector = claim(b"example.name", 42, &body_hash);
        assert!(verify_claim(&selector, &body_hash));
        assert!(matches_name(&selector, b"example.name"));
    }

    #[test]
    fn wrong_name_does_not_match() {
        let body_hash = [7u8; 32];
        let selector = claim(b"example.name", 42, &body_hash);
        assert!(!matches_name(&selector, b"different.name"));
    }

    #[test]
    fn wrong_chained_hash_fails_verification() {
        let body_hash = [7u8; 32];
        let other_hash = [8u8; 32];
        let selector = claim(b"example.name", 42, &body_hash);
        assert!(!verify_claim(&selector, &other_hash));
    }

    #[test]
    fn same_name_same_key_across_claims() {
        let s1 = claim(b"stable", 1, &[1u8; 32]);
        let s2 = claim(b"stable", 1, &[2u8; 32]);
        assert_eq!(s1.key()[..32], s2.key()[..32]);
    }

    #[test]
    fn ordinal_ordering_is_preserved() {
        let name = b"ordered";
        let low = encode_ordinal(name, 10);
        let high = encode_ordinal(name, 20);
        assert!(low < high);
    }

    #[test]
    fn ordinal_matches_recovers_original_ordinal() {
        let body_hash = [3u8; 32];
        let selector = claim(b"n", 99, &body_hash);
        assert!(ordinal_matches(&selector, b"n", 99));
        assert!(!ordinal_matches(&selector, b"n", 100));
    }

    #[test]
    fn tampered_claim_signature_fails_verification() {
        let body_hash = [4u8; 32];
        let mut selector = claim(b"n", 1, &body_hash);
        selector.claim_signature[0] ^= 0xFF;
        assert!(!verify_claim(&selector, &body_hash));
    }
}
