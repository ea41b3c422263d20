//! Domain-separated hash families.
//!
//! HBODY is used for the body signing hash, the record hash, and the
//! record id. A network may substitute any 256-bit cryptographic hash
//! here, provided it is used consistently everywhere HBODY appears and
//! the substitution is documented (see `DESIGN.md`) — this workspace uses
//! BLAKE3 rather than a bespoke composite construction, since no
//! wire-compatibility target was available to pin one down bit-for-bit.
//!
//! HWORK is SHA3-256 with no discretion: any implementation that wants
//! interop with another network MUST use SHA3-256 here.

use lf_core::record::Record;
use lf_core::selector::Selector;
use lf_core::types::{Digest32, RecordHash, RecordId};
use lf_core::RecordBody;
use sha3::{Digest, Sha3_256};

/// HBODY(data) — collision-resistant, domain-separated from HWORK.
pub fn hbody(data: &[u8]) -> Digest32 {
    *blake3::hash(data).as_bytes()
}

/// HWORK(data) — SHA3-256, fixed network-wide with no substitution allowed.
pub fn hwork(data: &[u8]) -> Digest32 {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derives the AES-256 masking key from a caller-supplied masking key.
/// SHA-256 is used here rather than HBODY, since this derivation is fixed
/// network-wide independent of whichever hash HBODY has been substituted
/// with.
pub fn masking_key(caller_key: &[u8]) -> Digest32 {
    use sha2::Sha256;
    let mut hasher = Sha256::new();
    hasher.update(caller_key);
    hasher.finalize().into()
}

/// The body signing hash: HBODY of the concatenation
/// HBODY(masked_value) ∥ 0 ∥ owner ∥ 0 ∥ cert ∥ 0 ∥ links ∥ 0 ∥
/// timestamp_be ∥ 0.
pub fn body_signing_hash(body: &RecordBody) -> Digest32 {
    let masked_value_digest = hbody(&body.masked_value);
    let preimage = body.signing_preimage(masked_value_digest);
    hbody(&preimage)
}

/// Advances the selector claim-hash chain: `HWORK(hash ∥ selector.bytes())`.
/// The first selector is claimed and verified against `body_signing_hash`
/// itself rather than the output of this function.
pub fn advance_claim_chain(hash: Digest32, selector: &Selector) -> Digest32 {
    let mut preimage = Vec::with_capacity(32 + selector.bytes().len());
    preimage.extend_from_slice(&hash);
    preimage.extend_from_slice(&selector.bytes());
    hwork(&preimage)
}

/// HWORK over the body signing hash followed by every selector's encoded
/// bytes in order — the PoW target hash for Phase 1 of record assembly.
pub fn work_hash(body_signing_hash: Digest32, selectors: &[Selector]) -> Digest32 {
    let mut preimage = Vec::new();
    preimage.extend_from_slice(&body_signing_hash);
    for selector in selectors {
        preimage.extend_from_slice(&selector.bytes());
    }
    hwork(&preimage)
}

/// The sign-target hash the owner signs in Phase 3:
/// HWORK(work_hash ∥ work ∥ [algorithm_byte]).
pub fn sign_target_hash(work_hash: Digest32, work: &[u8], algorithm: u8) -> Digest32 {
    let mut preimage = Vec::with_capacity(32 + work.len() + 1);
    preimage.extend_from_slice(&work_hash);
    preimage.extend_from_slice(work);
    preimage.push(algorithm);
    hwork(&preimage)
}

/// The record hash: HBODY of the record's canonical bytes. Identifies a
/// record globally.
pub fn record_hash(canonical_bytes: &[u8]) -> RecordHash {
    RecordHash::from_bytes(hbody(canonical_bytes))
}

/// The record id: HBODY over the record's selector keys, sorted ascending.
/// Falls back to the record hash when there are no selectors — an
/// intentional collision accepted at that edge case rather than engineered
/// around.
pub fn record_id(record: &Record, hash: &RecordHash) -> RecordId {
    if record.selectors.is_empty() {
        return RecordId::from_record_hash(hash);
    }
    let mut keys: Vec<&[u8]> = record.selectors.iter().map(|s| s.key()).collect();
    keys.sort_unstable();
    let mut preimage = Vec::new();
    for key in keys {
        preimage.extend_from_slice(key);
    }
    RecordId::from_bytes(hbody(&preimage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hbody_is_deterministic() {
        assert_eq!(hbody(b"hello"), hbody(b"hello"));
        assert_ne!(hbody(b"hello"), hbody(b"hellp"));
    }

    #[test]
    fn hwork_is_sha3_256() {
        // SHA3-256("") — NIST test vector.
        let expected =
            hex::decode("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434")
                .unwrap();
        assert_eq!(hwork(b"").to_vec(), expected);
    }

    #[test]
    fn masking_key_is_sha256() {
        // SHA-256("abc") — NIST test vector.
        let expected =
            hex::decode("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015a")
                .unwrap();
        assert_eq!(masking_key(b"abc").to_vec(), expected);
    }

    fn sample_record(selectors: Vec<Selector>) -> Record {
        use lf_core::types::OwnerPublicKey;
        Record {
            body: RecordBody {
                masked_value: vec![1, 2, 3],
                owner_public: OwnerPublicKey::new(vec![0x01, 0xAA]),
                certificate_hash: None,
                links: vec![],
                timestamp: 42,
            },
            selectors,
            work_algorithm: 0,
            work: vec![],
            signature: vec![9, 9, 9],
        }
    }

    /// Two records with identical selector key sets must have the same id
    /// regardless of selector order at creation. The two records below
    /// differ in selector order (and therefore in canonical bytes and
    /// record hash) but carry the same key set.
    #[test]
    fn record_id_is_independent_of_selector_order() {
        let a = Selector::new(vec![1, 2, 3], vec![9]);
        let b = Selector::new(vec![4, 5, 6], vec![8]);

        let forward = sample_record(vec![a.clone(), b.clone()]);
        let reversed = sample_record(vec![b, a]);

        let forward_hash = record_hash(&forward.encode());
        let reversed_hash = record_hash(&reversed.encode());
        assert_ne!(forward_hash.as_bytes(), reversed_hash.as_bytes());

        let forward_id = record_id(&forward, &forward_hash);
        let reversed_id = record_id(&reversed, &reversed_hash);
        assert_eq!(forward_id.as_bytes(), reversed_id.as_bytes());
    }

    #[test]
    fn record_id_falls_back_to_record_hash_with_no_selectors() {
        let record = sample_record(vec![]);
        let hash = record_hash(&record.encode());
        let id = record_id(&record, &hash);
        assert_eq!(id.as_bytes(), hash.as_bytes());
    }
}
