//! Owner keys: a polymorphic signing capability over a 32-byte hash.
//!
//! The record core only ever needs two operations on an owner: produce a
//! signature over a 32-byte hash, and check one. The curve choice is left
//! open; this module provides NIST P-224 as a compact default,
//! `P224Owner`, plus a free-function verifier that dispatches on the type
//! tag in `OwnerPublicKey` so a future owner type can be added without
//! touching `lf-core`.

use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use ecdsa::{Signature, SigningKey, VerifyingKey};
use elliptic_curve::sec1::ToEncodedPoint;
use p224::NistP224;
use zeroize::Zeroizing;

use lf_core::constants::OWNER_TYPE_P224;
use lf_core::types::Digest32;
use lf_core::{LfError, OwnerPublicKey};

/// The capability set the record core needs from an owner keypair.
/// Variant discrimination lives in the public-bytes encoding, not in this
/// trait, so assembly code can stay generic over owner type.
pub trait Owner {
    fn public_key(&self) -> OwnerPublicKey;
    fn sign(&self, hash: &Digest32) -> Vec<u8>;
}

/// A NIST P-224 ECDSA owner keypair. The private scalar is held in a
/// zeroizing wrapper and is never exposed outside this module.
pub struct P224Owner {
    signing_key: Zeroizing<SigningKey<NistP224>>,
}

impl P224Owner {
    /// Derives a keypair deterministically from a 32-byte seed, by feeding
    /// the seed through HWORK and reducing the result into a scalar. Used
    /// throughout the test suite and by any caller that wants a
    /// reproducible owner without a CSPRNG.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, LfError> {
        let reduced = crate::hash::hwork(seed);
        Self::from_private_bytes(&reduced)
    }

    /// Constructs an owner from a raw 32-byte scalar, rejecting zero or an
    /// out-of-range value.
    pub fn from_private_bytes(bytes: &Digest32) -> Result<Self, LfError> {
        let signing_key = SigningKey::<NistP224>::from_bytes(&(*bytes).into())
            .map_err(|e| LfError::InvalidParameter(format!("invalid P-224 scalar: {e}")))?;
        Ok(Self {
            signing_key: Zeroizing::new(signing_key),
        })
    }

    /// Generates a fresh keypair from a CSPRNG.
    pub fn generate<R: rand_core::CryptoRngCore>(rng: &mut R) -> Self {
        let signing_key = SigningKey::<NistP224>::random(rng);
        Self {
            signing_key: Zeroizing::new(signing_key),
        }
    }

}

impl Owner for P224Owner {
    /// The stable wire encoding of this owner's public key: the
    /// `OWNER_TYPE_P224` tag followed by the SEC1 compressed point.
    fn public_key(&self) -> OwnerPublicKey {
        let verifying_key = VerifyingKey::from(&*self.signing_key);
        let point = verifying_key.as_affine().to_encoded_point(true);
        let mut bytes = Vec::with_capacity(1 + point.as_bytes().len());
        bytes.push(OWNER_TYPE_P224);
        bytes.extend_from_slice(point.as_bytes());
        OwnerPublicKey::new(bytes)
    }

    /// Signs a precomputed 32-byte hash directly, without re-hashing it —
    /// the hash itself is already HBODY or HWORK output.
    fn sign(&self, hash: &Digest32) -> Vec<u8> {
        let signature: Signature<NistP224> = self
            .signing_key
            .sign_prehash(hash)
            .expect("prehash signing over a fixed-size digest cannot fail");
        signature.to_bytes().to_vec()
    }
}

/// Verifies `signature` over `hash` against `owner_public`, dispatching on
/// the owner's type tag. Returns `false` (never an error) for an unknown
/// tag or malformed key/signature bytes — callers treat every verification
/// failure identically.
pub fn verify_owner_signature(owner_public: &OwnerPublicKey, hash: &Digest32, signature: &[u8]) -> bool {
    match owner_public.type_tag() {
        Some(OWNER_TYPE_P224) => verify_p224(owner_public.as_bytes(), hash, signature),
        _ => false,
    }
}

fn verify_p224(public_bytes: &[u8], hash: &Digest32, signature: &[u8]) -> bool {
    let Some(point_bytes) = public_bytes.get(1..) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::<NistP224>::from_sec1_bytes(point_bytes) else {
        return false;
    };
    let Ok(sig) = Signature::<NistP224>::try_from(signature) else {
        return false;
    };
    verifying_key.verify_prehash(hash, &sig).is_ok()
}
