//! ─── lf-crypto ──────────────────────────────────────────────────────────
//!
//! Hashing, owner keys, selector claims, value masking, and proof of work —
//! every cryptographic operation the record core needs, expressed as free
//! functions and small traits over the plain data types `lf-core` defines.
//! Nothing here holds a `Record` or drives the assembly/validation
//! pipeline; that belongs to `lf-record`.

pub mod hash;
pub mod masking;
pub mod owner;
pub mod pow;
pub mod selector;

pub use hash::{
    advance_claim_chain, body_signing_hash, hbody, hwork, masking_key, record_hash, record_id,
    sign_target_hash, work_hash,
};
pub use owner::{verify_owner_signature, Owner, P224Owner};
pub use pow::{new_cancellation_token, CancellationToken, NoPow, PowAlgorithm, Wharrgarbl};
