//! ─── lf-core ─────────────────────────────────────────────────────────────
//!
//! Plain data types, the canonical wire codec, and the integer PoW cost
//! curve for an LF record. No cryptographic operations live here — hashing,
//! signing, and selector-claim derivation are `lf-crypto`'s concern, applied
//! to the types this crate defines. See `lf-record` for the three-phase
//! assembly pipeline and the ingestion validator that tie the two together.

pub mod body;
pub mod constants;
pub mod cost;
pub mod error;
pub mod record;
pub mod selector;
pub mod types;
pub mod varint;

pub use body::RecordBody;
pub use constants::*;
pub use error::LfError;
pub use record::{work_output_size, Record};
pub use selector::Selector;
pub use types::{CertificateHash, Digest32, OwnerPublicKey, RecordHash, RecordId, Timestamp};
