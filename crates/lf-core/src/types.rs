use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds since the Unix epoch. Interpretation as revision ordering is
/// external to the record core.
pub type Timestamp = u64;

/// A 32-byte domain hash — the output of either HBODY or HWORK.
/// Distinct instances of this type are not tagged by which hash family
/// produced them; callers are expected to keep that straight by context.
pub type Digest32 = [u8; 32];

// ── RecordHash ─────────────────────────────────────────────────────────────

/// The 32-byte domain hash of a record's canonical bytes. Identifies a
/// record globally.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordHash(pub Digest32);

impl RecordHash {
    pub fn from_bytes(b: Digest32) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &Digest32 {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes[..32]);
        Ok(Self(arr))
    }
}

impl fmt::Display for RecordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for RecordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordHash({}…)", &self.to_hex()[..16])
    }
}

// ── RecordId ───────────────────────────────────────────────────────────────

/// The 32-byte domain hash over a record's selector database keys, sorted
/// ascending. Falls back to the record hash when a record has no selectors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub Digest32);

impl RecordId {
    pub fn from_bytes(b: Digest32) -> Self {
        Self(b)
    }

    pub fn as_bytes(&self) -> &Digest32 {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// An id derived directly from a record hash — the empty-selector-list
    /// fallback path.
    pub fn from_record_hash(hash: &RecordHash) -> Self {
        Self(hash.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({}…)", &self.to_hex()[..16])
    }
}

// ── OwnerPublicKey ────────────────────────────────────────────────────────

/// Stable wire encoding of an owner's public key: a one-byte type tag
/// (`lf_core::constants::OWNER_TYPE_*`) followed by the curve-specific
/// encoded point. Variant discrimination lives here, not in the `Record`
/// struct.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerPublicKey(pub Vec<u8>);

impl OwnerPublicKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The leading type-tag byte, if present.
    pub fn type_tag(&self) -> Option<u8> {
        self.0.first().copied()
    }
}

impl fmt::Debug for OwnerPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerPublicKey({}b, tag={:?})", self.0.len(), self.type_tag())
    }
}

// ── CertificateHash ───────────────────────────────────────────────────────

/// Opaque back-reference to another record by hash. The record core never
/// resolves this; it is the graph component's concern.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateHash(pub Digest32);

impl fmt::Debug for CertificateHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CertificateHash({}…)", &hex::encode(self.0)[..16])
    }
}
