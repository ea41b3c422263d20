use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::constants::RECORD_MAX_SIZE;
use crate::error::LfError;
use crate::types::{CertificateHash, Digest32, OwnerPublicKey, RecordHash, Timestamp};
use crate::varint::{read_exact, read_u8, read_varuint_bounded, write_varuint};

const FLAG_HAS_CERTIFICATE: u8 = 0b0000_0001;

/// The immutable data payload of a record: masked value, owner public key,
/// an optional certificate back-reference, ancestor links, and a timestamp.
///
/// `RecordBody` owns no cryptographic behavior — hashing and signing are
/// `lf-crypto`'s concern over these plain fields.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordBody {
    pub masked_value: Vec<u8>,
    pub owner_public: OwnerPublicKey,
    pub certificate_hash: Option<CertificateHash>,
    /// Ancestor record hashes. The record core treats these as opaque;
    /// existence is verified by the graph component, not here.
    pub links: Vec<RecordHash>,
    pub timestamp: Timestamp,
}

impl RecordBody {
    /// Serializes this body to its canonical wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let flags = if self.certificate_hash.is_some() {
            FLAG_HAS_CERTIFICATE
        } else {
            0
        };
        buf.push(flags);

        write_varuint(&mut buf, self.masked_value.len() as u64);
        buf.extend_from_slice(&self.masked_value);

        let owner_bytes = self.owner_public.as_bytes();
        write_varuint(&mut buf, owner_bytes.len() as u64);
        buf.extend_from_slice(owner_bytes);

        if let Some(cert) = &self.certificate_hash {
            buf.extend_from_slice(&cert.0);
        }

        write_varuint(&mut buf, self.links.len() as u64);
        for link in &self.links {
            buf.extend_from_slice(link.as_bytes());
        }

        write_varuint(&mut buf, self.timestamp);
        buf
    }

    /// Decodes a body from the front of `cursor`, advancing it past the
    /// consumed bytes. All length-prefixed fields are bounds-checked against
    /// `RECORD_MAX_SIZE` before any allocation.
    pub fn decode(cursor: &mut Cursor<&[u8]>) -> Result<Self, LfError> {
        let flags = read_u8(cursor)?;
        let has_certificate = flags & FLAG_HAS_CERTIFICATE != 0;

        let value_len = read_varuint_bounded(cursor, RECORD_MAX_SIZE as u64)? as usize;
        let masked_value = read_exact(cursor, value_len)?;

        let owner_len = read_varuint_bounded(cursor, RECORD_MAX_SIZE as u64)? as usize;
        let owner_bytes = read_exact(cursor, owner_len)?;
        if owner_bytes.is_empty() {
            return Err(LfError::RecordInvalid("owner public bytes are empty".into()));
        }

        let certificate_hash = if has_certificate {
            let raw = read_exact(cursor, 32)?;
            let mut arr: Digest32 = [0u8; 32];
            arr.copy_from_slice(&raw);
            Some(CertificateHash(arr))
        } else {
            None
        };

        let link_count = read_varuint_bounded(cursor, (RECORD_MAX_SIZE / 32) as u64)? as usize;
        let mut links = Vec::with_capacity(link_count);
        for _ in 0..link_count {
            let raw = read_exact(cursor, 32)?;
            let mut arr: Digest32 = [0u8; 32];
            arr.copy_from_slice(&raw);
            links.push(RecordHash::from_bytes(arr));
        }

        let timestamp = read_varuint_bounded(cursor, u64::MAX)?;

        Ok(Self {
            masked_value,
            owner_public: OwnerPublicKey::new(owner_bytes),
            certificate_hash,
            links,
            timestamp,
        })
    }

    /// Assembles the body-signing-hash preimage given the digest of
    /// `masked_value` under HBODY. The value is hashed through its own
    /// digest, not inlined, so a future
    /// storage optimization may discard the value bytes while still
    /// authenticating the record.
    pub fn signing_preimage(&self, masked_value_digest: Digest32) -> Vec<u8> {
        let mut preimage = Vec::new();
        preimage.extend_from_slice(&masked_value_digest);
        preimage.push(0x00);
        preimage.extend_from_slice(self.owner_public.as_bytes());
        preimage.push(0x00);
        match &self.certificate_hash {
            Some(cert) => preimage.extend_from_slice(&cert.0),
            None => {}
        }
        preimage.push(0x00);
        for link in &self.links {
            preimage.extend_from_slice(link.as_bytes());
        }
        preimage.push(0x00);
        preimage.extend_from_slice(&self.timestamp.to_be_bytes());
        preimage.push(0x00);
        preimage
    }
}
