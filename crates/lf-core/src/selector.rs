use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::constants::RECORD_MAX_SIZE;
use crate::error::LfError;
use crate::varint::{read_exact, read_varuint_bounded, write_varuint};

/// A privacy-preserving record key.
///
/// `Selector` is plain data: the derivation of `key_bytes` from a plaintext
/// name/ordinal pair and the production of `claim_signature` both require
/// signing keys, so that logic lives in `lf-crypto::selector` as free
/// functions over this struct, mirroring how the core carries
/// `OwnerPublicKey` without itself implementing signature checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Selector {
    /// The deterministic index key: an encoding of the derived public key
    /// and the order-preserving ordinal transform. Reveals nothing about
    /// the plaintext name or exact ordinal on its own.
    pub key_bytes: Vec<u8>,
    /// Signature proving the creator knew the plaintext name and bound it
    /// to a specific chained signing hash.
    pub claim_signature: Vec<u8>,
}

impl Selector {
    pub fn new(key_bytes: Vec<u8>, claim_signature: Vec<u8>) -> Self {
        Self {
            key_bytes,
            claim_signature,
        }
    }

    /// The deterministic index key used for lookup and for the record id.
    pub fn key(&self) -> &[u8] {
        &self.key_bytes
    }

    /// Canonical wire bytes of this selector, including its claim
    /// signature. Self-delimiting so a sequence of selectors can be decoded
    /// back-to-back with no outer length table.
    pub fn bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varuint(&mut buf, self.key_bytes.len() as u64);
        buf.extend_from_slice(&self.key_bytes);
        write_varuint(&mut buf, self.claim_signature.len() as u64);
        buf.extend_from_slice(&self.claim_signature);
        buf
    }

    pub fn decode(cursor: &mut Cursor<&[u8]>) -> Result<Self, LfError> {
        let key_len = read_varuint_bounded(cursor, RECORD_MAX_SIZE as u64)? as usize;
        let key_bytes = read_exact(cursor, key_len)?;
        let sig_len = read_varuint_bounded(cursor, RECORD_MAX_SIZE as u64)? as usize;
        let claim_signature = read_exact(cursor, sig_len)?;
        Ok(Self {
            key_bytes,
            claim_signature,
        })
    }
}
