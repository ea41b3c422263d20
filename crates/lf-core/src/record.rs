use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::body::RecordBody;
use crate::constants::{RECORD_MAX_SIZE, RECORD_VERSION, TOMBSTONE_SENTINEL, WHARRGARBL_OUTPUT_SIZE};
use crate::error::LfError;
use crate::selector::Selector;
use crate::varint::{read_exact, read_u8, read_varuint_bounded, write_varuint};

/// Fixed output size, in bytes, for a given work algorithm identifier.
/// `None` for an unrecognized algorithm — such records are rejected.
pub fn work_output_size(algorithm: u8) -> Option<usize> {
    match algorithm {
        crate::constants::WORK_ALGORITHM_NONE => Some(0),
        crate::constants::WORK_ALGORITHM_WHARRGARBL => Some(WHARRGARBL_OUTPUT_SIZE),
        _ => None,
    }
}

/// A fully assembled, self-authenticating record. Immutable once
/// constructed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Record {
    pub body: RecordBody,
    pub selectors: Vec<Selector>,
    pub work_algorithm: u8,
    pub work: Vec<u8>,
    pub signature: Vec<u8>,
}

impl Record {
    /// Serializes this record to its canonical wire bytes. Callers MUST
    /// check the result against `RECORD_MAX_SIZE` before persisting or
    /// transmitting it — this method does not reject an oversize record
    /// itself, since assembly already enforces the bound before a
    /// signature is attached.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(RECORD_VERSION);
        buf.extend_from_slice(&self.body.encode());

        write_varuint(&mut buf, self.selectors.len() as u64);
        for selector in &self.selectors {
            buf.extend_from_slice(&selector.bytes());
        }

        buf.push(self.work_algorithm);
        buf.extend_from_slice(&self.work);

        write_varuint(&mut buf, self.signature.len() as u64);
        buf.extend_from_slice(&self.signature);
        buf
    }

    /// Decodes a record from `raw`, rejecting malformed framing, an
    /// oversize buffer, an unsupported algorithm, or an unknown version
    /// byte. A tombstoned slot yields `LfError::RecordMarkedIgnore` instead
    /// of a record.
    pub fn decode(raw: &[u8]) -> Result<Self, LfError> {
        if raw.len() > RECORD_MAX_SIZE {
            return Err(LfError::RecordTooLarge {
                max: RECORD_MAX_SIZE,
                got: raw.len(),
            });
        }
        if raw.is_empty() {
            return Err(LfError::RecordInvalid("empty input".into()));
        }

        if raw[0] == TOMBSTONE_SENTINEL {
            if raw.len() < 5 {
                return Err(LfError::RecordInvalid("truncated tombstone header".into()));
            }
            let len_bytes: [u8; 4] = raw[1..5].try_into().expect("checked length");
            let total_len = u32::from_be_bytes(len_bytes) as usize;
            if total_len < 5 {
                return Err(LfError::RecordInvalid("tombstone length underflows header".into()));
            }
            if total_len > raw.len() {
                return Err(LfError::RecordInvalid("tombstone length exceeds input".into()));
            }
            return Err(LfError::RecordMarkedIgnore { skip: total_len });
        }

        if raw[0] != RECORD_VERSION {
            return Err(LfError::RecordInvalid(format!(
                "unsupported version byte {:#04x}",
                raw[0]
            )));
        }

        let mut cursor = Cursor::new(raw);
        cursor.set_position(1);

        let body = RecordBody::decode(&mut cursor)?;

        let selector_count = read_varuint_bounded(&mut cursor, RECORD_MAX_SIZE as u64)? as usize;
        let mut selectors = Vec::with_capacity(selector_count);
        for _ in 0..selector_count {
            selectors.push(Selector::decode(&mut cursor)?);
        }

        let work_algorithm = read_u8(&mut cursor)?;
        let work_len = work_output_size(work_algorithm)
            .ok_or(LfError::RecordUnsupportedAlgorithm(work_algorithm))?;
        let work = read_exact(&mut cursor, work_len)?;

        let sig_len = read_varuint_bounded(&mut cursor, RECORD_MAX_SIZE as u64)? as usize;
        let signature = read_exact(&mut cursor, sig_len)?;

        if cursor.position() as usize != raw.len() {
            return Err(LfError::RecordInvalid(
                "trailing bytes after record (inconsistent length fields)".into(),
            ));
        }

        Ok(Self {
            body,
            selectors,
            work_algorithm,
            work,
            signature,
        })
    }

    /// Billable bytes: body size plus the size of every selector, the
    /// quantity the PoW cost curve is computed over.
    pub fn billable_bytes(&self) -> u64 {
        let body_size = self.body.encode().len() as u64;
        let selector_size: u64 = self.selectors.iter().map(|s| s.bytes().len() as u64).sum();
        body_size + selector_size
    }

    /// The ranking score for this record.
    pub fn score(&self) -> u32 {
        crate::cost::score(crate::cost::cost(self.billable_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OwnerPublicKey, RecordHash};

    fn sample_body() -> RecordBody {
        RecordBody {
            masked_value: vec![1, 2, 3, 4],
            owner_public: OwnerPublicKey::new(vec![0x01, 0xAA, 0xBB]),
            certificate_hash: None,
            links: vec![RecordHash::from_bytes([7u8; 32])],
            timestamp: 1_000_000,
        }
    }

    #[test]
    fn body_round_trips() {
        let body = sample_body();
        let bytes = body.encode();
        let mut cursor = Cursor::new(bytes.as_slice());
        let decoded = RecordBody::decode(&mut cursor).unwrap();
        assert_eq!(decoded.masked_value, body.masked_value);
        assert_eq!(decoded.owner_public.as_bytes(), body.owner_public.as_bytes());
        assert_eq!(decoded.links.len(), body.links.len());
        assert_eq!(decoded.timestamp, body.timestamp);
    }

    #[test]
    fn record_round_trips_with_no_selectors() {
        let record = Record {
            body: sample_body(),
            selectors: vec![],
            work_algorithm: crate::constants::WORK_ALGORITHM_NONE,
            work: vec![],
            signature: vec![9, 9, 9],
        };
        let bytes = record.encode();
        let decoded = Record::decode(&bytes).unwrap();
        assert_eq!(decoded.signature, record.signature);
        assert_eq!(decoded.selectors.len(), 0);
    }

    #[test]
    fn record_round_trips_with_selectors() {
        let record = Record {
            body: sample_body(),
            selectors: vec![
                Selector::new(vec![1, 2, 3], vec![4, 5, 6]),
                Selector::new(vec![7, 8], vec![9]),
            ],
            work_algorithm: crate::constants::WORK_ALGORITHM_WHARRGARBL,
            work: vec![0u8; WHARRGARBL_OUTPUT_SIZE],
            signature: vec![1; 40],
        };
        let bytes = record.encode();
        let decoded = Record::decode(&bytes).unwrap();
        assert_eq!(decoded.selectors.len(), 2);
        assert_eq!(decoded.selectors[0].key(), &[1, 2, 3]);
        assert_eq!(decoded.work.len(), WHARRGARBL_OUTPUT_SIZE);
    }

    #[test]
    fn tombstone_is_reported_and_consumes_exact_length() {
        let mut raw = vec![TOMBSTONE_SENTINEL];
        let total_len: u32 = 12;
        raw.extend_from_slice(&total_len.to_be_bytes());
        raw.extend_from_slice(&[0xAB; 7]); // 12 - 5 = 7 arbitrary bytes
        let err = Record::decode(&raw).unwrap_err();
        match err {
            LfError::RecordMarkedIgnore { skip } => assert_eq!(skip, 12),
            other => panic!("expected RecordMarkedIgnore, got {other:?}"),
        }
    }

    #[test]
    fn oversize_record_is_rejected() {
        let raw = vec![RECORD_VERSION; RECORD_MAX_SIZE + 1];
        let err = Record::decode(&raw).unwrap_err();
        assert!(matches!(err, LfError::RecordTooLarge { .. }));
    }

    #[test]
    fn unknown_version_byte_is_rejected() {
        let record = Record {
            body: sample_body(),
            selectors: vec![],
            work_algorithm: crate::constants::WORK_ALGORITHM_NONE,
            work: vec![],
            signature: vec![1, 2, 3],
        };
        let mut bytes = record.encode();
        bytes[0] = 0x05;
        let err = Record::decode(&bytes).unwrap_err();
        assert!(matches!(err, LfError::RecordInvalid(_)));
    }
}
