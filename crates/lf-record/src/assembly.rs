//! Three-phase record assembly: start, add work, complete.
//!
//! The split exists so a caller can delegate Phase 2 — the PoW search,
//! which may run for seconds to hours — to a different process or
//! machine, while keeping the owner's private key local for Phase 3.

use lf_core::types::{CertificateHash, Digest32, RecordHash, Timestamp};
use lf_core::{LfError, OwnerPublicKey, Record, RecordBody, Selector, RECORD_MAX_SIZE};
use lf_crypto::owner::Owner;
use lf_crypto::pow::{CancellationToken, PowAlgorithm};

/// Output of Phase 1: a body and a fully claimed selector chain, plus
/// everything Phase 2 needs to run the PoW search.
pub struct StartedRecord {
    body: RecordBody,
    selectors: Vec<Selector>,
    work_hash: Digest32,
    billable_bytes: u64,
}

impl StartedRecord {
    pub fn work_hash(&self) -> Digest32 {
        self.work_hash
    }

    pub fn billable_bytes(&self) -> u64 {
        self.billable_bytes
    }
}

/// Output of Phase 2: a started record with work attached, ready for the
/// owner's signature.
pub struct WorkedRecord {
    body: RecordBody,
    selectors: Vec<Selector>,
    work_algorithm: u8,
    work: Vec<u8>,
    signing_hash: Digest32,
}

/// **Phase 1 — start.** Builds the masked value, the body, and the full
/// selector claim chain, then finalizes the PoW target hash.
#[allow(clippy::too_many_arguments)]
pub fn start(
    value: &[u8],
    links: Vec<RecordHash>,
    masking_key: &Digest32,
    selector_names: &[&[u8]],
    selector_ordinals: &[u64],
    owner_public: OwnerPublicKey,
    certificate_hash: Option<CertificateHash>,
    timestamp: Timestamp,
) -> Result<StartedRecord, LfError> {
    if value.len() > RECORD_MAX_SIZE {
        return Err(LfError::RecordTooLarge {
            max: RECORD_MAX_SIZE,
            got: value.len(),
        });
    }
    if selector_names.len() != selector_ordinals.len() {
        return Err(LfError::InvalidParameter(
            "selector_names and selector_ordinals must have equal length".into(),
        ));
    }

    let masked_value = lf_crypto::masking::mask(value, masking_key, timestamp, owner_public.as_bytes());

    let body = RecordBody {
        masked_value,
        owner_public,
        certificate_hash,
        links,
        timestamp,
    };

    let body_signing_hash = lf_crypto::hash::body_signing_hash(&body);
    let mut billable_bytes = body.encode().len() as u64;

    let mut selectors = Vec::with_capacity(selector_names.len());
    let mut chained_hash = body_signing_hash;
    for (&name, &ordinal) in selector_names.iter().zip(selector_ordinals) {
        let selector = lf_crypto::selector::claim(name, ordinal, &chained_hash);
        billable_bytes += selector.bytes().len() as u64;
        chained_hash = lf_crypto::hash::advance_claim_chain(chained_hash, &selector);
        selectors.push(selector);
    }

    let work_hash = lf_crypto::hash::work_hash(body_signing_hash, &selectors);

    Ok(StartedRecord {
        body,
        selectors,
        work_hash,
        billable_bytes,
    })
}

/// **Phase 2 — add work.** Runs `algorithm.solve` over the Phase 1 target
/// hash at `cost(billable_bytes)`, then finalizes the sign-target hash.
pub fn add_work(
    started: StartedRecord,
    algorithm_id: u8,
    algorithm: &dyn PowAlgorithm,
    memory_budget: usize,
    cancel: &CancellationToken,
) -> Result<WorkedRecord, LfError> {
    let cost = lf_core::cost::cost(started.billable_bytes);
    let work = algorithm.solve(&started.work_hash, cost, memory_budget, cancel)?;
    let signing_hash = lf_crypto::hash::sign_target_hash(started.work_hash, &work, algorithm_id);

    Ok(WorkedRecord {
        body: started.body,
        selectors: started.selectors,
        work_algorithm: algorithm_id,
        work,
        signing_hash,
    })
}

/// **Phase 3 — complete.** Signs the sign-target hash and assembles the
/// final immutable record, rejecting it if serialization would exceed
/// `RecordMaxSize`.
pub fn complete<O: Owner>(worked: WorkedRecord, owner: &O) -> Result<Record, LfError> {
    let signature = owner.sign(&worked.signing_hash);
    let record = Record {
        body: worked.body,
        selectors: worked.selectors,
        work_algorithm: worked.work_algorithm,
        work: worked.work,
        signature,
    };

    let encoded_len = record.encode().len();
    if encoded_len > RECORD_MAX_SIZE {
        return Err(LfError::RecordTooLarge {
            max: RECORD_MAX_SIZE,
            got: encoded_len,
        });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_crypto::owner::{Owner, P224Owner};
    use lf_crypto::pow::{new_cancellation_token, NoPow};

    #[test]
    fn three_phase_pipeline_produces_a_valid_record() {
        let owner = P224Owner::from_seed(&[0u8; 32]).unwrap();
        let masking_key = lf_crypto::hash::masking_key(b"k");

        let started = start(
            b"hello",
            vec![],
            &masking_key,
            &[b"foo", b"bar"],
            &[0, 7],
            owner.public_key(),
            None,
            1_000_000,
        )
        .unwrap();

        assert!(started.billable_bytes() > 0);

        let cancel = new_cancellation_token();
        let worked = add_work(
            started,
            lf_core::constants::WORK_ALGORITHM_NONE,
            &NoPow,
            0,
            &cancel,
        )
        .unwrap();

        let record = complete(worked, &owner).unwrap();
        assert!(!record.signature.is_empty());
        assert_eq!(record.selectors.len(), 2);
    }

    #[test]
    fn oversize_value_is_rejected_at_start() {
        let owner = P224Owner::from_seed(&[1u8; 32]).unwrap();
        let masking_key = lf_crypto::hash::masking_key(b"k");
        let huge = vec![0u8; RECORD_MAX_SIZE + 1];
        let err = start(
            &huge,
            vec![],
            &masking_key,
            &[],
            &[],
            owner.public_key(),
            None,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, LfError::RecordTooLarge { .. }));
    }

    #[test]
    fn mismatched_selector_slices_are_rejected() {
        let owner = P224Owner::from_seed(&[2u8; 32]).unwrap();
        let masking_key = lf_crypto::hash::masking_key(b"k");
        let err = start(
            b"v",
            vec![],
            &masking_key,
            &[b"only-one-name"],
            &[],
            owner.public_key(),
            None,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, LfError::InvalidParameter(_)));
    }
}
