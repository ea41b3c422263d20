//! Ingestion validator: recomputes every binding and signature a record
//! claims.
//!
//! Checks run in a fixed order; the first failing check determines the
//! returned error. The whole entry point is wrapped in `catch_unwind` —
//! the checks themselves are written to avoid panicking on
//! attacker-controlled input, but a caller-supplied `PowAlgorithm` is
//! exactly the kind of host-language fault that boundary exists for.

use std::panic::{self, AssertUnwindSafe};

use lf_core::{LfError, Record};
use lf_crypto::owner::verify_owner_signature;
use lf_crypto::pow::PowAlgorithm;
use lf_core::constants::{WORK_ALGORITHM_NONE, WORK_ALGORITHM_WHARRGARBL};

/// Decodes and validates a raw record, dispatching PoW verification to
/// `pow_algorithm` for whichever algorithm the record names. `None` is a
/// network policy decision the core does not make; this validator accepts
/// any `None`-tagged record without invoking `pow_algorithm` at all.
pub fn validate(raw: &[u8], pow_algorithm: &dyn PowAlgorithm) -> Result<Record, LfError> {
    panic::catch_unwind(AssertUnwindSafe(|| validate_inner(raw, pow_algorithm)))
        .unwrap_or_else(|_| Err(LfError::RecordInvalid("validator panicked".into())))
}

fn validate_inner(raw: &[u8], pow_algorithm: &dyn PowAlgorithm) -> Result<Record, LfError> {
    // Step 1: decode per §4.4; malformed framing, oversize fields, and
    // unknown version bytes are rejected inside `Record::decode`.
    let record = Record::decode(raw)?;

    // Step 2: non-empty owner public bytes.
    if record.body.owner_public.as_bytes().is_empty() {
        return Err(LfError::RecordInvalid("owner public bytes are empty".into()));
    }

    // Step 3: recompute body_signing_hash and billable_bytes.
    let body_signing_hash = lf_crypto::hash::body_signing_hash(&record.body);
    let billable_bytes = record.billable_bytes();

    // Step 4: verify each selector's claim against the running chained
    // hash, feeding its bytes into both the work hasher and the chain.
    let mut chained_hash = body_signing_hash;
    for (index, selector) in record.selectors.iter().enumerate() {
        if !lf_crypto::selector::verify_claim(selector, &chained_hash) {
            return Err(LfError::RecordSelectorClaimCheckFailed { index });
        }
        chained_hash = lf_crypto::hash::advance_claim_chain(chained_hash, selector);
    }

    // Step 5: finalize recomputed work_hash.
    let work_hash = lf_crypto::hash::work_hash(body_signing_hash, &record.selectors);

    // Step 6: dispatch on work_algorithm.
    match record.work_algorithm {
        WORK_ALGORITHM_NONE => {}
        WORK_ALGORITHM_WHARRGARBL => {
            let achieved = pow_algorithm.verify(&record.work, &work_hash)?;
            let required = lf_core::cost::cost(billable_bytes);
            if achieved < required {
                return Err(LfError::RecordInsufficientWork {
                    needed: required,
                    achieved,
                });
            }
        }
        other => return Err(LfError::RecordUnsupportedAlgorithm(other)),
    }

    // Step 7: signing_hash = HWORK(work_hash ∥ work ∥ [algorithm_byte]).
    let signing_hash =
        lf_crypto::hash::sign_target_hash(work_hash, &record.work, record.work_algorithm);

    // Step 8: reconstruct owner from owner_bytes; verify signature.
    if !verify_owner_signature(&record.body.owner_public, &signing_hash, &record.signature) {
        return Err(LfError::RecordOwnerSignatureCheckFailed);
    }

    Ok(record)
}
