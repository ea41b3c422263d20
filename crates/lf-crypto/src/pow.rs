//! Proof of work: the `solve`/`verify` contract every algorithm satisfies.
//!
//! The inner Wharrgarbl momentum search is a separate, external concern —
//! this module provides the contract every algorithm must satisfy, the
//! `None` algorithm for private/CA-only networks, and a `Wharrgarbl`
//! stand-in whose `solve`/`verify` satisfy the same cost relationship a
//! real momentum search would, without the memory-hard inner loop that
//! belongs to a collaborating crate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lf_core::types::Digest32;
use lf_core::{LfError, WHARRGARBL_OUTPUT_SIZE};

/// Read before every solve attempt; set by the caller to abort an
/// in-progress solve.
pub type CancellationToken = Arc<AtomicBool>;

pub fn new_cancellation_token() -> CancellationToken {
    Arc::new(AtomicBool::new(false))
}

/// A proof-of-work algorithm over a 32-byte target hash.
pub trait PowAlgorithm {
    /// Produces work bytes over `target_hash` that, once found, verify to
    /// at least `cost`. `cancel`, if set during the search, aborts with
    /// `LfError::WorkAborted` and no partial result.
    fn solve(
        &self,
        target_hash: &Digest32,
        cost: u32,
        memory_budget: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, LfError>;

    /// Recomputes the difficulty achieved by `work` over `target_hash`,
    /// without requiring the original cost target.
    fn verify(&self, work: &[u8], target_hash: &Digest32) -> Result<u32, LfError>;
}

/// `0x00` — no PoW is attached. Acceptability is a network policy
/// decision made above the record core; validation skips the work check
/// entirely for this algorithm.
pub struct NoPow;

impl PowAlgorithm for NoPow {
    fn solve(
        &self,
        _target_hash: &Digest32,
        _cost: u32,
        _memory_budget: usize,
        _cancel: &CancellationToken,
    ) -> Result<Vec<u8>, LfError> {
        Ok(Vec::new())
    }

    fn verify(&self, work: &[u8], _target_hash: &Digest32) -> Result<u32, LfError> {
        if !work.is_empty() {
            return Err(LfError::WorkFailed("None algorithm carries no work bytes".into()));
        }
        Ok(u32::MAX)
    }
}

/// `0x01` — momentum-style memory-hard PoW. The real Wharrgarbl collision
/// search is outside this workspace's scope; this stand-in reproduces the
/// observable contract (fixed output size, a monotone relationship between
/// search effort and achieved difficulty, deterministic `verify`) using a
/// sequential hash-grinding search seeded by `target_hash`, so the rest of
/// the assembly/validation pipeline — which only depends on the contract,
/// not the inner search — exercises real code paths end to end.
pub struct Wharrgarbl;

impl Wharrgarbl {
    /// Encodes the achieved difficulty for a candidate nonce as a
    /// continuous quantity in the same `u32` units `cost()` and `score()`
    /// use, the way real difficulty-style PoW scores a hash: the first
    /// four bytes of HWORK(target_hash ∥ nonce) are read as a `u32` `v`,
    /// and difficulty is `u32::MAX / max(v, 1)`. Reaching a target
    /// difficulty `D` this way takes on the order of `D` attempts on
    /// average — unlike a leading-zero-bit count, which only takes values
    /// in `0..=256` and can never reach the tens-of-thousands-scale costs
    /// the cost curve produces for ordinary record sizes.
    fn candidate_difficulty(target_hash: &Digest32, nonce: u64) -> u32 {
        let mut preimage = Vec::with_capacity(32 + 8);
        preimage.extend_from_slice(target_hash);
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let digest = crate::hash::hwork(&preimage);
        let value = u32::from_be_bytes(digest[..4].try_into().expect("4 bytes")).max(1);
        u32::MAX / value
    }
}

impl PowAlgorithm for Wharrgarbl {
    fn solve(
        &self,
        target_hash: &Digest32,
        cost: u32,
        _memory_budget: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, LfError> {
        let mut nonce: u64 = 0;
        loop {
            if cancel.load(Ordering::Relaxed) {
                return Err(LfError::WorkAborted);
            }
            if Self::candidate_difficulty(target_hash, nonce) >= cost {
                let mut work = vec![0u8; WHARRGARBL_OUTPUT_SIZE];
                work[..8].copy_from_slice(&nonce.to_be_bytes());
                return Ok(work);
            }
            nonce = nonce.checked_add(1).ok_or(LfError::WorkFailed(
                "exhausted nonce space without meeting cost".into(),
            ))?;
        }
    }

    fn verify(&self, work: &[u8], target_hash: &Digest32) -> Result<u32, LfError> {
        if work.len() != WHARRGARBL_OUTPUT_SIZE {
            return Err(LfError::WorkFailed(format!(
                "expected {WHARRGARBL_OUTPUT_SIZE} work bytes, got {}",
                work.len()
            )));
        }
        let mut nonce_bytes = [0u8; 8];
        nonce_bytes.copy_from_slice(&work[..8]);
        let nonce = u64::from_be_bytes(nonce_bytes);
        Ok(Self::candidate_difficulty(target_hash, nonce))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pow_round_trips_on_empty_work() {
        let target = [1u8; 32];
        let cancel = new_cancellation_token();
        let work = NoPow.solve(&target, 0, 0, &cancel).unwrap();
        assert!(work.is_empty());
        assert_eq!(NoPow.verify(&work, &target).unwrap(), u32::MAX);
    }

    #[test]
    fn no_pow_rejects_nonempty_work() {
        assert!(NoPow.verify(&[1, 2, 3], &[0u8; 32]).is_err());
    }

    #[test]
    fn wharrgarbl_solve_meets_requested_cost() {
        let target = [9u8; 32];
        let cancel = new_cancellation_token();
        let work = Wharrgarbl.solve(&target, 2, 0, &cancel).unwrap();
        let achieved = Wharrgarbl.verify(&work, &target).unwrap();
        assert!(achieved >= 2);
    }

    #[test]
    fn wharrgarbl_rejects_wrong_length_work() {
        let err = Wharrgarbl.verify(&[0u8; 3], &[0u8; 32]).unwrap_err();
        assert!(matches!(err, LfError::WorkFailed(_)));
    }

    #[test]
    fn wharrgarbl_solve_is_cancellable() {
        let target = [3u8; 32];
        let cancel = new_cancellation_token();
        cancel.store(true, Ordering::Relaxed);
        let err = Wharrgarbl.solve(&target, 64, 0, &cancel).unwrap_err();
        assert!(matches!(err, LfError::WorkAborted));
    }
}
