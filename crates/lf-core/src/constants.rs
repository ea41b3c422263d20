//! ─── LF Record Core Constants ───────────────────────────────────────────────
//!
//! Wire-level limits and algorithm identifiers. Every value here is load
//! -bearing for interop: two honest implementations that disagree on any of
//! these constants will disagree on which records are valid.

/// Canonical record version byte. The only version this codec accepts.
pub const RECORD_VERSION: u8 = 0x00;

/// First byte of a tombstoned flat-file slot. Guaranteed distinct from
/// `RECORD_VERSION` and from every future version byte (future versions
/// MUST NOT be `0xFF`).
pub const TOMBSTONE_SENTINEL: u8 = 0xFF;

/// Maximum serialized record size, in bytes. Enforced before allocation
/// wherever a length-prefixed field is decoded.
pub const RECORD_MAX_SIZE: usize = 65_536;

/// Proof-of-work algorithm identifiers.
pub const WORK_ALGORITHM_NONE: u8 = 0x00;
pub const WORK_ALGORITHM_WHARRGARBL: u8 = 0x01;

/// Owner public-key type tags (first byte of `OwnerPublicKey` wire bytes).
pub const OWNER_TYPE_P224: u8 = 0x01;

/// Default Wharrgarbl memory budget, in bytes (384 MiB).
pub const WHARRGARBL_DEFAULT_MEMORY: usize = 384 * 1024 * 1024;

/// Fixed output size of the Wharrgarbl work field, in bytes. The inner
/// memory-hard momentum search is a separate concern from this record
/// core; `lf-crypto::pow::Wharrgarbl` produces exactly this many bytes.
pub const WHARRGARBL_OUTPUT_SIZE: usize = 20;

/// Minimum plaintext length, in bytes, below which LZW compression is never
/// attempted (the flag byte alone would make a shorter payload longer).
pub const COMPRESSION_MIN_INPUT_LEN: usize = 16;

/// Score returned for any cost above `cost(RECORD_MAX_SIZE)`.
pub const SCORE_SATURATED: u32 = 0xFFFF_A8DB;
