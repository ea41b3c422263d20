use thiserror::Error;

/// Stable error-kind identifiers surfaced at the record-core boundary.
///
/// Variant names are the stable identifiers from the external interface
/// contract; callers (telemetry, graph layer) are expected to match on the
/// variant, not the message text.
#[derive(Debug, Error)]
pub enum LfError {
    #[error("record is malformed: {0}")]
    RecordInvalid(String),

    #[error("record exceeds maximum size of {max} bytes (got {got})")]
    RecordTooLarge { max: usize, got: usize },

    #[error("unsupported proof-of-work algorithm: {0}")]
    RecordUnsupportedAlgorithm(u8),

    /// Decoded a tombstoned flat-file slot, not a record. Carries the number
    /// of bytes the caller should skip to reach the next slot.
    #[error("record slot is marked ignore ({skip} bytes to skip)")]
    RecordMarkedIgnore { skip: usize },

    #[error("selector claim check failed at index {index}")]
    RecordSelectorClaimCheckFailed { index: usize },

    #[error("owner signature check failed")]
    RecordOwnerSignatureCheckFailed,

    #[error("insufficient proof-of-work: needed {needed}, achieved {achieved}")]
    RecordInsufficientWork { needed: u32, achieved: u32 },

    #[error("proof-of-work failed: {0}")]
    WorkFailed(String),

    #[error("proof-of-work aborted")]
    WorkAborted,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
