//! ─── lf-record ──────────────────────────────────────────────────────────
//!
//! The glue between `lf-core`'s types and `lf-crypto`'s operations: the
//! three-phase assembly pipeline a writer drives to produce a record, and
//! the ingestion validator a reader drives to check one.

pub mod assembly;
pub mod validation;

pub use assembly::{add_work, complete, start, StartedRecord, WorkedRecord};
pub use validation::validate;
