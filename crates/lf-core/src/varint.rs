//! LEB128-style unsigned varuint helpers for the canonical wire format.
//! All fixed-width integers folded into a hash input
//! (e.g. the timestamp in the body signing hash) are big-endian instead —
//! varuints are a wire-size optimization only, never used inside a hash
//! preimage.

use std::io::Cursor;

use crate::error::LfError;

pub fn write_varuint(buf: &mut Vec<u8>, value: u64) {
    leb128::write::unsigned(buf, value).expect("writing to Vec<u8> is infallible");
}

/// Reads a varuint from `cursor`, rejecting any value that would overflow
/// `usize` or exceed `max` (callers pass `RECORD_MAX_SIZE` for any field
/// that will be used as an allocation length).
pub fn read_varuint_bounded(cursor: &mut Cursor<&[u8]>, max: u64) -> Result<u64, LfError> {
    let value = leb128::read::unsigned(cursor)
        .map_err(|e| LfError::RecordInvalid(format!("malformed varuint: {e}")))?;
    if value > max {
        return Err(LfError::RecordInvalid(format!(
            "varuint {value} exceeds bound {max}"
        )));
    }
    Ok(value)
}

pub fn read_exact(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<Vec<u8>, LfError> {
    let pos = cursor.position() as usize;
    let data = cursor.get_ref();
    if pos.saturating_add(len) > data.len() {
        return Err(LfError::RecordInvalid("short read".into()));
    }
    let out = data[pos..pos + len].to_vec();
    cursor.set_position((pos + len) as u64);
    Ok(out)
}

pub fn read_u8(cursor: &mut Cursor<&[u8]>) -> Result<u8, LfError> {
    let b = read_exact(cursor, 1)?;
    Ok(b[0])
}
