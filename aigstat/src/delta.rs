//! Variable-length unsigned integers of the binary AND section.
//!
//! Each byte carries seven payload bits, least significant group first; a set high bit means another byte
//! follows.

use std::io::{self, Read};

use crate::error::{Error, FormatError, Result};

/// Decodes one delta from `reader`.
///
/// # Errors
///
/// Returns [`Error::UnexpectedEndOfInput`] if the stream ends before a byte with a clear high bit, and
/// [`FormatError::DeltaOverflow`] if the value does not fit in 64 bits.
pub fn decode_delta<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    let mut value = 0_u64;
    let mut shift = 0_u32;

    loop {
        let byte = read_byte(reader)?;
        let payload = u64::from(byte & 0x7f);

        if shift >= 64 || (shift > 0 && payload >> (64 - shift) != 0) {
            return Err(FormatError::DeltaOverflow.into());
        }
        value |= payload << shift;

        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

fn read_byte<R: Read + ?Sized>(reader: &mut R) -> Result<u8> {
    let mut byte = [0_u8; 1];
    match reader.read_exact(&mut byte) {
        Ok(()) => Ok(byte[0]),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::eof("AND gate delta")),
        Err(e) => Err(e.into()),
    }
}
