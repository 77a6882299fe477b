//! Low-level I/O primitives shared by the property readers.
//!
//! Each function reads exactly the bytes it promises or returns an error -
//! there is no partial-read ambiguity. Bounds checking against the end of
//! the stream is the caller's job; see [`crate::reader::PropertyReader`].

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::{UTF_16LE, WINDOWS_1252};

use crate::Result;

/// Read one byte.
#[inline]
pub(crate) fn u8<R: Read>(r: &mut R) -> Result<u8> {
    Ok(r.read_u8()?)
}

/// Read a little-endian `i32`.
#[inline]
pub(crate) fn le_i32<R: Read>(r: &mut R) -> Result<i32> {
    Ok(r.read_i32::<LittleEndian>()?)
}

/// Read exactly `len` bytes into a `Vec`.
#[inline]
pub(crate) fn bytesv<R: Read>(r: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut b = vec![0u8; len];
    r.read_exact(&mut b)?;
    Ok(b)
}

/// Decode a single-byte (ANSI) string payload, dropping its null terminator.
pub(crate) fn ansi_string(payload: &[u8]) -> String {
    let body = payload.split_last().map_or(payload, |(_, rest)| rest);
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
    text.into_owned()
}

/// Decode a UTF-16LE string payload, dropping its two-byte null terminator.
pub(crate) fn utf16_string(payload: &[u8]) -> String {
    let body = &payload[..payload.len().saturating_sub(2)];
    let (text, _) = UTF_16LE.decode_without_bom_handling(body);
    text.into_owned()
}
