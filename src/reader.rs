//! Bounded primitive reader and file initializer.
//!
//! [`PropertyReader`] wraps any `Read + Seek` source and layers the format's
//! primitive encodings on top of [`crate::utils`]: length-prefixed strings,
//! mandatory zero padding and non-negative size fields. The end of the stream
//! is measured once when the reader is built, so every variable-length read
//! is checked against the bytes actually left before anything is allocated.
//!
//! ## String encoding
//! ```text
//! [0x00] Length L                  (i32 LE)
//! [0x04] Payload
//!          L == 0  -> nothing, empty string
//!          L  > 0  -> L single-byte chars, last one is NUL
//!          L  < 0  -> -L UTF-16LE code units, last one is NUL
//! ```

use std::io::{Read, Seek, SeekFrom};

use log::debug;

use crate::utils::{ansi_string, bytesv, le_i32, u8, utf16_string};
use crate::{Error, Result};

/// Leading integer of every character pool file.
pub const FILE_MAGIC: i32 = -1;

/// Default ceiling on string lengths, in characters.
pub const DEFAULT_MAX_STRING_LEN: usize = 5000;

/// Default ceiling on struct and array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Sanity bounds applied while decoding.
///
/// Struct sub-readers inherit the limits of the reader that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest accepted string, in characters (not bytes).
    pub max_string_len: usize,
    /// Deepest accepted nesting of structs and array entries. Top-level
    /// properties sit at depth 0.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Forward-only reader over a property-bag stream.
///
/// The end of the stream is measured once, when the reader is built, by
/// seeking to the end and back to the starting position. That is the only
/// backward seek; decoding itself only reads and skips forward. The current
/// position is tracked locally from then on, so bounds checks never touch
/// the underlying stream.
pub struct PropertyReader<R> {
    inner: R,
    /// Absolute stream offset of the next byte to read.
    pos: u64,
    /// Absolute stream offset one past the last readable byte.
    end: u64,
    depth: usize,
    limits: Limits,
}

impl<R: Read + Seek> PropertyReader<R> {
    /// Wrap `inner` without checking for the file magic.
    ///
    /// Reading starts at the current stream position.
    pub fn new(inner: R) -> Result<Self> {
        Self::with_limits(inner, Limits::default())
    }

    /// Wrap `inner` with explicit limits, without checking for the file magic.
    pub fn with_limits(mut inner: R, limits: Limits) -> Result<Self> {
        let start = inner.stream_position()?;
        let end = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(start))?;
        Ok(Self {
            inner,
            pos: start,
            end,
            depth: 0,
            limits,
        })
    }

    /// Place a sub-reader at the nesting level of the container it reads.
    pub(crate) fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Validate the file magic and return a reader positioned at the first
    /// top-level property.
    ///
    /// Returns [`Error::BadMagic`] if the first integer is not [`FILE_MAGIC`].
    pub fn open(inner: R) -> Result<Self> {
        Self::open_with_limits(inner, Limits::default())
    }

    /// Same as [`PropertyReader::open`] with explicit limits.
    pub fn open_with_limits(inner: R, limits: Limits) -> Result<Self> {
        let mut reader = Self::with_limits(inner, limits)?;
        let magic = reader.int()?;
        if magic != FILE_MAGIC {
            return Err(Error::BadMagic(magic));
        }
        debug!("file magic accepted, {} bytes follow", reader.remaining());
        Ok(reader)
    }

    /// Limits this reader enforces.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Current absolute position in the underlying stream.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Bytes left before the end of the stream.
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.pos)
    }

    /// Whether every byte of the stream has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Nesting level of the container being read; 0 at the top level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Step one level into a struct or array.
    ///
    /// Returns [`Error::TooDeep`] if that would pass `max_depth`; the depth
    /// is left unchanged in that case.
    pub(crate) fn enter(&mut self) -> Result<()> {
        let depth = self.depth + 1;
        if depth > self.limits.max_depth {
            return Err(Error::TooDeep {
                depth,
                max: self.limits.max_depth,
            });
        }
        self.depth = depth;
        Ok(())
    }

    /// Step back out of the level entered last.
    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn ensure(&self, requested: u64) -> Result<()> {
        let remaining = self.remaining();
        if requested > remaining {
            return Err(Error::OutOfBounds {
                requested,
                remaining,
            });
        }
        Ok(())
    }

    /// Read exactly `len` raw bytes.
    ///
    /// Returns [`Error::OutOfBounds`] without reading if fewer remain.
    pub fn bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.ensure(len as u64)?;
        let buf = bytesv(&mut self.inner, len)?;
        self.pos += len as u64;
        Ok(buf)
    }

    /// Read a little-endian `i32`.
    pub fn int(&mut self) -> Result<i32> {
        let value = le_i32(&mut self.inner)?;
        self.pos += 4;
        Ok(value)
    }

    /// Read a one-byte boolean; any nonzero value is `true`.
    pub fn bool(&mut self) -> Result<bool> {
        let value = u8(&mut self.inner)?;
        self.pos += 1;
        Ok(value != 0)
    }

    /// Read a length-prefixed string (see the module docs for the encoding).
    pub fn string(&mut self) -> Result<String> {
        let len = self.int()?;
        if len == 0 {
            return Ok(String::new());
        }

        let chars = len.unsigned_abs() as u64;
        if chars > self.limits.max_string_len as u64 {
            return Err(Error::StringTooLong {
                len: chars,
                max: self.limits.max_string_len,
            });
        }

        if len > 0 {
            let payload = self.bytes(chars as usize)?;
            Ok(ansi_string(&payload))
        } else {
            let payload = self.bytes(chars as usize * 2)?;
            Ok(utf16_string(&payload))
        }
    }

    /// Read an `i32` that must be zero.
    ///
    /// `field` names what the padding follows and ends up in the error.
    pub fn padding(&mut self, field: &'static str) -> Result<()> {
        let value = self.int()?;
        if value != 0 {
            return Err(Error::Padding { field, value });
        }
        Ok(())
    }

    /// Read an `i32` size field, rejecting negative values.
    pub fn size(&mut self, field: &'static str) -> Result<u32> {
        let value = self.int()?;
        u32::try_from(value).map_err(|_| Error::NegativeSize { field, value })
    }

    /// Advance `len` bytes without reading them.
    pub fn skip(&mut self, len: u64) -> Result<()> {
        self.ensure(len)?;
        self.inner.seek(SeekFrom::Current(len as i64))?;
        self.pos += len;
        Ok(())
    }

    /// Consume the reader, returning the inner stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn reader(bytes: Vec<u8>) -> PropertyReader<Cursor<Vec<u8>>> {
        PropertyReader::new(Cursor::new(bytes)).unwrap()
    }

    fn with_len(len: i32, payload: &[u8]) -> Vec<u8> {
        let mut b = len.to_le_bytes().to_vec();
        b.extend_from_slice(payload);
        b
    }

    #[test]
    fn string_zero_length_reads_nothing() {
        let mut r = reader(with_len(0, &[0xAA]));
        assert_eq!(r.string().unwrap(), "");
        assert_eq!(r.remaining(), 1);
    }

    #[test]
    fn string_positive_length_is_ansi() {
        let mut r = reader(with_len(5, b"abcd\0"));
        assert_eq!(r.string().unwrap(), "abcd");
        assert!(r.is_exhausted());
    }

    #[test]
    fn string_negative_length_is_utf16() {
        let mut r = reader(with_len(-3, &[b'a', 0, b'b', 0, 0, 0]));
        assert_eq!(r.string().unwrap(), "ab");
        assert!(r.is_exhausted());
    }

    #[test]
    fn string_over_ceiling_is_rejected() {
        let mut r = reader(with_len(5001, &[]));
        assert!(matches!(
            r.string(),
            Err(Error::StringTooLong { len: 5001, max: 5000 })
        ));

        let mut r = reader(with_len(i32::MIN, &[]));
        assert!(matches!(r.string(), Err(Error::StringTooLong { .. })));
    }

    #[test]
    fn custom_limits_apply() {
        let limits = Limits {
            max_string_len: 3,
            ..Limits::default()
        };
        let mut r = PropertyReader::with_limits(Cursor::new(with_len(5, b"abcd\0")), limits).unwrap();
        assert!(matches!(r.string(), Err(Error::StringTooLong { len: 5, max: 3 })));
    }

    #[test]
    fn string_past_end_is_rejected() {
        let mut r = reader(with_len(40, b"short\0"));
        assert!(matches!(
            r.string(),
            Err(Error::OutOfBounds {
                requested: 40,
                remaining: 6
            })
        ));
    }

    #[test]
    fn padding_must_be_zero() {
        let mut r = reader([0i32.to_le_bytes(), 7i32.to_le_bytes()].concat());
        r.padding("name").unwrap();
        assert!(matches!(
            r.padding("type"),
            Err(Error::Padding {
                field: "type",
                value: 7
            })
        ));
    }

    #[test]
    fn negative_size_is_rejected() {
        let mut r = reader((-4i32).to_le_bytes().to_vec());
        assert!(matches!(r.size("size"), Err(Error::NegativeSize { value: -4, .. })));
    }

    #[test]
    fn bool_is_nonzero() {
        let mut r = reader(vec![0, 1, 0x80]);
        assert!(!r.bool().unwrap());
        assert!(r.bool().unwrap());
        assert!(r.bool().unwrap());
    }

    #[test]
    fn skip_is_bounded() {
        let mut r = reader(vec![0; 8]);
        r.skip(6).unwrap();
        assert_eq!(r.position(), 6);
        assert!(matches!(r.skip(3), Err(Error::OutOfBounds { .. })));
        assert_eq!(r.position(), 6);
    }

    #[test]
    fn open_checks_magic() {
        let ok = PropertyReader::open(Cursor::new((-1i32).to_le_bytes().to_vec()));
        assert!(ok.is_ok());

        let bad = PropertyReader::open(Cursor::new(0x1234i32.to_le_bytes().to_vec()));
        assert!(matches!(bad, Err(Error::BadMagic(0x1234))));
    }

    #[test]
    fn open_on_short_stream_is_io_error() {
        let short = PropertyReader::open(Cursor::new(vec![0xFF, 0xFF]));
        assert!(matches!(short, Err(Error::Io(_))));
    }

    #[test]
    fn position_follows_the_stream() {
        let mut bytes = with_len(-3, &[b'h', 0, b'i', 0, 0, 0]);
        bytes.extend_from_slice(&[1, 0xAA, 0xBB, 0xCC]);
        bytes.extend_from_slice(&with_len(4, b"abc\0"));
        let mut r = reader(bytes);

        assert_eq!(r.string().unwrap(), "hi");
        assert_eq!(r.position(), 10);
        assert!(r.bool().unwrap());
        r.skip(2).unwrap();
        assert_eq!(r.bytes(1).unwrap(), [0xCC]);
        assert_eq!(r.position(), 14);
        assert_eq!(r.string().unwrap(), "abc");
        assert!(r.is_exhausted());

        let pos = r.position();
        assert_eq!(r.into_inner().position(), pos);
    }

    #[test]
    fn depth_is_bounded() {
        let limits = Limits {
            max_depth: 2,
            ..Limits::default()
        };
        let mut r = PropertyReader::with_limits(Cursor::new(Vec::new()), limits).unwrap();
        r.enter().unwrap();
        r.enter().unwrap();
        assert!(matches!(r.enter(), Err(Error::TooDeep { depth: 3, max: 2 })));
        assert_eq!(r.depth(), 2);
        r.leave();
        r.enter().unwrap();
        r.leave();
        r.leave();
        r.leave();
        assert_eq!(r.depth(), 0);
    }

    #[test]
    fn reading_starts_at_current_position() {
        let mut cursor = Cursor::new(vec![9, 9, 0xFF, 0xFF, 0xFF, 0xFF]);
        cursor.set_position(2);
        let mut r = PropertyReader::open(cursor).unwrap();
        assert!(r.is_exhausted());
    }
}
