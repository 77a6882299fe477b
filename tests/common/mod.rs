//! Byte-level builder for character pool streams.

#![allow(dead_code)]

use std::io::Cursor;

#[derive(Debug, Default, Clone)]
pub struct Wire(Vec<u8>);

/// Length-prefixed single-byte string.
pub fn ansi(s: &str) -> Vec<u8> {
    if s.is_empty() {
        return 0i32.to_le_bytes().to_vec();
    }
    let mut b = (s.len() as i32 + 1).to_le_bytes().to_vec();
    b.extend_from_slice(s.as_bytes());
    b.push(0);
    b
}

/// Length-prefixed UTF-16LE string (negative length).
pub fn utf16(s: &str) -> Vec<u8> {
    let units: Vec<u16> = s.encode_utf16().chain([0]).collect();
    let mut b = (-(units.len() as i32)).to_le_bytes().to_vec();
    for unit in units {
        b.extend_from_slice(&unit.to_le_bytes());
    }
    b
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stream that starts with the file magic.
    pub fn pool() -> Self {
        Self::new().int(-1)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn int(self, v: i32) -> Self {
        self.raw(&v.to_le_bytes())
    }

    pub fn string(self, s: &str) -> Self {
        self.raw(&ansi(s))
    }

    pub fn header(self, name: &str, ty: &str, size: usize) -> Self {
        self.string(name)
            .int(0)
            .string(ty)
            .int(0)
            .int(size as i32)
            .int(0)
    }

    pub fn none(self) -> Self {
        self.string("None").int(0)
    }

    pub fn int_prop(self, name: &str, v: i32) -> Self {
        self.header(name, "IntProperty", 4).int(v)
    }

    pub fn bool_prop(self, name: &str, v: bool) -> Self {
        self.header(name, "BoolProperty", 0).raw(&[v as u8])
    }

    pub fn str_prop(self, name: &str, v: &str) -> Self {
        self.header(name, "StrProperty", ansi(v).len()).string(v)
    }

    pub fn wide_str_prop(self, name: &str, v: &str) -> Self {
        let payload = utf16(v);
        self.header(name, "StrProperty", payload.len()).raw(&payload)
    }

    pub fn name_prop(self, name: &str, v: &str) -> Self {
        self.header(name, "NameProperty", ansi(v).len() + 4)
            .string(v)
            .int(0)
    }

    pub fn byte_prop(self, name: &str, enum_type: &str, v: &str) -> Self {
        self.header(name, "ByteProperty", ansi(v).len() + 4)
            .string(enum_type)
            .int(0)
            .string(v)
            .int(0)
    }

    pub fn struct_prop(self, name: &str, struct_type: &str, body: Wire) -> Self {
        self.header(name, "StructProperty", body.len())
            .string(struct_type)
            .int(0)
            .raw(&body.0)
    }

    /// Array property; `entries` must already end each entry with `None`.
    pub fn array_prop(self, name: &str, declared: i32, entries: Wire) -> Self {
        self.header(name, "ArrayProperty", entries.len() + 4)
            .int(declared)
            .raw(&entries.0)
    }

    /// The character list placeholder: a header and count, no content.
    pub fn character_pool_placeholder(self, declared: i32) -> Self {
        self.header("CharacterPool", "ArrayProperty", 4).int(declared)
    }

    pub fn append(self, other: Wire) -> Self {
        self.raw(&other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn cursor(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.0)
    }
}
