//! Wire-format builder for unit tests.

use std::io::Cursor;

use crate::reader::PropertyReader;

#[derive(Debug, Default, Clone)]
pub(crate) struct Wire(Vec<u8>);

fn encoded(s: &str) -> Vec<u8> {
    let mut b = Vec::new();
    if !s.is_empty() {
        b.extend_from_slice(&(s.len() as i32 + 1).to_le_bytes());
        b.extend_from_slice(s.as_bytes());
        b.push(0);
    } else {
        b.extend_from_slice(&0i32.to_le_bytes());
    }
    b
}

impl Wire {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub(crate) fn int(self, v: i32) -> Self {
        self.raw(&v.to_le_bytes())
    }

    pub(crate) fn string(self, s: &str) -> Self {
        self.raw(&encoded(s))
    }

    pub(crate) fn header(self, name: &str, ty: &str, size: usize) -> Self {
        self.string(name)
            .int(0)
            .string(ty)
            .int(0)
            .int(size as i32)
            .int(0)
    }

    pub(crate) fn none(self) -> Self {
        self.string("None").int(0)
    }

    pub(crate) fn int_prop(self, name: &str, v: i32) -> Self {
        self.header(name, "IntProperty", 4).int(v)
    }

    pub(crate) fn bool_prop(self, name: &str, v: bool) -> Self {
        self.header(name, "BoolProperty", 0).raw(&[v as u8])
    }

    pub(crate) fn str_prop(self, name: &str, v: &str) -> Self {
        self.header(name, "StrProperty", encoded(v).len()).string(v)
    }

    pub(crate) fn name_prop(self, name: &str, v: &str) -> Self {
        self.header(name, "NameProperty", encoded(v).len() + 4)
            .string(v)
            .int(0)
    }

    pub(crate) fn byte_prop(self, name: &str, enum_type: &str, v: &str) -> Self {
        self.header(name, "ByteProperty", encoded(v).len() + 4)
            .string(enum_type)
            .int(0)
            .string(v)
            .int(0)
    }

    pub(crate) fn struct_prop(self, name: &str, struct_type: &str, body: Wire) -> Self {
        self.header(name, "StructProperty", body.len())
            .string(struct_type)
            .int(0)
            .raw(&body.0)
    }

    /// Array property whose `entries` are already encoded, each ending in `None`.
    pub(crate) fn array_prop(self, name: &str, declared: i32, entries: Wire) -> Self {
        self.header(name, "ArrayProperty", entries.len() + 4)
            .int(declared)
            .raw(&entries.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub(crate) fn reader(self) -> PropertyReader<Cursor<Vec<u8>>> {
        PropertyReader::new(Cursor::new(self.0)).unwrap()
    }
}
