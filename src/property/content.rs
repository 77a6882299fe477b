use std::io::{Cursor, Read, Seek};

use log::debug;

use super::{ArrayHeader, Property, StructHeader};
use crate::Result;
use crate::reader::PropertyReader;

impl<R: Read + Seek> PropertyReader<R> {
    /// Read a struct's content and return the complete property.
    ///
    /// Exactly `header.size` bytes are consumed from this reader no matter
    /// what the content holds.
    pub fn read_struct(&mut self, header: StructHeader) -> Result<Property> {
        let properties = self.struct_content(header.size)?;
        Ok(Property::Struct {
            name: header.name,
            struct_type: header.struct_type,
            size: header.size,
            properties,
        })
    }

    /// Copy `size` bytes out and parse them through an independent reader.
    ///
    /// Parsing stops at the first `None` or when the copied bytes run out;
    /// bytes after the terminator are dropped. The sub-reader sits one level
    /// below this one, and nothing is copied if that level is too deep.
    pub fn struct_content(&mut self, size: u32) -> Result<Vec<Property>> {
        self.enter()?;
        let properties = self.nested_properties(size);
        self.leave();
        properties
    }

    fn nested_properties(&mut self, size: u32) -> Result<Vec<Property>> {
        let buf = self.bytes(size as usize)?;
        let mut sub =
            PropertyReader::with_limits(Cursor::new(buf), self.limits())?.with_depth(self.depth());
        let mut properties = Vec::new();
        while !sub.is_exhausted() {
            let property = sub.read_property()?;
            if property.is_none() {
                break;
            }
            properties.push(property);
        }
        Ok(properties)
    }

    /// Step over a struct's content without parsing it.
    pub fn skip_struct(&mut self, header: &StructHeader) -> Result<()> {
        debug!(
            "skipping struct '{}' ({}, {} bytes)",
            header.name, header.struct_type, header.size
        );
        self.skip(header.size as u64)
    }

    /// Read an array's entries and return the complete property.
    pub fn read_array(&mut self, header: ArrayHeader) -> Result<Property> {
        let entries = self.read_entries(header.declared_count)?;
        Ok(Property::Array {
            name: header.name,
            declared_count: header.declared_count,
            entries,
        })
    }

    /// Read up to `count` array entries.
    ///
    /// The declared count is only an upper bound: an entry holding nothing
    /// but the terminator ends the array early. Entries are read one level
    /// below this reader's current depth.
    pub fn read_entries(&mut self, count: i32) -> Result<Vec<Vec<Property>>> {
        self.enter()?;
        let entries = self.entry_lists(count);
        self.leave();
        entries
    }

    fn entry_lists(&mut self, count: i32) -> Result<Vec<Vec<Property>>> {
        let mut entries = Vec::new();
        for index in 0..count.max(0) {
            let entry = self.read_property_list()?;
            if entry.is_empty() {
                debug!("array ended after {index} of {count} declared entries");
                break;
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Read properties up to and including the next `None`.
    ///
    /// The terminator itself is not returned.
    pub fn read_property_list(&mut self) -> Result<Vec<Property>> {
        let mut properties = Vec::new();
        loop {
            let property = self.read_property()?;
            if property.is_none() {
                return Ok(properties);
            }
            properties.push(property);
        }
    }

    /// Read a bare `i32` count followed by that many array entries, with no
    /// enclosing array property.
    pub fn read_counted_list(&mut self) -> Result<Vec<Vec<Property>>> {
        let count = self.int()?;
        debug!("counted list declares {count} entries");
        self.read_entries(count)
    }
}
