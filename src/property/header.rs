use std::io::{Read, Seek};

use log::trace;

use super::{ArrayHeader, NONE_NAME, Property, PropertyType, StructHeader};
use crate::reader::PropertyReader;
use crate::{Error, Result};

/// Result of reading one property header.
///
/// Leaf kinds come back complete. Structs and arrays come back as headers
/// only; their content must be pulled with [`PropertyReader::read_struct`],
/// [`PropertyReader::skip_struct`] or [`PropertyReader::read_array`] before
/// the next header can be read.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyHeader {
    /// A leaf property, or [`Property::None`].
    Complete(Property),
    Struct(StructHeader),
    Array(ArrayHeader),
}

impl<R: Read + Seek> PropertyReader<R> {
    /// Read one property header and, for leaf kinds, its payload.
    ///
    /// Returns [`Error::UnsupportedType`] for unknown type names and
    /// [`Error::Padding`] if any padding field is nonzero.
    pub fn read_header(&mut self) -> Result<PropertyHeader> {
        let name = self.string()?;
        self.padding("property name")?;
        if name == NONE_NAME {
            return Ok(PropertyHeader::Complete(Property::None));
        }

        let type_name = self.string()?;
        self.padding("type name")?;
        let size = self.size("property size")?;
        self.padding("property size")?;

        let Some(ty) = PropertyType::from_type_name(&type_name) else {
            return Err(Error::UnsupportedType { name, type_name });
        };
        trace!("property '{name}': {type_name}, {size} bytes");

        let header = match ty {
            PropertyType::Int => PropertyHeader::Complete(Property::Int {
                name,
                value: self.int()?,
            }),
            PropertyType::Bool => PropertyHeader::Complete(Property::Bool {
                name,
                value: self.bool()?,
            }),
            PropertyType::Name => {
                let value = self.string()?;
                let _number = self.int()?;
                PropertyHeader::Complete(Property::Name { name, value })
            }
            PropertyType::Str => PropertyHeader::Complete(Property::Str {
                name,
                value: self.string()?,
            }),
            PropertyType::Byte => {
                let enum_type = self.string()?;
                self.padding("enum type")?;
                let value = self.string()?;
                let _number = self.int()?;
                PropertyHeader::Complete(Property::Byte {
                    name,
                    enum_type,
                    value,
                })
            }
            PropertyType::Struct => {
                let struct_type = self.string()?;
                let _number = self.int()?;
                PropertyHeader::Struct(StructHeader {
                    name,
                    struct_type,
                    size,
                })
            }
            PropertyType::Array => PropertyHeader::Array(ArrayHeader {
                name,
                size,
                declared_count: self.int()?,
            }),
            PropertyType::None => return Err(Error::UnsupportedType { name, type_name }),
        };
        Ok(header)
    }

    /// Read one complete property, pulling struct and array content.
    pub fn read_property(&mut self) -> Result<Property> {
        match self.read_header()? {
            PropertyHeader::Complete(property) => Ok(property),
            PropertyHeader::Struct(header) => self.read_struct(header),
            PropertyHeader::Array(header) => self.read_array(header),
        }
    }
}
