//! Tagged property model.
//!
//! Everything in a character pool file is a *property*: a named, typed field
//! whose kind is announced by a type-name string on the wire. Structs and
//! arrays nest further property lists, so a file is a tree of these.
//!
//! ## Property header
//! ```text
//! Name        (string)   "None" ends the enclosing list, nothing follows
//! Padding     (i32 = 0)
//! TypeName    (string)   one of the names in PropertyType
//! Padding     (i32 = 0)
//! Size        (i32)      payload size in bytes
//! Padding     (i32 = 0)
//! ```
//!
//! ## Payload by type
//! | Type             | Payload |
//! |------------------|---------|
//! | `IntProperty`    | `i32` |
//! | `BoolProperty`   | `u8` (nonzero = true) |
//! | `NameProperty`   | string + `i32` (discarded) |
//! | `StrProperty`    | string |
//! | `ByteProperty`   | enum type string + padding, member string + `i32` (discarded) |
//! | `StructProperty` | struct type string + `i32` (discarded), then `Size` bytes of properties |
//! | `ArrayProperty`  | `i32` element count, then entries (each a property list ending in `None`) |

mod content;
mod header;

pub use header::PropertyHeader;

/// Property name that terminates a property list.
pub const NONE_NAME: &str = "None";

/// Wire type tag of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Int,
    Bool,
    Name,
    Str,
    Byte,
    Struct,
    Array,
    /// List terminator; never appears as a type name on the wire.
    None,
}

impl PropertyType {
    /// Resolve a wire type name.
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Some(match type_name {
            "IntProperty" => Self::Int,
            "BoolProperty" => Self::Bool,
            "NameProperty" => Self::Name,
            "StrProperty" => Self::Str,
            "ByteProperty" => Self::Byte,
            "StructProperty" => Self::Struct,
            "ArrayProperty" => Self::Array,
            _ => return None,
        })
    }

    /// Wire type name, or [`NONE_NAME`] for the terminator.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Int => "IntProperty",
            Self::Bool => "BoolProperty",
            Self::Name => "NameProperty",
            Self::Str => "StrProperty",
            Self::Byte => "ByteProperty",
            Self::Struct => "StructProperty",
            Self::Array => "ArrayProperty",
            Self::None => NONE_NAME,
        }
    }
}

/// One fully-read property.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Int {
        name: String,
        value: i32,
    },
    Bool {
        name: String,
        value: bool,
    },
    Name {
        name: String,
        value: String,
    },
    Str {
        name: String,
        value: String,
    },
    /// Enumerated byte, stored by member name.
    Byte {
        name: String,
        enum_type: String,
        value: String,
    },
    Struct {
        name: String,
        struct_type: String,
        /// Declared content size in bytes.
        size: u32,
        properties: Vec<Property>,
    },
    Array {
        name: String,
        /// Element count as declared on the wire; an upper bound only.
        declared_count: i32,
        entries: Vec<Vec<Property>>,
    },
    None,
}

impl Property {
    /// Property name ([`NONE_NAME`] for the terminator).
    pub fn name(&self) -> &str {
        match self {
            Property::Int { name, .. }
            | Property::Bool { name, .. }
            | Property::Name { name, .. }
            | Property::Str { name, .. }
            | Property::Byte { name, .. }
            | Property::Struct { name, .. }
            | Property::Array { name, .. } => name,
            Property::None => NONE_NAME,
        }
    }

    /// Type tag of this property.
    pub fn ty(&self) -> PropertyType {
        match self {
            Property::Int { .. } => PropertyType::Int,
            Property::Bool { .. } => PropertyType::Bool,
            Property::Name { .. } => PropertyType::Name,
            Property::Str { .. } => PropertyType::Str,
            Property::Byte { .. } => PropertyType::Byte,
            Property::Struct { .. } => PropertyType::Struct,
            Property::Array { .. } => PropertyType::Array,
            Property::None => PropertyType::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Property::None)
    }
}

/// Header of a struct property whose content has not been read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructHeader {
    pub name: String,
    pub struct_type: String,
    /// Exact number of content bytes following the header.
    pub size: u32,
}

/// Header of an array property whose entries have not been read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayHeader {
    pub name: String,
    /// Declared payload size, including the count field.
    pub size: u32,
    pub declared_count: i32,
}
