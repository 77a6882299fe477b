//! Character pool files - the root aggregate and its records.
//!
//! ## File layout
//! ```text
//! [0x00] Magic (-1)                          (i32 LE)
//! [0x04] Top-level properties                (until "None")
//!          SelectionMode                 ByteProperty
//!          PoolFileName                  StrProperty
//!          ImportDirectoryName           StrProperty
//!          CharacterPoolSerializeHelper  StructProperty (skipped)
//!          ExtraDatas                    ArrayProperty  (required)
//!          CharacterPool                 ArrayProperty  (header only)
//! [....] Character count N                   (i32 LE)
//! [....] N property lists, each ending in "None"
//! [....] Anything else is ignored
//! ```
//!
//! The `CharacterPool` array property is a placeholder: its header declares
//! a size but no entries follow it. The characters themselves come after the
//! top-level terminator as a bare counted list.

mod materialize;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use log::{debug, trace};

pub use materialize::Properties;

use crate::property::{Property, PropertyHeader};
use crate::reader::{Limits, PropertyReader};
use crate::{Error, Result};

const SELECTION_MODE: &str = "SelectionMode";
const POOL_FILE_NAME: &str = "PoolFileName";
const IMPORT_DIRECTORY_NAME: &str = "ImportDirectoryName";
const SERIALIZE_HELPER: &str = "CharacterPoolSerializeHelper";
const EXTRA_DATAS: &str = "ExtraDatas";
const CHARACTER_POOL: &str = "CharacterPool";

/// How the game draws soldiers from the pool (`ECharacterPoolSelectionMode`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    None,
    PoolOnly,
    Mixed,
    RandomOnly,
    /// A member this decoder does not know, kept verbatim.
    Other(String),
}

impl SelectionMode {
    /// Map an enum member name. An empty name maps to the default.
    pub fn from_member(member: &str) -> Self {
        match member {
            "" | "eCPSM_None" => Self::None,
            "eCPSM_PoolOnly" => Self::PoolOnly,
            "eCPSM_Mixed" => Self::Mixed,
            "eCPSM_RandomOnly" => Self::RandomOnly,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Uniform assignment mode (`EUniformStatus`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UniformStatus {
    #[default]
    Manual,
    AnyClass,
    ClassSpecific,
    NonSoldier,
    Other(String),
}

impl UniformStatus {
    pub fn from_member(member: &str) -> Self {
        match member {
            "" | "EUS_Manual" => Self::Manual,
            "EUS_AnyClass" => Self::AnyClass,
            "EUS_ClassSpecific" => Self::ClassSpecific,
            "EUS_NonSoldier" => Self::NonSoldier,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Per-unit uniform auto-management override (`EAutoManageUniformForUnit`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AutoManageUniform {
    #[default]
    Default,
    AlwaysOn,
    AlwaysOff,
    Other(String),
}

impl AutoManageUniform {
    pub fn from_member(member: &str) -> Self {
        match member {
            "" | "EAMUFU_Default" => Self::Default,
            "EAMUFU_AlwaysOn" => Self::AlwaysOn,
            "EAMUFU_AlwaysOff" => Self::AlwaysOff,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// One soldier record.
///
/// Fields missing from the file are left at their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPoolDataElement {
    pub first_name: String,
    pub last_name: String,
    pub nick_name: String,
    pub soldier_class_template: String,
    pub character_template: String,
    pub country: String,
    pub allowed_type_soldier: bool,
    pub allowed_type_vip: bool,
    pub allowed_type_dark_vip: bool,
    pub pool_timestamp: String,
    pub background_text: String,
}

/// Appearance stored for one armor template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppearanceInfoStruct {
    pub gender_armor_template: String,
    /// Every leaf of the appearance struct, keyed by property name.
    pub appearance: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CosmeticOptionStruct {
    pub name: String,
    pub checked: bool,
}

/// Which cosmetic options a uniform applies for one armor template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniformSettingsStruct {
    pub gender_armor_template: String,
    pub cosmetic_options: Vec<CosmeticOptionStruct>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPoolLoadoutStruct {
    pub template_name: String,
    /// Inventory slot enum member name.
    pub inventory_slot: String,
}

/// Per-character metadata stored alongside the native character list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraDataEntry {
    pub object_id: i32,
    pub character: CharacterPoolDataElement,
    pub appearances: Vec<AppearanceInfoStruct>,
    pub uniform_settings: Vec<UniformSettingsStruct>,
    pub uniform_status: UniformStatus,
    pub auto_manage_uniform: AutoManageUniform,
    pub non_soldier_uniform_templates: Vec<String>,
    pub loadout: Vec<CharacterPoolLoadoutStruct>,
}

/// Decoded character pool file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterPool {
    pub selection_mode: SelectionMode,
    pub pool_file_name: String,
    pub import_directory_name: String,
    /// Soldier records in file order.
    pub native_characters: Vec<CharacterPoolDataElement>,
    pub extra_data: Vec<ExtraDataEntry>,
}

impl CharacterPool {
    /// Decode a character pool from `r` with default [`Limits`].
    ///
    /// `r` must be positioned at the file magic. Fails on the first
    /// malformed field; nothing is returned for a partially valid file.
    pub fn parse<R: Read + Seek>(r: &mut R) -> Result<Self> {
        Self::parse_with_limits(r, Limits::default())
    }

    /// Decode a character pool from `r` with explicit limits.
    pub fn parse_with_limits<R: Read + Seek>(r: &mut R, limits: Limits) -> Result<Self> {
        let mut reader = PropertyReader::open_with_limits(r, limits)?;

        let mut pool = CharacterPool::default();
        let mut extra_data = None;

        loop {
            match reader.read_header()? {
                PropertyHeader::Complete(Property::None) => break,
                PropertyHeader::Complete(Property::Byte { name, value, .. })
                    if name == SELECTION_MODE =>
                {
                    pool.selection_mode = SelectionMode::from_member(&value);
                }
                PropertyHeader::Complete(Property::Str { name, value }) if name == POOL_FILE_NAME => {
                    pool.pool_file_name = value;
                }
                PropertyHeader::Complete(Property::Str { name, value })
                    if name == IMPORT_DIRECTORY_NAME =>
                {
                    pool.import_directory_name = value;
                }
                PropertyHeader::Complete(other) => {
                    trace!("ignoring top-level property '{}'", other.name());
                }
                PropertyHeader::Struct(header) if header.name == SERIALIZE_HELPER => {
                    reader.skip_struct(&header)?;
                }
                PropertyHeader::Struct(header) => {
                    trace!("ignoring top-level struct '{}'", header.name);
                    reader.read_struct(header)?;
                }
                PropertyHeader::Array(header) if header.name == CHARACTER_POOL => {
                    debug!(
                        "character list placeholder declares {} entries",
                        header.declared_count
                    );
                }
                PropertyHeader::Array(header) if header.name == EXTRA_DATAS => {
                    let entries = reader.read_entries(header.declared_count)?;
                    debug!("read {} extra data entries", entries.len());
                    extra_data = Some(
                        entries
                            .iter()
                            .map(|e| ExtraDataEntry::from_properties(Properties::new(e)))
                            .collect(),
                    );
                }
                PropertyHeader::Array(header) => {
                    trace!("ignoring top-level array '{}'", header.name);
                    reader.read_array(header)?;
                }
            }
        }

        pool.native_characters = reader
            .read_counted_list()?
            .iter()
            .map(|e| CharacterPoolDataElement::from_properties(Properties::new(e)))
            .collect();

        pool.extra_data = extra_data.ok_or(Error::MissingProperty(EXTRA_DATAS))?;

        debug!(
            "decoded character pool '{}': {} characters, {} extra data entries",
            pool.pool_file_name,
            pool.native_characters.len(),
            pool.extra_data.len()
        );
        Ok(pool)
    }

    /// Decode a character pool held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::parse(&mut Cursor::new(bytes))
    }

    /// Open and decode the character pool file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening character pool {}", path.display());
        let mut file = BufReader::new(File::open(path)?);
        Self::parse(&mut file)
    }
}
