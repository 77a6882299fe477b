//! Failure-tolerant inspection of uploaded pool files.
//!
//! Upload workflows only need a character count and, for single-character
//! pools, a short biography. A file that fails to decode must not fail the
//! workflow, so [`inspect`] never returns an error: the failure becomes an
//! [`AuditNote`] instead.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::warn;

use crate::Result;
use crate::pool::{CharacterPool, CharacterPoolDataElement};

/// Display facts extracted from a decoded pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSummary {
    pub character_count: usize,
    /// Present only when the pool holds exactly one character.
    pub biography: Option<String>,
}

/// Record of a file that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditNote {
    pub message: String,
}

/// Outcome of inspecting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    Decoded(PoolSummary),
    Failed(AuditNote),
}

impl PoolSummary {
    pub fn from_pool(pool: &CharacterPool) -> Self {
        let biography = match pool.native_characters.as_slice() {
            [only] => Some(biography(only)),
            _ => None,
        };
        Self {
            character_count: pool.native_characters.len(),
            biography,
        }
    }
}

/// Short multi-line description of one character.
///
/// Empty fields are left out.
pub fn biography(character: &CharacterPoolDataElement) -> String {
    let mut name = character.first_name.clone();
    if !character.nick_name.is_empty() {
        name.push_str(&format!(" '{}'", character.nick_name));
    }
    if !character.last_name.is_empty() {
        name.push(' ');
        name.push_str(&character.last_name);
    }

    let mut lines = Vec::new();
    let name = name.trim();
    if !name.is_empty() {
        lines.push(name.to_owned());
    }
    if !character.soldier_class_template.is_empty() {
        lines.push(format!("Class: {}", character.soldier_class_template));
    }
    if !character.country.is_empty() {
        lines.push(format!("Country: {}", character.country));
    }
    if !character.background_text.is_empty() {
        lines.push(character.background_text.clone());
    }
    lines.join("\n")
}

fn settle(result: Result<CharacterPool>) -> Inspection {
    match result {
        Ok(pool) => Inspection::Decoded(PoolSummary::from_pool(&pool)),
        Err(e) => {
            warn!("character pool could not be decoded: {e}");
            Inspection::Failed(AuditNote {
                message: format!("Character pool could not be read: {e}"),
            })
        }
    }
}

/// Decode `r` and summarize it, turning any failure into an audit note.
pub fn inspect<R: Read + Seek>(r: &mut R) -> Inspection {
    settle(CharacterPool::parse(r))
}

/// Open `path` and summarize it, turning any failure (including a failure
/// to open the file) into an audit note.
pub fn inspect_file(path: impl AsRef<Path>) -> Inspection {
    let opened = File::open(path.as_ref()).map(BufReader::new);
    settle(opened.map_err(Into::into).and_then(|mut f| CharacterPool::parse(&mut f)))
}
