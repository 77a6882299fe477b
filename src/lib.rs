//! **cpool** - a decoder for tagged property-bag character pool files.
//!
//! A character pool file is a self-describing tree of named, typed
//! properties followed by a counted list of soldier records. Decoding is a
//! single forward pass over any `Read + Seek` source.
//!
//! # Modules
//! | Module | Purpose |
//! |--------|---------|
//! | [`reader`]   | Bounded primitive reads and the file magic gate |
//! | [`property`] | Property model, header dispatch, struct/array content |
//! | [`pool`]     | Domain records and root [`CharacterPool`] assembly |
//! | [`inspect`]  | Failure-tolerant summaries for upload workflows |
//!
//! ```no_run
//! let pool = cpool::CharacterPool::open("CharacterPool/Importable/Squad.bin")?;
//! for soldier in &pool.native_characters {
//!     println!("{} {}", soldier.first_name, soldier.last_name);
//! }
//! # Ok::<(), cpool::Error>(())
//! ```

pub mod error;
pub mod inspect;
pub mod pool;
pub mod property;
pub mod reader;
pub(crate) mod utils;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use pool::CharacterPool;
