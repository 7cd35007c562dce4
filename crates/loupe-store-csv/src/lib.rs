//! CSV backend for the Loupe design table.
//!
//! One flat file, one record per line. The store keeps an in-memory index of
//! rows and sources so de-duplication never rescans the file, and serialises
//! every operation through a single async mutex.

pub mod codec;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{CsvStore, DEFAULT_STATS_TABLES, DEFAULT_TABLE_FILE};
