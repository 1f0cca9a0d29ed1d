//! Help-center SQLite storage: connection bootstrap and schema versioning.
//!
//! # Invariants
//! - `help_faqs` and `help_articles` exist on every connection handed out by this module.
//! - The schema version lives in `PRAGMA user_version`; a database from a newer
//!   binary is refused rather than read with a stale layout.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a binary with more help-schema migrations.
    SchemaTooNew { found: u32, supported: u32 },
    /// One migration script failed; nothing from the batch was committed.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "help schema version {found} is newer than this build supports ({supported})"
            ),
            Self::Migration {
                version,
                name,
                source,
            } => write!(f, "help schema migration {version} ({name}) failed: {source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
