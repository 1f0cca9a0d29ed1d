//! Repository layer for help-center content.
//!
//! # Responsibility
//! - Provide admin-side persistence for FAQ and article tables.
//! - Isolate SQLite query details from services and search presentation.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Missing rows surface as `RepoError::NotFound`, not as silent no-ops.

use crate::db::DbError;
use crate::model::help::HelpValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod faq_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Which help table a repository error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTable {
    Faq,
    Article,
}

impl HelpTable {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Article => "article",
        }
    }
}

#[derive(Debug)]
pub enum RepoError {
    Validation(HelpValidationError),
    Db(DbError),
    NotFound { table: HelpTable, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "{} not found: {id}", table.as_str()),
            Self::InvalidData(message) => write!(f, "invalid persisted help data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<HelpValidationError> for RepoError {
    fn from(value: HelpValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
