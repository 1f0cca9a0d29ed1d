//! Versioned help-center schema scripts.
//!
//! Every pending script runs inside one transaction; `user_version` is bumped
//! after each script so a committed batch always leaves the latest version.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "help_faqs",
        sql: include_str!("0001_help_faqs.sql"),
    },
    Migration {
        version: 2,
        name: "help_articles",
        sql: include_str!("0002_help_articles.sql"),
    },
];

/// Highest schema version this build knows how to create.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Versions that `apply_migrations` would run on this connection, in order.
pub fn pending_versions(conn: &Connection) -> DbResult<Vec<u32>> {
    let found = checked_version(conn)?;
    Ok(MIGRATIONS
        .iter()
        .map(|migration| migration.version)
        .filter(|version| *version > found)
        .collect())
}

/// Brings the help schema up to [`latest_version`].
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
/// - `DbError::Migration` naming the failing script; the batch is rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = checked_version(conn)?;
    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        run_migration(&tx, migration)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from={found} to={}",
        latest_version()
    );
    Ok(())
}

fn run_migration(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    tx.execute_batch(migration.sql)
        .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
        .map_err(|source| {
            error!(
                "event=db_migrate module=db status=error version={} name={} error={source}",
                migration.version, migration.name
            );
            DbError::Migration {
                version: migration.version,
                name: migration.name,
                source,
            }
        })
}

fn checked_version(conn: &Connection) -> DbResult<u32> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }
    Ok(found)
}
