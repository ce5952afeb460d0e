//! Connection setup for the `SQLite` inventory store.

use crate::config::StoreConfig;
use crate::{Error, Result};
use rusqlite::Connection;

/// Wraps a `rusqlite` error with the name of the failing operation.
pub fn storage_error(operation: &str, e: &rusqlite::Error) -> Error {
    Error::StorageFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}

/// Applies pragmas and cache sizing from `config` to a fresh connection.
///
/// # Configuration Applied
///
/// - **`journal_mode`**: WAL or DELETE (in-memory databases keep `memory`,
///   which is logged rather than treated as an error)
/// - **`synchronous`**: NORMAL when `synchronous_normal` is set, FULL otherwise
/// - **`busy_timeout`**: how long to wait on a locked database
/// - **statement cache**: at least `min_statements` entries so the store's
///   prepared statements are never evicted
///
/// # Errors
///
/// Returns [`Error::StorageFailed`] if a pragma or the busy timeout cannot be
/// set.
pub fn configure_connection(
    conn: &Connection,
    config: &StoreConfig,
    min_statements: usize,
) -> Result<()> {
    // journal_mode answers with the mode in effect; in-memory databases keep
    // `memory` whatever was asked for.
    let journal_mode: String = conn
        .pragma_update_and_check(None, "journal_mode", config.journal_mode.as_str(), |row| {
            row.get(0)
        })
        .map_err(|e| storage_error("set_journal_mode", &e))?;
    if !journal_mode.eq_ignore_ascii_case(config.journal_mode.as_str()) {
        tracing::debug!(
            requested = config.journal_mode.as_str(),
            actual = %journal_mode,
            "journal mode not applied"
        );
    }

    let synchronous = if config.synchronous_normal {
        "NORMAL"
    } else {
        "FULL"
    };
    conn.pragma_update(None, "synchronous", synchronous)
        .map_err(|e| storage_error("set_synchronous", &e))?;

    conn.busy_timeout(config.busy_timeout)
        .map_err(|e| storage_error("set_busy_timeout", &e))?;
    conn.set_prepared_statement_cache_capacity(
        config.statement_cache_capacity.max(min_statements),
    );

    Ok(())
}
