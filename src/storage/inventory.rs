//! `SQLite`-backed inventory store.
//!
//! Inventories are kept in a single table of `(id BLOB(16), inventory_data BLOB)`
//! rows. The store owns one connection for its whole life; the insert, select,
//! update and delete statements are prepared into the connection's statement
//! cache at open and reused by every call.

use super::sqlite::{
    OperationStatus, configure_connection, record_operation_metrics, sql, storage_error,
};
use crate::config::StoreConfig;
use crate::host::{ContainerFactory, Host};
use crate::models::InventoryId;
use crate::serializer;
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::instrument;

/// Persistent inventory store.
///
/// The store is a single-owner session: writes take `&mut self` and the type
/// is not `Sync`. Callers sharing one store between threads must wrap it in a
/// mutex, or open one store per owner.
///
/// After [`InventoryStore::close`] every method fails with
/// [`Error::StoreClosed`].
pub struct InventoryStore<H: Host> {
    /// `None` once closed.
    conn: Option<Connection>,
    db_path: PathBuf,
    host: H,
}

/// Database statistics for the inventory store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryDbStats {
    /// Number of stored inventories.
    pub inventory_count: u64,
    /// Total database size in bytes.
    pub db_size_bytes: u64,
}

impl<H: Host> InventoryStore<H> {
    /// Opens (or creates) the store at `db_path` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageFailed`] if the database cannot be opened or
    /// initialized.
    pub fn open(db_path: impl Into<PathBuf>, host: H) -> Result<Self> {
        let config = StoreConfig::default().with_db_path(db_path);
        Self::open_with_config(&config, host)
    }

    /// Opens (or creates) the store described by `config`.
    ///
    /// Creates missing parent directories and the inventory table, then
    /// prepares the store's statements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageFailed`] if the database cannot be opened or
    /// initialized. Anything acquired before the failure is released.
    pub fn open_with_config(config: &StoreConfig, host: H) -> Result<Self> {
        if let Some(parent) = config
            .db_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::StorageFailed {
                operation: "create_inventory_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        let conn = Connection::open(&config.db_path)
            .map_err(|e| storage_error("open_inventory_db", &e))?;

        Self::initialize(conn, config.db_path.clone(), config, host)
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageFailed`] if the database cannot be initialized.
    pub fn in_memory(host: H) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| storage_error("open_inventory_db_memory", &e))?;

        Self::initialize(conn, PathBuf::from(":memory:"), &StoreConfig::default(), host)
    }

    /// Configures the connection, ensures the schema and prepares statements.
    fn initialize(
        conn: Connection,
        db_path: PathBuf,
        config: &StoreConfig,
        host: H,
    ) -> Result<Self> {
        configure_connection(&conn, config, sql::PREPARED.len())?;

        conn.execute(sql::CREATE_TABLE, [])
            .map_err(|e| storage_error("create_inventories_table", &e))?;

        for statement in sql::PREPARED {
            conn.prepare_cached(statement)
                .map_err(|e| storage_error("prepare_statement", &e))?;
        }

        tracing::debug!(path = %db_path.display(), "inventory store opened");

        Ok(Self {
            conn: Some(conn),
            db_path,
            host,
        })
    }

    /// Returns the open connection.
    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(Error::StoreClosed)
    }

    /// Returns the database path (`:memory:` for in-memory stores).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Returns `true` until [`InventoryStore::close`] is called.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Returns the host collaborators.
    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host collaborators for modification.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Saves a new inventory and returns its generated identifier.
    ///
    /// The container is not modified. Nothing is written if encoding fails.
    ///
    /// # Errors
    ///
    /// - [`Error::StoreClosed`] after close
    /// - [`Error::Encoding`] if the container or title cannot be encoded
    /// - [`Error::StorageFailed`] if the insert fails
    #[instrument(skip_all, fields(title = %title))]
    pub fn create(&mut self, container: &H::Container, title: &str) -> Result<InventoryId> {
        let start = Instant::now();
        let result = self.insert(container, title);
        let status = OperationStatus::from_outcome(result.is_ok(), true);
        record_operation_metrics("create", start, status);
        result
    }

    /// Saves a new inventory under its kind's default title.
    ///
    /// # Errors
    ///
    /// See [`InventoryStore::create`].
    pub fn create_with_default_title(&mut self, container: &H::Container) -> Result<InventoryId> {
        let title = self.host.container_factory().default_title(container);
        self.create(container, &title)
    }

    fn insert(&self, container: &H::Container, title: &str) -> Result<InventoryId> {
        let conn = self.conn()?;
        let blob = serializer::encode(container, title, self.host.item_codec())?;

        let id = InventoryId::generate();
        let key = id.to_bytes();
        let mut stmt = conn
            .prepare_cached(sql::INSERT)
            .map_err(|e| storage_error("prepare_insert_inventory", &e))?;
        stmt.execute(params![&key[..], &blob])
            .map_err(|e| storage_error("insert_inventory", &e))?;

        tracing::debug!(inventory_id = %id, bytes = blob.len(), "inventory created");
        Ok(id)
    }

    /// Loads an inventory.
    ///
    /// Returns `Ok(None)` if no inventory has this identifier. Each call
    /// builds a fresh container.
    ///
    /// # Errors
    ///
    /// - [`Error::StoreClosed`] after close
    /// - [`Error::Decoding`] if the stored blob is corrupt
    /// - [`Error::StorageFailed`] if the query fails
    #[instrument(skip_all, fields(inventory_id = %id))]
    pub fn read(&self, id: InventoryId) -> Result<Option<H::Container>> {
        let start = Instant::now();
        let result = self.fetch(id);
        let found = matches!(result, Ok(Some(_)));
        let status = OperationStatus::from_outcome(result.is_ok(), found);
        record_operation_metrics("read", start, status);
        result
    }

    fn fetch(&self, id: InventoryId) -> Result<Option<H::Container>> {
        let conn = self.conn()?;
        let key = id.to_bytes();
        let mut stmt = conn
            .prepare_cached(sql::SELECT_BY_ID)
            .map_err(|e| storage_error("prepare_select_inventory", &e))?;
        let blob: Option<Vec<u8>> = stmt
            .query_row(params![&key[..]], |row| row.get(0))
            .optional()
            .map_err(|e| storage_error("select_inventory", &e))?;

        let Some(blob) = blob else {
            tracing::debug!("inventory not found");
            return Ok(None);
        };

        let decoded = serializer::decode(&blob, self.host.item_codec())?;
        Ok(Some(decoded.into_container(
            self.host.holder_directory(),
            self.host.container_factory(),
        )))
    }

    /// Replaces a stored inventory.
    ///
    /// Returns `Ok(false)` if no inventory has this identifier. Nothing is
    /// written if encoding fails.
    ///
    /// # Errors
    ///
    /// - [`Error::StoreClosed`] after close
    /// - [`Error::Encoding`] if the container or title cannot be encoded
    /// - [`Error::StorageFailed`] if the update fails
    #[instrument(skip_all, fields(inventory_id = %id, title = %title))]
    pub fn update(
        &mut self,
        id: InventoryId,
        container: &H::Container,
        title: &str,
    ) -> Result<bool> {
        let start = Instant::now();
        let result = self.replace(id, container, title);
        let found = matches!(result, Ok(true));
        let status = OperationStatus::from_outcome(result.is_ok(), found);
        record_operation_metrics("update", start, status);
        result
    }

    /// Replaces a stored inventory, using its kind's default title.
    ///
    /// # Errors
    ///
    /// See [`InventoryStore::update`].
    pub fn update_with_default_title(
        &mut self,
        id: InventoryId,
        container: &H::Container,
    ) -> Result<bool> {
        let title = self.host.container_factory().default_title(container);
        self.update(id, container, &title)
    }

    fn replace(&self, id: InventoryId, container: &H::Container, title: &str) -> Result<bool> {
        let conn = self.conn()?;
        let blob = serializer::encode(container, title, self.host.item_codec())?;

        let key = id.to_bytes();
        let mut stmt = conn
            .prepare_cached(sql::UPDATE_BY_ID)
            .map_err(|e| storage_error("prepare_update_inventory", &e))?;
        let changed = stmt
            .execute(params![&blob, &key[..]])
            .map_err(|e| storage_error("update_inventory", &e))?;

        tracing::debug!(changed, bytes = blob.len(), "inventory update executed");
        Ok(changed > 0)
    }

    /// Deletes a stored inventory.
    ///
    /// Returns `Ok(false)` if no inventory has this identifier.
    ///
    /// # Errors
    ///
    /// - [`Error::StoreClosed`] after close
    /// - [`Error::StorageFailed`] if the delete fails
    #[instrument(skip_all, fields(inventory_id = %id))]
    pub fn delete(&mut self, id: InventoryId) -> Result<bool> {
        let start = Instant::now();
        let result = self.remove(id);
        let found = matches!(result, Ok(true));
        let status = OperationStatus::from_outcome(result.is_ok(), found);
        record_operation_metrics("delete", start, status);
        result
    }

    fn remove(&self, id: InventoryId) -> Result<bool> {
        let conn = self.conn()?;
        let key = id.to_bytes();
        let mut stmt = conn
            .prepare_cached(sql::DELETE_BY_ID)
            .map_err(|e| storage_error("prepare_delete_inventory", &e))?;
        let changed = stmt
            .execute(params![&key[..]])
            .map_err(|e| storage_error("delete_inventory", &e))?;

        tracing::debug!(changed, "inventory delete executed");
        Ok(changed > 0)
    }

    /// Returns `true` if an inventory with this identifier is stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] after close or [`Error::StorageFailed`]
    /// if the query fails.
    pub fn contains(&self, id: InventoryId) -> Result<bool> {
        let conn = self.conn()?;
        let key = id.to_bytes();
        conn.query_row(sql::EXISTS_BY_ID, params![&key[..]], |_| Ok(()))
            .optional()
            .map(|row| row.is_some())
            .map_err(|e| storage_error("contains_inventory", &e))
    }

    /// Returns the number of stored inventories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] after close or [`Error::StorageFailed`]
    /// if the query fails.
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row(sql::COUNT, [], |row| row.get(0))
            .map_err(|e| storage_error("count_inventories", &e))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Returns database statistics for monitoring.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] after close or [`Error::StorageFailed`]
    /// if a query fails.
    pub fn stats(&self) -> Result<InventoryDbStats> {
        let inventory_count = self.count()?;
        let conn = self.conn()?;

        let page_count: i64 = conn
            .pragma_query_value(None, "page_count", |row| row.get(0))
            .map_err(|e| storage_error("page_count", &e))?;
        let page_size: i64 = conn
            .pragma_query_value(None, "page_size", |row| row.get(0))
            .map_err(|e| storage_error("page_size", &e))?;

        Ok(InventoryDbStats {
            inventory_count,
            db_size_bytes: u64::try_from(page_count.saturating_mul(page_size)).unwrap_or(0),
        })
    }

    /// Releases the prepared statements and then the connection.
    ///
    /// The connection is released even when closing it reports an error; the
    /// error is returned. Every later call, including a second `close`, fails
    /// with [`Error::StoreClosed`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreClosed`] if already closed, or
    /// [`Error::StorageFailed`] if `SQLite` reports an error while closing.
    pub fn close(&mut self) -> Result<()> {
        let conn = self.conn.take().ok_or(Error::StoreClosed)?;
        conn.flush_prepared_statement_cache();

        finish_close(&self.db_path, conn.close())
    }
}

/// Logs the outcome of closing a connection. A connection handed back by a
/// failed close is dropped here.
fn finish_close(
    db_path: &Path,
    outcome: std::result::Result<(), (Connection, rusqlite::Error)>,
) -> Result<()> {
    match outcome {
        Ok(()) => {
            tracing::debug!(path = %db_path.display(), "inventory store closed");
            Ok(())
        },
        Err((conn, e)) => {
            tracing::warn!(
                path = %db_path.display(),
                error = %e,
                "closing inventory store failed, dropping connection"
            );
            drop(conn);
            Err(storage_error("close_inventory_db", &e))
        },
    }
}
