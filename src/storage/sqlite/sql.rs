//! SQL text for the inventory table.

/// Creates the inventory table if it does not exist.
pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS inventories (
    id BLOB(16) PRIMARY KEY,
    inventory_data BLOB NOT NULL
)";

/// Inserts a record: `?1` id, `?2` blob.
pub const INSERT: &str = "INSERT INTO inventories (id, inventory_data) VALUES (?1, ?2)";

/// Selects the blob for `?1`.
pub const SELECT_BY_ID: &str = "SELECT inventory_data FROM inventories WHERE id = ?1";

/// Replaces the blob of `?2` with `?1`.
pub const UPDATE_BY_ID: &str = "UPDATE inventories SET inventory_data = ?1 WHERE id = ?2";

/// Deletes the record `?1`.
pub const DELETE_BY_ID: &str = "DELETE FROM inventories WHERE id = ?1";

/// Statements kept prepared for the lifetime of a store.
pub const PREPARED: [&str; 4] = [INSERT, SELECT_BY_ID, UPDATE_BY_ID, DELETE_BY_ID];

/// Counts records.
pub const COUNT: &str = "SELECT COUNT(*) FROM inventories";

/// Checks for a record without loading its blob.
pub const EXISTS_BY_ID: &str = "SELECT 1 FROM inventories WHERE id = ?1";
