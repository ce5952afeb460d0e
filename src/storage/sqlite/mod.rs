//! Shared `SQLite` infrastructure for the inventory store.
//!
//! - [`connection`]: pragma configuration and error wrapping
//! - [`sql`]: statement text
//! - [`metrics`]: operation metrics

mod connection;
mod metrics;
pub mod sql;

pub use connection::{configure_connection, storage_error};
pub use metrics::{OperationStatus, record_operation_metrics};
