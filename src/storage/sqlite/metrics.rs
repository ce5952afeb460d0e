//! Metrics recording for the `SQLite` inventory store.

use std::time::Instant;

/// Backend label attached to every sample.
const BACKEND: &str = "sqlite";

/// Outcome label of one store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    /// The operation succeeded and its record existed.
    Success,
    /// The operation succeeded but no record had the identifier.
    NotFound,
    /// The operation returned an error.
    Error,
}

impl OperationStatus {
    /// Classifies an outcome. `found` is ignored for failed operations.
    #[must_use]
    pub const fn from_outcome(ok: bool, found: bool) -> Self {
        match (ok, found) {
            (false, _) => Self::Error,
            (true, false) => Self::NotFound,
            (true, true) => Self::Success,
        }
    }

    /// Returns the label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

/// Records one store operation.
///
/// Emits `storage_operations_total` (counter) and
/// `storage_operation_duration_ms` (histogram), both labelled with backend,
/// operation and status. Without an installed `metrics` recorder both are
/// no-ops.
pub fn record_operation_metrics(operation: &'static str, start: Instant, status: OperationStatus) {
    let labels = [
        ("backend", BACKEND),
        ("operation", operation),
        ("status", status.as_str()),
    ];
    metrics::counter!("storage_operations_total", &labels).increment(1);
    metrics::histogram!("storage_operation_duration_ms", &labels)
        .record(start.elapsed().as_secs_f64() * 1000.0);
}
