use thiserror::Error;

/// Unified error type for the portfolio-valuation-core library.
///
/// The valuation algorithms themselves never fail; degenerate input resolves
/// to documented zero/empty values. Errors only come from boundary work:
/// parsing snapshots, exporting JSON, and validating settings.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Settings validation failed: {0}")]
    ValidationError(String),

    #[error("Unknown time range '{0}' (expected one of: 7d, 30d, 180d, 365d, all)")]
    InvalidTimeRange(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
