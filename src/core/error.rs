//! Error types for grass authoring

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A removal set was computed against a store revision that has since changed.
    #[error("Stale selection: computed at revision {selected}, store is at revision {current}")]
    StaleSelection { selected: u64, current: u64 },

    #[error("Point index {index} out of bounds (store holds {len} points)")]
    IndexOutOfBounds { index: usize, len: usize },
}
