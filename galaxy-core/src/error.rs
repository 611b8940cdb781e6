/// Error types for the galaxy core
use thiserror::Error;

/// Result type for galaxy operations
pub type Result<T> = std::result::Result<T, GalaxyError>;

/// Errors raised around generation. Generating a buffer never fails; these
/// cover slot misuse and preset loading.
#[derive(Error, Debug)]
pub enum GalaxyError {
    #[error("slot already holds generation {generation}; release it before acquiring")]
    SlotOccupied { generation: u64 },

    #[error("invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),

    #[error("preset line {line}: {message}")]
    Preset { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
