//! Error types for planforge

use thiserror::Error;

/// Main error type for planforge operations
#[derive(Debug, Error)]
pub enum PlanforgeError {
    /// Error in solver configuration, detected when a phase starts
    #[error("Configuration error: {0}")]
    Config(String),

    /// Applying a move and then its undo move did not restore the score
    #[error(
        "Undo move corruption: after undoing ({move_repr}) the score is ({actual}) \
         but it was ({expected}) before the move"
    )]
    UndoMoveCorrupted {
        move_repr: String,
        expected: String,
        actual: String,
    },

    /// A partition's search thread failed
    #[error("The partition child thread with partition index ({partition_index}) has failed")]
    PartitionFailed {
        partition_index: usize,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias for planforge operations
pub type Result<T> = std::result::Result<T, PlanforgeError>;
