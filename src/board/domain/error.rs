//! Error types for board domain validation and parsing.

use super::{ConfigItemId, ConfigKind};
use thiserror::Error;

/// Errors returned while constructing or mutating domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// A required classification field was not selected.
    #[error("task is missing its {0} classification")]
    MissingClassification(ConfigKind),

    /// The status is designated by an app-config role pointer.
    #[error("status {0} is designated as a special status and cannot be deleted")]
    StatusPinned(ConfigItemId),

    /// The status is still referenced by one or more tasks.
    #[error("status {id} is referenced by {tasks} task(s) and cannot be deleted")]
    StatusInUse {
        /// Identifier of the referenced status.
        id: ConfigItemId,
        /// Number of tasks referencing it.
        tasks: usize,
    },
}

/// Error returned while parsing config collection names from storage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown config collection: {0}")]
pub struct ParseConfigKindError(pub String);
