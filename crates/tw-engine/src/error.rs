//! Error types for the resolution engine.

use thiserror::Error;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while resolving a roll.
///
/// All resolution-time errors surface synchronously to the caller; a failed
/// roll yields no result, not a degraded one. Inheritance depth truncation
/// is deliberately absent here — it degrades silently.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced table or template id does not exist in the document.
    #[error("unknown reference: \"{id}\"")]
    UnknownReference {
        /// The id that failed to resolve.
        id: String,
    },

    /// A candidate set has zero total weight — nothing can be selected.
    #[error("empty pool: table \"{table_id}\" has no selectable candidates")]
    EmptyPool {
        /// The table whose candidate pool was empty.
        table_id: String,
    },

    /// Recursive expansion exceeded the configured ceiling, which usually
    /// signals a cyclic reference.
    #[error("expansion depth limit exceeded at depth {depth}")]
    MaxExpansionDepth {
        /// The depth at which expansion was aborted.
        depth: usize,
    },
}
