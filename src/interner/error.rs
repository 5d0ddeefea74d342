//! Error types for the path interner.

use thiserror::Error;

/// Errors from interner operations.
#[derive(Error, Debug)]
pub enum InternError {
    /// The trie ran out of representable node or handle ids. Fatal: the
    /// session cannot intern further paths and the batch must abort.
    #[error("path interner exhausted its id space after {interned} entries")]
    ResourceExhausted { interned: usize },

    /// The handle was not issued by this interner instance. A correct
    /// caller never triggers this; detection is best-effort.
    #[error("unknown path handle {handle}")]
    InvalidHandle { handle: u32 },
}

pub type InternResult<T> = Result<T, InternError>;
