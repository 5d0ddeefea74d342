//! Error types for the compile workflow.

use crate::interner::InternError;
use thiserror::Error;

/// Fatal workflow failures. Per-file compile errors are not here: they go
/// to the diagnostic sink and the batch continues.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The session interner gave out; no further output records can be
    /// built, so the batch aborts.
    #[error("interner failure: {0}")]
    Intern(#[from] InternError),

    #[error("failed to build compile thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
