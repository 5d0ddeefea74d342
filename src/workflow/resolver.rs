//! Output-root resolution capability.
//!
//! The host build system owns the mapping from a source file to the
//! directory its artifacts belong in. The workflow only consumes it.

use std::path::{Path, PathBuf};

/// Maps a source file to its output-root directory.
pub trait OutputResolver: Send + Sync {
    /// The output root for `source`, or None when the host maps the file
    /// to no output directory. Files without a root are skipped.
    fn output_root(&self, source: &Path) -> Option<PathBuf>;
}

/// Resolver that maps every source to one fixed directory. What the CLI
/// uses; stands in for a per-module mapping.
#[derive(Debug, Clone)]
pub struct FixedRootResolver {
    root: PathBuf,
}

impl FixedRootResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputResolver for FixedRootResolver {
    fn output_root(&self, _source: &Path) -> Option<PathBuf> {
        Some(self.root.clone())
    }
}
