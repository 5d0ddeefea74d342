//! Translating-compiler capability.
//!
//! A translator is a strategy behind one small interface: claim files by
//! suffix, produce an artifact per file, describe itself, and vouch for its
//! configuration. The orchestrating workflow picks the strategy; the only
//! one shipped here is the placeholder [`DummyTranslator`] that copies
//! bytes under a renamed suffix.

mod dummy;
mod output;

pub use dummy::DummyTranslator;
pub use output::{CompileReport, OutputRecord, system_independent_name};

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The set of candidate files offered to a translator in one batch.
#[derive(Debug, Clone, Default)]
pub struct CompileScope {
    files: Vec<PathBuf>,
}

impl CompileScope {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Immutable translator configuration.
///
/// Passed at construction instead of baked-in constants so tests can run
/// with alternate suffixes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslatorConfig {
    /// File-name suffix identifying sources this translator claims.
    #[serde(default = "default_recognized_suffix")]
    pub recognized_suffix: String,

    /// Suffix the artifact is written under.
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Human-readable identifying description.
    #[serde(default = "default_description")]
    pub description: String,
}

fn default_recognized_suffix() -> String {
    ".dummy".to_string()
}
fn default_output_suffix() -> String {
    ".java".to_string()
}
fn default_description() -> String {
    "dummy translator".to_string()
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            recognized_suffix: default_recognized_suffix(),
            output_suffix: default_output_suffix(),
            description: default_description(),
        }
    }
}

/// Errors from translating a single file. Recovered per file by the
/// workflow; never aborts the batch.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("cannot read source {path}: {source}")]
    SourceUnreadable { path: PathBuf, source: io::Error },

    #[error("cannot write artifact {path}: {source}")]
    ArtifactUnwritable { path: PathBuf, source: io::Error },

    #[error("source {path} does not carry the recognized suffix")]
    UnrecognizedSource { path: PathBuf },
}

pub type CompileResult<T> = Result<T, CompileError>;

/// The four operations every translator strategy provides.
pub trait TranslatingCompiler: Send + Sync {
    /// Whether this translator claims the given file.
    fn is_compilable(&self, path: &Path) -> bool;

    /// Translate one source into the output root, returning the artifact
    /// path. The output root is created if missing.
    fn compile_file(&self, source: &Path, output_root: &Path) -> CompileResult<PathBuf>;

    /// Human-readable identifying description.
    fn description(&self) -> &str;

    /// Whether the configuration is usable for the given scope.
    fn validate_configuration(&self, scope: &CompileScope) -> bool;
}
