//! Output records produced by a compile batch.

use crate::interner::{InternResult, PathInterner};
use crate::types::PathId;
use std::path::{Path, PathBuf};

/// Association between a compiled source and its produced artifact.
///
/// The output root is interned: many records in one batch share the same
/// small set of root directories, so each record carries a [`PathId`]
/// instead of a copy of the root string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Interned output-root directory.
    pub output_root: PathId,
    /// Artifact path relative to the root, system-independent.
    pub relative_path: String,
    /// The source file this artifact was produced from.
    pub source: PathBuf,
}

impl OutputRecord {
    pub fn new(output_root: PathId, relative_path: impl Into<String>, source: PathBuf) -> Self {
        Self {
            output_root,
            relative_path: relative_path.into(),
            source,
        }
    }

    /// Rejoin the resolved root with the relative path.
    pub fn artifact_path(&self, interner: &PathInterner) -> InternResult<PathBuf> {
        let root = interner.resolve(self.output_root)?;
        Ok(Path::new(&root).join(&self.relative_path))
    }
}

/// Result of one compile batch.
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Records for files successfully produced.
    pub compiled: Vec<OutputRecord>,
    /// Inputs still requiring reprocessing. Errored files are terminal and
    /// never queued here; for the placeholder translator this stays empty.
    pub to_recompile: Vec<PathBuf>,
}

impl CompileReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compiled_count(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty() && self.to_recompile.is_empty()
    }
}

/// Path rendered with forward slashes regardless of platform, the form
/// output records store.
pub fn system_independent_name(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_rejoins_artifact_path() {
        let interner = PathInterner::new();
        let root = interner.intern("/project/out").unwrap();

        let record = OutputRecord::new(root, "Foo.java", PathBuf::from("/project/src/Foo.dummy"));

        assert_eq!(
            record.artifact_path(&interner).unwrap(),
            PathBuf::from("/project/out/Foo.java")
        );
    }

    #[test]
    fn test_records_share_interned_root() {
        let interner = PathInterner::new();
        let a = interner.intern("/project/out").unwrap();
        let b = interner.intern("/project/out").unwrap();

        let first = OutputRecord::new(a, "Foo.java", PathBuf::from("Foo.dummy"));
        let second = OutputRecord::new(b, "Bar.java", PathBuf::from("Bar.dummy"));

        assert_eq!(first.output_root, second.output_root);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn test_system_independent_name_is_forward_slashed() {
        let name = system_independent_name(Path::new("out").join("classes").as_path());
        assert_eq!(name, "out/classes");
    }

    #[test]
    fn test_empty_report() {
        let report = CompileReport::new();
        assert!(report.is_empty());
        assert_eq!(report.compiled_count(), 0);
        assert!(report.to_recompile.is_empty());
    }
}
