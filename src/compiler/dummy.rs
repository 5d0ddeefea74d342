//! The placeholder translator: a suffix-renaming byte copy.

use crate::compiler::{
    CompileError, CompileResult, CompileScope, TranslatingCompiler, TranslatorConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Copies each claimed source into the output root, renaming the
/// recognized suffix to the output suffix. No parsing, no code generation.
#[derive(Debug)]
pub struct DummyTranslator {
    config: TranslatorConfig,
}

impl DummyTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Artifact file name for a claimed source, or None when the source
    /// does not carry the recognized suffix.
    fn artifact_name(&self, source: &Path) -> Option<String> {
        let name = source.file_name()?.to_str()?;
        let stem = name.strip_suffix(&self.config.recognized_suffix)?;
        Some(format!("{stem}{}", self.config.output_suffix))
    }
}

impl Default for DummyTranslator {
    fn default() -> Self {
        Self::new(TranslatorConfig::default())
    }
}

impl TranslatingCompiler for DummyTranslator {
    fn is_compilable(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&self.config.recognized_suffix))
    }

    fn compile_file(&self, source: &Path, output_root: &Path) -> CompileResult<PathBuf> {
        let artifact_name =
            self.artifact_name(source)
                .ok_or_else(|| CompileError::UnrecognizedSource {
                    path: source.to_path_buf(),
                })?;

        let bytes = fs::read(source).map_err(|e| CompileError::SourceUnreadable {
            path: source.to_path_buf(),
            source: e,
        })?;

        fs::create_dir_all(output_root).map_err(|e| CompileError::ArtifactUnwritable {
            path: output_root.to_path_buf(),
            source: e,
        })?;

        let artifact = output_root.join(artifact_name);
        fs::write(&artifact, bytes).map_err(|e| CompileError::ArtifactUnwritable {
            path: artifact.clone(),
            source: e,
        })?;

        Ok(artifact)
    }

    fn description(&self) -> &str {
        &self.config.description
    }

    fn validate_configuration(&self, _scope: &CompileScope) -> bool {
        let recognized = &self.config.recognized_suffix;
        let output = &self.config.output_suffix;
        recognized.starts_with('.') && output.starts_with('.') && recognized != output
    }
}
