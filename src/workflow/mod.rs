//! Batch compile orchestration.
//!
//! The workflow is a thin driver around the translator capability: filter
//! the scope, copy claimed files on a worker pool, intern each record's
//! output root, then tell the host about the produced artifacts. The host
//! collaborators (output-root mapping, diagnostic reporting, filesystem
//! refresh) are injected interfaces, not ambient framework calls.

pub mod diagnostics;
pub mod error;
pub mod refresh;
pub mod resolver;
pub mod walker;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, Severity};
pub use error::{WorkflowError, WorkflowResult};
pub use refresh::{FileRefresh, NoopRefresh, SyncRefresh};
pub use resolver::{FixedRootResolver, OutputResolver};
pub use walker::CandidateWalker;

use crate::compiler::{
    CompileReport, CompileScope, OutputRecord, TranslatingCompiler, system_independent_name,
};
use crate::interner::PathInterner;
use crate::{debug_event, log_event};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Drives one compilation session.
///
/// Owns the session's [`PathInterner`]; handles in the returned report
/// resolve against [`CompileWorkflow::interner`] until the workflow is
/// dropped.
pub struct CompileWorkflow {
    translator: Arc<dyn TranslatingCompiler>,
    resolver: Arc<dyn OutputResolver>,
    sink: Arc<dyn DiagnosticSink>,
    refresh: Arc<dyn FileRefresh>,
    interner: PathInterner,
    threads: usize,
}

impl CompileWorkflow {
    pub fn new(
        translator: Arc<dyn TranslatingCompiler>,
        resolver: Arc<dyn OutputResolver>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            translator,
            resolver,
            sink,
            refresh: Arc::new(NoopRefresh),
            interner: PathInterner::new(),
            threads: num_cpus::get(),
        }
    }

    pub fn with_refresh(mut self, refresh: Arc<dyn FileRefresh>) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// The session interner; resolves handles carried by this session's
    /// output records.
    pub fn interner(&self) -> &PathInterner {
        &self.interner
    }

    /// Run one batch over the scope.
    ///
    /// Per-file failures go to the diagnostic sink and the batch
    /// continues. The only fatal outcomes are interner exhaustion and a
    /// worker pool that cannot be built.
    pub fn run(&self, scope: &CompileScope) -> WorkflowResult<CompileReport> {
        if !self.translator.validate_configuration(scope) {
            self.sink.report(Diagnostic::error(
                format!(
                    "configuration rejected by {}",
                    self.translator.description()
                ),
                None,
            ));
            return Ok(CompileReport::new());
        }

        let candidates: Vec<PathBuf> = scope
            .files()
            .iter()
            .filter(|file| self.translator.is_compilable(file))
            .cloned()
            .collect();
        debug_event!(
            "compile",
            "matched",
            "{} of {} files in scope",
            candidates.len(),
            scope.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()?;
        let outcomes: Vec<Option<(OutputRecord, PathBuf)>> = pool.install(|| {
            candidates
                .par_iter()
                .map(|file| self.process_file(file))
                .collect::<WorkflowResult<_>>()
        })?;

        let mut report = CompileReport::new();
        let mut artifacts = Vec::new();
        for (record, artifact) in outcomes.into_iter().flatten() {
            report.compiled.push(record);
            artifacts.push(artifact);
        }

        self.refresh.refresh(&artifacts);
        log_event!(
            "compile",
            "finished",
            "{} artifacts produced by {}",
            report.compiled_count(),
            self.translator.description()
        );
        Ok(report)
    }

    /// Compile one file. Ok(None) means skipped (no output root) or failed
    /// with a diagnostic already reported.
    fn process_file(&self, file: &Path) -> WorkflowResult<Option<(OutputRecord, PathBuf)>> {
        let Some(output_root) = self.resolver.output_root(file) else {
            tracing::debug!("no output root for {}, skipping", file.display());
            return Ok(None);
        };

        match self.translator.compile_file(file, &output_root) {
            Ok(artifact) => {
                let root_id = self
                    .interner
                    .intern(&system_independent_name(&output_root))?;
                let relative = match artifact.strip_prefix(&output_root) {
                    Ok(rel) => system_independent_name(rel),
                    Err(_) => artifact
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                };
                let record = OutputRecord::new(root_id, relative, file.to_path_buf());
                Ok(Some((record, artifact)))
            }
            Err(e) => {
                self.sink
                    .report(Diagnostic::error(e.to_string(), Some(file.to_path_buf())));
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{DummyTranslator, TranslatorConfig};
    use std::fs;
    use tempfile::TempDir;

    struct NoRootResolver;

    impl OutputResolver for NoRootResolver {
        fn output_root(&self, _source: &Path) -> Option<PathBuf> {
            None
        }
    }

    fn workflow_to(out: &Path, sink: Arc<CollectingSink>) -> CompileWorkflow {
        CompileWorkflow::new(
            Arc::new(DummyTranslator::default()),
            Arc::new(FixedRootResolver::new(out)),
            sink,
        )
        .with_threads(2)
    }

    #[test]
    fn test_batch_shares_one_interned_root() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        for name in ["A.dummy", "B.dummy", "C.dummy"] {
            fs::write(temp.path().join(name), name).unwrap();
        }

        let sink = Arc::new(CollectingSink::new());
        let workflow = workflow_to(&out, Arc::clone(&sink));
        let scope = CompileScope::new(
            ["A.dummy", "B.dummy", "C.dummy"]
                .iter()
                .map(|n| temp.path().join(n))
                .collect(),
        );

        let report = workflow.run(&scope).unwrap();

        assert_eq!(report.compiled_count(), 3);
        assert!(sink.is_empty());
        // Three records, one distinct root string in the interner.
        assert_eq!(workflow.interner().len(), 1);
        let roots: Vec<_> = report.compiled.iter().map(|r| r.output_root).collect();
        assert!(roots.iter().all(|&root| root == roots[0]));
    }

    #[test]
    fn test_unclaimed_files_ignored_without_diagnostics() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::write(temp.path().join("Foo.dummy"), "hello").unwrap();
        fs::write(temp.path().join("Bar.txt"), "other").unwrap();

        let sink = Arc::new(CollectingSink::new());
        let workflow = workflow_to(&out, Arc::clone(&sink));
        let scope = CompileScope::new(vec![
            temp.path().join("Foo.dummy"),
            temp.path().join("Bar.txt"),
        ]);

        let report = workflow.run(&scope).unwrap();

        assert_eq!(report.compiled_count(), 1);
        assert!(sink.is_empty());
        assert!(!out.join("Bar.java").exists());
    }

    #[test]
    fn test_no_output_root_skips_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Foo.dummy"), "hello").unwrap();

        let sink = Arc::new(CollectingSink::new());
        let workflow = CompileWorkflow::new(
            Arc::new(DummyTranslator::default()),
            Arc::new(NoRootResolver),
            Arc::clone(&sink) as Arc<dyn DiagnosticSink>,
        );
        let scope = CompileScope::new(vec![temp.path().join("Foo.dummy")]);

        let report = workflow.run(&scope).unwrap();

        assert!(report.is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_invalid_configuration_reports_and_compiles_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Foo.dummy"), "hello").unwrap();

        let sink = Arc::new(CollectingSink::new());
        let translator = DummyTranslator::new(TranslatorConfig {
            recognized_suffix: ".dummy".to_string(),
            output_suffix: ".dummy".to_string(),
            description: "broken".to_string(),
        });
        let workflow = CompileWorkflow::new(
            Arc::new(translator),
            Arc::new(FixedRootResolver::new(temp.path().join("out"))),
            Arc::clone(&sink) as Arc<dyn DiagnosticSink>,
        );

        let report = workflow
            .run(&CompileScope::new(vec![temp.path().join("Foo.dummy")]))
            .unwrap();

        assert!(report.is_empty());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn test_errored_files_are_not_queued_for_recompilation() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        // Present in the scope but absent on disk: the copy fails.
        let missing = temp.path().join("Gone.dummy");

        let sink = Arc::new(CollectingSink::new());
        let workflow = workflow_to(&out, Arc::clone(&sink));

        let report = workflow
            .run(&CompileScope::new(vec![missing.clone()]))
            .unwrap();

        assert_eq!(report.compiled_count(), 0);
        assert!(report.to_recompile.is_empty());
        let diags = sink.drain();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].path.as_deref(), Some(missing.as_path()));
    }
}
