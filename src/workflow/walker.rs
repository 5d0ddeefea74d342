//! Candidate discovery for directory scopes.
//!
//! Walks a directory tree and surfaces the files the translator claims,
//! with support for:
//! - .gitignore rules
//! - Custom ignore patterns from configuration
//! - Hidden file handling

use crate::compiler::TranslatingCompiler;
use crate::config::Settings;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Walks directories to find files for the compile scope.
pub struct CandidateWalker {
    settings: Arc<Settings>,
}

impl CandidateWalker {
    /// Create a new walker with the given settings.
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Walk a directory and return an iterator of files the translator
    /// claims.
    pub fn walk<'a>(
        &self,
        root: &Path,
        translator: &'a dyn TranslatingCompiler,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        let mut builder = WalkBuilder::new(root);

        builder
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .max_depth(None)
            .require_git(false); // Allow gitignore to work in non-git directories

        // Add custom ignore patterns using overrides
        let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
        for pattern in &self.settings.compile.ignore_patterns {
            // Add as exclusion pattern (prefix with !)
            if let Err(e) = override_builder.add(&format!("!{pattern}")) {
                tracing::warn!("invalid ignore pattern '{pattern}': {e}");
            }
        }
        if let Ok(overrides) = override_builder.build() {
            builder.overrides(overrides);
        }

        builder
            .build()
            .filter_map(Result::ok) // Skip files we can't access
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(move |entry| {
                let path = entry.path();

                // Skip hidden files (files starting with .)
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if name.starts_with('.') {
                        return None;
                    }
                }

                if translator.is_compilable(path) {
                    Some(path.to_path_buf())
                } else {
                    None
                }
            })
    }

    /// Count files that would enter the scope (useful for dry runs)
    pub fn count_files(&self, root: &Path, translator: &dyn TranslatingCompiler) -> usize {
        self.walk(root, translator).count()
    }
}
