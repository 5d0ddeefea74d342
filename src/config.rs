//! Configuration for the translating-compiler workflow.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `MIMIC_` and use double
//! underscores to separate nested levels:
//! - `MIMIC_COMPILE__PARALLEL_THREADS=8` sets `compile.parallel_threads`
//! - `MIMIC_TRANSLATOR__RECOGNIZED_SUFFIX=.tpl` sets `translator.recognized_suffix`

use crate::compiler::TranslatorConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Default location of the settings file, relative to the working
/// directory.
pub const SETTINGS_FILE: &str = ".mimic/settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Workspace root directory (where .mimic is located)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Translator strategy configuration
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Compile batch configuration
    #[serde(default)]
    pub compile: CompileConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CompileConfig {
    /// Number of parallel worker threads for the copy batch
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,

    /// Output root directory artifacts are produced into
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Patterns to ignore during candidate discovery
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

/// Log levels per module, plus the default level.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Default level for everything not listed in `modules`
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module level overrides
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_false() -> bool {
    false
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            debug: false,
            translator: TranslatorConfig::default(),
            compile: CompileConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
            out_dir: default_out_dir(),
            ignore_patterns: vec![
                "target/**".to_string(),
                "node_modules/**".to_string(),
                ".git/**".to_string(),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default file location, layered with
    /// environment overrides.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Load settings from a specific TOML file, layered with environment
    /// overrides. A missing file falls through to defaults.
    pub fn load_from(path: &Path) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MIMIC_").split("__"))
            .extract()
    }

    /// Write the default settings file. Refuses to overwrite unless
    /// `force` is set.
    pub fn init_file(path: &Path, force: bool) -> io::Result<()> {
        if path.exists() && !force {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to overwrite)", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(&Settings::default())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, rendered)
    }

    /// Effective settings rendered as TOML, for the `config` command.
    pub fn render(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.version, 1);
        assert_eq!(settings.translator.recognized_suffix, ".dummy");
        assert_eq!(settings.translator.output_suffix, ".java");
        assert_eq!(settings.compile.out_dir, PathBuf::from("out"));
        assert_eq!(settings.logging.default, "warn");
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("settings.toml");
        std::fs::write(
            &file,
            r#"
version = 2

[compile]
parallel_threads = 3
out_dir = "build/artifacts"

[translator]
recognized_suffix = ".tpl"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&file).unwrap();

        assert_eq!(settings.version, 2);
        assert_eq!(settings.compile.parallel_threads, 3);
        assert_eq!(settings.compile.out_dir, PathBuf::from("build/artifacts"));
        assert_eq!(settings.translator.recognized_suffix, ".tpl");
        // Untouched keys keep their defaults.
        assert_eq!(settings.translator.output_suffix, ".java");
    }

    #[test]
    fn test_missing_file_falls_through_to_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(settings.version, 1);
    }

    #[test]
    fn test_init_file_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join(".mimic/settings.toml");

        Settings::init_file(&file, false).unwrap();
        assert!(file.exists());

        let err = Settings::init_file(&file, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

        // --force path succeeds.
        Settings::init_file(&file, true).unwrap();
    }

    #[test]
    fn test_render_round_trips() {
        let settings = Settings::default();
        let rendered = settings.render();
        assert!(rendered.contains("version = 1"));
        assert!(rendered.contains("[translator]"));
        assert!(rendered.contains("[compile]"));
        assert!(rendered.contains("[logging]"));
    }
}
