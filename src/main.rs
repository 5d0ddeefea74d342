use anyhow::Context;
use clap::{Parser, Subcommand};
use mimic::compiler::CompileScope;
use mimic::config::{SETTINGS_FILE, Settings};
use mimic::workflow::{
    CandidateWalker, CollectingSink, CompileWorkflow, Diagnostic, DiagnosticSink, FixedRootResolver,
    Severity, SyncRefresh,
};
use mimic::{DummyTranslator, TranslatingCompiler};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mimic")]
#[command(version)]
#[command(about = "Placeholder translating compiler: copies recognized sources into an output root under a renamed suffix")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Compile files or directories into the output root
    Compile {
        /// Files or directories forming the compile scope
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output root directory (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Number of worker threads (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Sync produced artifacts to disk after the batch
        #[arg(long)]
        sync: bool,
    },

    /// Show current configuration
    Config,
}

#[derive(Serialize)]
struct JsonArtifact {
    source: PathBuf,
    artifact: PathBuf,
    output_root: String,
    relative_path: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    translator: &'a str,
    compiled: Vec<JsonArtifact>,
    diagnostics: &'a [Diagnostic],
}

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Init { force } => {
            Settings::init_file(Path::new(SETTINGS_FILE), force)
                .with_context(|| format!("failed to create {SETTINGS_FILE}"))?;
            println!("Created {SETTINGS_FILE}");
            Ok(0)
        }
        Commands::Config => {
            let settings = Settings::load().context("failed to load settings")?;
            print!("{}", settings.render());
            Ok(0)
        }
        Commands::Compile {
            paths,
            out_dir,
            threads,
            json,
            sync,
        } => {
            let settings = Settings::load().context("failed to load settings")?;
            mimic::logging::init_with_config(&settings.logging);
            compile(settings, paths, out_dir, threads, json, sync)
        }
    }
}

fn compile(
    settings: Settings,
    paths: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    threads: Option<usize>,
    json: bool,
    sync: bool,
) -> anyhow::Result<i32> {
    let settings = Arc::new(settings);
    let translator = Arc::new(DummyTranslator::new(settings.translator.clone()));
    let out_dir = out_dir.unwrap_or_else(|| settings.compile.out_dir.clone());
    let threads = threads.unwrap_or(settings.compile.parallel_threads);

    let scope = CompileScope::new(collect_scope(&settings, &paths, translator.as_ref()));

    let sink = Arc::new(CollectingSink::new());
    let mut workflow = CompileWorkflow::new(
        translator.clone(),
        Arc::new(FixedRootResolver::new(out_dir)),
        Arc::clone(&sink) as Arc<dyn DiagnosticSink>,
    )
    .with_threads(threads);
    if sync {
        workflow = workflow.with_refresh(Arc::new(SyncRefresh));
    }

    let report = workflow.run(&scope)?;
    let diagnostics = sink.drain();

    if json {
        let compiled = report
            .compiled
            .iter()
            .map(|record| {
                let interner = workflow.interner();
                Ok(JsonArtifact {
                    source: record.source.clone(),
                    artifact: record.artifact_path(interner)?,
                    output_root: interner.resolve(record.output_root)?,
                    relative_path: record.relative_path.clone(),
                })
            })
            .collect::<Result<Vec<_>, mimic::InternError>>()?;
        let rendered = serde_json::to_string_pretty(&JsonReport {
            translator: translator.description(),
            compiled,
            diagnostics: &diagnostics,
        })?;
        println!("{rendered}");
    } else {
        for diagnostic in &diagnostics {
            match &diagnostic.path {
                Some(path) => eprintln!(
                    "{}: {} ({})",
                    diagnostic.severity,
                    diagnostic.message,
                    path.display()
                ),
                None => eprintln!("{}: {}", diagnostic.severity, diagnostic.message),
            }
        }
        for record in &report.compiled {
            println!(
                "{} -> {}",
                record.source.display(),
                record.artifact_path(workflow.interner())?.display()
            );
        }
        println!(
            "Compiled {} of {} files in scope",
            report.compiled_count(),
            scope.len()
        );
    }

    let failed = diagnostics
        .iter()
        .any(|diagnostic| diagnostic.severity == Severity::Error);
    Ok(if failed { 1 } else { 0 })
}

/// Expand the command-line paths into scope files: directories are walked
/// for claimed candidates, explicit files enter the scope as given.
fn collect_scope(
    settings: &Arc<Settings>,
    paths: &[PathBuf],
    translator: &dyn TranslatingCompiler,
) -> Vec<PathBuf> {
    let walker = CandidateWalker::new(Arc::clone(settings));
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(walker.walk(path, translator));
        } else {
            files.push(path.clone());
        }
    }
    files
}
