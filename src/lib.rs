pub mod compiler;
pub mod config;
pub mod interner;
pub mod logging;
pub mod types;
pub mod workflow;

pub use compiler::{
    CompileError, CompileReport, CompileResult, CompileScope, DummyTranslator, OutputRecord,
    TranslatingCompiler, TranslatorConfig,
};
pub use config::Settings;
pub use interner::{InternError, InternResult, PathInterner};
pub use types::PathId;
pub use workflow::{
    CandidateWalker, CollectingSink, CompileWorkflow, Diagnostic, DiagnosticSink,
    FixedRootResolver, OutputResolver, Severity,
};
