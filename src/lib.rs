// EcmaScript2015 to JS translation through an embedded transpiler

pub mod asset;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod logging;
pub mod options;
pub mod translator;
pub mod vfs;

#[cfg(test)]
mod test_support;

pub use asset::{Asset, AssetTypeCode};
pub use compiler::{CompileOutcome, CompileOutput, Compiler, ReportedError, TranspilerLibrary};
pub use config::Settings;
pub use engine::{EngineFactory, EngineSwitcher, ScriptEngine};
pub use error::{CompileError, ConfigError, EngineError, TranslationError, VfsError};
pub use handler::DebugAssetHandler;
pub use options::{CompilationOptions, SourceMapMode};
pub use translator::Es2015Translator;
pub use vfs::{MemoryFileSystem, PhysicalFileSystem, VirtualFileSystem};
