// Compiler adapter - drives the transpiler inside a scripting engine

pub mod diagnostics;
pub mod envelope;

pub use envelope::{CompileEnvelope, CompileOutcome, CompileOutput, ReportedError};

use crate::engine::{EngineFactory, ScriptEngine};
use crate::error::CompileError;
use crate::options::CompilationOptions;
use parking_lot::Mutex;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

const HELPER_NAME: &str = "es2015-transpiler-helper.js";
const HELPER_SOURCE: &str = include_str!("helper.js");
const COMPILE_FUNCTION: &str = "es2015TranspilerHelper.compile";

/// Source of the transpiler library loaded into each engine
#[derive(Debug, Clone)]
pub struct TranspilerLibrary {
    name: String,
    source: Arc<str>,
}

impl TranspilerLibrary {
    /// Wrap library source already in memory
    pub fn new(name: impl Into<String>, source: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Read the library from disk
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

struct CompilerState {
    engine: Option<Box<dyn ScriptEngine>>,
    initialized: bool,
    disposed: bool,
}

/// Adapter around one engine instance running the transpiler
///
/// The engine is created on first use and owned exclusively by the
/// compiler. Calls are serialized by a mutex, so a `Compiler` can be shared
/// between threads but never runs two compilations at once.
pub struct Compiler {
    create_engine: EngineFactory,
    library: TranspilerLibrary,
    default_options: String,
    state: Mutex<CompilerState>,
}

impl Compiler {
    /// Create a compiler without default options
    pub fn new(create_engine: EngineFactory, library: TranspilerLibrary) -> Self {
        Self::with_options(create_engine, library, None)
    }

    /// Create a compiler whose calls default to `options`
    pub fn with_options(
        create_engine: EngineFactory,
        library: TranspilerLibrary,
        options: Option<CompilationOptions>,
    ) -> Self {
        let default_options = options
            .map(|o| o.to_wire_format().to_string())
            .unwrap_or_else(|| Value::Null.to_string());

        Self {
            create_engine,
            library,
            default_options,
            state: Mutex::new(CompilerState {
                engine: None,
                initialized: false,
                disposed: false,
            }),
        }
    }

    /// Create the engine and load the transpiler and helper into it
    ///
    /// Only the first successful call does any work. `compile` calls this
    /// implicitly.
    pub fn initialize(&self) -> Result<(), CompileError> {
        let mut state = self.state.lock();
        self.ensure_initialized(&mut state)
    }

    fn ensure_initialized(&self, state: &mut CompilerState) -> Result<(), CompileError> {
        if state.disposed {
            return Err(CompileError::Disposed);
        }
        if state.initialized {
            return Ok(());
        }

        // A failed load leaves no half-initialized engine behind
        let mut engine = match state.engine.take() {
            Some(engine) => engine,
            None => (self.create_engine)()?,
        };
        engine.execute(self.library.source(), self.library.name())?;
        engine.execute(HELPER_SOURCE, HELPER_NAME)?;

        tracing::debug!(
            engine = engine.name(),
            library = self.library.name(),
            "Initialized transpiler"
        );

        state.engine = Some(engine);
        state.initialized = true;
        Ok(())
    }

    /// Run one compilation and classify its result
    ///
    /// `Err` is reserved for a disposed compiler or an engine that could
    /// not be set up; everything the call itself produces is an outcome.
    pub fn transpile(
        &self,
        content: &str,
        options: Option<&CompilationOptions>,
    ) -> Result<CompileOutcome, CompileError> {
        let options_json = options
            .map(|o| o.to_wire_format().to_string())
            .unwrap_or_else(|| self.default_options.clone());
        let content_json = Value::String(content.to_string()).to_string();
        let expression = format!("{}({}, {});", COMPILE_FUNCTION, content_json, options_json);

        let mut state = self.state.lock();
        self.ensure_initialized(&mut state)?;
        let engine = state.engine.as_mut().ok_or(CompileError::Disposed)?;

        let outcome = match engine.evaluate(&expression) {
            Ok(raw) => CompileOutcome::from_json(&raw),
            Err(e) => CompileOutcome::EngineFault(e.to_string()),
        };
        Ok(outcome)
    }

    /// Compile `content`, returning the translated code
    ///
    /// `path` is only used in error messages. Explicit `options` override
    /// the compiler's defaults.
    pub fn compile(
        &self,
        content: &str,
        path: &str,
        options: Option<&CompilationOptions>,
    ) -> Result<String, CompileError> {
        self.compile_output(content, path, options)
            .map(|output| output.code)
    }

    /// Compile `content`, returning the code and any separate source map
    pub fn compile_output(
        &self,
        content: &str,
        path: &str,
        options: Option<&CompilationOptions>,
    ) -> Result<CompileOutput, CompileError> {
        match self.transpile(content, options)? {
            CompileOutcome::Compiled(output) => Ok(output),
            CompileOutcome::SyntaxError(errors) => {
                // Only the first reported error is surfaced
                let message = match errors.first() {
                    Some(first) => diagnostics::format_error_details(first, content, path),
                    None => "Unknown syntax error".to_string(),
                };
                Err(CompileError::Syntax(message))
            }
            CompileOutcome::EngineFault(message) => Err(CompileError::Engine(message)),
        }
    }

    /// Release the engine
    ///
    /// Safe to call more than once; later compiles fail with `Disposed`.
    pub fn dispose(&self) {
        let mut state = self.state.lock();
        if state.disposed {
            return;
        }
        state.disposed = true;
        state.initialized = false;
        if let Some(engine) = state.engine.take() {
            tracing::debug!(engine = engine.name(), "Releasing transpiler engine");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.state.lock().disposed
    }
}

impl Drop for Compiler {
    fn drop(&mut self) {
        self.dispose();
    }
}
