// Shared fixtures for unit tests

use crate::compiler::{Compiler, TranspilerLibrary};
use crate::engine::{EngineFactory, QuickJsEngine, ScriptEngine};
use crate::options::CompilationOptions;
use std::sync::Arc;

/// Babel-compatible stub transpiler
pub const STUB_TRANSPILER: &str = include_str!("../tests/fixtures/transpiler_stub.js");

pub fn quickjs_factory() -> EngineFactory {
    Arc::new(|| QuickJsEngine::new().map(|engine| Box::new(engine) as Box<dyn ScriptEngine>))
}

pub fn stub_library() -> TranspilerLibrary {
    TranspilerLibrary::new("transpiler_stub.js", STUB_TRANSPILER)
}

pub fn stub_compiler(options: Option<CompilationOptions>) -> Compiler {
    Compiler::with_options(quickjs_factory(), stub_library(), options)
}
