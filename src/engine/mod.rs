// Scripting engine abstraction - the transpiler runs inside one of these

pub mod quickjs;
pub mod switcher;

pub use quickjs::QuickJsEngine;
pub use switcher::EngineSwitcher;

use crate::error::EngineError;
use std::sync::Arc;

/// A scripting engine able to run the transpiler library
///
/// Instances are not assumed to be reentrant. Callers that share one across
/// threads must serialize access themselves.
pub trait ScriptEngine: Send {
    /// Engine name, for diagnostics
    fn name(&self) -> &str;

    /// Execute a script for its side effects (defining globals)
    fn execute(&mut self, source: &str, name: &str) -> Result<(), EngineError>;

    /// Evaluate an expression that produces a string
    fn evaluate(&mut self, expression: &str) -> Result<String, EngineError>;
}

/// Creates fresh engine instances
pub type EngineFactory =
    Arc<dyn Fn() -> Result<Box<dyn ScriptEngine>, EngineError> + Send + Sync>;
