// QuickJS-backed script engine

use super::ScriptEngine;
use crate::config::EngineSettings;
use crate::error::EngineError;
use rquickjs::{CatchResultExt, Context, Runtime};

/// Name the QuickJS engine is registered under
pub const QUICKJS_ENGINE_NAME: &str = "quickjs";

/// Script engine backed by a single QuickJS runtime and context
pub struct QuickJsEngine {
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    context: Context,
}

impl QuickJsEngine {
    /// Create an engine with default runtime limits
    pub fn new() -> Result<Self, EngineError> {
        Self::with_settings(&EngineSettings::default())
    }

    /// Create an engine applying memory and stack limits
    ///
    /// A limit of zero leaves the QuickJS default in place.
    pub fn with_settings(settings: &EngineSettings) -> Result<Self, EngineError> {
        let runtime = Runtime::new().map_err(create_error)?;
        if settings.memory_limit > 0 {
            runtime.set_memory_limit(settings.memory_limit);
        }
        if settings.max_stack_size > 0 {
            runtime.set_max_stack_size(settings.max_stack_size);
        }
        let context = Context::full(&runtime).map_err(create_error)?;

        tracing::debug!(
            memory_limit = settings.memory_limit,
            max_stack_size = settings.max_stack_size,
            "Created QuickJS engine"
        );

        Ok(Self { runtime, context })
    }
}

fn create_error(err: rquickjs::Error) -> EngineError {
    EngineError::Create {
        engine: QUICKJS_ENGINE_NAME.to_string(),
        message: err.to_string(),
    }
}

impl ScriptEngine for QuickJsEngine {
    fn name(&self) -> &str {
        QUICKJS_ENGINE_NAME
    }

    fn execute(&mut self, source: &str, name: &str) -> Result<(), EngineError> {
        self.context.with(|ctx| {
            ctx.eval::<(), _>(source)
                .catch(&ctx)
                .map_err(|e| EngineError::Script {
                    name: name.to_string(),
                    message: e.to_string(),
                })
        })
    }

    fn evaluate(&mut self, expression: &str) -> Result<String, EngineError> {
        self.context.with(|ctx| {
            ctx.eval::<String, _>(expression)
                .catch(&ctx)
                .map_err(|e| EngineError::Evaluation(e.to_string()))
        })
    }
}

impl Drop for QuickJsEngine {
    fn drop(&mut self) {
        tracing::debug!("Disposed QuickJS engine");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_reports_its_name() {
        let engine = QuickJsEngine::new().unwrap();
        assert_eq!(engine.name(), "quickjs");
    }

    #[test]
    fn execute_defines_globals_for_evaluate() {
        let mut engine = QuickJsEngine::new().unwrap();
        engine
            .execute("var greeting = function (n) { return 'hi ' + n; };", "greet.js")
            .unwrap();

        let out = engine.evaluate("greeting('there')").unwrap();
        assert_eq!(out, "hi there");
    }

    #[test]
    fn script_error_names_the_script() {
        let mut engine = QuickJsEngine::new().unwrap();
        let err = engine.execute("var x = ;", "broken.js").unwrap_err();
        match err {
            EngineError::Script { name, .. } => assert_eq!(name, "broken.js"),
            other => panic!("Expected Script error, got {other:?}"),
        }
    }

    #[test]
    fn thrown_exception_becomes_evaluation_error() {
        let mut engine = QuickJsEngine::new().unwrap();
        let err = engine
            .evaluate("(function () { throw new TypeError('shim exploded'); })()")
            .unwrap_err();
        match err {
            EngineError::Evaluation(message) => assert!(message.contains("shim exploded")),
            other => panic!("Expected Evaluation error, got {other:?}"),
        }
    }
}
