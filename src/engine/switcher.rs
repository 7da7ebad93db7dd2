// Registry mapping configured engine names to engine factories

use super::{EngineFactory, QuickJsEngine, ScriptEngine};
use crate::config::EngineSettings;
use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resolves the `js_engine` setting to a factory
///
/// Names are matched case-insensitively.
#[derive(Clone, Default)]
pub struct EngineSwitcher {
    factories: BTreeMap<String, EngineFactory>,
}

impl EngineSwitcher {
    /// Create an empty switcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a switcher with the built-in engines registered
    pub fn with_defaults(settings: &EngineSettings) -> Self {
        let mut switcher = Self::new();
        let settings = settings.clone();
        switcher.register(
            super::quickjs::QUICKJS_ENGINE_NAME,
            Arc::new(move || {
                QuickJsEngine::with_settings(&settings)
                    .map(|engine| Box::new(engine) as Box<dyn ScriptEngine>)
            }),
        );
        switcher
    }

    /// Register (or replace) a factory under a name
    pub fn register(&mut self, name: &str, factory: EngineFactory) {
        self.factories.insert(name.to_ascii_lowercase(), factory);
    }

    /// Look up the factory for an engine name
    pub fn factory(&self, name: &str) -> Result<EngineFactory, ConfigError> {
        self.factories
            .get(&name.trim().to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| ConfigError::UnknownEngine {
                name: name.to_string(),
                registered: self.describe(),
            })
    }

    /// Registered engine names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Comma-separated engine names for error messages
    pub fn describe(&self) -> String {
        self.names().join(", ")
    }
}
