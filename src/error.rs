// Error types for the translator

use thiserror::Error;

/// Errors raised by a scripting engine instance
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to create JS engine '{engine}': {message}")]
    Create { engine: String, message: String },

    #[error("Script error in '{name}': {message}")]
    Script { name: String, message: String },

    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

/// Errors from the compiler adapter
///
/// `Syntax` carries a fully formatted diagnostic (message, file, line,
/// column and source excerpt). `Engine` carries whatever the engine reported.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{0}")]
    Syntax(String),

    #[error("{0}")]
    Engine(String),

    #[error("Cannot access a disposed compiler")]
    Disposed,
}

impl From<EngineError> for CompileError {
    fn from(err: EngineError) -> Self {
        CompileError::Engine(err.to_string())
    }
}

/// Errors surfaced by the translator to its callers
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("The value of parameter '{name}' must not be empty")]
    InvalidArgument { name: &'static str },

    #[error(
        "JS engine for the '{section}' translator is not specified. \
         Set `js_engine` to one of: {engines}"
    )]
    ConfigurationMissing { section: String, engines: String },

    #[error("Transpiler library '{path}' could not be loaded: {message}")]
    LibraryUnavailable { path: String, message: String },

    #[error(
        "During translation of {input_type} code, read from the file '{path}', \
         to {output_type} code syntax error has occurred.\n{message}"
    )]
    Syntax {
        input_type: &'static str,
        output_type: &'static str,
        path: String,
        message: String,
    },

    #[error(
        "During translation of {input_type} code, read from the file '{path}', \
         to {output_type} code, an error has occurred.\n{message}"
    )]
    Failed {
        input_type: &'static str,
        output_type: &'static str,
        path: String,
        message: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors while loading or resolving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Unknown JS engine '{name}'. Registered engines: {registered}")]
    UnknownEngine { name: String, registered: String },
}

/// Errors from the virtual file system
#[derive(Debug, Error)]
pub enum VfsError {
    #[error("Asset '{path}' not found")]
    NotFound { path: String },

    #[error("Virtual path '{path}' escapes the asset root")]
    OutsideRoot { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            TranslationError::InvalidArgument { name: "asset" }.to_string(),
            "The value of parameter 'asset' must not be empty"
        );

        assert_eq!(
            CompileError::Disposed.to_string(),
            "Cannot access a disposed compiler"
        );

        let missing = TranslationError::ConfigurationMissing {
            section: "babel_js".to_string(),
            engines: "quickjs".to_string(),
        };
        assert!(missing.to_string().contains("quickjs"));
        assert!(missing.to_string().contains("babel_js"));
    }

    #[test]
    fn translation_errors_name_code_types_and_path() {
        let err = TranslationError::Syntax {
            input_type: "EcmaScript2015",
            output_type: "JS",
            path: "/Scripts/app.es6".to_string(),
            message: "Message: Unexpected token".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("EcmaScript2015"));
        assert!(text.contains("to JS code"));
        assert!(text.contains("/Scripts/app.es6"));
        assert!(text.ends_with("Message: Unexpected token"));
    }

    #[test]
    fn from_conversions_work() {
        let compile_err: CompileError = EngineError::Evaluation("boom".to_string()).into();
        assert!(matches!(compile_err, CompileError::Engine(ref m) if m.contains("boom")));

        let translate_err: TranslationError = ConfigError::UnknownEngine {
            name: "v8".to_string(),
            registered: "quickjs".to_string(),
        }
        .into();
        assert!(matches!(translate_err, TranslationError::Config(_)));
        assert_eq!(
            translate_err.to_string(),
            "Unknown JS engine 'v8'. Registered engines: quickjs"
        );
    }

    #[test]
    fn vfs_error_from_io() {
        let err: VfsError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(err.to_string(), "I/O error: disk");
    }
}
