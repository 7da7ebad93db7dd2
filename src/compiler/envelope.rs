// Result envelope returned by the in-engine helper

use serde::{Deserialize, Serialize};

/// A syntax error reported by the transpiler
///
/// Line and column are 1-based; zero means unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedError {
    pub message: String,
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub column_number: i64,
}

/// JSON shape produced by `es2015TranspilerHelper.compile`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileEnvelope {
    #[serde(default)]
    pub compiled_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ReportedError>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<String>,
}

/// Translated code plus the separate source map, if one was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutput {
    pub code: String,
    pub source_map: Option<String>,
}

/// What a single compile call produced
///
/// Syntax errors and engine faults are distinct cases: the former is the
/// expected result of bad input, the latter means the engine or helper broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Compiled(CompileOutput),
    SyntaxError(Vec<ReportedError>),
    EngineFault(String),
}

impl CompileOutcome {
    /// Classify the raw string returned by the helper
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<CompileEnvelope>(raw) {
            Ok(envelope) => envelope.into(),
            Err(e) => CompileOutcome::EngineFault(format!(
                "Transpiler helper returned an invalid result: {}",
                e
            )),
        }
    }
}

impl From<CompileEnvelope> for CompileOutcome {
    fn from(envelope: CompileEnvelope) -> Self {
        match envelope.errors {
            Some(errors) if !errors.is_empty() => CompileOutcome::SyntaxError(errors),
            _ => CompileOutcome::Compiled(CompileOutput {
                code: envelope.compiled_code,
                source_map: envelope.source_map,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successful_envelope() {
        let outcome = CompileOutcome::from_json(r#"{"compiledCode":"var x = 1;"}"#);
        assert_eq!(
            outcome,
            CompileOutcome::Compiled(CompileOutput {
                code: "var x = 1;".to_string(),
                source_map: None,
            })
        );
    }

    #[test]
    fn envelope_with_source_map() {
        let outcome = CompileOutcome::from_json(
            r#"{"compiledCode":"var x;","sourceMap":"{\"version\":3}"}"#,
        );
        match outcome {
            CompileOutcome::Compiled(output) => {
                assert_eq!(output.source_map.as_deref(), Some(r#"{"version":3}"#))
            }
            other => panic!("Expected Compiled, got {other:?}"),
        }
    }

    #[test]
    fn envelope_with_errors_is_syntax_error() {
        let outcome = CompileOutcome::from_json(
            r#"{"compiledCode":"","errors":[
                {"message":"Unexpected token (2:4)","lineNumber":2,"columnNumber":5},
                {"message":"second","lineNumber":9,"columnNumber":1}
            ]}"#,
        );
        match outcome {
            CompileOutcome::SyntaxError(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].line_number, 2);
                assert_eq!(errors[0].column_number, 5);
            }
            other => panic!("Expected SyntaxError, got {other:?}"),
        }
    }

    #[test]
    fn empty_error_list_is_success() {
        let outcome = CompileOutcome::from_json(r#"{"compiledCode":"ok","errors":[]}"#);
        assert!(matches!(outcome, CompileOutcome::Compiled(_)));
    }

    #[test]
    fn missing_positions_default_to_zero() {
        let outcome = CompileOutcome::from_json(r#"{"errors":[{"message":"bad"}]}"#);
        match outcome {
            CompileOutcome::SyntaxError(errors) => {
                assert_eq!(errors[0].line_number, 0);
                assert_eq!(errors[0].column_number, 0);
            }
            other => panic!("Expected SyntaxError, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_an_engine_fault() {
        let outcome = CompileOutcome::from_json("undefined");
        assert!(matches!(outcome, CompileOutcome::EngineFault(ref m) if m.contains("invalid result")));
    }
}
