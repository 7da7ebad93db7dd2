// Compilation options passed to the embedded transpiler

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// How the transpiler should emit source maps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMapMode {
    /// No source map
    #[default]
    None,
    /// Source map returned as a separate property of the result
    Property,
    /// Source map appended to the output as a data URL comment
    Inline,
    /// Both inline and as a separate property
    Both,
}

impl SourceMapMode {
    /// Value of the `sourceMaps` option understood by the transpiler
    pub fn to_wire(self) -> Value {
        match self {
            SourceMapMode::None => Value::Bool(false),
            SourceMapMode::Property => Value::Bool(true),
            SourceMapMode::Inline => Value::String("inline".to_string()),
            SourceMapMode::Both => Value::String("both".to_string()),
        }
    }

    /// Whether the transpiler returns a separate map alongside the code
    pub fn emits_separate_map(self) -> bool {
        matches!(self, SourceMapMode::Property | SourceMapMode::Both)
    }
}

/// Options for a single compilation
///
/// Defaults match the transpiler's own: every flag off, no source maps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompilationOptions {
    /// Keep comments in the output
    pub comments: bool,

    /// Strip superfluous whitespace from the output
    pub compact: bool,

    /// Syntax-highlight code frames in error messages
    pub highlight_code: bool,

    /// Source map emission mode
    pub source_maps: SourceMapMode,
}

impl CompilationOptions {
    /// Convert to the JSON object handed to the transpiler
    pub fn to_wire_format(&self) -> Value {
        json!({
            "comments": self.comments,
            "highlightCode": self.highlight_code,
            "compact": self.compact,
            "sourceMaps": self.source_maps.to_wire(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_all_off() {
        let options = CompilationOptions::default();
        assert!(!options.comments);
        assert!(!options.compact);
        assert!(!options.highlight_code);
        assert_eq!(options.source_maps, SourceMapMode::None);
    }

    #[test]
    fn wire_format_uses_transpiler_keys() {
        let options = CompilationOptions {
            comments: true,
            compact: false,
            highlight_code: true,
            source_maps: SourceMapMode::None,
        };

        assert_eq!(
            options.to_wire_format(),
            json!({
                "comments": true,
                "highlightCode": true,
                "compact": false,
                "sourceMaps": false
            })
        );
    }

    #[test]
    fn wire_format_carries_every_flag() {
        for bits in 0..8u8 {
            let options = CompilationOptions {
                comments: bits & 1 != 0,
                compact: bits & 2 != 0,
                highlight_code: bits & 4 != 0,
                source_maps: SourceMapMode::None,
            };
            let wire = options.to_wire_format();
            assert_eq!(wire["comments"], options.comments);
            assert_eq!(wire["compact"], options.compact);
            assert_eq!(wire["highlightCode"], options.highlight_code);
        }
    }

    #[test]
    fn source_map_modes_map_to_transpiler_values() {
        assert_eq!(SourceMapMode::None.to_wire(), json!(false));
        assert_eq!(SourceMapMode::Property.to_wire(), json!(true));
        assert_eq!(SourceMapMode::Inline.to_wire(), json!("inline"));
        assert_eq!(SourceMapMode::Both.to_wire(), json!("both"));
    }

    #[test]
    fn separate_map_only_for_property_and_both() {
        assert!(!SourceMapMode::None.emits_separate_map());
        assert!(SourceMapMode::Property.emits_separate_map());
        assert!(!SourceMapMode::Inline.emits_separate_map());
        assert!(SourceMapMode::Both.emits_separate_map());
    }

    #[test]
    fn source_map_mode_config_spelling() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: SourceMapMode,
        }

        let parsed: Wrapper = toml::from_str(r#"mode = "inline""#).unwrap();
        assert_eq!(parsed.mode, SourceMapMode::Inline);

        let bad: Result<Wrapper, _> = toml::from_str(r#"mode = "sideways""#);
        assert!(bad.is_err());
    }
}
