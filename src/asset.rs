// Assets - named source units the translator rewrites in place

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of code an asset holds, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetTypeCode {
    EcmaScript2015,
    JavaScript,
    Css,
    Unknown,
}

impl AssetTypeCode {
    /// Classify a virtual path by its file extension
    pub fn from_path(virtual_path: &str) -> Self {
        let extension = Path::new(virtual_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("es6") | Some("es2015") => AssetTypeCode::EcmaScript2015,
            Some("js") => AssetTypeCode::JavaScript,
            Some("css") => AssetTypeCode::Css,
            _ => AssetTypeCode::Unknown,
        }
    }
}

/// A source unit identified by its virtual path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Virtual path, e.g. `~/Scripts/app.es6`
    pub virtual_path: String,

    /// Current text; replaced by translation
    pub content: String,

    pub type_code: AssetTypeCode,

    /// Separate source map produced by the last translation
    pub source_map: Option<String>,
}

impl Asset {
    /// Create an asset, inferring its type from the path
    pub fn new(virtual_path: impl Into<String>, content: impl Into<String>) -> Self {
        let virtual_path = virtual_path.into();
        let type_code = AssetTypeCode::from_path(&virtual_path);
        Self {
            virtual_path,
            content: content.into(),
            type_code,
            source_map: None,
        }
    }

    /// Create an asset with an explicit type
    pub fn with_type(
        virtual_path: impl Into<String>,
        content: impl Into<String>,
        type_code: AssetTypeCode,
    ) -> Self {
        Self {
            type_code,
            ..Self::new(virtual_path, content)
        }
    }

    pub fn is_es2015(&self) -> bool {
        self.type_code == AssetTypeCode::EcmaScript2015
    }
}
