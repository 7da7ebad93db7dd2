// EcmaScript2015 to JS translator over assets

pub mod source_map;

use crate::asset::Asset;
use crate::compiler::{Compiler, TranspilerLibrary};
use crate::config::{TranslatorSettings, TRANSLATOR_SECTION};
use crate::engine::{EngineFactory, EngineSwitcher};
use crate::error::{CompileError, TranslationError};
use crate::options::CompilationOptions;

/// Name of the input code type
pub const INPUT_CODE_TYPE: &str = "EcmaScript2015";

/// Name of the output code type
pub const OUTPUT_CODE_TYPE: &str = "JS";

/// Translates EcmaScript2015 assets to JS by running the transpiler
///
/// Each call creates its own `Compiler` (and so its own engine) and
/// releases it before returning; nothing is kept between calls.
#[derive(Clone)]
pub struct Es2015Translator {
    create_engine: EngineFactory,
    library: TranspilerLibrary,
    options: CompilationOptions,
    debug_mode: bool,
}

impl Es2015Translator {
    /// Create a translator from settings
    ///
    /// # Errors
    ///
    /// - `ConfigurationMissing` if no engine is configured
    /// - `Config` if the engine name is not registered
    /// - `LibraryUnavailable` if the transpiler script cannot be read
    pub fn new(
        settings: &TranslatorSettings,
        switcher: &EngineSwitcher,
    ) -> Result<Self, TranslationError> {
        let engine_name =
            settings
                .engine_name()
                .ok_or_else(|| TranslationError::ConfigurationMissing {
                    section: TRANSLATOR_SECTION.to_string(),
                    engines: switcher.describe(),
                })?;
        let create_engine = switcher.factory(engine_name)?;

        let library = TranspilerLibrary::from_file(&settings.library_path).map_err(|e| {
            TranslationError::LibraryUnavailable {
                path: settings.library_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self::with_engine_factory(create_engine, library, settings))
    }

    /// Create a translator around an explicit engine factory
    pub fn with_engine_factory(
        create_engine: EngineFactory,
        library: TranspilerLibrary,
        settings: &TranslatorSettings,
    ) -> Self {
        Self {
            create_engine,
            library,
            options: settings.compilation_options(),
            debug_mode: false,
        }
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.debug_mode = debug_mode;
    }

    pub fn options(&self) -> &CompilationOptions {
        &self.options
    }

    /// Translate one asset in place
    ///
    /// The asset's type is not checked; callers choose what to translate.
    pub fn translate<'a>(&self, asset: &'a mut Asset) -> Result<&'a mut Asset, TranslationError> {
        if asset.virtual_path.trim().is_empty() {
            return Err(TranslationError::InvalidArgument { name: "asset" });
        }

        let compiler = self.create_compiler();
        self.translate_with(asset, &compiler)?;
        Ok(asset)
    }

    /// Translate every EcmaScript2015 asset in `assets`, in order
    ///
    /// Other assets are left alone. The first failure aborts the batch;
    /// assets after the failing one are not touched.
    pub fn translate_many<'a>(
        &self,
        assets: &'a mut [Asset],
    ) -> Result<&'a mut [Asset], TranslationError> {
        if !assets.iter().any(Asset::is_es2015) {
            return Ok(assets);
        }
        if assets
            .iter()
            .any(|a| a.is_es2015() && a.virtual_path.trim().is_empty())
        {
            return Err(TranslationError::InvalidArgument { name: "assets" });
        }

        let compiler = self.create_compiler();
        for asset in assets.iter_mut().filter(|a| a.is_es2015()) {
            self.translate_with(asset, &compiler)?;
        }

        Ok(assets)
    }

    fn create_compiler(&self) -> Compiler {
        Compiler::new(self.create_engine.clone(), self.library.clone())
    }

    fn translate_with(&self, asset: &mut Asset, compiler: &Compiler) -> Result<(), TranslationError> {
        tracing::debug!(
            asset = %asset.virtual_path,
            debug_mode = self.debug_mode,
            "Translating {} asset",
            INPUT_CODE_TYPE
        );

        let output = compiler
            .compile_output(&asset.content, &asset.virtual_path, Some(&self.options))
            .map_err(|e| match e {
                CompileError::Syntax(message) => TranslationError::Syntax {
                    input_type: INPUT_CODE_TYPE,
                    output_type: OUTPUT_CODE_TYPE,
                    path: asset.virtual_path.clone(),
                    message,
                },
                other => TranslationError::Failed {
                    input_type: INPUT_CODE_TYPE,
                    output_type: OUTPUT_CODE_TYPE,
                    path: asset.virtual_path.clone(),
                    message: other.to_string(),
                },
            })?;

        asset.content = output.code;
        asset.source_map = output
            .source_map
            .and_then(|map| source_map::attribute_source_map(&map, &asset.virtual_path));
        Ok(())
    }
}
