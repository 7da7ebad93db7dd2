// CLI commands for translating assets and running the debug handler

use crate::asset::Asset;
use crate::config::{default_config_path, Settings};
use crate::engine::EngineSwitcher;
use crate::handler::{self, DebugAssetHandler};
use crate::translator::Es2015Translator;
use crate::vfs::PhysicalFileSystem;
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Translator subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate EcmaScript2015 files (.es6, .es2015) to JS
    Translate {
        /// Files to translate; files of other types are skipped
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Print translated code to stdout instead of writing files
        #[arg(long)]
        stdout: bool,
    },

    /// Serve translated assets over HTTP for development
    Serve {
        /// Address to listen on (default from config)
        #[arg(short, long)]
        bind: Option<String>,

        /// Directory virtual paths resolve against (default from config)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Commands::Translate {
                inputs,
                out_dir,
                stdout,
            } => Self::translate_cmd(settings, inputs, out_dir, stdout),
            Commands::Serve { bind, root } => Self::serve_cmd(settings, bind, root).await,
            Commands::Config => Self::config_cmd(settings),
        }
    }

    fn build_translator(settings: &Settings) -> Result<Es2015Translator> {
        let switcher = EngineSwitcher::with_defaults(&settings.engine);
        Ok(Es2015Translator::new(&settings.translator, &switcher)?)
    }

    fn translate_cmd(
        settings: &Settings,
        inputs: Vec<PathBuf>,
        out_dir: Option<PathBuf>,
        stdout: bool,
    ) -> Result<()> {
        let translator = Self::build_translator(settings)?;

        let mut assets = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let content = std::fs::read_to_string(input)
                .with_context(|| format!("Failed to read '{}'", input.display()))?;
            let asset = Asset::new(input.display().to_string(), content);
            if !asset.is_es2015() {
                tracing::warn!("Skipping '{}': not an EcmaScript2015 file", input.display());
            }
            assets.push(asset);
        }

        translator.translate_many(&mut assets)?;

        for (input, asset) in inputs.iter().zip(&assets) {
            if !asset.is_es2015() {
                continue;
            }
            if stdout {
                println!("{}", asset.content);
                continue;
            }

            let output = output_path(input, out_dir.as_deref());
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&output, &asset.content)
                .with_context(|| format!("Failed to write '{}'", output.display()))?;
            if let Some(map) = &asset.source_map {
                let map_path = PathBuf::from(format!("{}.map", output.display()));
                std::fs::write(&map_path, map)?;
            }

            println!("✓ {} -> {}", input.display(), output.display());
        }

        Ok(())
    }

    async fn serve_cmd(
        settings: &Settings,
        bind: Option<String>,
        root: Option<PathBuf>,
    ) -> Result<()> {
        let translator = Self::build_translator(settings)?;
        let bind = bind.unwrap_or_else(|| settings.debug_handler.bind.clone());
        let root = root.unwrap_or_else(|| settings.debug_handler.root.clone());

        tracing::info!(root = %root.display(), "Serving EcmaScript2015 assets");
        let handler = DebugAssetHandler::new(
            translator,
            Arc::new(PhysicalFileSystem::new(root)),
            settings.debug_handler.debug_mode,
        );
        handler::serve(handler, &bind).await
    }

    fn config_cmd(settings: &Settings) -> Result<()> {
        if let Some(path) = default_config_path() {
            println!("# Default config file: {}", path.display());
        }
        print!("{}", settings.to_toml()?);
        Ok(())
    }
}

/// Where the translated `.js` for `input` is written
pub fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_stem()
        .map(|stem| format!("{}.js", stem.to_string_lossy()))
        .unwrap_or_else(|| "output.js".to_string());

    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}
