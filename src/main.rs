// es2015-translator - translate EcmaScript2015 assets to JS

use anyhow::Result;
use clap::Parser;
use es2015_translator::cli::Commands;
use es2015_translator::{logging, Settings};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "es2015-translator", version, about)]
struct Cli {
    /// Config file (default: per-user config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JS engine to host the transpiler in (overrides `translator.js_engine`)
    #[arg(long, global = true)]
    engine: Option<String>,

    /// Transpiler script location (overrides `translator.library_path`)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(engine) = cli.engine {
        settings.translator.js_engine = Some(engine);
    }
    if let Some(library) = cli.library {
        settings.translator.library_path = library;
    }

    logging::init(&settings.logging)?;
    cli.command.run(&settings).await
}
