use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use content_blocks_config::{Config, load_catalog, parse_flags};
use content_blocks_engine::{
    CONTENT_BLOCKS_EDITOR, Catalog, ContentBlocksMapper, DependencyFlags, DependencyRef,
    NestedContentMapper, ValueMapper,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "content-blocks",
    version,
    about = "Export and dependency listing for content-blocks values"
)]
struct Cli {
    /// Catalog of block definitions and data-types (overrides the config file)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Config file to read instead of ~/.config/content-blocks/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the export form of a stored value
    Export {
        /// File holding the raw property value
        file: PathBuf,
    },
    /// List the entities a stored value depends on
    Deps {
        file: PathBuf,

        /// Dependency flag to pass through, e.g. INCLUDE_MEDIA (repeatable)
        #[arg(long = "flag")]
        flags: Vec<String>,

        /// Print the dependencies as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let catalog = resolve_catalog(cli.catalog.as_deref(), config.as_ref())?;
    log::debug!(
        "Catalog holds {} definitions and {} data types",
        catalog.definition_count(),
        catalog.data_type_count()
    );

    let catalog = Arc::new(catalog);
    let mapper = ContentBlocksMapper::new(
        catalog.clone(),
        catalog,
        Arc::new(NestedContentMapper::new()),
    );

    match cli.command {
        Command::Export { file } => {
            let value = read_value(&file)?;
            if let Some(text) = mapper.export_value(&value, CONTENT_BLOCKS_EDITOR)? {
                println!("{text}");
            }
        }
        Command::Deps { file, flags, json } => {
            let flags = if flags.is_empty() {
                match &config {
                    Some(config) => config.default_flags()?,
                    None => DependencyFlags::NONE,
                }
            } else {
                parse_flags(&flags)?
            };

            let value = read_value(&file)?;
            let dependencies = mapper.dependencies(&value, CONTENT_BLOCKS_EDITOR, flags)?;
            print!("{}", render_dependencies(&dependencies, json)?);
        }
    }

    Ok(())
}

fn resolve_catalog(catalog: Option<&Path>, config: Option<&Config>) -> Result<Catalog> {
    if let Some(path) = catalog {
        return Ok(load_catalog(path)?);
    }
    match config {
        Some(config) => Ok(config.load_catalog()?),
        None => {
            log::warn!("No config or --catalog given, block definitions will not resolve");
            Ok(Catalog::default())
        }
    }
}

/// The raw value is stored as text; an empty file is a null value
fn read_value(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read value from {}", path.display()))?;
    let text = text.trim_end();
    if text.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Value::String(text.to_string()))
}

/// One UDI per line, or the full records as indented JSON
fn render_dependencies(dependencies: &[DependencyRef], json: bool) -> Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(dependencies)?));
    }
    Ok(dependencies
        .iter()
        .map(|dependency| format!("{}\n", dependency.udi))
        .collect())
}
