use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use protoflux_catalog::catalog::JsonCatalogProvider;
use protoflux_catalog::cli::output::{self, OutputFormat};
use protoflux_catalog::tokenizer::TokenizerPolicy;
use protoflux_catalog::{Config, Tokenizer};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "protoflux-catalog")]
#[command(version, about = "Export the ProtoFlux node catalog with word-split names", long_about = None)]
struct Cli {
    /// Directory the catalog file is written to
    #[arg(value_name = "OUTPUT_DIR", default_value = "../../../data/")]
    output_dir: PathBuf,

    /// Directory holding component library exports (*.json)
    #[arg(long, value_name = "DIR", default_value = ".")]
    catalog_dir: PathBuf,

    /// Output format (json, list)
    #[arg(short = 'o', long, default_value = "json")]
    format: OutputFormat,

    /// Skip types with more generic parameters than this
    #[arg(long)]
    max_parameters: Option<usize>,

    /// Library category to export
    #[arg(long)]
    root: Option<String>,

    /// Word splitting policy (cascade, merge-acronyms)
    #[arg(long, value_name = "POLICY")]
    tokenizer: Option<TokenizerPolicy>,

    /// Drop repeated types within a category
    #[arg(long)]
    dedupe: bool,

    /// Print the words of a display name instead of exporting
    #[arg(long, value_name = "NAME")]
    tokenize: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "protoflux-catalog", &mut io::stdout());
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("protoflux_catalog=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::load(
        cli.root.clone(),
        cli.max_parameters,
        cli.tokenizer,
        cli.dedupe,
    )?;

    if !cli.tokenize.is_empty() {
        let tokenizer = config.tokenizer();
        for name in &cli.tokenize {
            output::print_words(name, &tokenizer.words(name), !cli.no_color);
        }
        return Ok(());
    }

    let provider = JsonCatalogProvider::new(&cli.catalog_dir);
    let export = protoflux_catalog::export(&provider, &config, cli.format)
        .with_context(|| {
            format!("Failed to export catalog from {}", provider.dir().display())
        })?;

    let path = output::write_catalog(&cli.output_dir, cli.format, &export.contents)
        .with_context(|| format!("Failed to write catalog to {}", cli.output_dir.display()))?;

    output::print_export_summary(export.records.len(), &path, !cli.no_color);

    Ok(())
}
