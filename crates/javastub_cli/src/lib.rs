// javastub_cli - Command line front end for the stub importer
use anyhow::{Context, Result};
use clap::Parser;
use javastub_importer::{
    render, ImportReport, ImporterConfig, ImporterConfigLayer, OutputMode, StubImporter,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "javastub-importer")]
#[command(version)]
#[command(about = "Convert Java stub sources into an API description")]
pub struct Cli {
    /// Stub source archive (.zip/.jar) or directory
    #[arg(short, long)]
    pub input: PathBuf,
    /// Output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Log every visited entry
    #[arg(short, long)]
    pub verbose: bool,
    /// Only write parameter names and types
    #[arg(long, conflicts_with = "json")]
    pub parameters_only: bool,
    /// Write the model as JSON instead of XML
    #[arg(long)]
    pub json: bool,
    /// Drop support-library and other non-framework packages
    #[arg(long)]
    pub framework_only: bool,
    /// TOML file with importer settings; flags override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Settings given on the command line. Unset flags leave lower layers alone.
    pub fn layer(&self) -> ImporterConfigLayer {
        let output_mode = if self.parameters_only {
            Some(OutputMode::ParametersOnly)
        } else if self.json {
            Some(OutputMode::Json)
        } else {
            None
        };

        ImporterConfigLayer {
            output_mode,
            framework_only: self.framework_only.then_some(true),
            non_framework_prefixes: None,
            verbose: self.verbose.then_some(true),
        }
    }

    /// Defaults, then the config file, then the command line.
    pub fn resolve_config(&self) -> Result<ImporterConfig> {
        let mut layers = Vec::new();
        if let Some(path) = &self.config {
            layers.push(ImporterConfigLayer::load(path)?);
        }
        layers.push(self.layer());
        Ok(ImporterConfig::default().with_layers(&layers))
    }
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Imports `cli.input` and writes the rendered model.
///
/// Nothing is written unless the whole import and rendering succeed.
pub fn run(cli: &Cli, config: ImporterConfig) -> Result<ImportReport> {
    debug!(
        mode = config.output_mode.as_str(),
        framework_only = config.framework_only,
        "resolved configuration"
    );

    let importer = StubImporter::new(config);
    let outcome = importer
        .import_path(&cli.input)
        .with_context(|| format!("failed to import {}", cli.input.display()))?;
    let text = render(&outcome.api, importer.config().output_mode)
        .context("failed to render API description")?;

    match &cli.output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to standard output")?;
        }
    }
    Ok(outcome.report)
}
