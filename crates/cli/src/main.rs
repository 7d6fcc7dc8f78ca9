// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! sagagen - workflow saga generator CLI

mod config;
mod output;
mod watch;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use output::OutputFormat;
use sg_driver::{Driver, GeneratorOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sagagen",
    version,
    about = "Compiles fluent workflow definitions into durable saga artifacts"
)]
struct Cli {
    /// Change to <dir> before doing anything
    #[arg(short = 'C', global = true, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Output format for diagnostics
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate saga artifacts (the default)
    Generate(GenerateArgs),
    /// Run extraction and diagnostics without writing artifacts
    Check(GenerateArgs),
    /// Regenerate on every source change
    Watch(GenerateArgs),
}

#[derive(clap::Args, Clone)]
struct GenerateArgs {
    /// Source root to scan (overrides sagagen.toml)
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output directory (overrides sagagen.toml)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Skip the Mermaid diagram artifact
    #[arg(long)]
    no_diagram: bool,

    /// Ignore the fingerprint cache and regenerate everything
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot change to {}", dir.display()))?;
    }

    let command = cli
        .command
        .unwrap_or(Commands::Generate(GenerateArgs {
            source: None,
            out_dir: None,
            no_diagram: false,
            force: false,
        }));

    match command {
        Commands::Generate(args) => generate(&args, cli.output),
        Commands::Check(args) => check(&args, cli.output),
        Commands::Watch(args) => watch::run(driver_options(&args)?, cli.output),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = EnvFilter::try_from_env("SAGAGEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn driver_options(args: &GenerateArgs) -> Result<GeneratorOptions> {
    let config = Config::discover()?;
    let source = args
        .source
        .clone()
        .or_else(|| config.generate.source.clone())
        .unwrap_or_else(|| PathBuf::from("src"));
    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| config.generate.out_dir.clone())
        .unwrap_or_else(|| PathBuf::from("generated"));

    let mut options = GeneratorOptions::new(source, out_dir);
    options.skip_diagram = args.no_diagram || !config.generate.emit_diagram;
    options.force = args.force;
    Ok(options)
}

fn generate(args: &GenerateArgs, format: OutputFormat) -> Result<()> {
    let options = driver_options(args)?;
    let driver = Driver::new(options);
    let report = driver.run()?;
    output::print_report(&report, format);
    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

fn check(args: &GenerateArgs, format: OutputFormat) -> Result<()> {
    let options = driver_options(args)?;
    let driver = Driver::new(options);
    let diagnostics = driver.check()?;
    output::print_diagnostics(&diagnostics, format);
    let has_errors = diagnostics
        .iter()
        .any(|d| d.severity == sg_model::Severity::Error);
    if has_errors {
        std::process::exit(1);
    }
    Ok(())
}
