use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use casm_rs::Program;
use casm_server::{server::AppState, Config, InMemoryUsageStore};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "casm", about = "Validate, normalize and serve CASM programs")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Check each line against the quantum-instruction grammar
    Validate {
        /// Source file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate, then print the numbered listing
    Compile {
        #[arg(default_value = "-")]
        input: String,
    },
    /// Rewrite each line into its normalized form
    Normalize {
        #[arg(default_value = "-")]
        input: String,
    },
    /// Print an emission trace of the program
    Emit {
        #[arg(default_value = "-")]
        input: String,
    },
    /// Run the web playground
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
        /// JSON ledger of per-visitor compile counts
        #[arg(long)]
        usage_file: Option<PathBuf>,
        /// Free compiles per visitor
        #[arg(long)]
        limit: Option<u64>,
        /// JSON config file; `CASM_*` environment variables are used otherwise
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep compile counts in memory instead of on disk
        #[arg(long)]
        ephemeral: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate { input, json } => handle_validate(&input, json),
        Command::Compile { input } => handle_compile(&input),
        Command::Normalize { input } => {
            println!("{}", read_program(&input)?.normalize());
            Ok(ExitCode::SUCCESS)
        }
        Command::Emit { input } => {
            println!("{}", read_program(&input)?.emission_trace());
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve {
            host,
            port,
            usage_file,
            limit,
            config,
            ephemeral,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(&path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?,
                None => Config::from_env()
                    .context("Failed to read configuration from environment.")?,
            };
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(usage_file) = usage_file {
                config.usage_file = usage_file;
            }
            if let Some(limit) = limit {
                config.free_compile_limit = limit;
            }
            handle_serve(config, ephemeral)
        }
    }
}

fn read_program(input: &str) -> anyhow::Result<Program> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read program from stdin.")?;
        text
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read program from {input}."))?
    };
    Ok(Program::from(text.as_str()))
}

fn handle_validate(input: &str, json: bool) -> anyhow::Result<ExitCode> {
    let report = read_program(input)?.validate();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report.")?
        );
    } else {
        for error in report.errors() {
            println!("line {}: {}", error.line_number, error.error);
        }
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn handle_compile(input: &str) -> anyhow::Result<ExitCode> {
    match read_program(input)?.compile() {
        Ok(listing) => {
            println!("{listing}");
            Ok(ExitCode::SUCCESS)
        }
        Err(report) => {
            for message in report.messages() {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_serve(config: Config, ephemeral: bool) -> anyhow::Result<ExitCode> {
    let state = if ephemeral {
        tracing::info!("keeping compile counts in memory");
        AppState::new(config, Arc::new(InMemoryUsageStore::new()))
    } else {
        tracing::info!(ledger = %config.usage_file.display(), "using usage ledger");
        AppState::with_json_ledger(config).context("Failed to open usage ledger.")?
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime.")?;
    runtime
        .block_on(casm_server::server::run(state))
        .context("Server exited with an error.")?;

    Ok(ExitCode::SUCCESS)
}
