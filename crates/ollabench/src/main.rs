//! ollabench CLI - transcribe images and benchmark token throughput against
//! a local Ollama service.
//!
//! # Usage
//!
//! ```bash
//! # Transcribe a folder of scans with two vision models
//! ollabench images -m llava:latest minicpm-v:latest -i ./scans
//!
//! # Benchmark generation speed, 5 runs per model
//! ollabench speed -m llama3.2:latest phi3:latest -n 5
//!
//! # Service version and installed models
//! ollabench models
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// ollabench - run local Ollama models over images and measure their speed.
#[derive(Parser, Debug)]
#[command(name = "ollabench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Ollama host (URL or host:port); defaults to the configured endpoint
    #[arg(long, global = true, env = "OLLAMA_HOST")]
    host: Option<String>,

    /// Directory results are written to; defaults to the configured data_dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert images to markdown with one or more vision models
    Images(cli::images::ImagesArgs),

    /// Benchmark token generation speed across models
    Speed(cli::speed::SpeedArgs),

    /// Inspect models installed in the inference service
    Models(cli::models::ModelsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        cli::exit_with_help(None);
    };

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match ollabench_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `ollabench config path`."
            );
            ollabench_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("ollabench v{}", ollabench_core::VERSION);

    let ctx = cli::Context::new(config, cli.host, cli.data_dir);

    match command {
        Commands::Images(args) => cli::images::execute(args, &ctx).await,
        Commands::Speed(args) => cli::speed::execute(args, &ctx).await,
        Commands::Models(args) => cli::models::execute(args, &ctx).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
