//! Subcommand handlers and the state they share.

pub mod config;
pub mod images;
pub mod models;
pub mod speed;
pub mod terminal;

use clap::CommandFactory;
use ollabench_core::client::normalize_endpoint;
use ollabench_core::{Config, OllamaClient, ResultLayout};
use std::path::PathBuf;
use std::time::Duration;

/// Effective settings after applying global CLI flags over the config file.
pub struct Context {
    pub config: Config,
    pub endpoint: String,
    pub data_dir: PathBuf,
}

impl Context {
    pub fn new(config: Config, host: Option<String>, data_dir: Option<PathBuf>) -> Self {
        let endpoint = normalize_endpoint(host.as_deref().unwrap_or(&config.ollama.endpoint));
        let data_dir = data_dir.unwrap_or_else(|| config.data_dir());
        Self {
            config,
            endpoint,
            data_dir,
        }
    }

    /// HTTP client for the configured service.
    pub fn client(&self) -> OllamaClient {
        tracing::debug!("Using Ollama at {}", self.endpoint);
        OllamaClient::new(
            &self.endpoint,
            Duration::from_millis(self.config.ollama.timeout_ms),
        )
    }

    pub fn layout(&self) -> ResultLayout {
        ResultLayout::new(&self.data_dir)
    }
}

/// The command whose help is shown: the named subcommand, or the root
/// command when `subcommand` is `None` or unknown.
pub fn help_command(subcommand: Option<&str>) -> clap::Command {
    let mut cmd = crate::Cli::command();
    cmd.build();
    let sub = subcommand.and_then(|name| cmd.find_subcommand(name).cloned());
    sub.unwrap_or(cmd)
}

/// Print help and exit with status 1.
///
/// Used when `ollabench` runs without a command, or a tool without any of
/// its flags.
pub fn exit_with_help(subcommand: Option<&str>) -> ! {
    let _ = help_command(subcommand).print_help();
    std::process::exit(1);
}

/// Width of the label column: the longest model name.
pub fn label_width(models: &[String]) -> usize {
    models.iter().map(|m| m.chars().count()).max().unwrap_or(0)
}
