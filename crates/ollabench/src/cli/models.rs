//! The `ollabench models` command for inspecting the inference service.
//!
//! Without a subcommand it prints the service version followed by the
//! installed models.

use clap::{Args, Subcommand};
use ollabench_core::{InferenceClient, InstalledModel};

use super::Context;

/// Arguments for the `models` command.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: Option<ModelsCommand>,
}

/// Subcommands for model inspection.
#[derive(Subcommand, Debug)]
pub enum ModelsCommand {
    /// List installed models (names usable with -m)
    List,

    /// Show the inference service version
    Version,
}

/// Execute the models command.
pub async fn execute(args: ModelsArgs, ctx: &Context) -> anyhow::Result<()> {
    let client = ctx.client();

    match args.command {
        None => {
            print_version(&client).await?;
            print_models(&client).await?;
        }
        Some(ModelsCommand::List) => print_models(&client).await?,
        Some(ModelsCommand::Version) => print_version(&client).await?,
    }

    Ok(())
}

async fn print_version(client: &dyn InferenceClient) -> anyhow::Result<()> {
    let version = client.version().await?;
    println!("{} version {version}", client.name());
    Ok(())
}

async fn print_models(client: &dyn InferenceClient) -> anyhow::Result<()> {
    let models = client.list_models().await?;
    if models.is_empty() {
        tracing::warn!("No models installed");
        return Ok(());
    }
    for line in model_table(models) {
        println!("{line}");
    }
    Ok(())
}

/// One line per model, sorted by name, sizes aligned after the longest name.
fn model_table(mut models: Vec<InstalledModel>) -> Vec<String> {
    models.sort_by(|a, b| a.name.cmp(&b.name));
    let width = models.iter().map(|m| m.name.len()).max().unwrap_or(0);
    models
        .into_iter()
        .map(|model| match model.size {
            Some(bytes) => format!("{:<width$}  {}", model.name, format_size(bytes)),
            None => model.name,
        })
        .collect()
}

fn format_size(bytes: u64) -> String {
    const GB: f64 = 1_000_000_000.0;
    const MB: f64 = 1_000_000.0;
    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else {
        format!("{:.0} MB", bytes / MB)
    }
}
