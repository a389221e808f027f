//! The `ollabench images` command: transcribe images to markdown.

use clap::Args;
use console::style;
use ollabench_core::{FileDiscovery, TranscribeSummary, Transcriber};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::terminal::TerminalProgress;
use super::{exit_with_help, label_width, Context};

/// Arguments for the `images` command.
#[derive(Args, Debug, Default)]
pub struct ImagesArgs {
    /// Ollama models to use for image processing
    #[arg(short, long, num_args = 1..)]
    pub models: Vec<String>,

    /// Paths to images or folders to process
    #[arg(short, long, num_args = 1..)]
    pub images: Vec<PathBuf>,

    /// Custom prompt to use for image processing (overrides prompt files)
    #[arg(short, long)]
    pub prompt: Option<String>,
}

impl ImagesArgs {
    /// True when none of the command's flags were given.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.images.is_empty() && self.prompt.is_none()
    }
}

/// Execute the images command.
pub async fn execute(args: ImagesArgs, ctx: &Context) -> anyhow::Result<()> {
    if args.is_empty() {
        exit_with_help(Some("images"));
    }
    if args.models.is_empty() {
        anyhow::bail!("At least one model is required (-m/--models)");
    }
    if args.images.is_empty() {
        anyhow::bail!("At least one image or folder is required (-i/--images)");
    }

    let discovery = FileDiscovery::new(&ctx.config.images);
    let images = discovery.expand(&args.images);
    if images.is_empty() {
        anyhow::bail!("No images found to process");
    }
    tracing::info!("Found {} image(s) to process", images.len());

    let client = ctx.client();
    let transcriber = Transcriber::new(
        &client,
        ctx.layout(),
        ctx.config.images.default_prompt.as_str(),
    );

    let start = Instant::now();
    let mut progress = TerminalProgress::new(label_width(&args.models), 0);
    let summary = transcriber
        .run(&args.models, &images, args.prompt.as_deref(), &mut progress)
        .await?;
    progress.finish();

    print_summary(&summary, start.elapsed());
    Ok(())
}

/// Print a formatted summary table after the batch.
fn print_summary(summary: &TranscribeSummary, elapsed: Duration) {
    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Saved:          {:>8}", style(summary.saved).green());
    if summary.failed > 0 {
        eprintln!("    Failed:         {:>8}", style(summary.failed).red());
    }
    if summary.skipped_images > 0 {
        eprintln!("    Skipped images: {:>8}", summary.skipped_images);
    }
    if summary.skipped_models > 0 {
        eprintln!("    Skipped models: {:>8}", summary.skipped_models);
    }
    if summary.write_errors > 0 {
        eprintln!("    Write errors:   {:>8}", style(summary.write_errors).red());
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Duration:       {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("  ====================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_args_are_empty() {
        assert!(ImagesArgs::default().is_empty());
    }

    #[test]
    fn any_flag_makes_args_non_empty() {
        let args = ImagesArgs {
            prompt: Some("p".to_string()),
            ..ImagesArgs::default()
        };
        assert!(!args.is_empty());
    }

    #[tokio::test]
    async fn missing_images_flag_is_an_error() {
        let ctx = Context::new(Default::default(), None, None);
        let args = ImagesArgs {
            models: vec!["llava:latest".to_string()],
            ..ImagesArgs::default()
        };
        let err = execute(args, &ctx).await.unwrap_err();
        assert!(err.to_string().contains("-i/--images"));
    }

    #[tokio::test]
    async fn empty_folder_reports_no_images() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(Default::default(), None, Some(dir.path().join("data")));
        let args = ImagesArgs {
            models: vec!["llava:latest".to_string()],
            images: vec![dir.path().to_path_buf()],
            prompt: None,
        };
        let err = execute(args, &ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "No images found to process");
    }
}
