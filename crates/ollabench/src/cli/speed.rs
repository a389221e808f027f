//! The `ollabench speed` command: benchmark token generation throughput.

use clap::Args;
use console::style;
use ollabench_core::progress::runs_progress_width;
use ollabench_core::speed::hostname;
use ollabench_core::{Benchmark, BenchmarkResult, SpeedSummary};

use super::terminal::TerminalProgress;
use super::{exit_with_help, label_width, Context};

/// Arguments for the `speed` command.
#[derive(Args, Debug, Default)]
pub struct SpeedArgs {
    /// Ollama models to benchmark
    #[arg(short, long, num_args = 1..)]
    pub models: Vec<String>,

    /// Prompt to use for generation (default from config: "Why is the sky blue?")
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Number of benchmark runs per model (default from config: 1)
    #[arg(short = 'n', long = "num_runs", value_parser = clap::value_parser!(u32).range(1..))]
    pub num_runs: Option<u32>,
}

impl SpeedArgs {
    /// True when none of the command's flags were given.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.prompt.is_none() && self.num_runs.is_none()
    }

    /// Prompt and run count, falling back to the `[speed]` config section.
    fn resolve(&self, ctx: &Context) -> (String, u32) {
        let prompt = self
            .prompt
            .clone()
            .unwrap_or_else(|| ctx.config.speed.default_prompt.clone());
        let num_runs = self.num_runs.unwrap_or(ctx.config.speed.num_runs);
        (prompt, num_runs)
    }
}

/// Execute the speed command.
pub async fn execute(args: SpeedArgs, ctx: &Context) -> anyhow::Result<()> {
    if args.is_empty() {
        exit_with_help(Some("speed"));
    }
    if args.models.is_empty() {
        anyhow::bail!("At least one model is required (-m/--models)");
    }

    let (prompt, num_runs) = args.resolve(ctx);
    let host = hostname();
    tracing::info!(
        "Benchmarking {} model(s), {} run(s) each, on {}",
        args.models.len(),
        num_runs,
        host
    );

    let client = ctx.client();
    let benchmark = Benchmark::new(&client, ctx.layout(), host.as_str());

    let mut progress =
        TerminalProgress::new(label_width(&args.models), runs_progress_width(num_runs));
    let summary = benchmark
        .run(&args.models, &prompt, num_runs, &mut progress)
        .await?;
    progress.finish();

    if !summary.results.is_empty() {
        print_summary(&summary);
        tracing::info!("Results written to {:?}", ctx.layout().host_dir(&host));
    }
    Ok(())
}

/// Print model averages, fastest first.
fn print_summary(summary: &SpeedSummary) {
    let mut ranked: Vec<&BenchmarkResult> = summary.results.iter().collect();
    ranked.sort_by(|a, b| b.average_tokens_per_second.total_cmp(&a.average_tokens_per_second));

    let width = ranked.iter().map(|r| r.model.len()).max().unwrap_or(0).max(5);

    eprintln!();
    eprintln!("  {:<width$}  {:>10}  {:>7}", "Model", "tokens/s", "runs");
    eprintln!("  {}", "-".repeat(width + 21));
    for r in ranked {
        let runs = format!("{}/{}", r.successful_runs, r.num_runs);
        if r.successful_runs == 0 {
            eprintln!(
                "  {:<width$}  {:>10}  {:>7}",
                r.model,
                style("-").red(),
                runs
            );
        } else {
            eprintln!(
                "  {:<width$}  {:>10.2}  {:>7}",
                r.model,
                style(r.average_tokens_per_second).green(),
                runs
            );
        }
    }
    if summary.write_errors > 0 {
        eprintln!(
            "  {} result file(s) could not be written",
            style(summary.write_errors).red()
        );
    }
}
