//! Sequential generate runs per model, timed by the service's own counters.

use std::collections::HashSet;

use crate::client::{GenerateRequest, GenerateResponse, InferenceClient};
use crate::error::Result;
use crate::output::{write_json, ResultLayout};
use crate::progress::{runs_progress, ProgressSink, Status, StatusLine, MODEL_NOT_INSTALLED};
use crate::types::{now_timestamp, BenchmarkResult, RunRecord};

use super::host::collect_computer_info;

const NANOS_PER_SEC: f64 = 1e9;

/// Tokens per second from the service's eval counters.
///
/// `None` when the duration is zero.
pub fn tokens_per_second(eval_count: u64, eval_duration_ns: u64) -> Option<f64> {
    if eval_duration_ns == 0 {
        return None;
    }
    Some(eval_count as f64 / (eval_duration_ns as f64 / NANOS_PER_SEC))
}

/// Turn one generate response into a run record.
///
/// Unfinished responses and missing or zero timings count as failures.
pub fn measure_run(run: u32, response: &GenerateResponse) -> RunRecord {
    let failure = |error: &str| RunRecord::Failure {
        run,
        error: error.to_string(),
    };

    if !response.done {
        return failure("generation did not complete");
    }
    let (Some(eval_count), Some(eval_duration)) = (response.eval_count, response.eval_duration)
    else {
        return failure("response is missing eval_count or eval_duration");
    };
    match tokens_per_second(eval_count, eval_duration) {
        Some(tokens_per_second) => RunRecord::Success {
            run,
            tokens_per_second,
            eval_count,
            eval_duration,
        },
        None => failure("eval_duration is zero"),
    }
}

/// Aggregate runs into a per-model result.
///
/// Averages cover successful runs only; with none, the average is 0.
pub fn summarize(
    model: &str,
    prompt: &str,
    num_runs: u32,
    runs: Vec<RunRecord>,
) -> BenchmarkResult {
    let mut total_tps = 0.0f64;
    let mut total_eval_count = 0u64;
    let mut successful_runs = 0u32;

    for run in &runs {
        if let RunRecord::Success {
            tokens_per_second,
            eval_count,
            ..
        } = run
        {
            total_tps += tokens_per_second;
            total_eval_count += eval_count;
            successful_runs += 1;
        }
    }

    let average_tokens_per_second = if successful_runs > 0 {
        total_tps / successful_runs as f64
    } else {
        0.0
    };

    BenchmarkResult {
        timestamp: now_timestamp(),
        model: model.to_string(),
        prompt: prompt.to_string(),
        num_runs,
        successful_runs,
        runs,
        average_tokens_per_second,
        total_eval_count,
    }
}

/// Everything a benchmark session produced.
#[derive(Debug, Clone, Default)]
pub struct SpeedSummary {
    /// One result per installed model, in the order requested
    pub results: Vec<BenchmarkResult>,
    /// Models skipped because they are not installed
    pub skipped_models: u64,
    /// Results that could not be written
    pub write_errors: u64,
}

/// Benchmarks models one after another against an inference client.
pub struct Benchmark<'a> {
    client: &'a dyn InferenceClient,
    layout: ResultLayout,
    hostname: String,
}

impl<'a> Benchmark<'a> {
    pub fn new(
        client: &'a dyn InferenceClient,
        layout: ResultLayout,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            client,
            layout,
            hostname: hostname.into(),
        }
    }

    /// Run `num_runs` generations per installed model.
    ///
    /// The summary holds a result for every installed model, including those
    /// with no successful run. Uninstalled models are reported and skipped.
    pub async fn run(
        &self,
        models: &[String],
        prompt: &str,
        num_runs: u32,
        sink: &mut dyn ProgressSink,
    ) -> Result<SpeedSummary> {
        let installed: HashSet<String> = self
            .client
            .list_models()
            .await?
            .into_iter()
            .map(|m| m.name)
            .collect();

        self.write_computer_info_once().await;

        let mut summary = SpeedSummary::default();
        for model in models {
            if !installed.contains(model) {
                sink.report(
                    StatusLine::new(Status::Skipped, model, MODEL_NOT_INSTALLED)
                        .with_progress(runs_progress(0, num_runs)),
                );
                summary.skipped_models += 1;
                continue;
            }

            let result = self.run_model(model, prompt, num_runs, sink).await;
            let counter = runs_progress(result.successful_runs, num_runs);
            let path = self.layout.speed_result(&self.hostname, model);

            let line = match write_json(&path, &result) {
                Err(e) => {
                    tracing::error!("Failed to write {:?}: {e}", path);
                    summary.write_errors += 1;
                    StatusLine::new(
                        Status::Warning,
                        model,
                        format!("Could not save result: {e}"),
                    )
                }
                Ok(()) if result.successful_runs == 0 => {
                    StatusLine::new(Status::Warning, model, "No successful runs completed")
                }
                Ok(()) => {
                    tracing::debug!("Benchmark result written to {:?}", path);
                    StatusLine::new(
                        Status::Done,
                        model,
                        format!(
                            "Average: {:.2} tokens/sec",
                            result.average_tokens_per_second
                        ),
                    )
                }
            };
            sink.report(line.with_progress(counter));
            summary.results.push(result);
        }

        Ok(summary)
    }

    async fn run_model(
        &self,
        model: &str,
        prompt: &str,
        num_runs: u32,
        sink: &mut dyn ProgressSink,
    ) -> BenchmarkResult {
        sink.report(
            StatusLine::new(Status::Working, model, "Starting...")
                .with_progress(runs_progress(0, num_runs)),
        );

        let request = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
        };
        let mut runs = Vec::with_capacity(num_runs as usize);
        let mut total_tps = 0.0f64;
        let mut successful = 0u32;

        for run in 1..=num_runs {
            let record = match self.client.generate(&request).await {
                Ok(response) => measure_run(run, &response),
                Err(e) => RunRecord::Failure {
                    run,
                    error: e.to_string(),
                },
            };

            match &record {
                RunRecord::Success {
                    tokens_per_second, ..
                } => {
                    total_tps += tokens_per_second;
                    successful += 1;
                    sink.report(
                        StatusLine::new(
                            Status::Working,
                            model,
                            format!("Average: {:.2} tokens/sec", total_tps / successful as f64),
                        )
                        .with_progress(runs_progress(run, num_runs)),
                    );
                }
                RunRecord::Failure { error, .. } => {
                    tracing::debug!(model, run, "run failed: {error}");
                }
            }
            runs.push(record);
        }

        summarize(model, prompt, num_runs, runs)
    }

    /// Write `computer_info.json` unless this host already has one.
    async fn write_computer_info_once(&self) {
        let path = self.layout.computer_info(&self.hostname);
        if path.exists() {
            tracing::debug!("Host info already recorded at {:?}", path);
            return;
        }

        let version = match self.client.version().await {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!("Could not query {} version: {e}", self.client.name());
                None
            }
        };
        let info = collect_computer_info(version);
        if let Err(e) = write_json(&path, &info) {
            tracing::warn!("Failed to write host info to {:?}: {e}", path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{generated, MockClient};
    use crate::error::ClientError;
    use crate::progress::RecordingSink;
    use crate::types::ComputerInfo;

    fn success(run: u32, tps: f64) -> RunRecord {
        RunRecord::Success {
            run,
            tokens_per_second: tps,
            eval_count: 10,
            eval_duration: 1,
        }
    }

    #[test]
    fn test_tokens_per_second() {
        assert_eq!(tokens_per_second(100, 2_000_000_000), Some(50.0));
        assert_eq!(tokens_per_second(100, 0), None);
    }

    #[test]
    fn test_summarize_ignores_failed_runs() {
        let runs = vec![
            success(1, 10.0),
            RunRecord::Failure {
                run: 2,
                error: "timeout".to_string(),
            },
            success(3, 20.0),
        ];
        let result = summarize("phi3", "Why?", 3, runs);
        assert_eq!(result.average_tokens_per_second, 15.0);
        assert_eq!(result.successful_runs, 2);
        assert_eq!(result.total_eval_count, 20);
        assert_eq!(result.runs.len(), 3);
    }

    #[test]
    fn test_summarize_no_successful_runs() {
        let runs = vec![RunRecord::Failure {
            run: 1,
            error: "boom".to_string(),
        }];
        let result = summarize("phi3", "Why?", 1, runs);
        assert_eq!(result.average_tokens_per_second, 0.0);
        assert_eq!(result.successful_runs, 0);
    }

    #[test]
    fn test_measure_run_incomplete_responses() {
        let mut not_done = generated(100, 1);
        not_done.done = false;
        assert!(!measure_run(1, &not_done).is_success());

        let mut missing = generated(100, 1);
        missing.eval_duration = None;
        assert!(!measure_run(2, &missing).is_success());

        let zero = generated(100, 0);
        assert!(!measure_run(3, &zero).is_success());

        let ok = measure_run(4, &generated(100, 2_000_000_000));
        assert_eq!(
            ok,
            RunRecord::Success {
                run: 4,
                tokens_per_second: 50.0,
                eval_count: 100,
                eval_duration: 2_000_000_000,
            }
        );
    }

    #[tokio::test]
    async fn test_run_averages_and_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ResultLayout::new(dir.path());
        let client = MockClient::with_models(&["phi3:latest"]);
        client.push_generate(Ok(generated(10, 1_000_000_000)));
        client.push_generate(Err(ClientError::Request {
            endpoint: "http://localhost:11434".to_string(),
            message: "connection reset".to_string(),
        }));
        client.push_generate(Ok(generated(40, 2_000_000_000)));

        let bench = Benchmark::new(&client, layout.clone(), "testhost");
        let mut sink = RecordingSink::default();
        let summary = bench
            .run(&["phi3:latest".to_string()], "Why?", 3, &mut sink)
            .await
            .unwrap();
        let results = &summary.results;

        assert_eq!(results.len(), 1);
        assert_eq!(summary.write_errors, 0);
        assert_eq!(results[0].average_tokens_per_second, 15.0);
        assert_eq!(results[0].successful_runs, 2);
        assert_eq!(results[0].total_eval_count, 50);
        assert!(!results[0].runs[1].is_success());

        let written: BenchmarkResult = serde_json::from_str(
            &std::fs::read_to_string(layout.speed_result("testhost", "phi3:latest")).unwrap(),
        )
        .unwrap();
        assert_eq!(written.successful_runs, 2);

        let info: ComputerInfo = serde_json::from_str(
            &std::fs::read_to_string(layout.computer_info("testhost")).unwrap(),
        )
        .unwrap();
        assert_eq!(info.service_version.as_deref(), Some("0.0.0-test"));

        let last = sink.lines.last().unwrap();
        assert_eq!(last.status, Status::Done);
        assert_eq!(last.progress.as_deref(), Some("2/3 runs"));
        assert_eq!(last.message, "Average: 15.00 tokens/sec");
    }

    #[tokio::test]
    async fn test_zero_successful_runs_warns_and_still_writes() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ResultLayout::new(dir.path());
        let client = MockClient::with_models(&["slow"]);
        let mut unfinished = generated(5, 5);
        unfinished.done = false;
        client.push_generate(Ok(unfinished));

        let bench = Benchmark::new(&client, layout.clone(), "h");
        let mut sink = RecordingSink::default();
        let summary = bench
            .run(&["slow".to_string()], "p", 1, &mut sink)
            .await
            .unwrap();

        assert_eq!(summary.results[0].average_tokens_per_second, 0.0);
        assert_eq!(sink.lines.last().unwrap().status, Status::Warning);
        assert!(layout.speed_result("h", "slow").exists());
    }

    #[tokio::test]
    async fn test_uninstalled_model_is_never_invoked() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ResultLayout::new(dir.path());
        let client = MockClient::with_models(&["phi3:latest"]);

        let bench = Benchmark::new(&client, layout.clone(), "h");
        let mut sink = RecordingSink::default();
        let summary = bench
            .run(
                &["mistral".to_string(), "phi3:latest".to_string()],
                "p",
                2,
                &mut sink,
            )
            .await
            .unwrap();

        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.skipped_models, 1);
        assert_eq!(
            *client.generate_calls.lock().unwrap(),
            vec!["phi3:latest".to_string(), "phi3:latest".to_string()]
        );
        assert!(!layout.speed_result("h", "mistral").exists());
        assert_eq!(sink.lines[0].status, Status::Skipped);
        assert_eq!(sink.lines[0].progress.as_deref(), Some("0/2 runs"));
    }

    #[tokio::test]
    async fn test_existing_computer_info_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ResultLayout::new(dir.path());
        let path = layout.computer_info("h");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{\"keep\": true}\n").unwrap();

        let client = MockClient::with_models(&[]);
        Benchmark::new(&client, layout, "h")
            .run(&[], "p", 1, &mut RecordingSink::default())
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"keep\": true}\n");
    }

    #[tokio::test]
    async fn test_unwritable_result_is_reported_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        let layout = ResultLayout::new(dir.path());
        // A directory where the result file should go makes the write fail
        std::fs::create_dir_all(layout.speed_result("h", "phi3")).unwrap();

        let client = MockClient::with_models(&["phi3"]);
        client.push_generate(Ok(generated(10, 1_000_000_000)));

        let mut sink = RecordingSink::default();
        let summary = Benchmark::new(&client, layout, "h")
            .run(&["phi3".to_string()], "p", 1, &mut sink)
            .await
            .unwrap();

        assert_eq!(summary.write_errors, 1);
        assert_eq!(summary.results.len(), 1);

        let finals = sink.finals();
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].status, Status::Warning);
        assert!(finals[0].message.starts_with("Could not save result"));
        assert_eq!(finals[0].progress.as_deref(), Some("1/1 runs"));
    }
}
