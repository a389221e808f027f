//! Result records written by the tools.
//!
//! Every record is serialized once to its own JSON file and never updated.

use serde::{Deserialize, Serialize};

/// Image container detected from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl std::fmt::Display for ImageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageKind::Png => write!(f, "PNG"),
            ImageKind::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Outcome of transcribing one image with one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionRecord {
    /// When the record was produced (RFC 3339, local time)
    pub timestamp: String,

    /// Model identifier as passed on the command line
    pub model: String,

    /// Image file stem
    pub image: String,

    pub image_type: ImageKind,

    #[serde(flatten)]
    pub outcome: TranscriptionOutcome,
}

/// Either the model's answer or the error that replaced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranscriptionOutcome {
    Success {
        /// Markdown produced by the model
        response: String,
        metadata: ResponseMetadata,
    },
    Failure {
        error: String,
    },
}

/// Timing metadata reported by the service, in nanoseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub total_duration: Option<u64>,
    pub load_duration: Option<u64>,
    pub prompt_eval_duration: Option<u64>,
    pub eval_count: Option<u64>,
}

/// One benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunRecord {
    Success {
        /// 1-based run index
        run: u32,
        tokens_per_second: f64,
        eval_count: u64,
        /// Generation time in nanoseconds
        eval_duration: u64,
    },
    Failure {
        run: u32,
        error: String,
    },
}

impl RunRecord {
    pub fn run(&self) -> u32 {
        match self {
            RunRecord::Success { run, .. } | RunRecord::Failure { run, .. } => *run,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunRecord::Success { .. })
    }
}

/// All runs of one model, with aggregates over the successful ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub timestamp: String,
    pub model: String,
    pub prompt: String,
    pub num_runs: u32,
    pub successful_runs: u32,
    pub runs: Vec<RunRecord>,
    /// 0 when no run succeeded
    pub average_tokens_per_second: f64,
    pub total_eval_count: u64,
}

/// Snapshot of the machine a benchmark ran on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputerInfo {
    pub timestamp: String,
    pub hostname: String,
    pub cpu: String,
    pub cpu_cores: usize,
    pub total_memory_bytes: u64,
    pub os: String,
    pub os_version: String,
    pub kernel_version: String,
    /// Inference service version, if it could be queried
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_version: Option<String>,
}

/// Current local time in the format used by every record.
pub fn now_timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: TranscriptionOutcome) -> TranscriptionRecord {
        TranscriptionRecord {
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            model: "llava:latest".to_string(),
            image: "page_01".to_string(),
            image_type: ImageKind::Png,
            outcome,
        }
    }

    #[test]
    fn test_success_record_shape() {
        let rec = record(TranscriptionOutcome::Success {
            response: "# Title".to_string(),
            metadata: ResponseMetadata {
                total_duration: Some(10),
                load_duration: Some(2),
                prompt_eval_duration: Some(3),
                eval_count: Some(4),
            },
        });
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["image_type"], "PNG");
        assert_eq!(json["response"], "# Title");
        assert_eq!(json["metadata"]["eval_count"], 4);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_record_shape() {
        let rec = record(TranscriptionOutcome::Failure {
            error: "HTTP 500: boom".to_string(),
        });
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["error"], "HTTP 500: boom");
        assert!(json.get("response").is_none());
        assert!(json.get("metadata").is_none());

        let back: TranscriptionRecord = serde_json::from_value(json).unwrap();
        assert!(matches!(back.outcome, TranscriptionOutcome::Failure { .. }));
    }

    #[test]
    fn test_run_record_shapes() {
        let ok = RunRecord::Success {
            run: 1,
            tokens_per_second: 50.0,
            eval_count: 100,
            eval_duration: 2_000_000_000,
        };
        let failed = RunRecord::Failure {
            run: 2,
            error: "incomplete metrics".to_string(),
        };
        let ok_json = serde_json::to_value(&ok).unwrap();
        let failed_json = serde_json::to_value(&failed).unwrap();

        assert_eq!(ok_json["tokens_per_second"], 50.0);
        assert_eq!(failed_json["error"], "incomplete metrics");
        assert!(ok.is_success());
        assert!(!failed.is_success());
        assert_eq!(failed.run(), 2);
    }

    #[test]
    fn test_image_kind_display() {
        assert_eq!(ImageKind::Jpeg.to_string(), "JPEG");
        assert_eq!(
            serde_json::to_string(&ImageKind::Jpeg).unwrap(),
            "\"JPEG\""
        );
    }
}
