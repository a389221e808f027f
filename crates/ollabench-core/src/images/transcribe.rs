//! Sends every valid image to every installed model and records the answers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::client::{ChatRequest, ChatResponse, ImageInput, InferenceClient};
use crate::error::{ImageError, Result};
use crate::output::{write_json, ResultLayout};
use crate::progress::{ProgressSink, Status, StatusLine, MODEL_NOT_INSTALLED};
use crate::types::{
    now_timestamp, ImageKind, ResponseMetadata, TranscriptionOutcome, TranscriptionRecord,
};

use super::prompt::resolve_prompt;
use super::validate::validate_image;

/// Counts reported once every image has been handled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscribeSummary {
    /// Successful responses written to disk
    pub saved: u64,
    /// Calls that failed (an error record was written)
    pub failed: u64,
    /// Images skipped as missing, unreadable, or not PNG/JPEG
    pub skipped_images: u64,
    /// (model, image) pairs skipped because the model is not installed
    pub skipped_models: u64,
    /// Records that could not be written
    pub write_errors: u64,
}

/// Runs the image transcription loop against an inference client.
pub struct Transcriber<'a> {
    client: &'a dyn InferenceClient,
    layout: ResultLayout,
    default_prompt: String,
}

/// An image that passed validation, ready to send.
struct PreparedImage {
    name: String,
    kind: ImageKind,
    prompt: String,
    encoded: ImageInput,
}

impl<'a> Transcriber<'a> {
    pub fn new(
        client: &'a dyn InferenceClient,
        layout: ResultLayout,
        default_prompt: impl Into<String>,
    ) -> Self {
        Self {
            client,
            layout,
            default_prompt: default_prompt.into(),
        }
    }

    /// Transcribe `images` with each of `models`, in order.
    ///
    /// Only the installed-model lookup can fail; per-image and per-model
    /// problems are reported through `sink` and counted in the summary.
    pub async fn run(
        &self,
        models: &[String],
        images: &[PathBuf],
        prompt_override: Option<&str>,
        sink: &mut dyn ProgressSink,
    ) -> Result<TranscribeSummary> {
        let installed: HashSet<String> = self
            .client
            .list_models()
            .await?
            .into_iter()
            .map(|m| m.name)
            .collect();
        tracing::debug!(
            "{} reports {} installed model(s)",
            self.client.name(),
            installed.len()
        );

        let mut summary = TranscribeSummary::default();

        for path in images {
            let Some(image) = self.prepare(path, prompt_override, sink) else {
                summary.skipped_images += 1;
                continue;
            };

            for model in models {
                if !installed.contains(model) {
                    sink.report(StatusLine::new(Status::Skipped, model, MODEL_NOT_INSTALLED));
                    summary.skipped_models += 1;
                    continue;
                }
                self.transcribe_one(model, &image, &mut summary, sink).await;
            }
        }

        Ok(summary)
    }

    /// Validate, read, and encode one image; `None` means it was skipped.
    fn prepare(
        &self,
        path: &Path,
        prompt_override: Option<&str>,
        sink: &mut dyn ProgressSink,
    ) -> Option<PreparedImage> {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let kind = match validate_image(path) {
            Ok(kind) => kind,
            Err(ImageError::NotFound(_)) => {
                sink.report(StatusLine::new(Status::Skipped, label, "Image not found"));
                return None;
            }
            Err(ImageError::InvalidType(_)) => {
                sink.report(StatusLine::new(
                    Status::Skipped,
                    label,
                    "Invalid image type: Not a PNG/JPEG image",
                ));
                return None;
            }
            Err(ImageError::Unreadable { message, .. }) => {
                sink.report(StatusLine::new(
                    Status::Skipped,
                    label,
                    format!("Error reading file: {message}"),
                ));
                return None;
            }
        };

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                sink.report(StatusLine::new(
                    Status::Skipped,
                    label,
                    format!("Error reading file: {e}"),
                ));
                return None;
            }
        };

        let (prompt, source) = resolve_prompt(prompt_override, path, &self.default_prompt);
        tracing::debug!("Prompt for {:?} from {:?}", path, source);

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(label);

        Some(PreparedImage {
            name,
            kind,
            prompt,
            encoded: ImageInput::from_bytes(&bytes),
        })
    }

    async fn transcribe_one(
        &self,
        model: &str,
        image: &PreparedImage,
        summary: &mut TranscribeSummary,
        sink: &mut dyn ProgressSink,
    ) {
        sink.report(StatusLine::new(
            Status::Working,
            model,
            format!("Processing {}...", image.name),
        ));

        let request = ChatRequest {
            model: model.to_string(),
            prompt: image.prompt.clone(),
            images: vec![image.encoded.clone()],
        };
        let output_file = self.layout.image_result(&image.name, model);

        let outcome = match self.client.chat(&request).await {
            Ok(response) => success_outcome(response),
            Err(e) => {
                sink.report(StatusLine::new(
                    Status::Warning,
                    model,
                    format!("Error while processing {}: {e}", image.name),
                ));
                summary.failed += 1;
                TranscriptionOutcome::Failure {
                    error: e.to_string(),
                }
            }
        };
        let succeeded = matches!(outcome, TranscriptionOutcome::Success { .. });

        let record = TranscriptionRecord {
            timestamp: now_timestamp(),
            model: model.to_string(),
            image: image.name.clone(),
            image_type: image.kind,
            outcome,
        };

        match write_json(&output_file, &record) {
            Ok(()) if succeeded => {
                summary.saved += 1;
                sink.report(StatusLine::new(
                    Status::Done,
                    model,
                    format!("Save {} result to: {}", image.name, output_file.display()),
                ));
            }
            Ok(()) => {}
            Err(e) => {
                summary.write_errors += 1;
                tracing::error!("Failed to write {:?}: {e}", output_file);
                sink.report(StatusLine::new(
                    Status::Warning,
                    model,
                    format!("Could not save {} result: {e}", image.name),
                ));
            }
        }
    }
}

fn success_outcome(response: ChatResponse) -> TranscriptionOutcome {
    TranscriptionOutcome::Success {
        response: response.content,
        metadata: ResponseMetadata {
            total_duration: response.total_duration,
            load_duration: response.load_duration,
            prompt_eval_duration: response.prompt_eval_duration,
            eval_count: response.eval_count,
        },
    }
}
