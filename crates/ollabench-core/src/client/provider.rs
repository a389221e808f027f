//! Inference client trait and request/response types.

use crate::error::ClientError;
use async_trait::async_trait;
use base64::Engine;

/// Base64-encoded image ready to send to the service.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImageInput {
    /// Encode raw image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// A model as reported by the service's installed-model listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledModel {
    /// Identifier to pass back in requests (e.g. "llava:latest")
    pub name: String,
    /// Size on disk in bytes, if reported
    pub size: Option<u64>,
}

/// A single-turn multimodal chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    /// Content of the single `user` message
    pub prompt: String,
    /// Images attached to that message
    pub images: Vec<ImageInput>,
}

/// The service's answer to a chat request, with its timing metadata.
///
/// Durations are in nanoseconds, as the service reports them.
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    /// Assistant message content
    pub content: String,
    pub total_duration: Option<u64>,
    pub load_duration: Option<u64>,
    pub prompt_eval_duration: Option<u64>,
    pub eval_count: Option<u64>,
}

/// A plain text completion request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
}

/// The service's answer to a generate request.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// Whether generation finished; timing fields are only meaningful when true
    pub done: bool,
    /// Number of generated tokens
    pub eval_count: Option<u64>,
    /// Time spent generating, in nanoseconds
    pub eval_duration: Option<u64>,
}

/// Trait that inference service clients implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the orchestrators take `&dyn InferenceClient`).
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Client name for logging (e.g. "ollama").
    fn name(&self) -> &str;

    /// List the models installed in the service.
    async fn list_models(&self) -> Result<Vec<InstalledModel>, ClientError>;

    /// Send a non-streaming multimodal chat request.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;

    /// Send a non-streaming text completion request.
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ClientError>;

    /// Version string of the running service.
    async fn version(&self) -> Result<String, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_from_bytes() {
        let input = ImageInput::from_bytes(&[0xFF, 0xD8, 0xFF]);
        assert_eq!(input.data, "/9j/");
    }

    #[test]
    fn test_image_input_empty() {
        let input = ImageInput::from_bytes(&[]);
        assert!(input.data.is_empty());
    }
}
